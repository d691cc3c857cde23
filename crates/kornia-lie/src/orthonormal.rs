use kornia_tensor::TensorView;
use kornia_tensor_ops::{bmm, det3, isclose};
use num_traits::Float;

use crate::{error::LieError, tolerance::Tolerance};

/// Check every 3x3 matrix of a batch for membership in SO(3).
///
/// For each matrix `M` the product `M · Mᵗ` must be close to the identity and `det(M)` must be
/// close to 1, both under `tol`. The batch may be a strided view, e.g. the rotation block of a
/// stack of homogeneous transforms.
///
/// # Arguments
///
/// * `batch` - A view with shape `[batch, 3, 3]`.
/// * `tol` - The tolerance of both closeness checks.
///
/// # Returns
///
/// One flag per matrix, `true` where the matrix is a proper rotation.
///
/// # Errors
///
/// If the trailing dimensions of `batch` are not `(3, 3)`, an error is returned.
pub fn orthonormal_mask<T: Float>(
    batch: &TensorView<'_, T, 3>,
    tol: &Tolerance,
) -> Result<Vec<bool>, LieError> {
    let gram = bmm(batch, &batch.permute_axes([0, 2, 1]))?;
    let det = det3(batch)?;

    let mask = det
        .iter()
        .enumerate()
        .map(|(b, &d)| {
            let orthogonal = (0..3).all(|i| {
                (0..3).all(|j| {
                    let expected = if i == j { T::one() } else { T::zero() };
                    isclose(*gram.get_unchecked([b, i, j]), expected, tol.rtol, tol.atol)
                })
            });
            orthogonal && isclose(d, T::one(), tol.rtol, tol.atol)
        })
        .collect();

    Ok(mask)
}

/// Returns true only if every matrix of the batch is a proper rotation.
///
/// This is the batch-wide AND of [`orthonormal_mask`].
///
/// # Example
///
/// ```
/// use kornia_lie::orthonormal::is_orthonormal;
/// use kornia_lie::tolerance::Tolerance;
/// use kornia_tensor::Tensor3;
///
/// let eye = Tensor3::<f64>::from_shape_fn([2, 3, 3], |[_, i, j]| if i == j { 1.0 } else { 0.0 });
/// assert!(is_orthonormal(&eye.view(), &Tolerance::default()).unwrap());
/// ```
pub fn is_orthonormal<T: Float>(
    batch: &TensorView<'_, T, 3>,
    tol: &Tolerance,
) -> Result<bool, LieError> {
    Ok(orthonormal_mask(batch, tol)?.into_iter().all(|valid| valid))
}

/// Batch indices where `mask` is false.
pub(crate) fn invalid_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(i, &valid)| (!valid).then_some(i))
        .collect()
}
