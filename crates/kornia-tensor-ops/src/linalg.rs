use kornia_tensor::{Tensor, TensorView};
use num_traits::Float;

use crate::error::TensorOpsError;

/// Batched matrix product of two `[batch, rows, cols]` views.
///
/// Each output matrix is `out[b] = a[b] · b[b]`. Either operand may be a strided view, so the
/// product with a transpose (`a.permute_axes([0, 2, 1])`) needs no copy of the input.
///
/// # Arguments
///
/// * `a` - The left operand with shape `[batch, n, k]`.
/// * `b` - The right operand with shape `[batch, k, m]`.
///
/// # Returns
///
/// A new tensor with shape `[batch, n, m]`.
///
/// # Errors
///
/// If the batch sizes or the inner dimensions differ, an error is returned.
///
/// # Example
///
/// ```
/// use kornia_tensor::Tensor3;
/// use kornia_tensor_ops::bmm;
///
/// let a = Tensor3::<f64>::from_shape_vec([1, 2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let aat = bmm(&a.view(), &a.permute_axes([0, 2, 1])).unwrap();
/// assert_eq!(aat.as_slice(), &[5.0, 11.0, 11.0, 25.0]);
/// ```
pub fn bmm<T: Float>(
    a: &TensorView<'_, T, 3>,
    b: &TensorView<'_, T, 3>,
) -> Result<Tensor<T, 3>, TensorOpsError> {
    let [batch, n, k] = a.shape;
    if b.shape[0] != batch || b.shape[1] != k {
        return Err(TensorOpsError::ShapeMismatch(
            a.shape.to_vec(),
            b.shape.to_vec(),
        ));
    }
    let m = b.shape[2];

    let out = Tensor::from_shape_fn([batch, n, m], |[bi, i, j]| {
        (0..k).fold(T::zero(), |acc, l| {
            acc + *a.get_unchecked([bi, i, l]) * *b.get_unchecked([bi, l, j])
        })
    });

    Ok(out)
}

/// Determinant of every 3x3 matrix in a `[batch, 3, 3]` view, by cofactor expansion along the
/// first row.
///
/// # Errors
///
/// If the trailing dimensions are not `(3, 3)`, an error is returned.
///
/// # Example
///
/// ```
/// use kornia_tensor::Tensor3;
/// use kornia_tensor_ops::det3;
///
/// let eye = Tensor3::<f32>::from_shape_fn([2, 3, 3], |[_, i, j]| if i == j { 2.0 } else { 0.0 });
/// let det = det3(&eye.view()).unwrap();
/// assert_eq!(det.as_slice(), &[8.0, 8.0]);
/// ```
pub fn det3<T: Float>(a: &TensorView<'_, T, 3>) -> Result<Tensor<T, 1>, TensorOpsError> {
    let [batch, rows, cols] = a.shape;
    if rows != 3 || cols != 3 {
        return Err(TensorOpsError::ShapeMismatch(
            a.shape.to_vec(),
            vec![batch, 3, 3],
        ));
    }

    let out = Tensor::from_shape_fn([batch], |[b]| {
        let m = |i: usize, j: usize| *a.get_unchecked([b, i, j]);
        m(0, 0) * (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1))
            - m(0, 1) * (m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0))
            + m(0, 2) * (m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0))
    });

    Ok(out)
}
