use kornia_tensor::Tensor;
use num_traits::Float;

use crate::error::TensorOpsError;

/// Check whether `a` is close to `b` within a relative and an absolute tolerance.
///
/// The comparison is `|a - b| <= atol + rtol * |b|`, evaluated in `f64`. It is asymmetric in
/// the same way as `numpy.isclose`: `b` is the reference value. NaN is never close to anything.
///
/// # Arguments
///
/// * `a` - The value to test.
/// * `b` - The reference value.
/// * `rtol` - The relative tolerance.
/// * `atol` - The absolute tolerance.
///
/// # Example
///
/// ```
/// use kornia_tensor_ops::isclose;
///
/// assert!(isclose(1.0f64 + 1e-9, 1.0, 1e-5, 1e-8));
/// assert!(!isclose(1e-7f64, 0.0, 1e-5, 1e-8));
/// ```
pub fn isclose<T: Float>(a: T, b: T, rtol: f64, atol: f64) -> bool {
    match (a.to_f64(), b.to_f64()) {
        (Some(a), Some(b)) => (a - b).abs() <= atol + rtol * b.abs(),
        _ => false,
    }
}

/// Check whether every element of `a` is close to the element of `b` at the same index.
///
/// # Arguments
///
/// * `a` - The tensor to test.
/// * `b` - The reference tensor.
/// * `rtol` - The relative tolerance.
/// * `atol` - The absolute tolerance.
///
/// # Errors
///
/// If the shapes of the two tensors differ, an error is returned.
///
/// # Example
///
/// ```
/// use kornia_tensor::Tensor1;
/// use kornia_tensor_ops::allclose;
///
/// let a = Tensor1::<f32>::from_shape_vec([2], vec![1.0, 2.0]).unwrap();
/// let b = Tensor1::<f32>::from_shape_vec([2], vec![1.0, 2.0]).unwrap();
/// assert!(allclose(&a, &b, 1e-5, 1e-8).unwrap());
/// ```
pub fn allclose<T: Float, const N: usize>(
    a: &Tensor<T, N>,
    b: &Tensor<T, N>,
    rtol: f64,
    atol: f64,
) -> Result<bool, TensorOpsError> {
    if a.shape != b.shape {
        return Err(TensorOpsError::ShapeMismatch(
            a.shape.to_vec(),
            b.shape.to_vec(),
        ));
    }

    Ok(a
        .iter()
        .zip(b.iter())
        .all(|(&x, &y)| isclose(x, y, rtol, atol)))
}
