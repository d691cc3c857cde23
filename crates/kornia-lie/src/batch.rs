use kornia_tensor::Tensor;

use crate::error::LieError;

/// Normalize a single matrix or a batch of matrices into a `[batch, dim, dim]` tensor.
///
/// A rank-2 input gets a unit batch dimension prepended; the storage is shared, not copied.
/// Returns the batched tensor together with the shape the caller supplied.
pub(crate) fn into_batch<T, const N: usize>(
    tensor: Tensor<T, N>,
    dim: usize,
    group: &'static str,
) -> Result<(Tensor<T, 3>, Vec<usize>), LieError> {
    let shape = tensor.shape.to_vec();
    let shape_error = || LieError::ShapeError {
        group,
        shape: shape.clone(),
    };

    let batch_shape = match shape.as_slice() {
        [rows, cols] => [1, *rows, *cols],
        [batch, rows, cols] => [*batch, *rows, *cols],
        _ => return Err(shape_error()),
    };

    if batch_shape[0] == 0 || batch_shape[1] != dim || batch_shape[2] != dim {
        return Err(shape_error());
    }

    let batch = tensor.reshape(batch_shape).map_err(|_| shape_error())?;

    Ok((batch, shape))
}
