use kornia_tensor_ops::TensorOpsError;
use thiserror::Error;

/// An error type for the construction of Lie group elements.
///
/// Each variant names the invariant that was violated so callers can branch on it.
#[derive(Error, Debug, PartialEq)]
pub enum LieError {
    /// The input is not a single matrix or a batch of matrices of the required size.
    #[error("{group} matrices cannot be of shape {shape:?}")]
    ShapeError {
        /// The group being constructed, `"SO3"` or `"SE3"`.
        group: &'static str,
        /// The shape supplied by the caller.
        shape: Vec<usize>,
    },

    /// A rotation is not orthonormal or has a determinant other than +1.
    #[error("ill-formed {group} rotation, expected orthonormal with determinant +1 (failed batch indices: {invalid:?})")]
    OrthonormalityError {
        /// The group being constructed, `"SO3"` or `"SE3"`.
        group: &'static str,
        /// Batch indices of the matrices that failed the check.
        invalid: Vec<usize>,
    },

    /// The bottom-right entry of a homogeneous transform is not 1.
    #[error("affine transformation to infinity, bottom-right entry is not 1 (failed batch indices: {invalid:?})")]
    AffineError {
        /// Batch indices of the matrices that failed the check.
        invalid: Vec<usize>,
    },

    /// A batched kernel rejected its input.
    #[error(transparent)]
    TensorOpsError(#[from] TensorOpsError),
}
