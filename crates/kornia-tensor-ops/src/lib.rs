#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for tensor operations.
///
/// Defines [`TensorOpsError`] for handling failures during tensor computations.
pub mod error;

/// Batched small-matrix linear algebra.
///
/// Matrix products and 3x3 determinants evaluated independently for every matrix of a
/// `[batch, rows, cols]` view.
pub mod linalg;

/// Element-wise and whole-tensor closeness tests.
pub mod ops;

pub use error::TensorOpsError;
pub use linalg::{bmm, det3};
pub use ops::{allclose, isclose};
