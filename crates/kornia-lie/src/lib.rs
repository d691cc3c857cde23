#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Lie Groups
//!
//! This crate wraps batches of raw matrices into validated Lie group elements used in robotics
//! and computer vision pipelines. Validation happens once, at construction; a value that
//! exists is always valid.
//!
//! ## Supported Groups
//!
//! - **SO(3)**: [`so3::RotationMatrix`], orthonormal `3x3` matrices with determinant +1
//! - **SE(3)**: [`se3::RigidTransform`], homogeneous `4x4` matrices whose top-left block is in
//!   SO(3) and whose bottom-right entry is 1
//!
//! Both accept either a single matrix or a `[batch, n, n]` stack and store a batch internally.
//! A batch is accepted only if every matrix in it passes.
//!
//! ## Example
//!
//! ```rust
//! use kornia_lie::{se3::RigidTransform, LieError};
//! use kornia_tensor::Tensor2;
//!
//! let mut data = vec![0.0f64; 16];
//! for i in 0..4 {
//!     data[i * 4 + i] = 1.0;
//! }
//! data[3] = 0.5; // translation x
//! let tf = RigidTransform::new(Tensor2::from_shape_vec([4, 4], data).unwrap()).unwrap();
//! let (_rotation, translation) = tf.decompose();
//! assert_eq!(*translation.get_unchecked([0, 0]), 0.5);
//!
//! data = vec![0.0; 16];
//! assert!(matches!(
//!     RigidTransform::new(Tensor2::from_shape_vec([4, 4], data).unwrap()),
//!     Err(LieError::OrthonormalityError { .. })
//! ));
//! ```

mod batch;

/// Error types for the construction of group elements.
pub mod error;

/// Shared orthonormality check for batches of 3x3 matrices.
pub mod orthonormal;

/// Special Euclidean group SE(3) for 3D rigid transformations.
pub mod se3;

/// Special Orthogonal group SO(3) for 3D rotations.
pub mod so3;

/// Numerical tolerance configuration.
pub mod tolerance;

pub use error::LieError;
pub use se3::RigidTransform;
pub use so3::RotationMatrix;
pub use tolerance::Tolerance;
