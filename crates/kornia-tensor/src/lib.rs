#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `kornia-tensor` provides the multi-dimensional array used by the rest of the workspace: a
//! row-major [`Tensor`] whose rank is a const generic, and a borrowed, strided [`TensorView`]
//! for zero-copy slicing and axis permutation.
//!
//! Storage is reference counted, so cloning a tensor or changing its rank with
//! [`Tensor::reshape`] never copies elements.
//!
//! # Quick Start
//!
//! ```rust
//! use kornia_tensor::{Tensor2, Tensor3};
//!
//! let t = Tensor2::<f64>::from_shape_vec([2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(t.get([1, 2]), Some(&6.0));
//!
//! // prepend a unit batch dimension
//! let batched: Tensor3<f64> = t.reshape([1, 2, 3]).unwrap();
//! assert_eq!(batched.shape, [1, 2, 3]);
//!
//! // transpose the trailing matrix without copying
//! let transposed = batched.permute_axes([0, 2, 1]);
//! assert_eq!(*transposed.get_unchecked([0, 2, 1]), 6.0);
//! ```

/// Reference-counted, immutable element buffer shared by tensors and views.
pub mod storage;

/// Tensor module containing the main tensor implementation and error types.
///
/// This module provides the core [`tensor::Tensor`] struct and related functionality.
pub mod tensor;

/// View module containing non-owning tensor view implementations.
///
/// This module provides [`view::TensorView`] for creating efficient, zero-copy views
/// into existing tensor data.
pub mod view;

pub use crate::storage::TensorStorage;
pub use crate::tensor::{get_strides_from_shape, Tensor, TensorError};
pub use crate::view::TensorView;

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;

/// Type alias for a 4-dimensional tensor.
pub type Tensor4<T> = Tensor<T, 4>;
