use glam::{DMat3, DQuat};
use kornia_tensor::{Tensor, Tensor3};
use num_traits::Float;
use rand::Rng;

use crate::{
    batch::into_batch,
    error::LieError,
    orthonormal::{invalid_indices, orthonormal_mask},
    tolerance::Tolerance,
};

const GROUP: &str = "SO3";

/// A validated batch of 3D rotation matrices.
///
/// Every matrix is orthonormal with determinant +1 under the [`Tolerance`] the value was built
/// with. The batch is always stored as `[batch, 3, 3]`; [`RotationMatrix::shape`] reports the
/// shape the caller passed in, so a single `3x3` input stays distinguishable from a batch of one.
#[derive(Debug, Clone)]
pub struct RotationMatrix<T> {
    value: Tensor3<T>,
    shape: Vec<usize>,
    tolerance: Tolerance,
}

impl<T: Float> RotationMatrix<T> {
    /// Create a rotation from a single `3x3` matrix or a `[batch, 3, 3]` batch, using the
    /// default [`Tolerance`].
    ///
    /// # Errors
    ///
    /// * [`LieError::ShapeError`] if the input is not rank 2 or 3, is an empty batch, or its
    ///   trailing dimensions are not `(3, 3)`.
    /// * [`LieError::OrthonormalityError`] if any matrix of the batch is not a proper rotation.
    ///   The whole batch is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use kornia_lie::so3::RotationMatrix;
    /// use kornia_tensor::Tensor2;
    ///
    /// let eye = Tensor2::<f64>::from_shape_fn([3, 3], |[i, j]| if i == j { 1.0 } else { 0.0 });
    /// let rot = RotationMatrix::new(eye).unwrap();
    /// assert_eq!(rot.shape(), &[3, 3]);
    /// assert_eq!(rot.batch_size(), 1);
    /// ```
    pub fn new<const N: usize>(tensor: Tensor<T, N>) -> Result<Self, LieError> {
        Self::with_tolerance(tensor, Tolerance::default())
    }

    /// Create a rotation validated under a custom tolerance.
    ///
    /// # Errors
    ///
    /// Same as [`RotationMatrix::new`].
    pub fn with_tolerance<const N: usize>(
        tensor: Tensor<T, N>,
        tolerance: Tolerance,
    ) -> Result<Self, LieError> {
        let (value, shape) = into_batch(tensor, 3, GROUP)?;

        let mask = orthonormal_mask(&value.view(), &tolerance)?;
        let invalid = invalid_indices(&mask);
        if !invalid.is_empty() {
            log::debug!("rejecting {GROUP} batch of {}: invalid at {invalid:?}", mask.len());
            return Err(LieError::OrthonormalityError {
                group: GROUP,
                invalid,
            });
        }

        log::debug!("validated {GROUP} batch of {}", value.shape[0]);

        Ok(Self {
            value,
            shape,
            tolerance,
        })
    }

    /// Wrap a batch whose rotations were already validated elsewhere.
    pub(crate) fn from_validated(
        value: Tensor3<T>,
        shape: Vec<usize>,
        tolerance: Tolerance,
    ) -> Self {
        Self {
            value,
            shape,
            tolerance,
        }
    }

    /// Create a batch of identity rotations with shape `[batch_size, 3, 3]`.
    ///
    /// # Errors
    ///
    /// Returns [`LieError::ShapeError`] if `batch_size` is zero.
    pub fn identity(batch_size: usize) -> Result<Self, LieError> {
        let eye = Tensor::from_shape_fn([batch_size, 3, 3], |[_, i, j]| {
            if i == j {
                T::one()
            } else {
                T::zero()
            }
        });
        Self::new(eye)
    }

    /// Create a batch of uniformly distributed random rotations with shape
    /// `[batch_size, 3, 3]`, validated under the default [`Tolerance`].
    ///
    /// The default tolerance is tight enough that `f32` rounding of the entries is usually
    /// rejected; use [`RotationMatrix::from_random_with_tolerance`] for `f32`.
    ///
    /// # Errors
    ///
    /// Same as [`RotationMatrix::from_random_with_tolerance`].
    pub fn from_random<R: Rng + ?Sized>(batch_size: usize, rng: &mut R) -> Result<Self, LieError> {
        Self::from_random_with_tolerance(batch_size, rng, Tolerance::default())
    }

    /// Create a batch of uniformly distributed random rotations with shape
    /// `[batch_size, 3, 3]`, validated under `tolerance`.
    ///
    /// Each rotation is built in `f64` from a random unit quaternion and then cast to `T`.
    ///
    /// # Errors
    ///
    /// * [`LieError::ShapeError`] if `batch_size` is zero.
    /// * [`LieError::OrthonormalityError`] if the cast to `T` loses more than `tolerance`.
    pub fn from_random_with_tolerance<R: Rng + ?Sized>(
        batch_size: usize,
        rng: &mut R,
        tolerance: Tolerance,
    ) -> Result<Self, LieError> {
        let mut data = Vec::with_capacity(batch_size * 9);
        for _ in 0..batch_size {
            let rows = rotation_rows(random_quaternion(rng));
            data.extend(rows.map(|v| T::from(v).unwrap_or_else(T::nan)));
        }

        let batch = Tensor::from_shape_vec([batch_size, 3, 3], data).map_err(|_| {
            LieError::ShapeError {
                group: GROUP,
                shape: vec![batch_size, 3, 3],
            }
        })?;
        Self::with_tolerance(batch, tolerance)
    }

    /// The stored batch, always shaped `[batch, 3, 3]`.
    pub fn value(&self) -> &Tensor3<T> {
        &self.value
    }

    /// The shape of the input this rotation was created from.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The rank of the input this rotation was created from, 2 or 3.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of matrices in the batch.
    pub fn batch_size(&self) -> usize {
        self.value.shape[0]
    }

    /// The tolerance this rotation was validated with.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Copy out the matrix at `index` of the batch, row-major.
    pub fn matrix(&self, index: usize) -> Option<[[T; 3]; 3]> {
        if index >= self.batch_size() {
            return None;
        }
        let mut m = [[T::zero(); 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = *self.value.get_unchecked([index, i, j]);
            }
        }
        Some(m)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for RotationMatrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} shape:{:?}", self.value, self.shape)
    }
}

/// Uniformly distributed unit quaternion.
fn random_quaternion<R: Rng + ?Sized>(rng: &mut R) -> DQuat {
    let r1: f64 = rng.random();
    let r2: f64 = rng.random();
    let r3: f64 = rng.random();

    let w = (1.0 - r1).sqrt() * (2.0 * std::f64::consts::PI * r2).sin();
    let x = (1.0 - r1).sqrt() * (2.0 * std::f64::consts::PI * r2).cos();
    let y = r1.sqrt() * (2.0 * std::f64::consts::PI * r3).sin();
    let z = r1.sqrt() * (2.0 * std::f64::consts::PI * r3).cos();

    DQuat::from_xyzw(x, y, z, w)
}

/// Rotation matrix of a unit quaternion, row-major.
fn rotation_rows(q: DQuat) -> [f64; 9] {
    let m = DMat3::from_quat(q);
    let (r0, r1, r2) = (m.row(0), m.row(1), m.row(2));
    [r0.x, r0.y, r0.z, r1.x, r1.y, r1.z, r2.x, r2.y, r2.z]
}
