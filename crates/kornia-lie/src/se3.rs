use kornia_tensor::{Tensor, Tensor3, TensorView};
use kornia_tensor_ops::isclose;
use num_traits::Float;

use crate::{
    batch::into_batch,
    error::LieError,
    orthonormal::{invalid_indices, orthonormal_mask},
    so3::RotationMatrix,
    tolerance::Tolerance,
};

const GROUP: &str = "SE3";

/// A validated batch of 3D rigid body transforms in homogeneous `4x4` form.
///
/// For every matrix the top-left `3x3` block is a proper rotation and the bottom-right entry
/// is 1, both under the [`Tolerance`] the value was built with. The translation column is
/// unconstrained. The other three entries of the last row are not checked.
#[derive(Debug, Clone)]
pub struct RigidTransform<T> {
    value: Tensor3<T>,
    shape: Vec<usize>,
    tolerance: Tolerance,
}

impl<T: Float> RigidTransform<T> {
    /// Create a transform from a single `4x4` matrix or a `[batch, 4, 4]` batch, using the
    /// default [`Tolerance`].
    ///
    /// # Errors
    ///
    /// * [`LieError::ShapeError`] if the input is not rank 2 or 3, is an empty batch, or its
    ///   trailing dimensions are not `(4, 4)`.
    /// * [`LieError::OrthonormalityError`] if the rotation block of any matrix is not a proper
    ///   rotation.
    /// * [`LieError::AffineError`] if the bottom-right entry of any matrix is not 1.
    ///
    /// # Example
    ///
    /// ```
    /// use kornia_lie::se3::RigidTransform;
    /// use kornia_tensor::Tensor2;
    ///
    /// let eye = Tensor2::<f64>::from_shape_fn([4, 4], |[i, j]| if i == j { 1.0 } else { 0.0 });
    /// let tf = RigidTransform::new(eye).unwrap();
    /// let (rotation, translation) = tf.decompose();
    /// assert_eq!(rotation.shape, [1, 3, 3]);
    /// assert_eq!(translation.shape, [1, 3]);
    /// ```
    pub fn new<const N: usize>(tensor: Tensor<T, N>) -> Result<Self, LieError> {
        Self::with_tolerance(tensor, Tolerance::default())
    }

    /// Create a transform validated under a custom tolerance.
    ///
    /// # Errors
    ///
    /// Same as [`RigidTransform::new`].
    pub fn with_tolerance<const N: usize>(
        tensor: Tensor<T, N>,
        tolerance: Tolerance,
    ) -> Result<Self, LieError> {
        let (value, shape) = into_batch(tensor, 4, GROUP)?;

        let mask = orthonormal_mask(&rotation_block(&value), &tolerance)?;
        let invalid = invalid_indices(&mask);
        if !invalid.is_empty() {
            log::debug!("rejecting {GROUP} batch, ill-formed rotation at {invalid:?}");
            return Err(LieError::OrthonormalityError {
                group: GROUP,
                invalid,
            });
        }

        let affine_mask = (0..value.shape[0])
            .map(|b| {
                isclose(
                    *value.get_unchecked([b, 3, 3]),
                    T::one(),
                    tolerance.rtol,
                    tolerance.atol,
                )
            })
            .collect::<Vec<_>>();
        let invalid = invalid_indices(&affine_mask);
        if !invalid.is_empty() {
            log::debug!("rejecting {GROUP} batch, bad homogeneous entry at {invalid:?}");
            return Err(LieError::AffineError { invalid });
        }

        log::debug!("validated {GROUP} batch of {}", value.shape[0]);

        Ok(Self {
            value,
            shape,
            tolerance,
        })
    }

    /// Create a batch of identity transforms with shape `[batch_size, 4, 4]`.
    ///
    /// # Errors
    ///
    /// Returns [`LieError::ShapeError`] if `batch_size` is zero.
    pub fn identity(batch_size: usize) -> Result<Self, LieError> {
        let eye = Tensor::from_shape_fn([batch_size, 4, 4], |[_, i, j]| {
            if i == j {
                T::one()
            } else {
                T::zero()
            }
        });
        Self::new(eye)
    }

    /// Split every transform into its rotation block and translation column.
    ///
    /// Both parts are views into the stored batch: nothing is copied or re-validated.
    ///
    /// # Returns
    ///
    /// * The rotations, shape `[batch, 3, 3]`.
    /// * The translations, shape `[batch, 3]`.
    pub fn decompose(&self) -> (TensorView<'_, T, 3>, TensorView<'_, T, 2>) {
        let translation = TensorView {
            storage: &self.value.storage,
            offset: 3,
            shape: [self.batch_size(), 3],
            strides: [self.value.strides[0], self.value.strides[1]],
        };
        (rotation_block(&self.value), translation)
    }

    /// The rotation blocks as a standalone [`RotationMatrix`].
    ///
    /// The blocks already passed validation, so they are copied without being checked again.
    /// A single `4x4` input yields a single `3x3` rotation.
    pub fn rotation(&self) -> RotationMatrix<T> {
        let shape = match self.ndim() {
            2 => vec![3, 3],
            _ => vec![self.batch_size(), 3, 3],
        };
        RotationMatrix::from_validated(
            rotation_block(&self.value).to_contiguous(),
            shape,
            self.tolerance,
        )
    }

    /// The stored batch, always shaped `[batch, 4, 4]`.
    pub fn value(&self) -> &Tensor3<T> {
        &self.value
    }

    /// The shape of the input this transform was created from.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The rank of the input this transform was created from, 2 or 3.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of matrices in the batch.
    pub fn batch_size(&self) -> usize {
        self.value.shape[0]
    }

    /// The tolerance this transform was validated with.
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Copy out the matrix at `index` of the batch, row-major.
    pub fn matrix(&self, index: usize) -> Option<[[T; 4]; 4]> {
        if index >= self.batch_size() {
            return None;
        }
        let mut m = [[T::zero(); 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = *self.value.get_unchecked([index, i, j]);
            }
        }
        Some(m)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for RigidTransform<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} shape:{:?}", self.value, self.shape)
    }
}

/// The top-left 3x3 block of every matrix of a `[batch, 4, 4]` tensor.
fn rotation_block<T>(value: &Tensor3<T>) -> TensorView<'_, T, 3> {
    TensorView {
        storage: &value.storage,
        offset: 0,
        shape: [value.shape[0], 3, 3],
        strides: value.strides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use kornia_tensor::Tensor2;

    fn eye4() -> Tensor2<f64> {
        Tensor2::from_shape_fn([4, 4], |[i, j]| if i == j { 1.0 } else { 0.0 })
    }

    #[test]
    fn test_identity_valid() -> Result<(), LieError> {
        let tf = RigidTransform::new(eye4())?;
        assert_eq!(tf.value().shape, [1, 4, 4]);
        assert_eq!(tf.value().as_slice(), eye4().as_slice());
        assert_eq!(tf.shape(), &[4, 4]);
        assert_eq!(tf.ndim(), 2);
        assert_eq!(tf.batch_size(), 1);
        Ok(())
    }

    #[test]
    fn test_decompose_identity() -> Result<(), LieError> {
        let tf = RigidTransform::new(eye4())?;
        let (r, t) = tf.decompose();
        assert_eq!(r.shape, [1, 3, 3]);
        assert_eq!(t.shape, [1, 3]);
        assert_eq!(
            r.to_contiguous().as_slice(),
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
        );
        assert_eq!(t.to_contiguous().as_slice(), &[0.0, 0.0, 0.0]);
        Ok(())
    }

    #[test]
    fn test_decompose_batch() -> Result<(), Box<dyn std::error::Error>> {
        let (s, c) = 0.7f64.sin_cos();
        #[rustfmt::skip]
        let t = Tensor3::<f64>::from_shape_vec([2, 4, 4], vec![
            c, -s, 0.0, 1.0,
            s,  c, 0.0, 2.0,
            0.0, 0.0, 1.0, 3.0,
            0.0, 0.0, 0.0, 1.0,
            1.0, 0.0, 0.0, -4.0,
            0.0, 1.0, 0.0, -5.0,
            0.0, 0.0, 1.0, -6.0,
            0.0, 0.0, 0.0, 1.0,
        ])?;
        let tf = RigidTransform::new(t)?;
        let (r, t) = tf.decompose();
        assert_eq!(
            t.to_contiguous().as_slice(),
            &[1.0, 2.0, 3.0, -4.0, -5.0, -6.0]
        );
        assert_relative_eq!(*r.get_unchecked([0, 1, 0]), s);
        assert_relative_eq!(*r.get_unchecked([1, 2, 2]), 1.0);
        assert!(crate::orthonormal::is_orthonormal(&r, &tf.tolerance())?);

        // views alias the stored batch
        assert_eq!(
            r.get_unchecked([0, 0, 0]) as *const f64,
            tf.value().get_unchecked([0, 0, 0]) as *const f64
        );
        Ok(())
    }

    #[test]
    fn test_invalid_shape() {
        let t = Tensor2::<f64>::from_shape_val([4, 3], 0.0);
        assert_eq!(
            RigidTransform::new(t).err(),
            Some(LieError::ShapeError {
                group: "SE3",
                shape: vec![4, 3]
            })
        );
    }

    #[test]
    fn test_non_orthonormal() -> Result<(), Box<dyn std::error::Error>> {
        #[rustfmt::skip]
        let t = Tensor2::<f64>::from_shape_vec([4, 4], vec![
            2.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 1.0, 0.0,
            0.0, 1.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])?;
        assert_eq!(
            RigidTransform::new(t).err(),
            Some(LieError::OrthonormalityError {
                group: "SE3",
                invalid: vec![0]
            })
        );
        Ok(())
    }

    #[test]
    fn test_affine_rejected() {
        let t = Tensor3::<f64>::from_shape_fn([3, 4, 4], |[b, i, j]| match (b, i, j) {
            (1, 3, 3) => 2.0,
            (_, i, j) if i == j => 1.0,
            _ => 0.0,
        });
        assert_eq!(
            RigidTransform::new(t).err(),
            Some(LieError::AffineError { invalid: vec![1] })
        );
    }

    #[test]
    fn test_rotation_checked_before_affine() {
        let t = Tensor2::<f64>::from_shape_fn([4, 4], |[i, j]| match (i, j) {
            (0, 0) => 3.0,
            (3, 3) => 0.0,
            (i, j) if i == j => 1.0,
            _ => 0.0,
        });
        assert!(matches!(
            RigidTransform::new(t),
            Err(LieError::OrthonormalityError { .. })
        ));
    }

    #[test]
    fn test_projective_row_not_checked() {
        let t = Tensor2::<f64>::from_shape_fn([4, 4], |[i, j]| match (i, j) {
            (3, 0) => 0.5,
            (i, j) if i == j => 1.0,
            _ => 0.0,
        });
        assert!(RigidTransform::new(t).is_ok());
    }

    #[test]
    fn test_rotation_part() -> Result<(), LieError> {
        let single = RigidTransform::new(eye4())?.rotation();
        assert_eq!(single.shape(), &[3, 3]);
        assert_eq!(single.value().shape, [1, 3, 3]);

        let batch = RigidTransform::<f64>::identity(5)?.rotation();
        assert_eq!(batch.shape(), &[5, 3, 3]);
        assert_eq!(batch.matrix(4), Some([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]));
        Ok(())
    }

    #[test]
    fn test_display() -> Result<(), LieError> {
        let tf = RigidTransform::new(eye4())?;
        assert!(tf.to_string().ends_with("shape:[4, 4]"));
        Ok(())
    }
}
