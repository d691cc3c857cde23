use crate::{storage::TensorStorage, tensor::unravel_index, Tensor};

/// A non-owning, strided view into tensor data.
///
/// `TensorView` borrows the storage of a [`Tensor`] and addresses it through its own offset,
/// shape and strides. This is how sub-blocks of a batch (for example the rotation block or the
/// translation column of a stack of 4x4 transforms) are exposed without copying.
///
/// # Examples
///
/// ```rust
/// use kornia_tensor::Tensor2;
///
/// let tensor = Tensor2::<i32>::from_shape_vec([2, 2], vec![1, 2, 3, 4]).unwrap();
///
/// // Permute creates a non-contiguous view
/// let view = tensor.permute_axes([1, 0]);
///
/// // Convert to an owned contiguous tensor
/// let contiguous = view.to_contiguous();
/// assert_eq!(contiguous.as_slice(), &[1, 3, 2, 4]);
/// ```
pub struct TensorView<'a, T, const N: usize> {
    /// Reference to the storage held by another tensor.
    pub storage: &'a TensorStorage<T>,

    /// Offset, in elements, of the first element of the view.
    pub offset: usize,

    /// The shape of the tensor view.
    pub shape: [usize; N],

    /// The strides for accessing elements in the view.
    pub strides: [usize; N],
}

impl<'a, T, const N: usize> TensorView<'a, T, N> {
    /// Returns the total number of elements addressed by the view.
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Gets the element at the given index without checking the per-dimension bounds.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset falls outside the underlying storage.
    pub fn get_unchecked(&self, index: [usize; N]) -> &'a T {
        let offset = index
            .iter()
            .zip(self.strides)
            .fold(self.offset, |acc, (&idx, stride)| acc + idx * stride);
        &self.storage.as_slice()[offset]
    }

    /// Gets the element at the given index, or `None` if the index is out of bounds.
    pub fn get(&self, index: [usize; N]) -> Option<&'a T> {
        let mut offset = self.offset;
        for ((&idx, dim_size), stride) in index.iter().zip(self.shape).zip(self.strides) {
            if idx >= dim_size {
                return None;
            }
            offset += idx * stride;
        }
        self.storage.as_slice().get(offset)
    }

    /// Permutes the dimensions of the view without touching the data.
    pub fn permute_axes(&self, axes: [usize; N]) -> TensorView<'a, T, N> {
        let mut shape = [0; N];
        let mut strides = [0; N];
        for (i, &axis) in axes.iter().enumerate() {
            shape[i] = self.shape[axis];
            strides[i] = self.strides[axis];
        }

        TensorView {
            storage: self.storage,
            offset: self.offset,
            shape,
            strides,
        }
    }

    /// Returns an iterator over the elements of the view in row-major order of its shape.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        (0..self.numel()).map(move |i| self.get_unchecked(unravel_index(&self.shape, i)))
    }

    /// Copies the elements addressed by the view into a new standard-layout tensor.
    pub fn to_contiguous(&self) -> Tensor<T, N>
    where
        T: Clone,
    {
        Tensor::from_shape_fn(self.shape, |index| self.get_unchecked(index).clone())
    }
}

impl<T, const N: usize> Clone for TensorView<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const N: usize> Copy for TensorView<'_, T, N> {}

impl<T: std::fmt::Debug, const N: usize> std::fmt::Debug for TensorView<'_, T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorView")
            .field("offset", &self.offset)
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .finish()
    }
}
