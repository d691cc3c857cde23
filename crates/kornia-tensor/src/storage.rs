use std::sync::Arc;

/// Immutable tensor storage backed by a reference-counted slice.
///
/// Clones only bump the reference count, so several tensors and views can share the same
/// elements with different shapes, strides and offsets.
pub struct TensorStorage<T> {
    inner: Arc<[T]>,
}

impl<T> TensorStorage<T> {
    /// Takes ownership of the vector and moves it into shared storage.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: Arc::from(data),
        }
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    /// Returns the number of elements in the storage.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the storage holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if no other tensor shares this storage.
    #[inline]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Copies the elements into a new vector.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.inner.to_vec()
    }
}

impl<T> Clone for TensorStorage<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for TensorStorage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TensorStorage")
            .field("len", &self.len())
            .field("data", &self.as_slice())
            .finish()
    }
}
