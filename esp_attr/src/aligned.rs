use core::fmt;
use core::ops::{Deref, DerefMut};

/// A `T` aligned to at least 4 bytes, which is what the DMA engines need.
///
/// `#[word_aligned]` and `#[dma]` wrap statics in this type.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(C, align(4))]
pub struct WordAligned<T> {
    value: T,
}

impl<T> WordAligned<T> {
    /// Usable in `static` initializers.
    pub const fn new(value: T) -> Self {
        WordAligned { value }
    }

    /// Unwraps the value, dropping the alignment guarantee.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Word-aligned address of the value, e.g. for a DMA descriptor.
    pub fn as_ptr(&self) -> *const T {
        &self.value
    }

    /// Mutable counterpart of [`as_ptr`](Self::as_ptr).
    pub fn as_mut_ptr(&mut self) -> *mut T {
        &mut self.value
    }
}

impl<T> Deref for WordAligned<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for WordAligned<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for WordAligned<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.value.fmt(f)
    }
}
