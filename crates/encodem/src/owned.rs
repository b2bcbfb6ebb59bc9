//! Owned encoded strings.

use core::fmt;

use crate::{
    codec::Binding, error::EncodingError, heap_buf::HeapBuf, view::TextView,
};

/// An owned encoded string: a [`HeapBuf`] plus exact character and byte
/// counts.
///
/// Views into the string are derived on demand from the stored counts, so
/// moving a `TextBuf` can never invalidate anything; there is no pointer to
/// rebase.
pub struct TextBuf<B: Binding> {
    buf: HeapBuf,
    siz: usize,
    len: usize,
    binding: B,
}

impl<B: Binding> TextBuf<B> {
    pub(crate) fn from_raw(buf: HeapBuf, siz: usize, len: usize, binding: B) -> Self {
        debug_assert!(siz <= buf.capacity());
        TextBuf {
            buf,
            siz,
            len,
            binding,
        }
    }

    /// An owned deep copy of `view`.
    #[must_use]
    pub fn from_view(view: &TextView<'_, B>) -> Self {
        let mut buf = HeapBuf::with_capacity(view.size());
        buf.as_mut_slice().copy_from_slice(view.as_bytes());
        TextBuf {
            buf,
            siz: view.size(),
            len: view.length(),
            binding: view.binding(),
        }
    }

    /// A view of the whole string.
    #[must_use]
    pub fn as_view(&self) -> TextView<'_, B> {
        TextView::from_trusted_parts(self.as_bytes(), self.len, self.binding)
    }

    /// Number of characters.
    #[must_use]
    pub fn length(&self) -> usize {
        self.len
    }

    /// Number of bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.siz
    }

    /// Capacity of the backing allocation.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The bound codec.
    #[must_use]
    pub fn binding(&self) -> B {
        self.binding
    }

    /// The string's bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf.as_slice()[..self.siz]
    }

    /// Validates every character against the stored counts.
    ///
    /// # Errors
    ///
    /// As [`TextView::verify`].
    pub fn verify(&self) -> Result<(), EncodingError> {
        self.as_view().verify()
    }
}

/// Deep copy, like the explicit `copy` of the underlying buffer.
impl<B: Binding> Clone for TextBuf<B> {
    fn clone(&self) -> Self {
        TextBuf::from_view(&self.as_view())
    }
}

impl<B: Binding> PartialEq for TextBuf<B> {
    fn eq(&self, other: &Self) -> bool {
        self.as_view() == other.as_view()
    }
}

impl<B: Binding> Eq for TextBuf<B> {}

impl<B: Binding> fmt::Debug for TextBuf<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_view(), f)
    }
}
