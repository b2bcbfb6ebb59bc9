//! A position in an encoded byte buffer, bound to a codec.

use core::fmt;

use crate::{
    codec::{Binding, UnicodeBinding},
    error::EncodingError,
};

/// A cursor over a byte slice, normally positioned at a character boundary.
///
/// The cursor owns no memory: it is a byte offset annotated with the codec
/// used to interpret the bytes at that offset. All stepping is bounds-checked
/// against the end of the slice, so a cursor can never dangle; after the
/// backing memory has been reallocated, [`rebase`](Cursor::rebase) produces
/// the equivalent cursor into the new location.
pub struct Cursor<'a, B: Binding> {
    buf: &'a [u8],
    pos: usize,
    binding: B,
}

impl<'a, B: Binding> Cursor<'a, B> {
    /// Creates a cursor at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8], binding: B) -> Self {
        Cursor {
            buf,
            pos: 0,
            binding,
        }
    }

    /// Creates a cursor at byte offset `pos` of `buf`.
    ///
    /// # Panics
    ///
    /// Panics when `pos` is past the end of `buf`.
    #[must_use]
    pub fn at_offset(buf: &'a [u8], pos: usize, binding: B) -> Self {
        assert!(pos <= buf.len(), "cursor offset out of bounds");
        Cursor { buf, pos, binding }
    }

    /// The bound codec.
    #[must_use]
    pub fn binding(&self) -> B {
        self.binding
    }

    /// Byte offset from the start of the backing slice.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Bytes remaining ahead of the cursor.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The bytes ahead of the cursor.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// True when no bytes remain.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Byte length of the character under the cursor.
    ///
    /// # Errors
    ///
    /// Propagates the codec's verdict on the lead bytes.
    pub fn char_len(&self) -> Result<usize, EncodingError> {
        self.binding.char_len(self.rest())
    }

    /// Advances by one character, returning the bytes stepped over.
    ///
    /// # Errors
    ///
    /// [`EncodingError::BufferTooSmall`] when the character extends past the
    /// end of the slice, or the codec's error for a malformed lead. The
    /// cursor does not move on failure.
    pub fn advance(&mut self) -> Result<usize, EncodingError> {
        let step = self.binding.char_len(self.rest())?;
        if step > self.remaining() {
            return Err(EncodingError::BufferTooSmall { needed: step });
        }
        self.pos += step;
        Ok(step)
    }

    /// Validates the character under the cursor and advances past it.
    ///
    /// Returns `false` (cursor unmoved) when fewer than
    /// [`unity`](Binding::unity) bytes remain, when the character is invalid,
    /// or when its length exceeds `remaining`. On success, decrements
    /// `remaining` by the character's byte length.
    pub fn validate_next(&mut self, remaining: &mut usize) -> bool {
        if *remaining < self.binding.unity() {
            return false;
        }
        let window = (*remaining).min(self.remaining());
        let Some(step) = self.binding.valid_char(&self.buf[self.pos..self.pos + window]) else {
            return false;
        };
        *remaining -= step;
        self.pos += step;
        true
    }

    /// Decodes the character under the cursor without advancing.
    ///
    /// # Errors
    ///
    /// Propagates the codec's decode error.
    pub fn decode(&self) -> Result<(u32, usize), EncodingError>
    where
        B: UnicodeBinding,
    {
        self.binding.decode(self.rest())
    }

    /// A cursor `n` bytes further along, without interpreting the bytes.
    ///
    /// # Panics
    ///
    /// Panics when the new offset is past the end of the slice.
    #[must_use]
    pub fn byte_add(&self, n: usize) -> Self {
        Self::at_offset(self.buf, self.pos + n, self.binding)
    }

    /// Byte distance from `earlier` to `self`.
    #[must_use]
    pub fn byte_offset_from(&self, earlier: &Self) -> usize {
        self.pos - earlier.pos
    }

    /// The equivalent cursor into `new`, for use after the backing memory
    /// has moved (e.g. a buffer reallocation).
    ///
    /// # Panics
    ///
    /// Panics when `new` is shorter than the cursor's offset.
    #[must_use]
    pub fn rebase<'b>(&self, new: &'b [u8]) -> Cursor<'b, B> {
        Cursor::at_offset(new, self.pos, self.binding)
    }
}

impl<B: Binding> Clone for Cursor<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Binding> Copy for Cursor<'_, B> {}

/// Cursors are equal when they point at the same byte address.
impl<B: Binding> PartialEq for Cursor<'_, B> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(
            self.buf.as_ptr().wrapping_add(self.pos),
            other.buf.as_ptr().wrapping_add(other.pos),
        )
    }
}

impl<B: Binding> Eq for Cursor<'_, B> {}

impl<B: Binding> fmt::Debug for Cursor<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("encoding", &self.binding.name())
            .field("offset", &self.pos)
            .field("remaining", &self.remaining())
            .finish()
    }
}
