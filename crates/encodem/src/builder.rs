//! Incremental construction of encoded strings.

use crate::{
    codec::{Binding, UnicodeBinding},
    cursor::Cursor,
    error::EncodingError,
    heap_buf::HeapBuf,
    owned::TextBuf,
    view::TextView,
};

/// A growable, append-only buffer producing text in one codec.
///
/// The builder owns its memory exclusively and keeps running byte and
/// character counts, so finalizing it is O(1):
/// [`view`](TextBuilder::view) borrows a snapshot,
/// [`build`](TextBuilder::build) moves the allocation into a [`TextBuf`],
/// and [`to_text_buf`](TextBuilder::to_text_buf) deep-copies it.
#[derive(Debug)]
pub struct TextBuilder<B: Binding> {
    buf: HeapBuf,
    binding: B,
    siz: usize,
    len: usize,
}

impl<B: Binding> TextBuilder<B> {
    /// An empty builder for the given codec.
    #[must_use]
    pub fn new(binding: B) -> Self {
        TextBuilder {
            buf: HeapBuf::new(),
            binding,
            siz: 0,
            len: 0,
        }
    }

    /// An empty builder with `cap` bytes preallocated.
    #[must_use]
    pub fn with_capacity(binding: B, cap: usize) -> Self {
        TextBuilder {
            buf: HeapBuf::with_capacity(cap),
            binding,
            siz: 0,
            len: 0,
        }
    }

    /// The bound codec.
    #[must_use]
    pub fn binding(&self) -> B {
        self.binding
    }

    /// Number of characters appended so far.
    #[must_use]
    pub fn length(&self) -> usize {
        self.len
    }

    /// Number of bytes appended so far.
    #[must_use]
    pub fn size(&self) -> usize {
        self.siz
    }

    /// True when nothing has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current capacity of the underlying buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The bytes appended so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf.as_slice()[..self.siz]
    }

    /// Discards the contents, keeping the allocation.
    pub fn clear(&mut self) {
        self.siz = 0;
        self.len = 0;
    }

    fn append_raw(&mut self, bytes: &[u8], chars: usize) -> usize {
        self.buf.grow_to(self.siz + bytes.len());
        self.buf.as_mut_slice()[self.siz..self.siz + bytes.len()].copy_from_slice(bytes);
        self.siz += bytes.len();
        self.len += chars;
        bytes.len()
    }

    /// Appends the character under `ch` without validating it, returning the
    /// bytes appended. The cursor must be bound to this builder's codec.
    ///
    /// # Errors
    ///
    /// The codec's length error, or [`EncodingError::BufferTooSmall`] when
    /// the character is cut off at the cursor's end.
    pub fn append_char(&mut self, ch: Cursor<'_, B>) -> Result<usize, EncodingError> {
        debug_assert!(self.binding.same_encoding(ch.binding()));
        let step = ch.char_len()?;
        if ch.remaining() < step {
            return Err(EncodingError::BufferTooSmall { needed: step });
        }
        Ok(self.append_raw(&ch.rest()[..step], 1))
    }

    /// As [`append_char`](TextBuilder::append_char), but validates the
    /// character first.
    ///
    /// # Errors
    ///
    /// [`EncodingError::Malformed`] when validation fails; nothing is
    /// appended.
    pub fn append_char_validated(&mut self, ch: Cursor<'_, B>) -> Result<usize, EncodingError> {
        debug_assert!(self.binding.same_encoding(ch.binding()));
        let Some(step) = self.binding.valid_char(ch.rest()) else {
            return Err(EncodingError::Malformed);
        };
        Ok(self.append_raw(&ch.rest()[..step], 1))
    }

    /// Appends a whole view of the same codec, returning the bytes appended.
    pub fn append_view(&mut self, s: &TextView<'_, B>) -> usize {
        debug_assert!(self.binding.same_encoding(s.binding()));
        self.append_raw(s.as_bytes(), s.length())
    }

    /// Encodes one code point, returning the bytes appended.
    ///
    /// # Errors
    ///
    /// [`EncodingError::InvalidCodePoint`] when the codec cannot represent
    /// `cp`.
    pub fn append_code_point(&mut self, cp: u32) -> Result<usize, EncodingError>
    where
        B: UnicodeBinding,
    {
        if let Some(max) = self.binding.max_bytes() {
            self.buf.grow_to(self.siz + max);
        }
        loop {
            let binding = self.binding;
            match binding.encode(cp, &mut self.buf.as_mut_slice()[self.siz..]) {
                Ok(written) => {
                    self.siz += written;
                    self.len += 1;
                    return Ok(written);
                }
                Err(EncodingError::BufferTooSmall { needed }) => {
                    self.buf.grow_to(self.siz + needed);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Appends `s`, re-encoding each character into this builder's codec.
    ///
    /// This is the crate's single cross-encoding conversion point; a view of
    /// the same codec is appended bytewise without decoding. Returns the
    /// bytes appended.
    ///
    /// # Errors
    ///
    /// Decode errors from `s`, or [`EncodingError::InvalidCodePoint`] when
    /// this codec cannot represent one of its characters; the characters
    /// converted before the failure remain appended.
    pub fn append_converted<C: UnicodeBinding>(
        &mut self,
        s: &TextView<'_, C>,
    ) -> Result<usize, EncodingError>
    where
        B: UnicodeBinding,
    {
        if self.binding.same_encoding(s.binding()) {
            return Ok(self.append_raw(s.as_bytes(), s.length()));
        }
        let before = self.siz;
        let mut cur = s.begin();
        for _ in 0..s.length() {
            let (cp, step) = cur.decode()?;
            self.append_code_point(cp)?;
            cur = cur.byte_add(step);
        }
        Ok(self.siz - before)
    }

    /// A non-owning snapshot of the current contents.
    #[must_use]
    pub fn view(&self) -> TextView<'_, B> {
        TextView::from_trusted_parts(self.as_bytes(), self.len, self.binding)
    }

    /// Finishes the string, transferring the allocation without copying.
    #[must_use]
    pub fn build(mut self) -> TextBuf<B> {
        TextBuf::from_raw(self.buf.take(), self.siz, self.len, self.binding)
    }

    /// Finishes the string into a fresh allocation, leaving the builder
    /// usable.
    #[must_use]
    pub fn to_text_buf(&self) -> TextBuf<B> {
        TextBuf::from_view(&self.view())
    }
}
