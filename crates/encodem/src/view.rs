//! Non-owning views over encoded byte ranges.
//!
//! A [`TextView`] pairs a byte range with a codec binding and the range's
//! character count. Both counts are exact by construction: decoding
//! `length()` consecutive characters from the start consumes exactly
//! `size()` bytes. The constructors establish this by walking the bytes
//! once with the codec's length function; that walk is tuned for speed, not
//! trust — call [`verify`](TextView::verify) before believing the counts of
//! data that came from an untrusted source.

use core::fmt;

use bstr::ByteSlice;

use crate::{
    builder::TextBuilder,
    codec::{Ascii, Binding, DynBinding, DynEncoding, Encoding, Opaque, StaticBinding, Utf8,
            UnicodeBinding},
    cursor::Cursor,
    error::EncodingError,
    owned::TextBuf,
};

/// A non-owning window over an encoded byte range with known character and
/// byte counts.
pub struct TextView<'a, B: Binding> {
    bytes: &'a [u8],
    len: usize,
    binding: B,
}

impl<'a, B: Binding> TextView<'a, B> {
    /// Views the whole of `bytes` as text, counting its characters.
    ///
    /// # Errors
    ///
    /// The codec's error for a malformed lead byte, or
    /// [`EncodingError::BufferTooSmall`] when the final character is cut off
    /// by the end of the slice.
    pub fn from_bytes(bytes: &'a [u8], binding: B) -> Result<Self, EncodingError> {
        let (len, siz) = scan_chars(bytes, binding, None)?;
        debug_assert_eq!(siz, bytes.len());
        Ok(TextView {
            bytes,
            len,
            binding,
        })
    }

    /// Views the first `len` characters of `bytes`.
    ///
    /// # Errors
    ///
    /// As [`from_bytes`](TextView::from_bytes), plus
    /// [`EncodingError::BufferTooSmall`] when `bytes` holds fewer than `len`
    /// characters.
    pub fn with_length(bytes: &'a [u8], len: usize, binding: B) -> Result<Self, EncodingError> {
        let (chars, siz) = scan_chars(bytes, binding, Some(len))?;
        if chars < len {
            return Err(EncodingError::BufferTooSmall {
                needed: bytes.len() + binding.unity(),
            });
        }
        Ok(TextView {
            bytes: &bytes[..siz],
            len,
            binding,
        })
    }

    /// Views `bytes` with an explicit character count, checking both agree.
    ///
    /// # Errors
    ///
    /// [`EncodingError::LengthMismatch`] when walking `bytes` does not yield
    /// exactly `len` characters, or the underlying walk error.
    pub fn from_parts(bytes: &'a [u8], len: usize, binding: B) -> Result<Self, EncodingError> {
        let view = Self::from_bytes(bytes, binding)?;
        if view.len != len {
            return Err(EncodingError::LengthMismatch);
        }
        Ok(view)
    }

    /// Views `bytes` up to (not including) the first all-zero character, or
    /// the whole slice when no terminator occurs.
    ///
    /// # Errors
    ///
    /// The codec's error for a malformed lead byte.
    pub fn until_nul(bytes: &'a [u8], binding: B) -> Result<Self, EncodingError> {
        let unity = binding.unity();
        let mut len = 0;
        let mut siz = 0;
        loop {
            let rest = &bytes[siz..];
            if rest.len() < unity || rest[..unity].iter().all(|b| *b == 0) {
                break;
            }
            let step = binding.char_len(rest)?;
            if step > rest.len() {
                break;
            }
            siz += step;
            len += 1;
        }
        Ok(TextView {
            bytes: &bytes[..siz],
            len,
            binding,
        })
    }

    /// Builds a view from counts the caller already knows to be exact.
    pub(crate) fn from_trusted_parts(bytes: &'a [u8], len: usize, binding: B) -> Self {
        TextView {
            bytes,
            len,
            binding,
        }
    }

    /// Number of characters.
    #[must_use]
    pub fn length(&self) -> usize {
        self.len
    }

    /// Number of bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// True when the view holds no characters (and therefore no bytes).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The underlying bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The bound codec.
    #[must_use]
    pub fn binding(&self) -> B {
        self.binding
    }

    /// The bytes as UTF-8 text, when they happen to be valid UTF-8.
    ///
    /// Only meaningful for byte-compatible formats (UTF-8, ASCII).
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        core::str::from_utf8(self.bytes).ok()
    }

    /// Cursor at the first character.
    #[must_use]
    pub fn begin(&self) -> Cursor<'a, B> {
        Cursor::new(self.bytes, self.binding)
    }

    /// Cursor one past the last character.
    #[must_use]
    pub fn end(&self) -> Cursor<'a, B> {
        Cursor::at_offset(self.bytes, self.bytes.len(), self.binding)
    }

    /// Cursor at character index `chr` (`0..=length()`).
    ///
    /// # Errors
    ///
    /// Walk errors surface only when the view's invariant was violated via
    /// [`from_trusted_parts`] misuse or a concurrent buffer change.
    pub fn at(&self, chr: usize) -> Result<Cursor<'a, B>, EncodingError> {
        let offset = self.offset_of(chr)?;
        Ok(Cursor::at_offset(self.bytes, offset, self.binding))
    }

    /// Byte offset of character index `chr` (clamped to `length()`).
    fn offset_of(&self, chr: usize) -> Result<usize, EncodingError> {
        let chr = chr.min(self.len);
        let mut offset = 0;
        for _ in 0..chr {
            offset += self.binding.char_len(&self.bytes[offset..])?;
        }
        Ok(offset)
    }

    /// Bytes occupied by the `n` characters starting at character index `a`.
    ///
    /// # Errors
    ///
    /// As [`at`](TextView::at).
    pub fn size_of_range(&self, a: usize, n: usize) -> Result<usize, EncodingError> {
        let start = self.offset_of(a)?;
        let mut offset = start;
        for _ in 0..n.min(self.len.saturating_sub(a)) {
            offset += self.binding.char_len(&self.bytes[offset..])?;
        }
        Ok(offset - start)
    }

    /// The characters `begin..end`, sharing this view's memory.
    ///
    /// `end` is clamped to `length()`; an inverted range yields an empty
    /// view.
    ///
    /// # Errors
    ///
    /// As [`at`](TextView::at).
    pub fn substring(&self, begin: usize, end: usize) -> Result<TextView<'a, B>, EncodingError> {
        let end = end.min(self.len);
        let begin = begin.min(end);
        let start = self.offset_of(begin)?;
        let mut stop = start;
        for _ in begin..end {
            stop += self.binding.char_len(&self.bytes[stop..])?;
        }
        Ok(TextView {
            bytes: &self.bytes[start..stop],
            len: end - begin,
            binding: self.binding,
        })
    }

    /// The characters from `begin` to the end of the view.
    ///
    /// # Errors
    ///
    /// As [`at`](TextView::at).
    pub fn suffix(&self, begin: usize) -> Result<TextView<'a, B>, EncodingError> {
        self.substring(begin, self.len)
    }

    /// Validates every character and checks the stored counts.
    ///
    /// The constructors establish counts with the fast, trusting length
    /// walk; call this before relying on a view built over untrusted input.
    ///
    /// # Errors
    ///
    /// [`EncodingError::Malformed`] on the first invalid character,
    /// [`EncodingError::LengthMismatch`] when the counts disagree with a
    /// fully valid walk.
    pub fn verify(&self) -> Result<(), EncodingError> {
        let mut cur = self.begin();
        let mut remaining = self.bytes.len();
        let mut chars = 0;
        while remaining > 0 {
            if !cur.validate_next(&mut remaining) {
                return Err(EncodingError::Malformed);
            }
            chars += 1;
        }
        if chars != self.len {
            return Err(EncodingError::LengthMismatch);
        }
        Ok(())
    }

    /// True when [`verify`](TextView::verify) succeeds.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.verify().is_ok()
    }

    /// Raw-byte character search within a same-codec view.
    pub(crate) fn contains_char_bytes(&self, ch: &[u8]) -> Result<bool, EncodingError> {
        let mut offset = 0;
        for _ in 0..self.len {
            let step = self.binding.char_len(&self.bytes[offset..])?;
            if &self.bytes[offset..offset + step] == ch {
                return Ok(true);
            }
            offset += step;
        }
        Ok(false)
    }
}

/// Walks `bytes` by character length, stopping after `limit` characters when
/// given. Returns `(characters, bytes)` consumed.
fn scan_chars<B: Binding>(
    bytes: &[u8],
    binding: B,
    limit: Option<usize>,
) -> Result<(usize, usize), EncodingError> {
    let mut len = 0;
    let mut siz = 0;
    while siz < bytes.len() && limit.is_none_or(|l| len < l) {
        let step = binding.char_len(&bytes[siz..])?;
        if siz + step > bytes.len() {
            return Err(EncodingError::BufferTooSmall {
                needed: siz + step,
            });
        }
        siz += step;
        len += 1;
    }
    Ok((len, siz))
}

impl<'a, B: UnicodeBinding> TextView<'a, B> {
    /// Compares the first `n` characters with `other` by decoded code point,
    /// or by raw bytes when both views share the codec.
    ///
    /// Returns `false` when either view holds fewer than `n` characters.
    ///
    /// # Errors
    ///
    /// Decode errors from either side.
    pub fn eq_prefix<C: UnicodeBinding>(
        &self,
        other: &TextView<'_, C>,
        n: usize,
    ) -> Result<bool, EncodingError> {
        if n > self.len || n > other.len {
            return Ok(false);
        }
        let same = self.binding.same_encoding(other.binding);
        let mut a = self.begin();
        let mut b = other.begin();
        for _ in 0..n {
            if same {
                let la = a.char_len()?;
                let lb = b.char_len()?;
                if la != lb || a.rest()[..la] != b.rest()[..lb] {
                    return Ok(false);
                }
                a = a.byte_add(la);
                b = b.byte_add(lb);
            } else {
                let (ca, la) = a.decode()?;
                let (cb, lb) = b.decode()?;
                if ca != cb {
                    return Ok(false);
                }
                a = a.byte_add(la);
                b = b.byte_add(lb);
            }
        }
        Ok(true)
    }

    /// Full equality against a view of a possibly different codec, by
    /// decoded code points.
    ///
    /// # Errors
    ///
    /// Decode errors from either side.
    pub fn eq_view<C: UnicodeBinding>(
        &self,
        other: &TextView<'_, C>,
    ) -> Result<bool, EncodingError> {
        if self.len != other.len {
            return Ok(false);
        }
        if self.binding.same_encoding(other.binding) {
            return Ok(self.bytes == other.bytes);
        }
        self.eq_prefix(other, self.len)
    }

    /// Character index of the first occurrence of `needle`.
    ///
    /// # Errors
    ///
    /// Decode errors from either side.
    pub fn index_of<C: UnicodeBinding>(
        &self,
        needle: &TextView<'_, C>,
    ) -> Result<Option<usize>, EncodingError> {
        Ok(self.locate(needle)?.map(|(chars, _)| chars))
    }

    /// Byte offset of the first occurrence of `needle`.
    ///
    /// # Errors
    ///
    /// Decode errors from either side.
    pub fn bytes_of<C: UnicodeBinding>(
        &self,
        needle: &TextView<'_, C>,
    ) -> Result<Option<usize>, EncodingError> {
        Ok(self.locate(needle)?.map(|(_, bytes)| bytes))
    }

    fn locate<C: UnicodeBinding>(
        &self,
        needle: &TextView<'_, C>,
    ) -> Result<Option<(usize, usize)>, EncodingError> {
        if needle.len > self.len {
            return Ok(None);
        }
        let mut offset = 0;
        for idx in 0..=(self.len - needle.len) {
            let window = TextView::from_trusted_parts(
                &self.bytes[offset..],
                self.len - idx,
                self.binding,
            );
            if window.eq_prefix(needle, needle.len)? {
                return Ok(Some((idx, offset)));
            }
            offset += self.binding.char_len(&self.bytes[offset..])?;
        }
        Ok(None)
    }

    /// True when the view begins with `prefix`.
    ///
    /// # Errors
    ///
    /// Decode errors from either side.
    pub fn starts_with<C: UnicodeBinding>(
        &self,
        prefix: &TextView<'_, C>,
    ) -> Result<bool, EncodingError> {
        self.eq_prefix(prefix, prefix.len)
    }

    /// True when the view ends with `suffix`.
    ///
    /// # Errors
    ///
    /// Decode errors from either side.
    pub fn ends_with<C: UnicodeBinding>(
        &self,
        suffix: &TextView<'_, C>,
    ) -> Result<bool, EncodingError> {
        if suffix.len > self.len {
            return Ok(false);
        }
        let tail = self.suffix(self.len - suffix.len)?;
        tail.eq_prefix(suffix, suffix.len)
    }

    /// True when any character of the view equals the character under `ch`.
    ///
    /// # Errors
    ///
    /// Decode errors from either side.
    pub fn contains_char<C: UnicodeBinding>(
        &self,
        ch: Cursor<'_, C>,
    ) -> Result<bool, EncodingError> {
        if self.binding.same_encoding(ch.binding()) {
            let step = ch.char_len()?;
            if ch.remaining() < step {
                return Err(EncodingError::BufferTooSmall { needed: step });
            }
            return self.contains_char_bytes(&ch.rest()[..step]);
        }
        let (target, _) = ch.decode()?;
        let mut cur = self.begin();
        for _ in 0..self.len {
            let (cp, step) = cur.decode()?;
            if cp == target {
                return Ok(true);
            }
            cur = cur.byte_add(step);
        }
        Ok(false)
    }

    /// Re-encodes the view into codec `S`.
    ///
    /// # Errors
    ///
    /// Decode errors from this view, [`EncodingError::InvalidCodePoint`]
    /// when `S` cannot represent one of its characters.
    pub fn convert<S: Encoding<Value = u32>>(
        &self,
    ) -> Result<TextBuf<StaticBinding<S>>, EncodingError> {
        let mut out = TextBuilder::new(StaticBinding::<S>::new());
        out.append_converted(self)?;
        Ok(out.build())
    }

    /// Re-encodes the view into a runtime-selected codec.
    ///
    /// # Errors
    ///
    /// As [`convert`](TextView::convert).
    pub fn convert_dyn(
        &self,
        encoding: &'static dyn DynEncoding,
    ) -> Result<TextBuf<DynBinding>, EncodingError> {
        let mut out = TextBuilder::new(DynBinding::new(encoding));
        out.append_converted(self)?;
        Ok(out.build())
    }

    /// This view followed by `other`, re-encoded into this view's codec.
    ///
    /// # Errors
    ///
    /// As [`convert`](TextView::convert), for the characters of `other`.
    pub fn concat<C: UnicodeBinding>(
        &self,
        other: &TextView<'_, C>,
    ) -> Result<TextBuf<B>, EncodingError> {
        let mut out = TextBuilder::with_capacity(self.binding, self.size() + other.size());
        out.append_view(self);
        out.append_converted(other)?;
        Ok(out.build())
    }
}

impl<'a> TextView<'a, StaticBinding<Utf8>> {
    /// Views a Rust string as UTF-8 text.
    #[must_use]
    pub fn from_str(s: &'a str) -> Self {
        TextView {
            bytes: s.as_bytes(),
            len: s.chars().count(),
            binding: StaticBinding::new(),
        }
    }
}

impl<'a> TextView<'a, StaticBinding<Ascii>> {
    /// Views `bytes` as ASCII text, validating every byte.
    ///
    /// # Errors
    ///
    /// [`EncodingError::Malformed`] when any byte has the high bit set.
    pub fn ascii(bytes: &'a [u8]) -> Result<Self, EncodingError> {
        if bytes.iter().any(|b| *b >= 0x80) {
            return Err(EncodingError::Malformed);
        }
        Ok(TextView {
            bytes,
            len: bytes.len(),
            binding: StaticBinding::new(),
        })
    }
}

impl<'a> TextView<'a, StaticBinding<Opaque>> {
    /// Views arbitrary bytes as an opaque one-byte-per-character payload.
    #[must_use]
    pub fn opaque(bytes: &'a [u8]) -> Self {
        TextView {
            bytes,
            len: bytes.len(),
            binding: StaticBinding::new(),
        }
    }
}

impl<B: Binding> Clone for TextView<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Binding> Copy for TextView<'_, B> {}

/// Same-binding equality: equal when both views share the concrete codec and
/// hold identical bytes. Use [`TextView::eq_view`] to compare across codecs.
impl<B: Binding> PartialEq for TextView<'_, B> {
    fn eq(&self, other: &Self) -> bool {
        self.binding.same_encoding(other.binding)
            && self.len == other.len
            && self.bytes == other.bytes
    }
}

impl<B: Binding> Eq for TextView<'_, B> {}

impl<B: Binding> fmt::Debug for TextView<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextView")
            .field("encoding", &self.binding.name())
            .field("chars", &self.len)
            .field("bytes", &self.bytes.as_bstr())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Latin1, Utf16Be};

    fn utf8(s: &str) -> TextView<'_, StaticBinding<Utf8>> {
        TextView::from_str(s)
    }

    #[test]
    fn counts_are_exact() {
        let v = utf8("aé€😀");
        assert_eq!(v.length(), 4);
        assert_eq!(v.size(), 1 + 2 + 3 + 4);
        assert!(v.verify().is_ok());
    }

    #[test]
    fn empty_view_has_no_bytes() {
        let v = utf8("");
        assert_eq!(v.length(), 0);
        assert_eq!(v.size(), 0);
        assert!(v.is_empty());
    }

    #[test]
    fn from_parts_checks_the_count() {
        let b = StaticBinding::<Utf8>::new();
        assert!(TextView::from_parts("abc".as_bytes(), 3, b).is_ok());
        assert_eq!(
            TextView::from_parts("abc".as_bytes(), 2, b),
            Err(EncodingError::LengthMismatch)
        );
    }

    #[test]
    fn with_length_truncates_at_character_boundaries() {
        let b = StaticBinding::<Utf8>::new();
        let v = TextView::with_length("aé€xyz".as_bytes(), 3, b).unwrap();
        assert_eq!(v.length(), 3);
        assert_eq!(v.size(), 6);
        assert_eq!(v.as_str(), Some("aé€"));
    }

    #[test]
    fn until_nul_stops_at_the_terminator() {
        let b = StaticBinding::<Utf8>::new();
        let v = TextView::until_nul(b"abc\0def", b).unwrap();
        assert_eq!(v.as_str(), Some("abc"));

        // UTF-16 terminator is a full two-byte unit.
        let wide = [0x00, 0x41, 0x00, 0x42, 0x00, 0x00, 0x00, 0x43];
        let v = TextView::until_nul(&wide, StaticBinding::<Utf16Be>::new()).unwrap();
        assert_eq!(v.length(), 2);
        assert_eq!(v.size(), 4);
    }

    #[test]
    fn verify_catches_corruption_the_fast_walk_missed() {
        // 0xC3 expects a continuation; 0x28 is not one. char_len alone only
        // looks at the lead, so construction succeeds and verify must fail.
        let b = StaticBinding::<Utf8>::new();
        let v = TextView::from_bytes(&[0xC3, 0x28], b).unwrap();
        assert_eq!(v.verify(), Err(EncodingError::Malformed));
        assert!(!v.is_well_formed());
    }

    #[test]
    fn substring_shares_memory() {
        let v = utf8("aé€😀x");
        let s = v.substring(1, 4).unwrap();
        assert_eq!(s.length(), 3);
        assert_eq!(s.as_str(), Some("é€😀"));
        assert_eq!(s.as_bytes().as_ptr(), v.as_bytes()[1..].as_ptr());
        // Repeated substringing keeps exact counts.
        let s2 = s.substring(1, 2).unwrap();
        assert_eq!(s2.as_str(), Some("€"));
        assert!(v.substring(3, 1).unwrap().is_empty());
    }

    #[test]
    fn size_of_range_counts_bytes() {
        let v = utf8("aé€😀");
        assert_eq!(v.size_of_range(0, 2).unwrap(), 3);
        assert_eq!(v.size_of_range(1, 2).unwrap(), 5);
        assert_eq!(v.size_of_range(2, 10).unwrap(), 7);
    }

    #[test]
    fn search_within_one_codec() {
        let v = utf8("Ciao ciao bambino");
        let needle = utf8("ciao");
        assert_eq!(v.index_of(&needle).unwrap(), Some(5));
        assert_eq!(v.bytes_of(&needle).unwrap(), Some(5));
        assert!(v.starts_with(&utf8("Ciao")).unwrap());
        assert!(v.ends_with(&utf8("bambino")).unwrap());
        assert!(!v.starts_with(&utf8("ciao")).unwrap());
        assert_eq!(v.index_of(&utf8("nope")).unwrap(), None);
    }

    #[test]
    fn search_positions_count_characters_not_bytes() {
        let v = utf8("€€x");
        let x = utf8("x");
        assert_eq!(v.index_of(&x).unwrap(), Some(2));
        assert_eq!(v.bytes_of(&x).unwrap(), Some(6));
    }

    #[test]
    fn cross_codec_comparison_uses_code_points() {
        let a = utf8("Aé");
        let bytes = [0x41, 0xE9];
        let b = TextView::from_bytes(&bytes, StaticBinding::<Latin1>::new()).unwrap();
        assert!(a.eq_view(&b).unwrap());
        assert!(a.starts_with(&b.substring(0, 1).unwrap()).unwrap());
    }

    #[test]
    fn contains_char_across_codecs() {
        let v = utf8("abé");
        let latin = [0xE9u8];
        let cur = Cursor::new(&latin[..], StaticBinding::<Latin1>::new());
        assert!(v.contains_char(cur).unwrap());
        let miss = [0xE8u8];
        let cur = Cursor::new(&miss[..], StaticBinding::<Latin1>::new());
        assert!(!v.contains_char(cur).unwrap());
    }

    #[test]
    fn opaque_views_compare_by_bytes_only() {
        let a = TextView::opaque(b"\xFF\xFE");
        let b = TextView::opaque(b"\xFF\xFE");
        let c = TextView::opaque(b"\xFF\xFF");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.length(), 2);
    }

    #[test]
    fn ascii_sugar_validates() {
        assert!(TextView::ascii(b"plain").is_ok());
        assert_eq!(
            TextView::ascii(b"caf\xC3\xA9"),
            Err(EncodingError::Malformed)
        );
    }
}
