//! The encoding capability contract and its two dispatch modes.
//!
//! Every codec implements [`Encoding`]: a static description of one binary
//! text format (unit size, maximum character size, per-character length,
//! validation, decode, encode). Codecs are zero-sized and their operations
//! take no receiver, so the algorithms stay branch-free and allocation-free.
//!
//! Components that walk encoded bytes (cursors, views, builders, streaming
//! I/O) are generic over a [`Binding`] instead of a codec directly. A binding
//! is either:
//!
//! - [`StaticBinding<E>`]: the format is fixed at compile time and every call
//!   monomorphizes down to the codec's inherent code, or
//! - [`DynBinding`]: the format was selected at runtime (from a byte-order
//!   mark, from metadata) and calls go through a [`DynEncoding`] reference.
//!
//! The dynamic path is the only place virtual dispatch occurs; it is
//! restricted to Unicode-capable codecs (`Value = u32`), which is what makes
//! a runtime-selected format still usable for cross-encoding conversion.

mod ascii;
mod base64;
mod latin1;
mod opaque;
mod order;
mod tables;
mod utf8;
mod utf16;
mod utf32;

use core::{any::TypeId, fmt, marker::PhantomData};

pub use ascii::Ascii;
pub use base64::{B64Group, Base64};
pub use latin1::Latin1;
pub use opaque::Opaque;
pub use order::{BigEndian, ByteOrder, LittleEndian, NativeOrder};
pub use tables::{ExtensionTable, TableCodec};
pub use utf8::Utf8;
pub use utf16::{Utf16, Utf16Be, Utf16Le};
pub use utf32::{Utf32, Utf32Be, Utf32Le};

use crate::error::EncodingError;

/// Code points are in `0..MAX_CODE_POINT`.
pub const MAX_CODE_POINT: u32 = 0x11_0000;

/// Largest number of bytes any bounded codec here needs for one character.
pub const MAX_CHAR_BYTES: usize = 4;

/// The byte-order-mark code point (`ZERO WIDTH NO-BREAK SPACE`).
pub const BOM_POINT: u32 = 0xFEFF;

/// Capability contract implemented by every codec.
///
/// `bytes` arguments always start at a character boundary. Operations that
/// run out of input report [`EncodingError::BufferTooSmall`] with the total
/// byte count they need, so callers can tell "not enough data yet" from
/// "malformed data" and retry only the former.
pub trait Encoding: 'static {
    /// The decoded unit this codec converts characters to and from: a code
    /// point (`u32`) for the Unicode codecs, a byte group for Base64,
    /// [`Infallible`](core::convert::Infallible) for formats that refuse
    /// conversion.
    type Value;

    /// Short format name used in diagnostics.
    const NAME: &'static str;

    /// Minimum number of bytes needed to determine a character's length.
    fn unity() -> usize;

    /// Upper bound on the byte length of one character, or `None` when the
    /// codec has no fixed bound.
    fn max_bytes() -> Option<usize>;

    /// Byte length of the character starting at `bytes`.
    ///
    /// Inspects at most [`unity`](Encoding::unity) bytes and trusts the rest
    /// of the character to be well formed; use
    /// [`valid_char`](Encoding::valid_char) on untrusted input.
    fn char_len(bytes: &[u8]) -> Result<usize, EncodingError>;

    /// Validates one whole character, returning its byte length.
    fn valid_char(bytes: &[u8]) -> Option<usize>;

    /// Decodes one character, returning the value and the bytes consumed.
    fn decode(bytes: &[u8]) -> Result<(Self::Value, usize), EncodingError>;

    /// Encodes `value` into `out`, returning the bytes written.
    fn encode(value: &Self::Value, out: &mut [u8]) -> Result<usize, EncodingError>;

    /// True when every character has exactly
    /// [`unity`](Encoding::unity) bytes, permitting arithmetic advance
    /// without decoding.
    #[must_use]
    fn is_fixed_width() -> bool {
        Self::max_bytes() == Some(Self::unity())
    }
}

/// Object-safe mirror of [`Encoding`] for formats selected at runtime.
///
/// Instances exist only for Unicode-capable codecs and are obtained from
/// [`dynamic`]; every method forwards to the concrete codec.
pub trait DynEncoding: 'static {
    /// See [`Encoding::NAME`].
    fn name(&self) -> &'static str;
    /// See [`Encoding::unity`].
    fn unity(&self) -> usize;
    /// See [`Encoding::max_bytes`].
    fn max_bytes(&self) -> Option<usize>;
    /// See [`Encoding::char_len`].
    fn char_len(&self, bytes: &[u8]) -> Result<usize, EncodingError>;
    /// See [`Encoding::valid_char`].
    fn valid_char(&self, bytes: &[u8]) -> Option<usize>;
    /// See [`Encoding::decode`].
    fn decode(&self, bytes: &[u8]) -> Result<(u32, usize), EncodingError>;
    /// See [`Encoding::encode`].
    fn encode(&self, value: u32, out: &mut [u8]) -> Result<usize, EncodingError>;
    /// Identity of the wrapped codec type.
    fn encoding_id(&self) -> TypeId;
}

struct DynCodec<E>(PhantomData<E>);

impl<E: Encoding<Value = u32>> DynEncoding for DynCodec<E> {
    fn name(&self) -> &'static str {
        E::NAME
    }

    fn unity(&self) -> usize {
        E::unity()
    }

    fn max_bytes(&self) -> Option<usize> {
        E::max_bytes()
    }

    fn char_len(&self, bytes: &[u8]) -> Result<usize, EncodingError> {
        E::char_len(bytes)
    }

    fn valid_char(&self, bytes: &[u8]) -> Option<usize> {
        E::valid_char(bytes)
    }

    fn decode(&self, bytes: &[u8]) -> Result<(u32, usize), EncodingError> {
        E::decode(bytes)
    }

    fn encode(&self, value: u32, out: &mut [u8]) -> Result<usize, EncodingError> {
        E::encode(&value, out)
    }

    fn encoding_id(&self) -> TypeId {
        TypeId::of::<E>()
    }
}

/// Returns the shared dynamic instance of codec `E`.
///
/// ```
/// use encodem::{DynBinding, DynEncoding, Utf8, dynamic};
///
/// let enc = dynamic::<Utf8>();
/// assert_eq!(enc.name(), "UTF-8");
/// let binding = DynBinding::new(enc);
/// # let _ = binding;
/// ```
#[must_use]
pub fn dynamic<E: Encoding<Value = u32>>() -> &'static dyn DynEncoding {
    const { &DynCodec::<E>(PhantomData) }
}

/// One bound codec: the dispatch seam shared by cursors, views, builders and
/// the streaming layer.
///
/// Implemented by [`StaticBinding`] (compile-time format, zero-sized) and
/// [`DynBinding`] (runtime format, one pointer). Bindings are `Copy` and are
/// passed by value.
pub trait Binding: Copy {
    /// Format name for diagnostics.
    fn name(self) -> &'static str;
    /// See [`Encoding::unity`].
    fn unity(self) -> usize;
    /// See [`Encoding::max_bytes`].
    fn max_bytes(self) -> Option<usize>;
    /// See [`Encoding::char_len`].
    fn char_len(self, bytes: &[u8]) -> Result<usize, EncodingError>;
    /// See [`Encoding::valid_char`].
    fn valid_char(self, bytes: &[u8]) -> Option<usize>;
    /// Identity of the bound codec, used for same-format fast paths.
    fn encoding_id(self) -> TypeId;

    /// True when both bindings refer to the same concrete codec.
    fn same_encoding(self, other: impl Binding) -> bool {
        self.encoding_id() == other.encoding_id()
    }
}

/// A binding whose codec converts to and from Unicode code points.
///
/// This is the bound required by every cross-encoding operation; formats
/// without a conversion (such as [`Opaque`]) simply never satisfy it, so
/// asking them to convert is a compile error rather than a data error.
pub trait UnicodeBinding: Binding {
    /// Decodes one character to a code point, returning bytes consumed.
    fn decode(self, bytes: &[u8]) -> Result<(u32, usize), EncodingError>;
    /// Encodes `value` into `out`, returning bytes written.
    fn encode(self, value: u32, out: &mut [u8]) -> Result<usize, EncodingError>;
}

/// Compile-time codec binding. Zero-sized; every call monomorphizes.
pub struct StaticBinding<E>(PhantomData<E>);

impl<E: Encoding> StaticBinding<E> {
    /// Creates the binding.
    #[must_use]
    pub const fn new() -> Self {
        StaticBinding(PhantomData)
    }
}

impl<E: Encoding> Default for StaticBinding<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for StaticBinding<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for StaticBinding<E> {}

impl<E: Encoding> fmt::Debug for StaticBinding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(E::NAME)
    }
}

impl<E: Encoding> Binding for StaticBinding<E> {
    fn name(self) -> &'static str {
        E::NAME
    }

    fn unity(self) -> usize {
        E::unity()
    }

    fn max_bytes(self) -> Option<usize> {
        E::max_bytes()
    }

    fn char_len(self, bytes: &[u8]) -> Result<usize, EncodingError> {
        E::char_len(bytes)
    }

    fn valid_char(self, bytes: &[u8]) -> Option<usize> {
        E::valid_char(bytes)
    }

    fn encoding_id(self) -> TypeId {
        TypeId::of::<E>()
    }
}

impl<E: Encoding<Value = u32>> UnicodeBinding for StaticBinding<E> {
    fn decode(self, bytes: &[u8]) -> Result<(u32, usize), EncodingError> {
        E::decode(bytes)
    }

    fn encode(self, value: u32, out: &mut [u8]) -> Result<usize, EncodingError> {
        E::encode(&value, out)
    }
}

/// Runtime codec binding: a reference to a shared [`DynEncoding`] instance.
#[derive(Clone, Copy)]
pub struct DynBinding(&'static dyn DynEncoding);

impl DynBinding {
    /// Binds `encoding`.
    #[must_use]
    pub fn new(encoding: &'static dyn DynEncoding) -> Self {
        DynBinding(encoding)
    }

    /// Binds codec `E` dynamically.
    #[must_use]
    pub fn of<E: Encoding<Value = u32>>() -> Self {
        DynBinding(dynamic::<E>())
    }

    /// The underlying dynamic codec.
    #[must_use]
    pub fn encoding(self) -> &'static dyn DynEncoding {
        self.0
    }
}

impl fmt::Debug for DynBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl Binding for DynBinding {
    fn name(self) -> &'static str {
        self.0.name()
    }

    fn unity(self) -> usize {
        self.0.unity()
    }

    fn max_bytes(self) -> Option<usize> {
        self.0.max_bytes()
    }

    fn char_len(self, bytes: &[u8]) -> Result<usize, EncodingError> {
        self.0.char_len(bytes)
    }

    fn valid_char(self, bytes: &[u8]) -> Option<usize> {
        self.0.valid_char(bytes)
    }

    fn encoding_id(self) -> TypeId {
        self.0.encoding_id()
    }
}

impl UnicodeBinding for DynBinding {
    fn decode(self, bytes: &[u8]) -> Result<(u32, usize), EncodingError> {
        self.0.decode(bytes)
    }

    fn encode(self, value: u32, out: &mut [u8]) -> Result<usize, EncodingError> {
        self.0.encode(value, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_and_dynamic_bindings_agree() {
        let s = StaticBinding::<Utf8>::new();
        let d = DynBinding::of::<Utf8>();
        assert_eq!(s.unity(), d.unity());
        assert_eq!(s.max_bytes(), d.max_bytes());
        assert_eq!(s.name(), d.name());
        assert!(s.same_encoding(d));
        assert!(d.same_encoding(s));

        let text = "héllo".as_bytes();
        assert_eq!(s.char_len(text).unwrap(), d.char_len(text).unwrap());
        assert_eq!(s.decode(&text[1..]).unwrap(), d.decode(&text[1..]).unwrap());
    }

    #[test]
    fn different_codecs_have_different_identities() {
        let utf8 = DynBinding::of::<Utf8>();
        let utf16 = DynBinding::of::<Utf16Be>();
        assert!(!utf8.same_encoding(utf16));
        assert!(utf8.same_encoding(StaticBinding::<Utf8>::new()));
    }

    #[test]
    fn fixed_width_is_unity_equals_max() {
        assert!(Ascii::is_fixed_width());
        assert!(Utf32Be::is_fixed_width());
        assert!(!Utf8::is_fixed_width());
        assert!(!Utf16Le::is_fixed_width());
    }
}
