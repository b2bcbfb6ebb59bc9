//! Encoding-aware strings: codecs, cursors, and boundary-safe character I/O.
//!
//! `encodem` represents, validates, decodes and encodes text in multiple
//! binary formats — ASCII, Latin-1, table-driven single-byte extensions,
//! UTF-8, UTF-16, UTF-32 and Base64 — through one capability contract
//! ([`Encoding`]). On top of the codecs sit:
//!
//! - [`Cursor`]: a position in a byte buffer that steps one logical
//!   character at a time;
//! - [`TextView`] / [`TextBuilder`] / [`TextBuf`]: non-owning view,
//!   incremental builder, and owned string, each carrying exact character
//!   and byte counts;
//! - [`read_chars`] / [`write_chars`]: streaming adapters that never split a
//!   character across raw I/O calls.
//!
//! Formats are bound either at compile time ([`StaticBinding`], fully
//! monomorphized) or at runtime ([`DynBinding`], e.g. after
//! [`detect_bom`]); every string and cursor type is generic over the
//! [`Binding`] and works identically with both.
//!
//! ```
//! use encodem::{TextView, Utf16Be};
//!
//! let greeting = TextView::from_str("hej 😀");
//! assert_eq!(greeting.length(), 5);
//!
//! // Re-encode into big-endian UTF-16; the emoji becomes a surrogate pair.
//! let wide = greeting.convert::<Utf16Be>().unwrap();
//! assert_eq!(wide.length(), 5);
//! assert_eq!(wide.size(), 12);
//! assert!(wide.as_view().eq_view(&greeting).unwrap());
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod bom;
mod builder;
mod codec;
mod cursor;
mod error;
mod heap_buf;
mod io;
mod owned;
mod tokens;
mod view;

pub use bom::{Bom, detect_bom};
pub use builder::TextBuilder;
pub use codec::{
    Ascii, B64Group, BOM_POINT, Base64, BigEndian, Binding, ByteOrder, DynBinding, DynEncoding,
    Encoding, ExtensionTable, Latin1, LittleEndian, MAX_CHAR_BYTES, MAX_CODE_POINT, NativeOrder,
    Opaque, StaticBinding, TableCodec, UnicodeBinding, Utf8, Utf16, Utf16Be, Utf16Le, Utf32,
    Utf32Be, Utf32Le, dynamic,
};
pub use cursor::Cursor;
pub use error::{EncodingError, StreamError};
pub use heap_buf::HeapBuf;
#[cfg(feature = "std")]
pub use io::{IoReader, IoWriter};
pub use io::{CharCount, RawRead, RawWrite, read_chars, write_chars};
pub use owned::TextBuf;
pub use tokens::Tokens;
pub use view::TextView;

/// A view with its codec fixed at compile time.
pub type StaticView<'a, E> = TextView<'a, StaticBinding<E>>;

/// A view over a codec selected at runtime.
pub type WideView<'a> = TextView<'a, DynBinding>;

/// The encoding this platform's I/O speaks natively.
#[cfg(windows)]
pub type NativeEncoding = Utf16<LittleEndian>;

/// The encoding this platform's I/O speaks natively.
#[cfg(not(windows))]
pub type NativeEncoding = Utf8;

/// A view in the platform's native I/O encoding.
pub type NativeView<'a> = StaticView<'a, NativeEncoding>;
