//! Byte-order-mark detection.
//!
//! A BOM identifies UTF-16 (either order) or UTF-8 at the head of a byte
//! payload. Absence of a mark is an expected outcome, not an error; the
//! caller falls back to whatever default its context prescribes.

use crate::codec::{self, DynEncoding, dynamic};

/// A recognized byte-order mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bom {
    /// `EF BB BF`.
    Utf8,
    /// `FE FF`.
    Utf16Be,
    /// `FF FE`.
    Utf16Le,
}

impl Bom {
    /// Number of bytes the mark occupies.
    #[must_use]
    pub fn byte_len(self) -> usize {
        match self {
            Bom::Utf8 => 3,
            Bom::Utf16Be | Bom::Utf16Le => 2,
        }
    }

    /// The dynamic codec instance for the detected format.
    #[must_use]
    pub fn encoding(self) -> &'static dyn DynEncoding {
        match self {
            Bom::Utf8 => dynamic::<codec::Utf8>(),
            Bom::Utf16Be => dynamic::<codec::Utf16Be>(),
            Bom::Utf16Le => dynamic::<codec::Utf16Le>(),
        }
    }
}

/// Detects a byte-order mark at the start of `bytes`.
///
/// ```
/// use encodem::{Bom, DynBinding, TextView, detect_bom};
///
/// let payload = [0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
/// let bom = detect_bom(&payload).unwrap();
/// assert_eq!(bom, Bom::Utf16Be);
///
/// let text = TextView::from_bytes(
///     &payload[bom.byte_len()..],
///     DynBinding::new(bom.encoding()),
/// )
/// .unwrap();
/// assert_eq!(text.length(), 2);
/// ```
#[must_use]
pub fn detect_bom(bytes: &[u8]) -> Option<Bom> {
    match bytes {
        [0xFE, 0xFF, ..] => Some(Bom::Utf16Be),
        [0xFF, 0xFE, ..] => Some(Bom::Utf16Le),
        [0xEF, 0xBB, 0xBF, ..] => Some(Bom::Utf8),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_the_three_marks() {
        assert_eq!(detect_bom(&[0xFE, 0xFF, 0x00, 0x41]), Some(Bom::Utf16Be));
        assert_eq!(detect_bom(&[0xFF, 0xFE, 0x41, 0x00]), Some(Bom::Utf16Le));
        assert_eq!(detect_bom(&[0xEF, 0xBB, 0xBF, 0x41]), Some(Bom::Utf8));
    }

    #[test]
    fn short_or_markless_input_is_none() {
        assert_eq!(detect_bom(&[]), None);
        assert_eq!(detect_bom(&[0xFE]), None);
        assert_eq!(detect_bom(&[0xEF, 0xBB]), None);
        assert_eq!(detect_bom(b"plain text"), None);
    }

    #[test]
    fn detected_encoding_decodes_the_payload() {
        let payload = [0xFF, 0xFE, 0x48, 0x00];
        let bom = detect_bom(&payload).unwrap();
        let enc = bom.encoding();
        assert_eq!(enc.decode(&payload[bom.byte_len()..]).unwrap(), (0x48, 2));
    }
}
