//! UTF-32 with parameterized byte order: a fixed four-byte unit.
//!
//! Validation rejects units whose top byte (in logical order) is non-zero,
//! whose value exceeds `0x10FFFF`, or that fall in the surrogate range.

use core::marker::PhantomData;

use super::{Encoding, order::ByteOrder};
use crate::error::EncodingError;

/// UTF-32 in byte order `O`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf32<O>(PhantomData<O>);

/// Big-endian UTF-32.
pub type Utf32Be = Utf32<super::BigEndian>;

/// Little-endian UTF-32.
pub type Utf32Le = Utf32<super::LittleEndian>;

impl<O: ByteOrder> Encoding for Utf32<O> {
    type Value = u32;

    const NAME: &'static str = "UTF-32";

    fn unity() -> usize {
        4
    }

    fn max_bytes() -> Option<usize> {
        Some(4)
    }

    fn char_len(_bytes: &[u8]) -> Result<usize, EncodingError> {
        Ok(4)
    }

    fn valid_char(bytes: &[u8]) -> Option<usize> {
        if bytes.len() < 4 {
            return None;
        }
        let b0 = bytes[O::index(0, 4)];
        let b1 = bytes[O::index(1, 4)];
        let b2 = bytes[O::index(2, 4)];
        if b0 != 0 {
            return None;
        }
        // Values above 0x1FFFFF use reserved bits; 0x11xxxx..0x1Fxxxx exceed
        // the code-point ceiling.
        if b1 & 0xE0 != 0 {
            return None;
        }
        if b1 & 0x10 != 0 && b1 & 0x0F != 0 {
            return None;
        }
        // Surrogate range 0xD800..=0xDFFF.
        if b1 == 0 && b2 & 0xF8 == 0xD8 {
            return None;
        }
        Some(4)
    }

    fn decode(bytes: &[u8]) -> Result<(u32, usize), EncodingError> {
        if bytes.len() < 4 {
            return Err(EncodingError::BufferTooSmall { needed: 4 });
        }
        let mut acc = 0u32;
        for i in 0..4 {
            acc = (acc << 8) | u32::from(bytes[O::index(i, 4)]);
        }
        Ok((acc, 4))
    }

    fn encode(value: &u32, out: &mut [u8]) -> Result<usize, EncodingError> {
        let cp = *value;
        if cp >= super::MAX_CODE_POINT || (0xD800..=0xDFFF).contains(&cp) {
            return Err(EncodingError::InvalidCodePoint(cp));
        }
        if out.len() < 4 {
            return Err(EncodingError::BufferTooSmall { needed: 4 });
        }
        for i in 0..4 {
            out[O::index(i, 4)] = (cp >> (8 * (3 - i)) & 0xFF) as u8;
        }
        Ok(4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_in_both_orders() {
        let mut out = [0u8; 4];
        assert_eq!(Utf32Be::encode(&0x1F600, &mut out), Ok(4));
        assert_eq!(out, [0x00, 0x01, 0xF6, 0x00]);
        assert_eq!(Utf32Be::decode(&out), Ok((0x1F600, 4)));

        assert_eq!(Utf32Le::encode(&0x1F600, &mut out), Ok(4));
        assert_eq!(out, [0x00, 0xF6, 0x01, 0x00]);
        assert_eq!(Utf32Le::decode(&out), Ok((0x1F600, 4)));
    }

    #[test]
    fn surrogate_range_fails_validation() {
        assert_eq!(Utf32Be::valid_char(&[0x00, 0x00, 0xD8, 0x00]), None);
        assert_eq!(Utf32Be::valid_char(&[0x00, 0x00, 0xDF, 0xFF]), None);
        assert_eq!(Utf32Le::valid_char(&[0x00, 0xDC, 0x00, 0x00]), None);
        assert_eq!(Utf32Be::valid_char(&[0x00, 0x00, 0xD7, 0xFF]), Some(4));
        assert_eq!(Utf32Be::valid_char(&[0x00, 0x00, 0xE0, 0x00]), Some(4));
    }

    #[test]
    fn out_of_range_units_fail_validation() {
        // Non-zero top byte.
        assert_eq!(Utf32Be::valid_char(&[0x01, 0x00, 0x00, 0x41]), None);
        // Above 0x10FFFF.
        assert_eq!(Utf32Be::valid_char(&[0x00, 0x11, 0x00, 0x00]), None);
        assert_eq!(Utf32Be::valid_char(&[0x00, 0x20, 0x00, 0x00]), None);
        // 0x10FFFF itself is fine.
        assert_eq!(Utf32Be::valid_char(&[0x00, 0x10, 0xFF, 0xFF]), Some(4));
    }

    #[test]
    fn encode_rejects_unencodable_values() {
        let mut out = [0u8; 4];
        assert_eq!(
            Utf32Be::encode(&0xD800, &mut out),
            Err(EncodingError::InvalidCodePoint(0xD800))
        );
        assert_eq!(
            Utf32Le::encode(&0x11_0000, &mut out),
            Err(EncodingError::InvalidCodePoint(0x11_0000))
        );
    }
}
