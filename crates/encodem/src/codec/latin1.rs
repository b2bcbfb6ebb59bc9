//! ISO-8859-1 (Latin-1): one byte per character, identical to the first 256
//! code points.

use super::Encoding;
use crate::error::EncodingError;

/// ISO-8859-1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latin1;

impl Encoding for Latin1 {
    type Value = u32;

    const NAME: &'static str = "Latin-1";

    fn unity() -> usize {
        1
    }

    fn max_bytes() -> Option<usize> {
        Some(1)
    }

    fn char_len(_bytes: &[u8]) -> Result<usize, EncodingError> {
        Ok(1)
    }

    fn valid_char(bytes: &[u8]) -> Option<usize> {
        (!bytes.is_empty()).then_some(1)
    }

    fn decode(bytes: &[u8]) -> Result<(u32, usize), EncodingError> {
        bytes
            .first()
            .map(|b| (u32::from(*b), 1))
            .ok_or(EncodingError::BufferTooSmall { needed: 1 })
    }

    fn encode(value: &u32, out: &mut [u8]) -> Result<usize, EncodingError> {
        let Ok(byte) = u8::try_from(*value) else {
            return Err(EncodingError::InvalidCodePoint(*value));
        };
        let Some(slot) = out.first_mut() else {
            return Err(EncodingError::BufferTooSmall { needed: 1 });
        };
        *slot = byte;
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_byte_is_a_character() {
        for b in 0..=0xFFu8 {
            assert_eq!(Latin1::valid_char(&[b]), Some(1));
            assert_eq!(Latin1::decode(&[b]), Ok((u32::from(b), 1)));
        }
    }

    #[test]
    fn encode_covers_exactly_one_byte_of_code_points() {
        let mut out = [0u8; 1];
        assert_eq!(Latin1::encode(&0xE9, &mut out), Ok(1));
        assert_eq!(out[0], 0xE9);
        assert_eq!(
            Latin1::encode(&0x100, &mut out),
            Err(EncodingError::InvalidCodePoint(0x100))
        );
    }
}
