//! An opaque byte format: payloads with no character structure beyond
//! "one byte per character".

use core::convert::Infallible;

use super::Encoding;
use crate::error::EncodingError;

/// Raw bytes of unknown or irrelevant encoding.
///
/// Use this to carry data whose format has not been established yet, for
/// example before byte-order-mark detection. Its decoded value type is
/// [`Infallible`], so every conversion-requiring operation rejects `Opaque`
/// at compile time on static paths; there is deliberately no dynamic
/// instance either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Opaque;

impl Encoding for Opaque {
    type Value = Infallible;

    const NAME: &'static str = "opaque";

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

    fn decode(_bytes: &[u8]) -> Result<(Infallible, usize), EncodingError> {
        Err(EncodingError::UnsupportedConversion)
    }

    fn encode(value: &Infallible, _out: &mut [u8]) -> Result<usize, EncodingError> {
        match *value {}
    }
}
