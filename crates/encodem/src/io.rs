//! Boundary-safe, character-wise reads and writes over raw byte streams.
//!
//! The raw stream is a collaborator: anything that can move bytes in short,
//! unpredictable counts ([`RawRead`]/[`RawWrite`]). The adapters here never
//! expose a partial character to the caller: a short raw call that lands
//! inside a character triggers supplementary calls for exactly the missing
//! bytes, and only a stream that ends mid-character reports
//! [`StreamError::IncompleteChar`] — a clean end of stream at a character
//! boundary is ordinary EOF.

use crate::{
    codec::Binding,
    error::{EncodingError, StreamError},
};

/// Raw byte source.
pub trait RawRead {
    /// Hard transport error, distinct from a short read.
    type Error;

    /// Reads up to `buf.len()` bytes, returning the count read; `0` means
    /// end of stream.
    ///
    /// # Errors
    ///
    /// Implementation-defined hard failure.
    fn raw_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Raw byte sink.
pub trait RawWrite {
    /// Hard transport error, distinct from a short write.
    type Error;

    /// Writes up to `buf.len()` bytes, returning the count written; `0`
    /// means the sink accepts no more.
    ///
    /// # Errors
    ///
    /// Implementation-defined hard failure.
    fn raw_write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
}

/// Characters and bytes moved by a streaming call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCount {
    /// Whole characters moved.
    pub chars: usize,
    /// Bytes those characters occupy.
    pub bytes: usize,
}

/// Reads up to `want` whole characters from `io` into `buf`.
///
/// One raw read of `want * unity` bytes (the cheapest lower bound) is issued
/// per round; whenever the received bytes end inside a character, the missing
/// tail is fetched with supplementary reads of exactly the right size.
/// Returns fewer than `want` characters only at a clean end of stream.
///
/// `buf` should hold `want` characters of the bound codec — `want * unity`
/// bytes for a fixed-width codec, `want * max_bytes` otherwise.
///
/// # Errors
///
/// - [`StreamError::IncompleteChar`] when the stream ends mid-character.
/// - [`StreamError::Encoding`] for malformed leads, or for a `buf` too small
///   to hold a character's tail.
/// - [`StreamError::Io`] for hard errors of the collaborator.
pub fn read_chars<B: Binding, R: RawRead>(
    io: &mut R,
    binding: B,
    buf: &mut [u8],
    want: usize,
) -> Result<CharCount, StreamError<R::Error>> {
    let unity = binding.unity();
    let mut filled = 0;
    let mut consumed = 0;
    let mut chars = 0;
    while chars < want {
        let request = ((want - chars) * unity).min(buf.len() - filled);
        if request == 0 {
            break;
        }
        let got = io
            .raw_read(&mut buf[filled..filled + request])
            .map_err(StreamError::Io)?;
        if got == 0 {
            break;
        }
        filled += got;

        while chars < want && consumed < filled {
            if filled - consumed < unity {
                if consumed + unity > buf.len() {
                    return Err(StreamError::Encoding(EncodingError::BufferTooSmall {
                        needed: unity,
                    }));
                }
                supplement(io, buf, &mut filled, consumed + unity)?;
            }
            let step = binding
                .char_len(&buf[consumed..filled])
                .map_err(StreamError::Encoding)?;
            if consumed + step > buf.len() {
                return Err(StreamError::Encoding(EncodingError::BufferTooSmall {
                    needed: step,
                }));
            }
            if consumed + step > filled {
                supplement(io, buf, &mut filled, consumed + step)?;
            }
            consumed += step;
            chars += 1;
        }
    }
    Ok(CharCount {
        chars,
        bytes: consumed,
    })
}

/// Fetches bytes until `filled` reaches `target`; a stream that dries up
/// first has ended inside a character.
fn supplement<R: RawRead>(
    io: &mut R,
    buf: &mut [u8],
    filled: &mut usize,
    target: usize,
) -> Result<(), StreamError<R::Error>> {
    while *filled < target {
        let got = io
            .raw_read(&mut buf[*filled..target])
            .map_err(StreamError::Io)?;
        if got == 0 {
            return Err(StreamError::IncompleteChar);
        }
        *filled += got;
    }
    Ok(())
}

/// Writes the characters of `bytes` to `io`.
///
/// Bytes are pushed in bulk; when a short raw write lands inside a
/// character, the remainder of that one character is retried before
/// continuing. A sink that stops accepting at a character boundary ends the
/// call cleanly with the count so far; one that stops mid-character reports
/// [`StreamError::IncompleteChar`].
///
/// # Errors
///
/// - [`StreamError::IncompleteChar`] when the sink dries up mid-character.
/// - [`StreamError::Encoding`] when `bytes` does not hold whole characters.
/// - [`StreamError::Io`] for hard errors of the collaborator.
pub fn write_chars<B: Binding, W: RawWrite>(
    io: &mut W,
    binding: B,
    bytes: &[u8],
) -> Result<CharCount, StreamError<W::Error>> {
    // Refuse payloads that do not end at a character boundary before any
    // byte reaches the sink.
    let mut boundary = 0;
    while boundary < bytes.len() {
        let step = binding
            .char_len(&bytes[boundary..])
            .map_err(StreamError::Encoding)?;
        if boundary + step > bytes.len() {
            return Err(StreamError::Encoding(EncodingError::BufferTooSmall {
                needed: step,
            }));
        }
        boundary += step;
    }

    let mut pos = 0;
    let mut chars = 0;
    while pos < bytes.len() {
        let sent = io.raw_write(&bytes[pos..]).map_err(StreamError::Io)?;
        if sent == 0 {
            break;
        }
        let target = pos + sent;

        // Account whole characters; find whether the write split one.
        while pos < target {
            let step = binding
                .char_len(&bytes[pos..])
                .map_err(StreamError::Encoding)?;
            if pos + step > target {
                // Short write inside this character: push its tail now.
                let mut done = target;
                while done < pos + step {
                    let more = io
                        .raw_write(&bytes[done..pos + step])
                        .map_err(StreamError::Io)?;
                    if more == 0 {
                        return Err(StreamError::IncompleteChar);
                    }
                    done += more;
                }
            }
            pos += step;
            chars += 1;
        }
    }
    Ok(CharCount { chars, bytes: pos })
}

/// Adapters for `std::io` streams.
#[cfg(feature = "std")]
mod std_io {
    use super::{RawRead, RawWrite};

    /// Wraps a [`std::io::Read`] as a [`RawRead`].
    #[derive(Debug)]
    pub struct IoReader<T>(
        /// The wrapped reader.
        pub T,
    );

    impl<T: std::io::Read> RawRead for IoReader<T> {
        type Error = std::io::Error;

        fn raw_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            self.0.read(buf)
        }
    }

    /// Wraps a [`std::io::Write`] as a [`RawWrite`].
    #[derive(Debug)]
    pub struct IoWriter<T>(
        /// The wrapped writer.
        pub T,
    );

    impl<T: std::io::Write> RawWrite for IoWriter<T> {
        type Error = std::io::Error;

        fn raw_write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.0.write(buf)
        }
    }
}

#[cfg(feature = "std")]
pub use std_io::{IoReader, IoWriter};
