//! Streaming reads and writes against awkward raw streams.

#![expect(missing_docs)]

mod common;

use common::utf16_be;
use encodem::{
    CharCount, DynBinding, RawRead, RawWrite, StaticBinding, StreamError, TextView, Utf8, Utf16Be,
    detect_bom, read_chars, write_chars,
};
use rstest::rstest;

/// Hands out at most `chunk` bytes per call, from a fixed script.
struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedReader {
    fn new(data: impl Into<Vec<u8>>, chunk: usize) -> Self {
        ChunkedReader {
            data: data.into(),
            pos: 0,
            chunk,
        }
    }
}

impl RawRead for ChunkedReader {
    type Error = core::convert::Infallible;

    fn raw_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self
            .chunk
            .min(buf.len())
            .min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Accepts at most `chunk` bytes per call, up to an optional total limit.
#[derive(Default)]
struct ChunkedWriter {
    out: Vec<u8>,
    chunk: usize,
    limit: Option<usize>,
}

impl RawWrite for ChunkedWriter {
    type Error = core::convert::Infallible;

    fn raw_write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let mut n = self.chunk.min(buf.len());
        if let Some(limit) = self.limit {
            n = n.min(limit - self.out.len());
        }
        self.out.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(7)]
fn utf8_reads_return_only_whole_characters(#[case] chunk: usize) {
    // Three characters totaling six bytes.
    let mut stream = ChunkedReader::new("aé€".as_bytes().to_vec(), chunk);
    let mut buf = [0u8; 16];
    let got = read_chars(&mut stream, StaticBinding::<Utf8>::new(), &mut buf, 3).unwrap();
    assert_eq!(got, CharCount { chars: 3, bytes: 6 });
    assert_eq!(&buf[..6], "aé€".as_bytes());
}

#[test]
fn one_byte_stream_satisfies_a_five_byte_request() {
    // Three characters in five bytes; the stream yields one byte per read.
    let mut stream = ChunkedReader::new("aéé".as_bytes().to_vec(), 1);
    let mut buf = [0u8; 16];
    let got = read_chars(&mut stream, StaticBinding::<Utf8>::new(), &mut buf, 3).unwrap();
    assert_eq!(got, CharCount { chars: 3, bytes: 5 });
    assert_eq!(stream.pos, 5);
}

#[test]
fn requesting_more_than_the_stream_has_is_clean_eof() {
    let mut stream = ChunkedReader::new(b"ab".to_vec(), 8);
    let mut buf = [0u8; 16];
    let got = read_chars(&mut stream, StaticBinding::<Utf8>::new(), &mut buf, 10).unwrap();
    assert_eq!(got, CharCount { chars: 2, bytes: 2 });
}

#[test]
fn a_stream_that_dies_mid_character_is_incomplete() {
    let mut stream = ChunkedReader::new(vec![0xE2, 0x82], 1);
    let mut buf = [0u8; 16];
    assert_eq!(
        read_chars(&mut stream, StaticBinding::<Utf8>::new(), &mut buf, 1),
        Err(StreamError::IncompleteChar)
    );
}

#[test]
fn dynamic_binding_reads_utf16_across_chunks() {
    let payload = utf16_be("hi 😀");
    let bom = detect_bom(&[0xFE, 0xFF]).unwrap();
    let binding = DynBinding::new(bom.encoding());

    let mut stream = ChunkedReader::new(payload.clone(), 3);
    let mut buf = [0u8; 32];
    let got = read_chars(&mut stream, binding, &mut buf, 4).unwrap();
    assert_eq!(got, CharCount { chars: 4, bytes: 10 });
    assert_eq!(&buf[..10], &payload[..]);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(5)]
fn writes_never_split_characters_silently(#[case] chunk: usize) {
    let data = utf16_be("hi 😀");
    let mut sink = ChunkedWriter {
        chunk,
        ..ChunkedWriter::default()
    };
    let got = write_chars(&mut sink, StaticBinding::<Utf16Be>::new(), &data).unwrap();
    assert_eq!(
        got,
        CharCount {
            chars: 4,
            bytes: data.len()
        }
    );
    assert_eq!(sink.out, data);
}

#[test]
fn a_sink_that_stops_mid_character_is_incomplete() {
    let data = utf16_be("😀");
    let mut sink = ChunkedWriter {
        chunk: 3,
        limit: Some(3),
        ..ChunkedWriter::default()
    };
    assert_eq!(
        write_chars(&mut sink, StaticBinding::<Utf16Be>::new(), &data),
        Err(StreamError::IncompleteChar)
    );
}

#[test]
fn a_sink_that_stops_at_a_boundary_reports_partial_progress() {
    let data = b"abcd";
    let mut sink = ChunkedWriter {
        chunk: 4,
        limit: Some(2),
        ..ChunkedWriter::default()
    };
    let got = write_chars(&mut sink, StaticBinding::<Utf8>::new(), data).unwrap();
    assert_eq!(got, CharCount { chars: 2, bytes: 2 });
}

#[test]
fn round_trip_through_chunked_streams() {
    let text = TextView::from_str("Ciao 😀 bambino");
    let mut sink = ChunkedWriter {
        chunk: 3,
        ..ChunkedWriter::default()
    };
    write_chars(&mut sink, text.binding(), text.as_bytes()).unwrap();

    let mut stream = ChunkedReader::new(sink.out, 2);
    let mut buf = [0u8; 64];
    let got = read_chars(&mut stream, text.binding(), &mut buf, text.length()).unwrap();
    assert_eq!(got.chars, text.length());
    assert_eq!(&buf[..got.bytes], text.as_bytes());
}
