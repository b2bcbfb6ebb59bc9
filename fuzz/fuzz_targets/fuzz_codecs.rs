#![no_main]

use arbitrary::Arbitrary;
use encodem::{
    Base64, CharCount, Encoding, RawRead, StaticBinding, StreamError, Utf8, Utf16Be, Utf16Le,
    Utf32Be, Utf32Le, read_chars,
};
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Arbitrary)]
struct Input {
    chunk_seed: u64,
    data: Vec<u8>,
}

/// `valid_char` accepting a prefix must mean `decode` succeeds on it, and
/// for the self-synchronizing Unicode codecs re-encoding must reproduce the
/// exact original bytes.
fn check_agreement<E: Encoding<Value = u32>>(data: &[u8]) {
    let Some(len) = E::valid_char(data) else {
        return;
    };
    let (cp, consumed) = E::decode(data).expect("validated character must decode");
    assert_eq!(consumed, len);

    let mut out = [0u8; 4];
    match E::encode(&cp, &mut out) {
        Ok(written) => assert_eq!(&out[..written], &data[..len]),
        // Pattern-valid sequences above the code-point ceiling (UTF-8 leads
        // 0xF5..=0xF7 and high 0xF4 tails) have no encoding.
        Err(_) => assert!(cp >= 0x11_0000),
    }
}

/// Streamed reads over arbitrary chunk boundaries must consume a prefix that
/// the plain cursor walk agrees is whole characters.
fn check_streaming(seed: u64, data: &[u8]) {
    struct Randomized<'d> {
        data: &'d [u8],
        pos: usize,
        rng: SmallRng,
    }

    impl RawRead for Randomized<'_> {
        type Error = core::convert::Infallible;

        fn raw_read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let cap = buf.len().min(self.data.len() - self.pos);
            if cap == 0 {
                return Ok(0);
            }
            let n = self.rng.random_range(1..=cap);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    let mut stream = Randomized {
        data,
        pos: 0,
        rng: SmallRng::seed_from_u64(seed),
    };
    let mut buf = vec![0u8; data.len() + 4];
    let want = data.len();
    match read_chars(&mut stream, StaticBinding::<Utf8>::new(), &mut buf, want) {
        Ok(CharCount { chars, bytes }) => {
            assert_eq!(&buf[..bytes], &data[..bytes]);
            // Walk the consumed prefix: it must be exactly `chars` whole
            // characters.
            let mut off = 0;
            let mut n = 0;
            while off < bytes {
                let step = Utf8::char_len(&data[off..]).expect("consumed prefix must be walkable");
                off += step;
                n += 1;
            }
            assert_eq!(off, bytes);
            assert_eq!(n, chars);
        }
        Err(StreamError::IncompleteChar | StreamError::Encoding(_)) => {}
        Err(StreamError::Io(e)) => match e {},
    }
}

fuzz_target!(|input: Input| {
    let data = &input.data;

    check_agreement::<Utf8>(data);
    check_agreement::<Utf16Be>(data);
    check_agreement::<Utf16Le>(data);
    check_agreement::<Utf32Be>(data);
    check_agreement::<Utf32Le>(data);

    // Base64 has no exact-bytes round trip for non-canonical padding, but
    // validated quanta must still decode.
    if let Some(len) = Base64::valid_char(data) {
        let (_, consumed) = Base64::decode(data).expect("validated quantum must decode");
        assert_eq!(consumed, len);
    }

    check_streaming(input.chunk_seed, data);
});
