#![allow(missing_docs, dead_code)]

use encodem::{StaticBinding, TextBuilder, TextView, UnicodeBinding, Utf16Be};

/// The classic tokenizer fixture: note the run of spaces.
pub const CIAO: &str = "Ciao ciao   bambino";

/// A string exercising 1-, 2-, 3- and 4-byte UTF-8 characters.
pub const MIXED: &str = "a\u{E9}\u{20AC}\u{1F600}";

/// Re-encodes `s` into big-endian UTF-16 bytes.
pub fn utf16_be(s: &str) -> Vec<u8> {
    let mut out = TextBuilder::new(StaticBinding::<Utf16Be>::new());
    out.append_converted(&TextView::from_str(s))
        .expect("all scalar values are UTF-16 encodable");
    out.as_bytes().to_vec()
}

/// Collects a view's characters as code points.
pub fn code_points<B: UnicodeBinding>(view: &TextView<'_, B>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut cur = view.begin();
    for _ in 0..view.length() {
        let (cp, step) = cur.decode().expect("fixture views are well-formed");
        out.push(cp);
        cur = cur.byte_add(step);
    }
    out
}
