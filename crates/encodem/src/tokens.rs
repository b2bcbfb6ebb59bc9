//! Delimiter-driven splitting of a view into tokens.

use crate::{codec::Binding, error::EncodingError, view::TextView};

/// Iterator over the delimiter-separated tokens of a view.
///
/// Consecutive delimiter characters are collapsed: leading and trailing
/// delimiters are skipped and empty tokens are never produced. Both the text
/// and the delimiter set must be bound to the same codec; characters are
/// compared by their encoded bytes.
///
/// ```
/// use encodem::TextView;
///
/// let text = TextView::from_str("Ciao ciao   bambino");
/// let spaces = TextView::from_str(" ");
/// let words: Vec<_> = text.split(&spaces).map(|t| t.as_str().unwrap()).collect();
/// assert_eq!(words, ["Ciao", "ciao", "bambino"]);
/// ```
pub struct Tokens<'a, B: Binding> {
    rest: TextView<'a, B>,
    delim: TextView<'a, B>,
}

impl<'a, B: Binding> Tokens<'a, B> {
    /// Splits `text` on any character of `delim`.
    #[must_use]
    pub fn new(text: TextView<'a, B>, delim: TextView<'a, B>) -> Self {
        debug_assert!(text.binding().same_encoding(delim.binding()));
        Tokens { rest: text, delim }
    }

    /// The unparsed remainder of the text.
    #[must_use]
    pub fn rest(&self) -> TextView<'a, B> {
        self.rest
    }

    fn is_delimiter(&self, ch: &[u8]) -> Result<bool, EncodingError> {
        self.delim.contains_char_bytes(ch)
    }
}

impl<'a, B: Binding> Iterator for Tokens<'a, B> {
    type Item = TextView<'a, B>;

    fn next(&mut self) -> Option<Self::Item> {
        let binding = self.rest.binding();

        // Collapse any run of delimiters before the token.
        loop {
            if self.rest.is_empty() {
                return None;
            }
            let bytes = self.rest.as_bytes();
            let step = binding.char_len(bytes).ok()?;
            if !self.is_delimiter(bytes.get(..step)?).ok()? {
                break;
            }
            self.rest =
                TextView::from_trusted_parts(&bytes[step..], self.rest.length() - 1, binding);
        }

        // Take characters up to the next delimiter or the end.
        let bytes = self.rest.as_bytes();
        let mut offset = 0;
        let mut chars = 0;
        while chars < self.rest.length() {
            let step = binding.char_len(&bytes[offset..]).ok()?;
            if self.is_delimiter(bytes.get(offset..offset + step)?).ok()? {
                break;
            }
            offset += step;
            chars += 1;
        }

        let token = TextView::from_trusted_parts(&bytes[..offset], chars, binding);
        self.rest =
            TextView::from_trusted_parts(&bytes[offset..], self.rest.length() - chars, binding);
        Some(token)
    }
}

impl<'a, B: Binding> TextView<'a, B> {
    /// Iterates the delimiter-separated tokens of the view; see [`Tokens`].
    #[must_use]
    pub fn split(&self, delim: &TextView<'a, B>) -> Tokens<'a, B> {
        Tokens::new(*self, *delim)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn words<'a>(text: &'a str, delim: &'a str) -> Vec<&'a str> {
        TextView::from_str(text)
            .split(&TextView::from_str(delim))
            .map(|t| t.as_str().unwrap())
            .collect()
    }

    #[test]
    fn consecutive_delimiters_collapse() {
        assert_eq!(words("Ciao ciao   bambino", " "), ["Ciao", "ciao", "bambino"]);
    }

    #[test]
    fn leading_and_trailing_delimiters_are_skipped() {
        assert_eq!(words("  a b  ", " "), ["a", "b"]);
    }

    #[test]
    fn all_delimiters_yield_nothing() {
        assert!(words("   ", " ").is_empty());
        assert!(words("", " ").is_empty());
    }

    #[test]
    fn any_delimiter_character_splits() {
        assert_eq!(words("a,b;c", ",;"), ["a", "b", "c"]);
    }

    #[test]
    fn multibyte_delimiters_split_cleanly() {
        assert_eq!(words("a€b€€c", "€"), ["a", "b", "c"]);
    }

    #[test]
    fn rest_reports_the_remainder() {
        let text = TextView::from_str("a b c");
        let delim = TextView::from_str(" ");
        let mut tokens = text.split(&delim);
        assert_eq!(tokens.next().unwrap().as_str(), Some("a"));
        assert_eq!(tokens.rest().as_str(), Some(" b c"));
    }
}
