//! Line tokenizer for raw messages.
//!
//! Splits on line feeds and reports every line feed as its own
//! [`Token::Delim`], so blank lines stay visible to the grammar:
//!
//! ```text
//! "a\n\nb" => Line("a"), Delim, Delim, Line("b")
//! ```
//!
//! Content tokens are never empty. Carriage returns are not delimiters and
//! stay part of the line they appear in.

use std::iter::FusedIterator;

const LINE_FEED: char = '\n';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text between two line feeds
    Line(&'a str),
    /// A single line feed
    Delim,
}

impl Token<'_> {
    pub fn is_delim(&self) -> bool {
        matches!(self, Token::Delim)
    }
}

/// Forward-only token stream over a borrowed message.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    rest: &'a str,
}

/// Tokenize `input` lazily.
pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer { rest: input }
}

impl Tokenizer<'_> {
    /// Advance one token and require it to be a line feed.
    pub fn consume_delim(&mut self) -> bool {
        matches!(self.next(), Some(Token::Delim))
    }

    /// Advance one token and require it to be a line feed, or the end of input.
    pub fn consume_delim_or_end(&mut self) -> bool {
        matches!(self.next(), Some(Token::Delim) | None)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if let Some(rest) = self.rest.strip_prefix(LINE_FEED) {
            self.rest = rest;
            return Some(Token::Delim);
        }

        let end = self.rest.find(LINE_FEED).unwrap_or(self.rest.len());
        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Token::Line(line))
    }
}

impl FusedIterator for Tokenizer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<Token<'_>> {
        tokenize(input).collect()
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_delimiters() {
        assert_eq!(
            collect("a\n\nb"),
            vec![Token::Line("a"), Token::Delim, Token::Delim, Token::Line("b")]
        );
    }

    #[test]
    fn test_tokenize_leading_and_trailing_delimiters() {
        assert_eq!(collect("\nline\n"), vec![Token::Delim, Token::Line("line"), Token::Delim]);
        assert_eq!(collect("\n\n"), vec![Token::Delim, Token::Delim]);
    }

    #[test]
    fn test_tokenize_carriage_return_is_content() {
        assert_eq!(collect("a\r\nb"), vec![Token::Line("a\r"), Token::Delim, Token::Line("b")]);
    }

    #[test]
    fn test_tokenize_unicode_lines() {
        assert_eq!(
            collect("héllo\n测试"),
            vec![Token::Line("héllo"), Token::Delim, Token::Line("测试")]
        );
    }

    #[test]
    fn test_consume_delim() {
        let mut tokens = tokenize("\na");
        assert!(tokens.consume_delim());
        assert!(!tokens.consume_delim()); // "a"
        assert!(!tokens.consume_delim()); // end of input
    }

    #[test]
    fn test_consume_delim_or_end() {
        let mut tokens = tokenize("\na");
        assert!(tokens.consume_delim_or_end());
        assert!(!tokens.consume_delim_or_end());
        assert!(tokens.consume_delim_or_end());
    }

    #[test]
    fn test_tokenizer_resumes_after_partial_read() {
        let mut tokens = tokenize("a\nb");
        let first: Vec<_> = tokens.by_ref().take(2).collect();
        assert_eq!(first, vec![Token::Line("a"), Token::Delim]);
        assert_eq!(tokens.next(), Some(Token::Line("b")));
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn test_tokenizer_is_fused() {
        let mut tokens = tokenize("a");
        assert_eq!(tokens.next(), Some(Token::Line("a")));
        assert_eq!(tokens.next(), None);
        assert_eq!(tokens.next(), None);
    }
}
