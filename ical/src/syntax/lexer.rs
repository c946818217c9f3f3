// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for unfolded iCalendar content lines as defined in RFC 5545

use std::fmt::{self, Display};
use std::ops::Range;

use logos::Logos;

/// Tokenize one unfolded content line
///
/// Characters the lexer does not recognize become [`Token::Error`] tokens,
/// leaving it to the scanner to decide whether they matter.
pub fn tokenize(src: &str) -> impl Iterator<Item = SpannedToken<'_>> {
    Token::lexer(src).spanned().map(|(tok, span)| match tok {
        Ok(tok) => SpannedToken(tok, span),
        Err(()) => SpannedToken(Token::Error, span),
    })
}

/// Token emitted by the iCalendar lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
pub enum Token<'a> {
    /// Double Quote ("), decimal codepoint 22
    #[token(r#"""#)]
    DQuote,

    /// Comma (,), decimal codepoint 44
    #[token(",")]
    Comma,

    /// Colon (:), decimal codepoint 58
    #[token(":")]
    Colon,

    /// Semicolon (;), decimal codepoint 59
    #[token(";")]
    Semicolon,

    /// Equal sign (=), decimal codepoint 61
    #[token("=")]
    Equal,

    /// ASCII symbols: sequences of printable ASCII characters and HTAB
    #[regex(r#"[\t !#$%&'()*+./<>?@\[\\\]\^`\{|\}~]+"#)]
    Symbol(&'a str),

    /// ASCII word characters: 0-9, A-Z, a-z, hyphen, underscore
    #[regex("[0-9A-Za-z_-]+")]
    Word(&'a str),

    /// NON-US-ASCII  = UTF8-2 / UTF8-3 / UTF8-4
    ///    ; UTF8-2, UTF8-3, and UTF8-4 are defined in [RFC3629]
    #[regex(r#"[^\x00-\x7F]+"#)]
    UnicodeText(&'a str),

    /// Control characters and anything else the lexer rejects
    Error,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Comma => write!(f, "Comma"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Symbol(s) => write!(f, "Symbol({s})"),
            Self::Word(s) => write!(f, "Word({s})"),
            Self::UnicodeText(s) => write!(f, "UnicodeText({s})"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its byte range in the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Range<usize>);

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::Token::*;
    use super::*;

    fn tokens(src: &str) -> Vec<Token<'_>> {
        tokenize(src).map(|SpannedToken(tok, _)| tok).collect()
    }

    #[test]
    fn tokenizes_ascii_classes() {
        for i in 0x20_u8..0x7F {
            let c = char::from(i);
            let src = c.to_string();
            let expected = match c {
                '"' => DQuote,
                ',' => Comma,
                ':' => Colon,
                ';' => Semicolon,
                '=' => Equal,
                '0'..='9' | 'A'..='Z' | 'a'..='z' | '_' | '-' => Word(&src),
                _ => Symbol(&src),
            };
            assert_eq!(tokens(&src), [expected], "U+{i:02X}");
        }
    }

    #[test]
    fn tokenizes_special_ascii_chars() {
        assert_eq!(
            tokens(r#";:=,"\_"#),
            [Semicolon, Colon, Equal, Comma, DQuote, Symbol(r"\"), Word("_")]
        );
    }

    #[test]
    fn tokenizes_escape_sequences() {
        assert_eq!(
            tokens(r"\\\;\,\N"),
            [
                Symbol(r"\\\"),
                Semicolon,
                Symbol(r"\"),
                Comma,
                Symbol(r"\"),
                Word("N"),
            ]
        );
    }

    #[test]
    fn tokenizes_words_and_unicode() {
        assert_eq!(
            tokens("ABC_foo-123 456 你好🎉Hello世界"),
            [
                Word("ABC_foo-123"),
                Symbol(" "),
                Word("456"),
                Symbol(" "),
                UnicodeText("你好🎉"),
                Word("Hello"),
                UnicodeText("世界"),
            ]
        );
    }

    #[test]
    fn tokenizes_control_chars_as_error() {
        for src in ["\x00", "\x07", "\n", "\r", "\x1B", "\x7F"] {
            assert_eq!(tokens(src), [Error], "{src:?}");
        }
        assert_eq!(
            tokens("WORD\x01\x02WORD2"),
            [Word("WORD"), Error, Error, Word("WORD2")]
        );
        assert_eq!(tokens("A\tB"), [Word("A"), Symbol("\t"), Word("B")]);
    }

    #[test]
    fn returns_token_positions() {
        let spanned: Vec<_> = tokenize("DTSTART;TZID=UTC:1").collect();
        assert_eq!(spanned.len(), 7);
        assert_eq!(spanned[0], SpannedToken(Word("DTSTART"), 0..7));
        assert_eq!(spanned[1], SpannedToken(Semicolon, 7..8));
        assert_eq!(spanned[5], SpannedToken(Colon, 16..17));
    }
}
