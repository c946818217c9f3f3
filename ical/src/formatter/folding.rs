// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Line folding (RFC 5545 Section 3.1).
//!
//! Lines longer than the fold length are split by inserting CRLF followed by
//! a single continuation character. Lengths are counted in octets, and a
//! fold never splits a UTF-8 multi-byte sequence.

use std::io::{self, Write};

use strum::{Display, EnumString};

/// Line folding style.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    /// The folding sequence for this style.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }

    /// The continuation character written after CRLF.
    #[must_use]
    pub const fn continuation(self) -> char {
        match self {
            Self::Space => ' ',
            Self::Tab => '\t',
        }
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or 0 for a
/// continuation byte.
const fn utf8_sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0x80..=0xBF => 0,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

/// Writer that folds long lines on the fly.
///
/// Write the content of a logical line with the [`Write`] methods, then end
/// it with [`FoldingWriter::end_line`]. The writer must not be given CR or LF
/// bytes within a line.
#[derive(Debug)]
pub struct FoldingWriter<W: Write> {
    writer: W,
    max_len: Option<usize>,
    style: FoldingStyle,
    /// Octets written on the current physical line
    line_length: usize,
    /// Whether the current physical line holds content past the fold prefix
    has_content: bool,
}

impl<W: Write> FoldingWriter<W> {
    /// Create a folding writer. `None` disables folding.
    pub fn new(writer: W, max_len: Option<usize>, style: FoldingStyle) -> Self {
        Self {
            writer,
            max_len,
            style,
            line_length: 0,
            has_content: false,
        }
    }

    /// Write a complete logical line, including its CRLF.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_all(line.as_bytes())?;
        self.end_line()
    }

    /// Terminate the current logical line with CRLF.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn end_line(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        self.has_content = false;
        Ok(())
    }

    /// Consumes this writer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer.write_all(self.style.as_bytes())?;
        self.line_length = 1;
        self.has_content = false;
        Ok(())
    }
}

impl<W: Write> Write for FoldingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.max_len else {
            self.writer.write_all(buf)?;
            self.line_length += buf.len();
            return Ok(buf.len());
        };

        let mut start = 0;
        for (i, &byte) in buf.iter().enumerate() {
            let char_len = utf8_sequence_len(byte);
            if char_len > 0 && self.has_content && self.line_length + char_len > max_len {
                self.writer.write_all(buf.get(start..i).unwrap_or_default())?;
                start = i;
                self.insert_fold()?;
            }
            self.line_length += 1;
            self.has_content = true;
        }
        self.writer.write_all(buf.get(start..).unwrap_or_default())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Fold one logical line to at most `max_len` octets per physical line.
///
/// The result has no trailing CRLF. Lines are split only at character
/// boundaries, so a character that does not fit moves to the next line.
#[must_use]
pub fn fold_line(line: &str, max_len: usize) -> String {
    fold_line_with(line, max_len, FoldingStyle::Space)
}

/// [`fold_line`] with an explicit continuation style.
#[must_use]
pub fn fold_line_with(line: &str, max_len: usize, style: FoldingStyle) -> String {
    let mut folded = String::with_capacity(line.len() + line.len() / max_len.max(1) * 3);
    let mut line_length = 0;
    let mut has_content = false;
    for c in line.chars() {
        let char_len = c.len_utf8();
        if has_content && line_length + char_len > max_len {
            folded.push_str("\r\n");
            folded.push(style.continuation());
            line_length = 1;
        }
        folded.push(c);
        line_length += char_len;
        has_content = true;
    }
    folded
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;
    use crate::config::{MAX_FOLD_LENGTH, REDUCED_FOLD_LENGTH, Unfolding};
    use crate::syntax::unfold_str;

    fn write_folded(line: &str, max_len: Option<usize>, style: FoldingStyle) -> String {
        let mut writer = FoldingWriter::new(Vec::new(), max_len, style);
        writer.write_line(line).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    fn physical_lengths(folded: &str) -> Vec<usize> {
        folded.split("\r\n").map(str::len).collect()
    }

    #[test]
    fn short_lines_are_untouched() {
        let line = "SUMMARY:Team Meeting";
        assert_eq!(fold_line(line, MAX_FOLD_LENGTH), line);
        assert_eq!(
            write_folded(line, Some(MAX_FOLD_LENGTH), FoldingStyle::Space),
            "SUMMARY:Team Meeting\r\n"
        );
    }

    #[test]
    fn folds_at_the_limit() {
        let line = format!("DESCRIPTION:{}", "x".repeat(200));
        let folded = fold_line(&line, MAX_FOLD_LENGTH);
        let lengths = physical_lengths(&folded);
        assert_eq!(lengths[0], 75);
        assert!(lengths.iter().all(|&len| len <= MAX_FOLD_LENGTH));
        assert!(folded.split("\r\n").skip(1).all(|l| l.starts_with(' ')));
    }

    #[test]
    fn exactly_max_len_does_not_fold() {
        let line = "x".repeat(REDUCED_FOLD_LENGTH);
        assert_eq!(fold_line(&line, REDUCED_FOLD_LENGTH), line);
        let line = "x".repeat(REDUCED_FOLD_LENGTH + 1);
        assert_eq!(
            physical_lengths(&fold_line(&line, REDUCED_FOLD_LENGTH)),
            [REDUCED_FOLD_LENGTH, 2]
        );
    }

    #[test]
    fn never_splits_multibyte_characters() {
        let line = format!("SUMMARY:{}", "日本語テキスト".repeat(10));
        for max_len in [10, 11, 12, 73, 75] {
            let folded = fold_line(&line, max_len);
            for physical in folded.split("\r\n") {
                assert!(physical.len() <= max_len, "{max_len}: {physical:?}");
            }
        }
    }

    #[test]
    fn writer_matches_fold_line() {
        let lines = [
            format!("DESCRIPTION:{}", "é🎉a".repeat(40)),
            format!("X-LONG:{}", "abc".repeat(60)),
            String::from("BEGIN:VCALENDAR"),
        ];
        for line in &lines {
            for style in [FoldingStyle::Space, FoldingStyle::Tab] {
                let expected = format!("{}\r\n", fold_line_with(line, 20, style));
                assert_eq!(write_folded(line, Some(20), style), expected);
            }
        }
    }

    #[test]
    fn writer_handles_split_writes() {
        let line = "SUMMARY:".to_owned() + &"ü".repeat(50);
        let mut writer = FoldingWriter::new(Vec::new(), Some(30), FoldingStyle::Space);
        for chunk in line.as_bytes().chunks(7) {
            writer.write_all(chunk).unwrap();
        }
        writer.end_line().unwrap();
        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output, format!("{}\r\n", fold_line(&line, 30)));
    }

    #[test]
    fn no_folding_when_disabled() {
        let line = "x".repeat(300);
        assert_eq!(
            write_folded(&line, None, FoldingStyle::Space),
            format!("{line}\r\n")
        );
    }

    #[test]
    fn fold_then_unfold_is_identity() {
        let lines = [
            String::new(),
            "A".repeat(74),
            "A".repeat(75),
            "A".repeat(76),
            format!("DESCRIPTION:{}", "  leading spaces ".repeat(12)),
            format!("SUMMARY:{}", "中文🎉\t".repeat(30)),
        ];
        for line in &lines {
            for max_len in [2, 10, REDUCED_FOLD_LENGTH, MAX_FOLD_LENGTH] {
                let folded = format!("{}\r\n", fold_line(line, max_len));
                let unfolded = unfold_str(&folded, Unfolding::Strict).unwrap();
                if line.is_empty() {
                    assert_eq!(unfolded.len(), 1);
                    assert_eq!(unfolded[0].text, "");
                } else {
                    assert_eq!(unfolded.len(), 1, "{line:?} at {max_len}");
                    assert_eq!(&unfolded[0].text, line);
                }
            }
        }
    }

    #[test]
    fn folding_style_parses() {
        assert_eq!("TAB".parse::<FoldingStyle>(), Ok(FoldingStyle::Tab));
        assert_eq!(FoldingStyle::Space.to_string(), "space");
    }
}
