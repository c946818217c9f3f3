// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Unfolding of physical lines into logical content lines (RFC 5545 Section 3.1).
//!
//! A fold is a line break immediately followed by a single SPACE or HTAB.
//! Unfolding removes the line break and that one whitespace character; any
//! further whitespace belongs to the content.

use std::collections::VecDeque;
use std::io::{self, BufRead};

use crate::config::Unfolding;

/// A logical content line, with folds removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the physical line the logical line starts on
    pub number: usize,

    /// Unfolded content, without line terminator
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    CrLf,
    Lf,
    Cr,
    Eof,
}

#[derive(Debug)]
struct PhysicalLine {
    number: usize,
    content: Vec<u8>,
    terminator: Terminator,
}

impl PhysicalLine {
    fn is_continuation(&self) -> bool {
        matches!(self.content.first(), Some(b' ' | b'\t'))
    }
}

/// Iterator over the logical lines of a byte stream.
///
/// Reading is incremental: at most one physical line of lookahead is held
/// besides the logical line being assembled. The iterator stops after the
/// first error.
#[derive(Debug)]
pub struct Unfolder<R> {
    reader: R,
    mode: Unfolding,
    pending: VecDeque<PhysicalLine>,
    line_number: usize,
    eof: bool,
    failed: bool,
}

impl<R: BufRead> Unfolder<R> {
    /// Create an unfolder over `reader`.
    pub fn new(reader: R, mode: Unfolding) -> Self {
        Self {
            reader,
            mode,
            pending: VecDeque::new(),
            line_number: 0,
            eof: false,
            failed: false,
        }
    }

    /// Read one chunk up to LF and queue the physical lines it contains.
    fn fill(&mut self) -> io::Result<()> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            self.eof = true;
            return Ok(());
        }

        let terminator = if buf.ends_with(b"\r\n") {
            buf.truncate(buf.len() - 2);
            Terminator::CrLf
        } else if buf.ends_with(b"\n") {
            buf.truncate(buf.len() - 1);
            Terminator::Lf
        } else {
            Terminator::Eof
        };

        if self.mode.is_relaxed() && buf.contains(&b'\r') {
            let mut pieces = buf.split(|&b| b == b'\r').peekable();
            while let Some(piece) = pieces.next() {
                let piece_terminator = if pieces.peek().is_some() {
                    Terminator::Cr
                } else {
                    terminator
                };
                self.push_physical(piece.to_vec(), piece_terminator);
            }
        } else {
            self.push_physical(buf, terminator);
        }
        Ok(())
    }

    fn push_physical(&mut self, content: Vec<u8>, terminator: Terminator) {
        self.line_number += 1;
        self.pending.push_back(PhysicalLine {
            number: self.line_number,
            content,
            terminator,
        });
    }

    fn peek_physical(&mut self) -> io::Result<Option<&PhysicalLine>> {
        while self.pending.is_empty() && !self.eof {
            self.fill()?;
        }
        Ok(self.pending.front())
    }

    fn next_physical(&mut self) -> io::Result<Option<PhysicalLine>> {
        self.peek_physical()?;
        Ok(self.pending.pop_front())
    }

    /// A bare LF or lone CR only introduces a fold in relaxed mode.
    fn folds_after(&self, terminator: Terminator) -> bool {
        match terminator {
            Terminator::CrLf => true,
            Terminator::Lf | Terminator::Cr => self.mode.is_relaxed(),
            Terminator::Eof => false,
        }
    }

    fn next_logical(&mut self) -> io::Result<Option<LogicalLine>> {
        let first = loop {
            match self.next_physical()? {
                None => return Ok(None),
                Some(line) if line.content.is_empty() && self.mode.is_relaxed() => {
                    tracing::trace!(line = line.number, "skipping blank line");
                }
                Some(line) => break line,
            }
        };

        let number = first.number;
        let mut content = first.content;
        let mut terminator = first.terminator;
        loop {
            let folds = self.folds_after(terminator);
            match self.peek_physical()? {
                Some(next) if folds && next.is_continuation() => {}
                _ => break,
            }
            let Some(next) = self.pending.pop_front() else {
                break;
            };
            content.extend(next.content.iter().skip(1));
            terminator = next.terminator;
        }

        let text = String::from_utf8(content).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {number} is not valid UTF-8: {err}"),
            )
        })?;
        Ok(Some(LogicalLine { number, text }))
    }
}

impl<R: BufRead> Iterator for Unfolder<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_logical() {
            Ok(line) => line.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Unfold a whole string.
///
/// # Errors
///
/// Only fails if the input contains invalid UTF-8, which a `&str` never does,
/// so this is here for symmetry with streaming input.
pub fn unfold_str(src: &str, mode: Unfolding) -> io::Result<Vec<LogicalLine>> {
    Unfolder::new(src.as_bytes(), mode).collect()
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;

    fn texts(src: &str, mode: Unfolding) -> Vec<String> {
        unfold_str(src, mode)
            .unwrap()
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn removes_crlf_followed_by_one_whitespace() {
        let src = "DESCRIPTION:This is a lo\r\n ng description\r\n\t  that exists\r\nSUMMARY:x\r\n";
        assert_eq!(
            texts(src, Unfolding::Strict),
            ["DESCRIPTION:This is a long description  that exists", "SUMMARY:x"]
        );
    }

    #[test]
    fn numbers_lines_by_first_physical_line() {
        let lines = unfold_str("A:1\r\nB:2\r\n 3\r\nC:4", Unfolding::Strict).unwrap();
        let numbers: Vec<_> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, [1, 2, 4]);
        assert_eq!(lines[2].text, "C:4");
    }

    #[test]
    fn strict_mode_needs_crlf_before_a_fold() {
        let src = "SUMMARY:a\n b\r\n";
        assert_eq!(texts(src, Unfolding::Strict), ["SUMMARY:a", " b"]);
        assert_eq!(texts(src, Unfolding::Relaxed), ["SUMMARY:ab"]);
    }

    #[test]
    fn bare_lf_terminators_are_accepted() {
        let src = "BEGIN:VCALENDAR\nVERSION:2.0\nEND:VCALENDAR\n";
        assert_eq!(
            texts(src, Unfolding::Strict),
            ["BEGIN:VCALENDAR", "VERSION:2.0", "END:VCALENDAR"]
        );
    }

    #[test]
    fn blank_lines() {
        let src = "A:1\r\n\r\nB:2\r\n";
        assert_eq!(texts(src, Unfolding::Strict), ["A:1", "", "B:2"]);
        assert_eq!(texts(src, Unfolding::Relaxed), ["A:1", "B:2"]);
    }

    #[test]
    fn lone_cr_ends_a_line_in_relaxed_mode() {
        let src = "A:1\rB:2\r\n";
        assert_eq!(texts(src, Unfolding::Relaxed), ["A:1", "B:2"]);
        assert_eq!(texts(src, Unfolding::Strict), ["A:1\rB:2"]);
    }

    #[test]
    fn folds_inside_multibyte_characters() {
        // "é" is C3 A9, folded between its two octets
        let src = b"SUMMARY:caf\xC3\r\n \xA9\r\n";
        let lines: Vec<_> = Unfolder::new(&src[..], Unfolding::Strict)
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(lines[0].text, "SUMMARY:café");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let src = b"SUMMARY:\xFF\r\nUID:1\r\n";
        let mut unfolder = Unfolder::new(&src[..], Unfolding::Strict);
        let err = unfolder.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(unfolder.next().is_none());
    }

    #[test]
    fn handles_input_without_trailing_newline() {
        assert_eq!(texts("A:1\r\n b", Unfolding::Strict), ["A:1b"]);
        assert!(texts("", Unfolding::Strict).is_empty());
    }
}
