// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while reading and writing iCalendar streams.

use std::io;
use std::ops::Range;

use crate::validate::ValidationError;

/// Errors that can occur during parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The underlying reader failed, or a line was not valid UTF-8
    #[error("failed to read iCalendar stream: {0}")]
    Io(#[from] io::Error),

    /// A malformed content line or a broken BEGIN/END structure
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The calendar was well-formed but broke a validation rule
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Errors that can occur during formatting
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The underlying writer failed
    #[error("failed to write iCalendar stream: {0}")]
    Io(#[from] io::Error),

    /// Validation was requested and the calendar broke a rule
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A syntax error, located on the offending logical line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct SyntaxError {
    /// 1-based physical line number on which the logical line starts
    pub line: usize,
    /// 1-based byte column within the unfolded line
    pub column: usize,
    /// The unfolded line
    pub content: String,
    /// What went wrong
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub(crate) fn new(
        line: usize,
        offset: usize,
        content: impl Into<String>,
        kind: SyntaxErrorKind,
    ) -> Self {
        Self {
            line,
            column: offset + 1,
            content: content.into(),
            kind,
        }
    }

    /// Byte range within [`SyntaxError::content`] the error points at.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        let start = self.column.saturating_sub(1).min(self.content.len());
        let end = if start < self.content.len() {
            self.content.len()
        } else {
            start
        };
        start..end
    }
}

/// Kinds of syntax errors.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    /// Empty content line
    #[error("empty content line")]
    EmptyLine,

    /// The line does not start with a property name
    ///
    /// Example: `:value` or ` folded` after a broken fold
    #[error("missing property name")]
    MissingName,

    /// Missing colon separator
    ///
    /// Example: `PROPNAME value` instead of `PROPNAME:value`
    #[error("missing colon in property")]
    MissingColon,

    /// Invalid parameter syntax
    #[error("{0}")]
    InvalidParameter(ParameterErrorKind),

    /// BEGIN or END line with parameters (not allowed per RFC 5545)
    #[error("{name} line with parameters (not allowed per RFC 5545)")]
    BeginEndWithParameters {
        /// `BEGIN` or `END`, as written
        name: String,
    },

    /// BEGIN or END without a component name
    #[error("missing component name")]
    EmptyComponentName,

    /// Unmatched END (no corresponding BEGIN)
    #[error("unmatched END:{name} (no corresponding BEGIN)")]
    UnmatchedEnd {
        /// Component name that was being closed
        name: String,
    },

    /// Mismatched BEGIN/END names
    #[error("mismatched nesting: expected END:{expected}, found END:{found}")]
    MismatchedEnd {
        /// Name of the innermost open component
        expected: String,
        /// Name found on the END line
        found: String,
    },

    /// Input ended without a single `BEGIN` line
    #[error("no component found (missing BEGIN line)")]
    MissingComponent,

    /// Input ended while a component was still open
    #[error("unmatched BEGIN:{name} (component not closed)")]
    UnterminatedComponent {
        /// Name of the innermost open component
        name: String,
    },
}

/// Specific parameter parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterErrorKind {
    /// Missing equals sign.
    ///
    /// Example: `TZID America/New_York`
    #[error("missing equals in parameter")]
    MissingEquals,

    /// Empty parameter name.
    ///
    /// Example: `;=value`
    #[error("empty parameter name")]
    EmptyName,

    /// Unterminated quoted string.
    ///
    /// Example: `PARAM="unclosed value`
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display_and_span() {
        let err = SyntaxError::new(3, 7, "SUMMARY Hello", SyntaxErrorKind::MissingColon);
        assert_eq!(err.column, 8);
        assert_eq!(err.to_string(), "line 3, column 8: missing colon in property");
        assert_eq!(err.span(), 7..13);

        let err = SyntaxError::new(
            1,
            0,
            "",
            SyntaxErrorKind::InvalidParameter(ParameterErrorKind::UnterminatedQuote),
        );
        assert_eq!(err.span(), 0..0);
        assert_eq!(err.to_string(), "line 1, column 1: unterminated quoted string");
    }
}
