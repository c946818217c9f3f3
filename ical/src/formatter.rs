// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! Serializes a [`Calendar`] back to text: root properties first, then each
//! component as a `BEGIN`/`END` block, with lines ending in CRLF and folded
//! at the configured length. Names keep their original spelling, and values
//! of unmodified parsed properties are written exactly as they were read.
//!
//! # Example
//!
//! ```
//! use calfold::{FormatOptions, parse};
//!
//! let src = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nEND:VCALENDAR\r\n";
//! let calendar = parse(src).unwrap();
//!
//! let ics = FormatOptions::default().write_to_string(&calendar).unwrap();
//! assert_eq!(ics, src);
//! ```

mod component;
mod folding;
mod property;

use std::io::Write;

use crate::config::MAX_FOLD_LENGTH;
use crate::error::OutputError;
use crate::formatter::component::write_calendar;
use crate::model::Calendar;
use crate::validate::Validator;

pub use crate::formatter::folding::{FoldingStyle, FoldingWriter, fold_line, fold_line_with};

/// Convenience function to format a [`Calendar`] to a `String` (uses default options).
///
/// # Errors
///
/// Only fails if writing to the internal buffer fails, which does not happen
/// in practice; validation is off by default.
pub fn format(calendar: &Calendar) -> Result<String, OutputError> {
    FormatOptions::default().write_to_string(calendar)
}

/// Write a calendar to `writer`.
///
/// `fold_length` of `None` disables folding. If `validate` is set the
/// calendar is validated first and nothing is written on failure.
///
/// # Errors
///
/// Returns [`OutputError::Validation`] if validation was requested and
/// failed, or [`OutputError::Io`] if writing fails.
pub fn output<W: Write>(
    calendar: &Calendar,
    writer: W,
    fold_length: Option<usize>,
    validate: bool,
) -> Result<(), OutputError> {
    FormatOptions::default()
        .folding(fold_length)
        .validate(validate)
        .write(calendar, writer)
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,

    /// Validate the calendar before writing.
    ///
    /// Default: `false`.
    pub validate: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(MAX_FOLD_LENGTH),
            folding_style: FoldingStyle::default(),
            validate: false,
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Enable or disable validation before writing.
    #[must_use]
    pub const fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Write a [`Calendar`] to any `Write` implementer.
    ///
    /// The output is rendered into a buffer first and handed to `writer` in
    /// one `write_all`, so nothing is written if validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Validation`] if validation was requested and
    /// failed, or [`OutputError::Io`] if writing fails.
    pub fn write<W: Write>(&self, calendar: &Calendar, mut writer: W) -> Result<(), OutputError> {
        let buffer = self.render(calendar)?;
        writer.write_all(&buffer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a [`Calendar`] to a `String`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Validation`] if validation was requested and
    /// failed.
    pub fn write_to_string(&self, calendar: &Calendar) -> Result<String, OutputError> {
        let buffer = self.render(calendar)?;
        String::from_utf8(buffer).map_err(|e| {
            OutputError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    fn render(&self, calendar: &Calendar) -> Result<Vec<u8>, OutputError> {
        Validator::new(self.validate).validate(calendar)?;

        let mut f = FoldingWriter::new(Vec::new(), self.folding, self.folding_style);
        write_calendar(&mut f, calendar)?;
        let buffer = f.into_inner();
        tracing::debug!(
            bytes = buffer.len(),
            folding = ?self.folding,
            "formatted calendar"
        );
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Component, Property};
    use crate::parse;

    #[test]
    fn formats_constructed_calendar() {
        let calendar = Calendar::new().with_component(
            Component::new("VCALENDAR")
                .with_property(Property::new("VERSION", "2.0"))
                .with_child(
                    Component::new("VEVENT")
                        .with_property(Property::new("SUMMARY", "Lunch; then, coffee")),
                ),
        );
        assert_eq!(
            format(&calendar).unwrap(),
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nSUMMARY:Lunch\\; then\\, coffee\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n"
        );
    }

    #[test]
    fn validation_failure_writes_nothing() {
        let calendar = parse("BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n").unwrap();
        let mut sink = Vec::new();
        let result = output(&calendar, &mut sink, Some(MAX_FOLD_LENGTH), true);
        assert!(matches!(result, Err(OutputError::Validation(_))));
        assert!(sink.is_empty());

        output(&calendar, &mut sink, Some(MAX_FOLD_LENGTH), false).unwrap();
        assert_eq!(sink, b"BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n");
    }

    #[test]
    fn folds_with_configured_style() {
        let calendar = Calendar::new().with_component(
            Component::new("X-C").with_property(Property::new("X-LONG", "a".repeat(30))),
        );
        let options = FormatOptions::default()
            .folding(Some(20))
            .folding_style(FoldingStyle::Tab);
        assert_eq!(
            options.write_to_string(&calendar).unwrap(),
            "BEGIN:X-C\r\nX-LONG:aaaaaaaaaaaaa\r\n\taaaaaaaaaaaaaaaaa\r\nEND:X-C\r\n"
        );
    }
}
