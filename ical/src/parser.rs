// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::io::{BufReader, Read};

use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::model::Calendar;
use crate::syntax::{Unfolder, build_tree};
use crate::validate::validate;

/// Parse an iCalendar string with default options.
///
/// ## Errors
///
/// Fails on the first malformed line or broken BEGIN/END structure.
///
/// ## Examples
///
/// Parsing valid iCalendar source will return the calendar
///
/// ```
/// # use calfold::parse;
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// SUMMARY:Test Event\r\n\
/// END:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// ";
/// let calendar = parse(src).unwrap();
/// assert_eq!(calendar.components[0].children[0].name, "VEVENT");
/// ```
///
/// Syntax errors carry the line, the column and the unfolded content, which
/// is enough to render a report
///
/// ```
/// # use calfold::{ParseError, parse};
/// use ariadne::{Color, Label, Report, ReportKind, Source};
/// let src = "\
/// BEGIN:VCALENDAR\r\n\
/// BEGIN:VEVENT\r\n\
/// END:VCALENDAR\r\n\
/// END:VEVENT\r\n\
/// ";
/// let Err(ParseError::Syntax(err)) = parse(src) else {
///     panic!("expected a syntax error");
/// };
/// assert_eq!(err.line, 3);
///
/// let report = Report::build(ReportKind::Error, err.span())
///     .with_config(ariadne::Config::new().with_index_type(ariadne::IndexType::Byte))
///     .with_message(format!("line {}", err.line))
///     .with_label(
///         Label::new(err.span())
///             .with_message(err.kind.to_string())
///             .with_color(Color::Red),
///     )
///     .finish();
/// let _ = report.eprint(Source::from(err.content.as_str()));
/// ```
pub fn parse(src: &str) -> Result<Calendar, ParseError> {
    parse_with(src, &ParseOptions::default())
}

/// Parse an iCalendar string.
///
/// ## Errors
///
/// See [`build`].
pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Calendar, ParseError> {
    build(src.as_bytes(), options)
}

/// Read and parse an iCalendar stream.
///
/// The input is unfolded incrementally, so memory use is bounded by the
/// longest logical line plus the calendar being built.
///
/// ## Errors
///
/// - [`ParseError::Io`] if the reader fails or the input is not UTF-8
/// - [`ParseError::Syntax`] for the first malformed line or broken nesting
/// - [`ParseError::Validation`] if [`ParseOptions::validate`] is set and the
///   calendar breaks a rule
#[tracing::instrument(skip(reader))]
pub fn build<R: Read>(reader: R, options: &ParseOptions) -> Result<Calendar, ParseError> {
    let lines = Unfolder::new(BufReader::new(reader), options.unfolding);
    let calendar = build_tree(lines)?;
    if options.validate {
        validate(&calendar)?;
    }
    Ok(calendar)
}
