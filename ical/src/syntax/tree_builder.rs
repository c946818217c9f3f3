// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder for constructing the component hierarchy from content lines.
//!
//! The builder uses a stack of open components:
//! 1. On `BEGIN:X`, push a new component onto the stack
//! 2. On a property, add it to the component on top of the stack, or to the
//!    calendar root if the stack is empty
//! 3. On `END:X`, pop the top component and attach it to its parent
//!
//! Names are compared case-insensitively and keep their original spelling.

use std::io;

use crate::error::{ParseError, SyntaxError, SyntaxErrorKind};
use crate::keyword::{KW_BEGIN, KW_END};
use crate::model::{BlockSpelling, Calendar, Component};
use crate::syntax::scanner::{ContentLine, scan_line};
use crate::syntax::unfold::LogicalLine;

/// Where the builder is in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState<'a> {
    /// No component has been opened yet
    AwaitingBegin,

    /// Inside a component
    InComponent {
        /// Name of the innermost open component
        name: &'a str,
        /// Number of open components
        depth: usize,
    },

    /// At least one top-level component has been closed and none is open
    Done,
}

#[derive(Debug)]
struct OpenComponent {
    component: Component,
    begin: LogicalLine,
    begin_keyword: String,
}

/// Incremental tree builder, fed one logical line at a time.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    calendar: Calendar,
    stack: Vec<OpenComponent>,
    last_line: usize,
}

impl TreeBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> BuilderState<'_> {
        match self.stack.last() {
            Some(open) => BuilderState::InComponent {
                name: &open.component.name,
                depth: self.stack.len(),
            },
            None if self.calendar.components.is_empty() => BuilderState::AwaitingBegin,
            None => BuilderState::Done,
        }
    }

    /// Feed one logical line.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed line or broken BEGIN/END structure.
    pub fn push(&mut self, line: &LogicalLine) -> Result<(), SyntaxError> {
        self.last_line = line.number;
        let content = scan_line(line)?;

        if content.name.eq_ignore_ascii_case(KW_BEGIN) {
            let name = component_name(line, &content)?;
            tracing::trace!(line = line.number, name, "begin component");
            self.stack.push(OpenComponent {
                component: Component::new(name),
                begin: line.clone(),
                begin_keyword: content.name.to_owned(),
            });
        } else if content.name.eq_ignore_ascii_case(KW_END) {
            let name = component_name(line, &content)?;
            let fail = |kind| SyntaxError::new(line.number, content.value_offset, &line.text, kind);

            let Some(mut open) = self.stack.pop() else {
                return Err(fail(SyntaxErrorKind::UnmatchedEnd { name: name.to_owned() }));
            };
            if !open.component.is_named(name) {
                return Err(fail(SyntaxErrorKind::MismatchedEnd {
                    expected: open.component.name,
                    found: name.to_owned(),
                }));
            }

            tracing::trace!(line = line.number, name, "end component");
            open.component.spelling = Some(BlockSpelling {
                begin: open.begin_keyword,
                end: content.name.to_owned(),
                end_name: name.to_owned(),
            });
            match self.stack.last_mut() {
                Some(parent) => parent.component.children.push(open.component),
                None => self.calendar.components.push(open.component),
            }
        } else {
            let property = content.into_property();
            match self.stack.last_mut() {
                Some(open) => open.component.properties.push(property),
                None => {
                    tracing::debug!(
                        line = line.number,
                        name = property.name(),
                        "property outside of any component"
                    );
                    self.calendar.properties.push(property);
                }
            }
        }
        Ok(())
    }

    /// Finish building.
    ///
    /// # Errors
    ///
    /// Fails if a component is still open, pointing at its `BEGIN` line, or
    /// if no component was ever opened.
    pub fn finish(mut self) -> Result<Calendar, SyntaxError> {
        if self.state() == BuilderState::AwaitingBegin {
            return Err(SyntaxError::new(
                self.last_line.max(1),
                0,
                String::new(),
                SyntaxErrorKind::MissingComponent,
            ));
        }
        match self.stack.pop() {
            Some(open) => Err(SyntaxError::new(
                open.begin.number,
                0,
                open.begin.text,
                SyntaxErrorKind::UnterminatedComponent {
                    name: open.component.name,
                },
            )),
            None => Ok(self.calendar),
        }
    }
}

fn component_name<'src>(
    line: &LogicalLine,
    content: &ContentLine<'src>,
) -> Result<&'src str, SyntaxError> {
    if !content.parameters.is_empty() {
        return Err(SyntaxError::new(
            line.number,
            content.name.len(),
            &line.text,
            SyntaxErrorKind::BeginEndWithParameters {
                name: content.name.to_owned(),
            },
        ));
    }
    if content.value.is_empty() {
        return Err(SyntaxError::new(
            line.number,
            content.value_offset,
            &line.text,
            SyntaxErrorKind::EmptyComponentName,
        ));
    }
    Ok(content.value)
}

/// Build a calendar from a sequence of logical lines, stopping at the first error.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if reading a line fails, and
/// [`ParseError::Syntax`] for malformed lines or broken nesting.
pub fn build_tree<I>(lines: I) -> Result<Calendar, ParseError>
where
    I: IntoIterator<Item = io::Result<LogicalLine>>,
{
    let mut builder = TreeBuilder::new();
    let mut count = 0_usize;
    for line in lines {
        builder.push(&line?)?;
        count += 1;
    }

    let calendar = builder.finish()?;
    tracing::debug!(
        lines = count,
        components = calendar.components.len(),
        "built calendar tree"
    );
    Ok(calendar)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;
    use crate::config::Unfolding;
    use crate::syntax::unfold::unfold_str;

    fn build(src: &str) -> Result<Calendar, ParseError> {
        build_tree(unfold_str(src, Unfolding::Strict).unwrap().into_iter().map(Ok))
    }

    fn syntax_error(src: &str) -> SyntaxError {
        match build(src) {
            Err(ParseError::Syntax(err)) => err,
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn builds_nested_components() {
        let src = "\
BEGIN:VCALENDAR\r
VERSION:2.0\r
BEGIN:VEVENT\r
UID:1\r
BEGIN:VALARM\r
ACTION:DISPLAY\r
END:VALARM\r
END:VEVENT\r
BEGIN:VTODO\r
UID:2\r
END:VTODO\r
END:VCALENDAR\r
";
        let calendar = build(src).unwrap();
        assert_eq!(calendar.components.len(), 1);
        let vcalendar = &calendar.components[0];
        assert_eq!(vcalendar.properties.len(), 1);
        assert_eq!(vcalendar.children.len(), 2);
        assert_eq!(vcalendar.children[0].name, "VEVENT");
        assert_eq!(vcalendar.children[0].children[0].name, "VALARM");
        assert_eq!(vcalendar.children[1].name, "VTODO");
    }

    #[test]
    fn names_match_case_insensitively_and_keep_spelling() {
        let calendar = build("begin:vcalendar\r\nEnd:VCalendar\r\n").unwrap();
        let vcalendar = &calendar.components[0];
        assert_eq!(vcalendar.name, "vcalendar");
        assert_eq!(
            vcalendar.spelling,
            Some(BlockSpelling {
                begin: "begin".to_owned(),
                end: "End".to_owned(),
                end_name: "VCalendar".to_owned(),
            })
        );
    }

    #[test]
    fn rejects_streams_without_components() {
        let err = syntax_error("");
        assert_eq!(err.kind, SyntaxErrorKind::MissingComponent);

        let err = syntax_error("X-ROOT:1\r\n");
        assert_eq!((err.kind, err.line), (SyntaxErrorKind::MissingComponent, 1));
    }

    #[test]
    fn tracks_state() {
        let line = |text: &str| LogicalLine {
            number: 1,
            text: text.to_owned(),
        };

        let mut builder = TreeBuilder::new();
        assert_eq!(builder.state(), BuilderState::AwaitingBegin);
        builder.push(&line("BEGIN:VCALENDAR")).unwrap();
        builder.push(&line("BEGIN:VEVENT")).unwrap();
        assert_eq!(
            builder.state(),
            BuilderState::InComponent {
                name: "VEVENT",
                depth: 2
            }
        );
        builder.push(&line("END:VEVENT")).unwrap();
        builder.push(&line("END:VCALENDAR")).unwrap();
        assert_eq!(builder.state(), BuilderState::Done);
    }

    #[test]
    fn keeps_root_properties_and_multiple_top_level_components() {
        let calendar = build("X-ROOT:1\r\nBEGIN:A\r\nEND:A\r\nBEGIN:B\r\nEND:B\r\n").unwrap();
        assert_eq!(calendar.properties.len(), 1);
        assert_eq!(calendar.components.len(), 2);
    }

    #[test]
    fn rejects_broken_nesting() {
        let err = syntax_error("BEGIN:VCALENDAR\r\nEND:VEVENT\r\n");
        assert_eq!(
            err.kind,
            SyntaxErrorKind::MismatchedEnd {
                expected: "VCALENDAR".to_owned(),
                found: "VEVENT".to_owned()
            }
        );
        assert_eq!((err.line, err.column), (2, 5));

        let err = syntax_error("END:VCALENDAR\r\n");
        assert!(matches!(err.kind, SyntaxErrorKind::UnmatchedEnd { .. }));

        let err = syntax_error("BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nEND:VEVENT\r\n");
        assert_eq!(
            err.kind,
            SyntaxErrorKind::UnterminatedComponent {
                name: "VCALENDAR".to_owned()
            }
        );
        assert_eq!(err.line, 1);
    }

    #[test]
    fn rejects_malformed_begin_end() {
        let err = syntax_error("BEGIN;X=1:VCALENDAR\r\n");
        assert!(matches!(
            err.kind,
            SyntaxErrorKind::BeginEndWithParameters { .. }
        ));
        assert_eq!(err.column, 6);

        let err = syntax_error("BEGIN:\r\n");
        assert_eq!(err.kind, SyntaxErrorKind::EmptyComponentName);
    }

    #[test]
    fn stops_at_first_line_error() {
        let err = syntax_error("BEGIN:VCALENDAR\r\nSUMMARY\r\nEND:VCALENDAR\r\n");
        assert_eq!(err.kind, SyntaxErrorKind::MissingColon);
        assert_eq!(err.line, 2);
    }
}
