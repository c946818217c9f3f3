// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Splits one unfolded line into name, parameters and value:
//!
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! param       = param-name "=" param-value *("," param-value)
//! param-value = paramtext / quoted-string
//! ```
//!
//! The first unquoted colon ends the parameters; everything after it is the
//! value, taken verbatim. Escapes in the value are resolved later, once the
//! property kind is known.

use std::iter::Peekable;
use std::ops::Range;
use std::vec;

use crate::error::{ParameterErrorKind, SyntaxError, SyntaxErrorKind};
use crate::model::{Parameter, ParameterValue, Property};
use crate::syntax::lexer::{SpannedToken, Token, tokenize};
use crate::syntax::unfold::LogicalLine;

/// A scanned content line, borrowing from the logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'src> {
    /// Property name (e.g., "DTSTART", "SUMMARY")
    pub name: &'src str,

    /// Property parameters (semicolon-separated)
    pub parameters: Vec<ScannedParameter<'src>>,

    /// Property value, still escaped
    pub value: &'src str,

    /// Byte offset of the value within the line
    pub value_offset: usize,
}

impl ContentLine<'_> {
    /// Convert into an owned [`Property`], resolving TEXT escapes.
    #[must_use]
    pub fn into_property(self) -> Property {
        let parameters = self
            .parameters
            .into_iter()
            .map(|param| Parameter {
                name: param.name.to_owned(),
                values: param
                    .values
                    .into_iter()
                    .map(|v| ParameterValue {
                        value: v.value.to_owned(),
                        quoted: v.quoted,
                    })
                    .collect(),
            })
            .collect();
        Property::from_wire(self.name.to_owned(), parameters, self.value.to_owned())
    }
}

/// A scanned parameter: `name=value` or `name=value1,value2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedParameter<'src> {
    /// Parameter name (e.g., "TZID", "VALUE")
    pub name: &'src str,

    /// Parameter values (comma-separated)
    pub values: Vec<ScannedParameterValue<'src>>,
}

/// A single scanned parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedParameterValue<'src> {
    /// The value, without quotes
    pub value: &'src str,

    /// Whether the value was quoted in the source
    pub quoted: bool,
}

/// Scan one logical line.
///
/// # Errors
///
/// Returns a [`SyntaxError`] pointing at the first offending byte when the
/// line is empty, has no name, has a malformed parameter, or has no colon
/// before the value.
pub fn scan_line(line: &LogicalLine) -> Result<ContentLine<'_>, SyntaxError> {
    Scanner::new(line).scan()
}

struct Scanner<'src> {
    line: &'src LogicalLine,
    tokens: Peekable<vec::IntoIter<SpannedToken<'src>>>,
}

impl<'src> Scanner<'src> {
    fn new(line: &'src LogicalLine) -> Self {
        let tokens: Vec<_> = tokenize(&line.text).collect();
        Self {
            line,
            tokens: tokens.into_iter().peekable(),
        }
    }

    fn src(&self) -> &'src str {
        &self.line.text
    }

    fn slice(&self, range: Range<usize>) -> &'src str {
        self.src().get(range).unwrap_or_default()
    }

    fn error(&self, offset: usize, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(self.line.number, offset, self.src(), kind)
    }

    fn parameter_error(&self, offset: usize, kind: ParameterErrorKind) -> SyntaxError {
        self.error(offset, SyntaxErrorKind::InvalidParameter(kind))
    }

    /// Offset of the next token, or the end of the line.
    fn position(&mut self) -> usize {
        let end = self.src().len();
        self.tokens.peek().map_or(end, |SpannedToken(_, span)| span.start)
    }

    fn scan(mut self) -> Result<ContentLine<'src>, SyntaxError> {
        if self.src().is_empty() {
            return Err(self.error(0, SyntaxErrorKind::EmptyLine));
        }

        let name = match self.tokens.next() {
            Some(SpannedToken(Token::Word(name), _)) => name,
            _ => return Err(self.error(0, SyntaxErrorKind::MissingName)),
        };

        let mut parameters = Vec::new();
        loop {
            match self.tokens.next() {
                Some(SpannedToken(Token::Colon, span)) => {
                    let value = self.slice(span.end..self.src().len());
                    return Ok(ContentLine {
                        name,
                        parameters,
                        value,
                        value_offset: span.end,
                    });
                }
                Some(SpannedToken(Token::Semicolon, _)) => parameters.push(self.scan_parameter()?),
                Some(SpannedToken(_, span)) => {
                    return Err(self.error(span.start, SyntaxErrorKind::MissingColon));
                }
                None => {
                    let end = self.src().len();
                    return Err(self.error(end, SyntaxErrorKind::MissingColon));
                }
            }
        }
    }

    fn scan_parameter(&mut self) -> Result<ScannedParameter<'src>, SyntaxError> {
        let Some(SpannedToken(Token::Word(name), _)) = self
            .tokens
            .next_if(|SpannedToken(tok, _)| matches!(tok, Token::Word(_)))
        else {
            let offset = self.position();
            return Err(self.parameter_error(offset, ParameterErrorKind::EmptyName));
        };

        match self.tokens.next() {
            Some(SpannedToken(Token::Equal, _)) => {}
            Some(SpannedToken(_, span)) => {
                return Err(self.parameter_error(span.start, ParameterErrorKind::MissingEquals));
            }
            None => {
                let end = self.src().len();
                return Err(self.parameter_error(end, ParameterErrorKind::MissingEquals));
            }
        }

        let mut values = vec![self.scan_parameter_value()?];
        while self
            .tokens
            .next_if(|SpannedToken(tok, _)| *tok == Token::Comma)
            .is_some()
        {
            values.push(self.scan_parameter_value()?);
        }

        Ok(ScannedParameter { name, values })
    }

    fn scan_parameter_value(&mut self) -> Result<ScannedParameterValue<'src>, SyntaxError> {
        if let Some(SpannedToken(_, open)) = self
            .tokens
            .next_if(|SpannedToken(tok, _)| *tok == Token::DQuote)
        {
            let src = self.src();
            for SpannedToken(tok, span) in self.tokens.by_ref() {
                if tok == Token::DQuote {
                    return Ok(ScannedParameterValue {
                        value: src.get(open.end..span.start).unwrap_or_default(),
                        quoted: true,
                    });
                }
            }
            return Err(self.parameter_error(open.start, ParameterErrorKind::UnterminatedQuote));
        }

        // paramtext allows `=` and anything else but the separators
        let start = self.position();
        let mut end = start;
        while let Some(SpannedToken(_, span)) = self.tokens.next_if(|SpannedToken(tok, _)| {
            !matches!(tok, Token::Semicolon | Token::Colon | Token::Comma)
        }) {
            end = span.end;
        }
        Ok(ScannedParameterValue {
            value: self.slice(start..end),
            quoted: false,
        })
    }
}
