// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property and parameter formatting.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::formatter::folding::FoldingWriter;
use crate::model::{Parameter, ParameterValue, Property};

/// Write a property as one logical line: `NAME;PARAM=value:value`.
pub fn write_property<W: Write>(f: &mut FoldingWriter<W>, property: &Property) -> io::Result<()> {
    f.write_all(property.name().as_bytes())?;
    for parameter in property.parameters() {
        write_parameter(f, parameter)?;
    }
    f.write_all(b":")?;
    f.write_all(property.wire_value().as_bytes())?;
    f.end_line()
}

/// Write a single parameter, with its semicolon prefix.
fn write_parameter<W: Write>(f: &mut FoldingWriter<W>, parameter: &Parameter) -> io::Result<()> {
    write!(f, ";{}=", parameter.name)?;
    for (i, value) in parameter.values.iter().enumerate() {
        if i > 0 {
            f.write_all(b",")?;
        }
        f.write_all(quote_if_needed(value).as_bytes())?;
    }
    Ok(())
}

/// Quote a parameter value that was quoted or contains `;`, `:` or `,`.
///
/// A quoted-string cannot hold DQUOTE, so those become single quotes. Line
/// breaks are dropped.
fn quote_if_needed(value: &ParameterValue) -> Cow<'_, str> {
    let text = value.value.as_str();
    let text: Cow<'_, str> = if text.contains(['\r', '\n']) {
        Cow::Owned(text.replace(['\r', '\n'], ""))
    } else {
        Cow::Borrowed(text)
    };

    let needs_quoting = value.quoted || text.contains([';', ':', ',']);
    if needs_quoting {
        Cow::Owned(format!("\"{}\"", text.replace('"', "'")))
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::folding::FoldingStyle;

    fn render(property: &Property) -> String {
        let mut f = FoldingWriter::new(Vec::new(), None, FoldingStyle::Space);
        write_property(&mut f, property).unwrap();
        String::from_utf8(f.into_inner()).unwrap()
    }

    #[test]
    fn writes_parameters_and_escaped_value() {
        let property = Property::new("SUMMARY", "Hello, World")
            .with_parameter(Parameter::new("LANGUAGE", "en"));
        assert_eq!(render(&property), "SUMMARY;LANGUAGE=en:Hello\\, World\r\n");
    }

    #[test]
    fn quotes_parameter_values_when_needed() {
        let property = Property::new("ATTENDEE", "mailto:jane@example.com")
            .with_parameter(Parameter::new("CN", "Doe, Jane"))
            .with_parameter(Parameter::with_values(
                "DELEGATED-TO",
                ["mailto:a@example.com", "mailto:b@example.com"],
            ))
            .with_parameter(Parameter {
                name: "X-Q".to_owned(),
                values: vec![ParameterValue::quoted("plain")],
            });
        assert_eq!(
            render(&property),
            "ATTENDEE;CN=\"Doe, Jane\";DELEGATED-TO=\"mailto:a@example.com\",\"mailto:b@example.com\";X-Q=\"plain\":mailto:jane@example.com\r\n"
        );
    }

    #[test]
    fn sanitizes_unrepresentable_parameter_values() {
        let value = ParameterValue::new("say \"hi\"; now\r\n");
        assert_eq!(quote_if_needed(&value), "\"say 'hi'; now\"");
        let value = ParameterValue::new("a\"b");
        assert_eq!(quote_if_needed(&value), "a\"b");
    }
}
