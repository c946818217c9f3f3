// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;

use crate::escape::{escape, split_unescaped, unescape};
use crate::keyword::{KW_TEXT, KW_VALUE};
use crate::model::{Parameter, PropertyKind, ValueKind};

/// A property: a name, its parameters and a value.
///
/// The value is stored in its logical form, with TEXT escapes resolved. A
/// property read from a stream also remembers the value exactly as it was
/// written, and that wire form is reproduced on output as long as the value
/// is not replaced. This keeps redundant or unusual escapes such as `\N`
/// intact across a round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    parameters: Vec<Parameter>,
    value: String,
    wire: Option<String>,
}

impl Property {
    /// Create a property from its logical value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            value: value.into(),
            wire: None,
        }
    }

    /// Create a multi-valued TEXT property, such as `CATEGORIES`.
    ///
    /// Each value is escaped on its own, so commas inside a value survive.
    pub fn with_text_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wire = values
            .into_iter()
            .map(|v| escape(v.as_ref()).into_owned())
            .collect::<Vec<_>>()
            .join(",");
        Self::from_wire(name.into(), Vec::new(), wire)
    }

    /// Create a property from the value as it appears on the wire.
    pub(crate) fn from_wire(name: String, parameters: Vec<Parameter>, wire: String) -> Self {
        let mut property = Self {
            name,
            parameters,
            value: String::new(),
            wire: None,
        };
        property.value = if property.value_kind().is_text() {
            unescape(&wire).into_owned()
        } else {
            wire.clone()
        };
        property.wire = Some(wire);
        property
    }

    /// Builder-style helper to append a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Property name, as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RFC 5545 kind of this property.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        PropertyKind::from_name(&self.name)
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Parameters, in order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Mutable access to the parameters.
    pub fn parameters_mut(&mut self) -> &mut Vec<Parameter> {
        &mut self.parameters
    }

    /// Find the first parameter with the given name.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.is_named(name))
    }

    /// The logical value, with TEXT escapes resolved.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the logical value. The remembered wire form is discarded.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.wire = None;
    }

    /// The individual values of a comma separated TEXT list, unescaped.
    ///
    /// For other value types the whole value is returned as one item.
    #[must_use]
    pub fn text_values(&self) -> Vec<String> {
        if self.value_kind() != ValueKind::TextList {
            return vec![self.value.clone()];
        }

        let wire = self.wire_value();
        split_unescaped(&wire, ',')
            .into_iter()
            .map(|v| unescape(v).into_owned())
            .collect()
    }

    /// How the value is escaped, honoring an explicit `VALUE` parameter.
    #[must_use]
    pub fn value_kind(&self) -> ValueKind {
        match self.parameter(KW_VALUE).and_then(Parameter::value) {
            Some(v) if v.eq_ignore_ascii_case(KW_TEXT) => match self.kind().value_kind() {
                ValueKind::TextList => ValueKind::TextList,
                _ => ValueKind::Text,
            },
            Some(_) => ValueKind::Other,
            None => self.kind().value_kind(),
        }
    }

    /// The value as it is written to a stream.
    ///
    /// This is the remembered wire form for an unmodified property read from
    /// a stream, otherwise the logical value escaped according to
    /// [`Property::value_kind`].
    #[must_use]
    pub fn wire_value(&self) -> Cow<'_, str> {
        if let Some(wire) = &self.wire {
            return Cow::Borrowed(wire);
        }

        if self.value_kind().is_text() {
            escape(&self.value)
        } else if self.value.contains(['\r', '\n']) {
            Cow::Owned(self.value.replace('\r', "").replace('\n', "\\n"))
        } else {
            Cow::Borrowed(&self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_is_kept_until_value_changes() {
        let mut property = Property::from_wire("SUMMARY".into(), Vec::new(), r"Line\NTwo".into());
        assert_eq!(property.value(), "Line\nTwo");
        assert_eq!(property.wire_value(), r"Line\NTwo");

        property.set_value("Line\nTwo");
        assert_eq!(property.wire_value(), r"Line\nTwo");
    }

    #[test]
    fn non_text_values_are_verbatim() {
        let property = Property::from_wire(
            "RRULE".into(),
            Vec::new(),
            r"FREQ=WEEKLY;BYDAY=MO,TU".into(),
        );
        assert_eq!(property.kind(), PropertyKind::RRule);
        assert_eq!(property.value(), r"FREQ=WEEKLY;BYDAY=MO,TU");

        let property = Property::new("DTSTART", "20250101T000000Z");
        assert_eq!(property.wire_value(), "20250101T000000Z");
    }

    #[test]
    fn constructed_text_values_are_escaped() {
        let property = Property::new("SUMMARY", "Hello, World; again\\");
        assert_eq!(property.wire_value(), r"Hello\, World\; again\\");
        assert_eq!(property.text_values(), ["Hello, World; again\\"]);
    }

    #[test]
    fn text_lists_split_on_unescaped_commas() {
        let property = Property::with_text_values("CATEGORIES", ["WORK", "a,b"]);
        assert_eq!(property.wire_value(), r"WORK,a\,b");
        assert_eq!(property.value(), "WORK,a,b");
        assert_eq!(property.text_values(), ["WORK", "a,b"]);
    }

    #[test]
    fn value_parameter_overrides_value_kind() {
        let property = Property::from_wire(
            "X-DATA".into(),
            vec![Parameter::new("VALUE", "BINARY")],
            r"AAA\,".into(),
        );
        assert_eq!(property.value_kind(), ValueKind::Other);
        assert_eq!(property.value(), r"AAA\,");

        let property = Property::new("DESCRIPTION", "x").with_parameter(Parameter::new("value", "text"));
        assert_eq!(property.value_kind(), ValueKind::Text);
    }
}
