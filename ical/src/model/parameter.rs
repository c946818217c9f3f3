// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::model::ParameterKind;

/// A single value of a property parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterValue {
    /// The value, without surrounding quotes
    pub value: String,

    /// Whether the value was written as a quoted string
    pub quoted: bool,
}

impl ParameterValue {
    /// Create an unquoted value. The writer quotes it if needed.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    /// Create a value that is always written quoted.
    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }
}

/// A property parameter, such as `TZID=Europe/Paris` or `MEMBER="a","b"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name, as written
    pub name: String,

    /// Parameter values, in order
    pub values: Vec<ParameterValue>,
}

impl Parameter {
    /// Create a parameter with a single value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![ParameterValue::new(value)],
        }
    }

    /// Create a parameter with several values.
    pub fn with_values<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(ParameterValue::new).collect(),
        }
    }

    /// Returns the RFC 5545 kind of this parameter, if it is a known one.
    #[must_use]
    pub fn kind(&self) -> Option<ParameterKind> {
        ParameterKind::from_name(&self.name)
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the first value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(|v| v.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn builds_parameters() {
        let param = Parameter::new("tzid", "Europe/Paris");
        assert_eq!(param.kind(), Some(ParameterKind::TimeZoneIdentifier));
        assert!(param.is_named("TZID"));
        assert_eq!(param.value(), Some("Europe/Paris"));

        let param = Parameter::with_values("X-LIST", ["a", "b"]);
        assert_eq!(param.kind(), None);
        assert_eq!(param.values.len(), 2);
        assert!(!param.values[1].quoted);
    }
}
