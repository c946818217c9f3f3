// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::validate::Cardinality;

/// A single broken rule.
///
/// `component` fields hold the path of the offending component, such as
/// `VCALENDAR/VEVENT/VALARM`, spelled as in the input.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// Not exactly one top-level component
    #[error("expected exactly one top-level VCALENDAR component, found {found}")]
    TopLevelCount {
        /// Number of top-level components
        found: usize,
    },

    /// The top-level component is not `VCALENDAR`
    #[error("top-level component must be VCALENDAR, found {found}")]
    NotVCalendar {
        /// Name of the top-level component
        found: String,
    },

    /// A property outside of any component
    #[error("property {property} is not inside a component")]
    RootProperty {
        /// Property name
        property: String,
    },

    /// A property occurs too often or too rarely
    #[error("{component}: property {property} occurs {count} times, expected {expected}")]
    PropertyCount {
        /// Component path
        component: String,
        /// Property name
        property: &'static str,
        /// Number of occurrences
        count: usize,
        /// Allowed number of occurrences
        expected: Cardinality,
    },

    /// A standard property in a component that does not define it
    #[error("{component}: property {property} is not allowed here")]
    PropertyNotAllowed {
        /// Component path
        component: String,
        /// Property name
        property: String,
    },

    /// A standard component nested where it does not belong
    #[error("{component}: component {child} is not allowed here")]
    ComponentNotAllowed {
        /// Component path
        component: String,
        /// Name of the nested component
        child: String,
    },

    /// A required sub-component is missing
    #[error("{component}: expected at least one of {expected}")]
    MissingComponent {
        /// Component path
        component: String,
        /// Names of the accepted sub-components
        expected: String,
    },

    /// Two properties that must not both occur
    #[error("{component}: {first} and {second} must not occur together")]
    MutuallyExclusive {
        /// Component path
        component: String,
        /// First property name
        first: &'static str,
        /// Second property name
        second: &'static str,
    },

    /// Two properties that must either both occur or not at all
    #[error("{component}: {first} and {second} must occur together")]
    RequiredTogether {
        /// Component path
        component: String,
        /// First property name
        first: &'static str,
        /// Second property name
        second: &'static str,
    },

    /// A standard parameter on a property that does not accept it
    #[error("{component}: parameter {parameter} is not allowed on {property}")]
    ParameterNotAllowed {
        /// Component path
        component: String,
        /// Property name
        property: String,
        /// Parameter name
        parameter: String,
    },

    /// A standard parameter given twice on one property
    #[error("{component}: parameter {parameter} occurs more than once on {property}")]
    DuplicateParameter {
        /// Component path
        component: String,
        /// Property name
        property: String,
        /// Parameter name
        parameter: String,
    },

    /// `ENCODING=BASE64` without `VALUE=BINARY`, or the other way around
    #[error("{component}: {property} must use ENCODING=BASE64 together with VALUE=BINARY")]
    EncodingMismatch {
        /// Component path
        component: String,
        /// Property name
        property: String,
    },

    /// A value that is not an integer in the allowed range
    #[error("{component}: {property} value {value:?} is not an integer in {min}..={max}")]
    InvalidInteger {
        /// Component path
        component: String,
        /// Property name
        property: &'static str,
        /// Offending value
        value: String,
        /// Smallest allowed value
        min: i64,
        /// Largest allowed value
        max: i64,
    },
}

/// All rule violations found in a calendar.
///
/// Displays as the first violation, followed by the number of further ones.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// The first violation, in document order.
    #[must_use]
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    /// All violations, in document order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the error, returning the violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

fn summarize(violations: &[Violation]) -> String {
    match violations {
        [] => "invalid calendar".to_owned(),
        [only] => format!("invalid calendar: {only}"),
        [first, rest @ ..] => format!(
            "invalid calendar: {first} (and {} more violations)",
            rest.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_first_violation_and_count() {
        let missing = Violation::PropertyCount {
            component: "VCALENDAR".to_owned(),
            property: "PRODID",
            count: 0,
            expected: Cardinality::ExactlyOne,
        };
        assert_eq!(
            missing.to_string(),
            "VCALENDAR: property PRODID occurs 0 times, expected 1"
        );

        let err = ValidationError::new(vec![
            missing.clone(),
            Violation::TopLevelCount { found: 2 },
        ]);
        assert_eq!(err.first(), Some(&missing));
        assert_eq!(
            err.to_string(),
            "invalid calendar: VCALENDAR: property PRODID occurs 0 times, expected 1 (and 1 more violations)"
        );
        assert_eq!(err.into_violations().len(), 2);
    }
}
