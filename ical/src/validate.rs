// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Structural validation of a built calendar against RFC 5545.
//!
//! Validation is independent of parsing: the builder accepts anything that
//! nests correctly, and the validator checks property cardinality, allowed
//! nesting, parameter placement and a few value constraints. All violations
//! are collected, in document order.

mod rules;
mod violation;

use crate::keyword::{
    KW_ACTION, KW_BINARY, KW_ENCODING, KW_ENCODING_BASE64, KW_VALUE, KW_VCALENDAR,
};
use crate::model::{Calendar, Component, ComponentKind, Parameter, ParameterKind, Property};

use self::rules::{
    ALARM_ACTION_RULES, INTEGER_RANGES, MUTUALLY_EXCLUSIVE, PropertyRule, REQUIRED_TOGETHER,
    component_rule, parameter_rule,
};

pub use self::rules::Cardinality;
pub use self::violation::{ValidationError, Violation};

/// Validate a calendar.
///
/// # Errors
///
/// Returns every violation found, see [`Validator::validate`].
pub fn validate(calendar: &Calendar) -> Result<(), ValidationError> {
    Validator::new(true).validate(calendar)
}

/// A validator that can be switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validator {
    enabled: bool,
}

impl Validator {
    /// Create a validator. A disabled validator accepts any calendar.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns `true` if the validator checks anything.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Check a calendar.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] holding all violations if any rule is
    /// broken.
    pub fn validate(self, calendar: &Calendar) -> Result<(), ValidationError> {
        if !self.enabled {
            return Ok(());
        }

        let mut violations = Vec::new();
        check_root(calendar, &mut violations);
        for component in &calendar.components {
            check_component(component, &component.name, &mut violations);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = violations.len(), "calendar failed validation");
            Err(ValidationError::new(violations))
        }
    }
}

fn check_root(calendar: &Calendar, out: &mut Vec<Violation>) {
    match calendar.components.as_slice() {
        [only] if only.is_named(KW_VCALENDAR) => {}
        [only] => out.push(Violation::NotVCalendar {
            found: only.name.clone(),
        }),
        components => out.push(Violation::TopLevelCount {
            found: components.len(),
        }),
    }

    for property in &calendar.properties {
        out.push(Violation::RootProperty {
            property: property.name().to_owned(),
        });
    }
}

fn check_component(component: &Component, path: &str, out: &mut Vec<Violation>) {
    if let Some(rule) = component.kind().and_then(component_rule) {
        check_cardinality(component, rule.properties, |_| true, path, out);

        for property in &component.properties {
            let known = property.kind().is_known();
            if known && !rule.properties.iter().any(|r| property.is_named(r.name)) {
                out.push(Violation::PropertyNotAllowed {
                    component: path.to_owned(),
                    property: property.name().to_owned(),
                });
            }
        }

        for child in &component.children {
            if child.kind().is_some_and(|kind| !rule.children.contains(&kind)) {
                out.push(Violation::ComponentNotAllowed {
                    component: path.to_owned(),
                    child: child.name.clone(),
                });
            }
        }

        let has_child = component
            .children
            .iter()
            .any(|c| c.kind().is_some_and(|kind| rule.children.contains(&kind)));
        if rule.requires_child && !has_child {
            let expected = rule
                .children
                .iter()
                .map(|kind| kind.keyword())
                .collect::<Vec<_>>()
                .join(", ");
            out.push(Violation::MissingComponent {
                component: path.to_owned(),
                expected,
            });
        }

        check_pairs(component, rule.kind, path, out);

        if rule.kind == ComponentKind::Alarm {
            check_alarm_action(component, rule.properties, path, out);
        }
    }

    for property in &component.properties {
        check_parameters(property, path, out);
        check_integer(property, path, out);
    }

    for child in &component.children {
        let child_path = format!("{path}/{}", child.name);
        check_component(child, &child_path, out);
    }
}

fn check_cardinality(
    component: &Component,
    rules: &[PropertyRule],
    report: impl Fn(&PropertyRule) -> bool,
    path: &str,
    out: &mut Vec<Violation>,
) {
    for rule in rules {
        let count = component.properties_named(rule.name).count();
        if !rule.cardinality.accepts(count) && report(rule) {
            out.push(Violation::PropertyCount {
                component: path.to_owned(),
                property: rule.name,
                count,
                expected: rule.cardinality,
            });
        }
    }
}

fn check_pairs(
    component: &Component,
    kind: ComponentKind,
    path: &str,
    out: &mut Vec<Violation>,
) {
    let has = |name| component.property(name).is_some();

    for &(_, first, second) in MUTUALLY_EXCLUSIVE.iter().filter(|(k, ..)| *k == kind) {
        if has(first) && has(second) {
            out.push(Violation::MutuallyExclusive {
                component: path.to_owned(),
                first,
                second,
            });
        }
    }

    for &(_, first, second) in REQUIRED_TOGETHER.iter().filter(|(k, ..)| *k == kind) {
        if has(first) != has(second) {
            out.push(Violation::RequiredTogether {
                component: path.to_owned(),
                first,
                second,
            });
        }
    }
}

/// Refine `VALARM` cardinality by its `ACTION`.
///
/// Counts already reported by the generic rule are not reported twice.
fn check_alarm_action(
    alarm: &Component,
    base: &[PropertyRule],
    path: &str,
    out: &mut Vec<Violation>,
) {
    let Some(action) = alarm.property(KW_ACTION).map(|p| p.value().trim()) else {
        return;
    };
    let Some((_, rules)) = ALARM_ACTION_RULES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(action))
    else {
        return;
    };

    let base_accepts = |rule: &PropertyRule| {
        let count = alarm.properties_named(rule.name).count();
        base.iter()
            .find(|b| b.name == rule.name)
            .is_none_or(|b| b.cardinality.accepts(count))
    };
    check_cardinality(alarm, rules, base_accepts, path, out);
}

fn check_parameters(property: &Property, path: &str, out: &mut Vec<Violation>) {
    let known = property.kind().is_known();
    let mut seen: Vec<ParameterKind> = Vec::new();
    for parameter in property.parameters() {
        let Some(kind) = parameter.kind() else {
            continue;
        };

        if seen.contains(&kind) {
            out.push(Violation::DuplicateParameter {
                component: path.to_owned(),
                property: property.name().to_owned(),
                parameter: parameter.name.clone(),
            });
        } else {
            seen.push(kind);
        }

        let allowed = parameter_rule(kind)
            .is_none_or(|names| names.iter().any(|name| property.is_named(name)));
        if known && !allowed {
            out.push(Violation::ParameterNotAllowed {
                component: path.to_owned(),
                property: property.name().to_owned(),
                parameter: parameter.name.clone(),
            });
        }
    }

    let has_value = |name: &str, expected: &str| {
        property
            .parameter(name)
            .and_then(Parameter::value)
            .is_some_and(|v| v.eq_ignore_ascii_case(expected))
    };
    if has_value(KW_ENCODING, KW_ENCODING_BASE64) != has_value(KW_VALUE, KW_BINARY) {
        out.push(Violation::EncodingMismatch {
            component: path.to_owned(),
            property: property.name().to_owned(),
        });
    }
}

fn check_integer(property: &Property, path: &str, out: &mut Vec<Violation>) {
    let Some(&(name, min, max)) = INTEGER_RANGES
        .iter()
        .find(|(name, ..)| property.is_named(name))
    else {
        return;
    };

    let value = property.value();
    match lexical::parse::<i64, _>(value.trim()) {
        Ok(n) if (min..=max).contains(&n) => {}
        _ => out.push(Violation::InvalidInteger {
            component: path.to_owned(),
            property: name,
            value: value.to_owned(),
            min,
            max,
        }),
    }
}
