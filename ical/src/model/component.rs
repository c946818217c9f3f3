// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::keyword::{KW_BEGIN, KW_END};
use crate::model::{ComponentKind, Property};

/// A `BEGIN:name` ... `END:name` block with its properties and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Component name, as written on the `BEGIN` line
    pub name: String,

    /// Spelling of the `BEGIN` and `END` lines, `None` for components built in code
    pub spelling: Option<BlockSpelling>,

    /// Properties, in order of appearance
    pub properties: Vec<Property>,

    /// Nested components, in order of appearance
    pub children: Vec<Component>,
}

impl Component {
    /// Create an empty component.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spelling: None,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the RFC 5545 kind of this component, if it is a known one.
    #[must_use]
    pub fn kind(&self) -> Option<ComponentKind> {
        ComponentKind::from_name(&self.name)
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the `BEGIN` keyword as it was read, or `BEGIN`.
    #[must_use]
    pub fn begin_keyword(&self) -> &str {
        self.spelling.as_ref().map_or(KW_BEGIN, |s| s.begin.as_str())
    }

    /// Returns the `END` keyword as it was read, or `END`.
    #[must_use]
    pub fn end_keyword(&self) -> &str {
        self.spelling.as_ref().map_or(KW_END, |s| s.end.as_str())
    }

    /// Returns the name as written on the `END` line.
    ///
    /// Falls back to [`Component::name`] when the component was built in code
    /// or renamed after parsing.
    #[must_use]
    pub fn end_name(&self) -> &str {
        match &self.spelling {
            Some(s) if s.end_name.eq_ignore_ascii_case(&self.name) => &s.end_name,
            _ => &self.name,
        }
    }

    /// Builder-style helper to append a property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Builder-style helper to append a child component.
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Find the first property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_named(name))
    }

    /// Iterate over all properties with the given name.
    pub fn properties_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> {
        self.properties.iter().filter(move |p| p.is_named(name))
    }

    /// Iterate over all child components with the given name.
    pub fn components_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Component> {
        self.children.iter().filter(move |c| c.is_named(name))
    }
}

/// How the delimiting lines of a parsed component were spelled.
///
/// Names and keywords are case-insensitive, so `begin:vevent` may be closed
/// by `End:VEVENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpelling {
    /// `BEGIN` keyword
    pub begin: String,
    /// `END` keyword
    pub end: String,
    /// Component name on the `END` line
    pub end_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_properties_and_children() {
        let event = Component::new("VEVENT")
            .with_property(Property::new("ATTENDEE", "mailto:a@example.com"))
            .with_property(Property::new("attendee", "mailto:b@example.com"))
            .with_child(Component::new("VALARM"));

        assert_eq!(event.kind(), Some(ComponentKind::Event));
        assert_eq!(event.properties_named("ATTENDEE").count(), 2);
        assert_eq!(
            event.property("Attendee").map(Property::value),
            Some("mailto:a@example.com")
        );
        assert_eq!(event.components_named("valarm").count(), 1);
        assert!(event.property("SUMMARY").is_none());
    }

    #[test]
    fn delimiters_fall_back_to_canonical_spelling() {
        let mut event = Component::new("vevent");
        assert_eq!(
            (event.begin_keyword(), event.end_keyword(), event.end_name()),
            ("BEGIN", "END", "vevent")
        );

        event.spelling = Some(BlockSpelling {
            begin: "begin".to_owned(),
            end: "End".to_owned(),
            end_name: "VEVENT".to_owned(),
        });
        assert_eq!(
            (event.begin_keyword(), event.end_keyword(), event.end_name()),
            ("begin", "End", "VEVENT")
        );

        event.name = "VTODO".to_owned();
        assert_eq!(event.end_name(), "VTODO");
    }
}
