// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::keyword::KW_VCALENDAR;
use crate::model::{Component, Property};

/// The root of a parsed stream.
///
/// A well-formed calendar holds exactly one top-level `VCALENDAR`
/// component and no root properties. The builder accepts anything that nests
/// correctly; the validator reports the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    /// Properties that appeared outside of any component
    pub properties: Vec<Property>,

    /// Top-level components, in order of appearance
    pub components: Vec<Component>,
}

impl Calendar {
    /// Create an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to append a top-level component.
    #[must_use]
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Returns the first top-level `VCALENDAR` component.
    #[must_use]
    pub fn wrapper(&self) -> Option<&Component> {
        self.components.iter().find(|c| c.is_named(KW_VCALENDAR))
    }

    /// Mutable variant of [`Calendar::wrapper`].
    pub fn wrapper_mut(&mut self) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.is_named(KW_VCALENDAR))
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn finds_wrapper() {
        let mut calendar = Calendar::new()
            .with_component(Component::new("X-OTHER"))
            .with_component(Component::new("vcalendar"));
        assert_eq!(calendar.wrapper().map(|c| c.name.as_str()), Some("vcalendar"));

        if let Some(wrapper) = calendar.wrapper_mut() {
            wrapper.properties.push(Property::new("VERSION", "2.0"));
        }
        assert_eq!(calendar.components[1].properties.len(), 1);
        assert!(Calendar::new().wrapper().is_none());
    }
}
