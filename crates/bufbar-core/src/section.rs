//! Ordered runs of components with a cached total width.

use crate::component::Component;
use std::collections::VecDeque;

/// An ordered run of components that can be trimmed from either end.
///
/// `length` is always the sum of the members' lengths. It is updated on
/// every push and drop instead of being recomputed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Section {
    items: VecDeque<Component>,
    length: usize,
}

impl Section {
    /// Creates an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component.
    pub fn push(&mut self, component: Component) {
        self.length += component.length();
        self.items.push_back(component);
    }

    /// Removes and returns the first component.
    pub fn drop_front(&mut self) -> Option<Component> {
        let dropped = self.items.pop_front()?;
        self.length -= dropped.length();
        Some(dropped)
    }

    /// Removes and returns the last component.
    pub fn drop_back(&mut self) -> Option<Component> {
        let dropped = self.items.pop_back()?;
        self.length -= dropped.length();
        Some(dropped)
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total display width of the members.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Iterates the members in order.
    pub fn items(&self) -> impl Iterator<Item = &Component> {
        self.items.iter()
    }

    /// Consumes the section, yielding its members in order.
    #[must_use]
    pub fn into_items(self) -> Vec<Component> {
        self.items.into()
    }
}

impl FromIterator<Component> for Section {
    fn from_iter<I: IntoIterator<Item = Component>>(iter: I) -> Self {
        let mut section = Section::new();
        for component in iter {
            section.push(component);
        }
        section
    }
}

impl From<Vec<Component>> for Section {
    fn from(components: Vec<Component>) -> Self {
        components.into_iter().collect()
    }
}
