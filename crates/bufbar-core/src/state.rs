//! Snapshot of the bar after the last render.

use crate::component::{focusable, Component, ComponentId};

/// What the last render produced, plus the user's custom order.
///
/// Everything except `custom_sort` is replaced on each render.
#[derive(Debug, Clone, Default)]
pub struct BarState {
    /// Every component built in the last render, group labels included
    pub all_components: Vec<Component>,
    /// Focusable, non-hidden components in bar order
    pub components: Vec<Component>,
    /// Focusable components that fit in the bar
    pub visible_components: Vec<Component>,
    /// Manual order of host ids, set by move and sort commands
    pub custom_sort: Option<Vec<u64>>,
    pub is_picking: bool,
    /// Position of the active element in `components`
    pub current_element_index: Option<usize>,
}

impl BarState {
    /// Replaces the render snapshot, keeping `custom_sort` and the pick flag.
    pub fn update(&mut self, all: Vec<Component>, visible: &[Component]) {
        self.components = focusable(&all);
        self.visible_components = focusable(visible);
        self.current_element_index = self
            .components
            .iter()
            .position(Component::is_selected);
        self.all_components = all;
    }

    /// Host ids of `components` in bar order.
    #[must_use]
    pub fn component_ids(&self) -> Vec<u64> {
        self.components
            .iter()
            .filter_map(|component| component.id().raw())
            .collect()
    }

    /// The active element.
    #[must_use]
    pub fn current(&self) -> Option<&Component> {
        self.current_element_index
            .and_then(|index| self.components.get(index))
    }

    /// Position of `id` in `components`.
    #[must_use]
    pub fn index_of(&self, id: &ComponentId) -> Option<usize> {
        self.components
            .iter()
            .position(|component| component.id() == *id)
    }

    /// The custom order, if one is active and non-empty.
    #[must_use]
    pub fn custom_order(&self) -> Option<&[u64]> {
        self.custom_sort
            .as_deref()
            .filter(|order| !order.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::tests::{sized, sized_with};

    #[test]
    fn test_update_filters_and_locates_current() {
        let mut hidden = sized(2, 4);
        hidden.set_hidden(true);
        let all = vec![sized(1, 4), hidden, sized_with(3, 4, true), sized(4, 4)];
        let visible = vec![all[2].clone(), all[3].clone()];

        let mut state = BarState {
            custom_sort: Some(vec![4, 3, 2, 1]),
            ..BarState::default()
        };
        state.update(all, &visible);

        assert_eq!(state.all_components.len(), 4);
        assert_eq!(state.component_ids(), vec![1, 3, 4]);
        assert_eq!(state.visible_components.len(), 2);
        assert_eq!(state.current_element_index, Some(1));
        assert_eq!(state.current().map(Component::id), Some(ComponentId::Document(3)));
        assert_eq!(state.index_of(&ComponentId::Document(4)), Some(2));
        assert_eq!(state.custom_order(), Some(&[4, 3, 2, 1][..]));
    }

    #[test]
    fn test_empty_custom_order_is_inactive() {
        let state = BarState {
            custom_sort: Some(Vec::new()),
            ..BarState::default()
        };
        assert!(state.custom_order().is_none());
        assert!(state.current().is_none());
    }
}
