//! Buffer groups.
//!
//! Documents are matched against the configured groups in priority order.
//! The builtin pinned group takes precedence over all of them and always
//! renders first. A collapsed group keeps its label in the bar but hides
//! its members.

use crate::component::{Component, GroupSeparator, LabelContext};
use crate::config::GroupConfig;
use crate::error::{CoreError, CoreResult};
use crate::host::DocumentId;
use std::collections::HashSet;
use std::path::Path;

/// Name of the builtin group of pinned documents.
pub const PINNED_GROUP: &str = "pinned";

/// Group definitions plus their runtime state.
#[derive(Debug, Clone, Default)]
pub struct GroupState {
    configs: Vec<GroupConfig>,
    hidden: HashSet<String>,
    pinned: Vec<DocumentId>,
}

impl GroupState {
    /// Creates the state for `configs`; groups configured as hidden start
    /// collapsed.
    #[must_use]
    pub fn new(configs: &[GroupConfig]) -> Self {
        let mut configs = configs.to_vec();
        configs.sort_by_key(|group| group.priority);
        let hidden = configs
            .iter()
            .filter(|group| group.hidden)
            .map(|group| group.name.clone())
            .collect();
        GroupState {
            configs,
            hidden,
            pinned: Vec::new(),
        }
    }

    /// Returns the group a document belongs to.
    #[must_use]
    pub fn group_for(&self, id: DocumentId, path: &Path) -> Option<String> {
        if self.is_pinned(id) {
            return Some(PINNED_GROUP.to_string());
        }
        self.configs
            .iter()
            .find(|group| group.matcher.matches(path))
            .map(|group| group.name.clone())
    }

    /// Whether `name` is the pinned group or a configured one.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        name == PINNED_GROUP || self.configs.iter().any(|group| group.name == name)
    }

    /// Whether the members of `name` are hidden.
    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(name)
    }

    /// Collapses or expands a configured group.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownGroup` for names that are not configured.
    /// The pinned group cannot be collapsed.
    pub fn set_hidden(&mut self, name: &str, hidden: bool) -> CoreResult<()> {
        if !self.configs.iter().any(|group| group.name == name) {
            return Err(CoreError::UnknownGroup(name.to_string()));
        }
        if hidden {
            self.hidden.insert(name.to_string());
        } else {
            self.hidden.remove(name);
        }
        Ok(())
    }

    /// Flips a group between collapsed and expanded; returns the new state.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownGroup` for names that are not configured.
    pub fn toggle(&mut self, name: &str) -> CoreResult<bool> {
        let hidden = !self.is_hidden(name);
        self.set_hidden(name, hidden)?;
        Ok(hidden)
    }

    #[must_use]
    pub fn is_pinned(&self, id: DocumentId) -> bool {
        self.pinned.contains(&id)
    }

    /// Pins or unpins `id`; returns whether it is now pinned.
    pub fn toggle_pin(&mut self, id: DocumentId) -> bool {
        if let Some(index) = self.pinned.iter().position(|pinned| *pinned == id) {
            self.pinned.remove(index);
            false
        } else {
            self.pinned.push(id);
            true
        }
    }

    /// Pinned ids in pin order.
    #[must_use]
    pub fn pinned(&self) -> &[DocumentId] {
        &self.pinned
    }

    /// Replaces the pinned set, e.g. after a session load.
    pub fn set_pinned(&mut self, ids: Vec<DocumentId>) {
        self.pinned = ids;
    }

    /// Drops pinned ids that are no longer open.
    pub fn retain_pinned(&mut self, live: &[DocumentId]) {
        self.pinned.retain(|id| live.contains(id));
    }

    /// Ids of the documents in group `name`.
    #[must_use]
    pub fn members(components: &[Component], name: &str) -> Vec<DocumentId> {
        components
            .iter()
            .filter_map(Component::as_buffer)
            .filter(|buffer| buffer.group.as_deref() == Some(name))
            .map(|buffer| buffer.id)
            .collect()
    }

    /// Arranges components into pinned, configured groups by priority, then
    /// ungrouped, keeping the incoming order inside each part.
    ///
    /// Each configured group with members is preceded by its label, and the
    /// members of collapsed groups are flagged hidden.
    #[must_use]
    pub fn arrange(&self, components: Vec<Component>, ctx: &LabelContext<'_>) -> Vec<Component> {
        let mut pinned = Vec::new();
        let mut grouped: Vec<Vec<Component>> = vec![Vec::new(); self.configs.len()];
        let mut ungrouped = Vec::new();

        for component in components {
            let slot = component.group().map(|name| {
                (
                    name == PINNED_GROUP,
                    self.configs.iter().position(|group| group.name == name),
                )
            });
            match slot {
                Some((true, _)) => pinned.push(component),
                Some((false, Some(index))) => grouped[index].push(component),
                _ => ungrouped.push(component),
            }
        }

        let mut arranged = pinned;
        for (group, members) in self.configs.iter().zip(grouped) {
            if members.is_empty() {
                continue;
            }
            let collapsed = self.is_hidden(&group.name);
            arranged.push(Component::group_separator(
                GroupSeparator {
                    name: group.name.clone(),
                    count: members.len(),
                    collapsed,
                },
                ctx,
            ));
            arranged.extend(members.into_iter().map(|mut member| {
                member.set_hidden(collapsed);
                member
            }));
        }
        arranged.extend(ungrouped);
        arranged
    }
}
