//! User commands
//!
//! Every command checks its preconditions first. A failed check returns an
//! error and leaves both the state and the drawn bar untouched; a command
//! that changes anything redraws the bar before returning, even when the
//! host rejected part of the change.

use crate::bufferline::Bufferline;
use bufbar_core::persistence::{self, PINNED_KEY, POSITIONS_KEY};
use bufbar_core::{
    sort, ClickAction, Command, Component, ComponentId, CoreError, CoreResult, Direction,
    DocumentId, GroupState, Host, NotifyLevel, SortBy, SortContext, TabpageId,
};
use crossterm::event::MouseButton;
use tracing::{debug, info, warn};

/// What to do with the members of a group.
pub enum GroupAction {
    /// Close every member
    Close,
    /// Collapse or expand the group
    Toggle,
    /// Run a function over the member ids
    Custom(Box<dyn FnOnce(&mut dyn Host, &[DocumentId]) -> CoreResult<()>>),
}

impl Bufferline {
    /// Runs a command, turning failures into a host notification.
    pub fn execute(&mut self, host: &mut dyn Host, command: Command) {
        let result = match &command {
            Command::PickBuffer => self.pick_buffer(host),
            Command::PickAndClose => self.pick_and_close(host),
            Command::Cycle(direction) => self.cycle(host, *direction),
            Command::CloseInDirection(direction) => self.close_in_direction(host, *direction),
            Command::CloseOthers => self.close_others(host),
            Command::Move(direction) => self.move_current(host, *direction),
            Command::MoveTo(position) => self.move_to(host, *position, None),
            Command::SortBy(kind) => self.sort_by(host, *kind),
            Command::GoTo { index, absolute } => self.go_to(host, *index, *absolute),
            Command::GroupClose(name) => self.group_action(host, name, GroupAction::Close),
            Command::GroupToggle(name) => self.group_action(host, name, GroupAction::Toggle),
            Command::TogglePin => self.toggle_pin(host),
            Command::ClearOrder => self.clear_order(host),
            Command::Click { id, button } => self.handle_click(host, *id, *button),
        };

        if let Err(err) = result {
            warn!(?command, %err, "command failed");
            host.notify(NotifyLevel::Warn, &err.to_string());
        }
    }

    /// Swaps the current element with its neighbour in `direction`.
    ///
    /// At either end this does nothing, unless `move_wraps_at_ends` is set,
    /// in which case the element swaps with the one at the opposite end.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoCurrentElement` when nothing is focused.
    pub fn move_current(&mut self, host: &mut dyn Host, direction: Direction) -> CoreResult<()> {
        let index = self.current_index()?;
        let mut ids = self.state.component_ids();
        let len = ids.len();

        let at_end = match direction {
            Direction::Left => index == 0,
            Direction::Right => index + 1 == len,
        };
        let target = if at_end {
            if !self.config.move_wraps_at_ends || len < 2 {
                return Ok(());
            }
            match direction {
                Direction::Left => len - 1,
                Direction::Right => 0,
            }
        } else {
            index.saturating_add_signed(direction.step())
        };
        ids.swap(index, target);

        info!(?direction, "moved buffer");
        self.set_custom_order(host, ids);
        self.refresh(host);
        Ok(())
    }

    /// Moves an element to a 1-based `position`; `-1` is the last slot.
    ///
    /// `from` is a 0-based index and defaults to the current element.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::IndexOutOfRange` for positions outside the bar
    /// and `CoreError::NoCurrentElement` when `from` is omitted and nothing
    /// is focused.
    pub fn move_to(
        &mut self,
        host: &mut dyn Host,
        position: i64,
        from: Option<usize>,
    ) -> CoreResult<()> {
        let mut ids = self.state.component_ids();
        let target = resolve_position(position, ids.len())?;
        let from = match from {
            Some(from) if from < ids.len() => from,
            Some(from) => {
                return Err(CoreError::IndexOutOfRange {
                    index: i64::try_from(from).unwrap_or(i64::MAX),
                    len: ids.len(),
                })
            }
            None => self.current_index()?,
        };

        let id = ids.remove(from);
        ids.insert(target, id);

        info!(from, to = target, "moved buffer");
        self.set_custom_order(host, ids);
        self.refresh(host);
        Ok(())
    }

    /// Focuses the neighbour in `direction`, wrapping at the ends.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoCurrentElement` when nothing is focused, or the
    /// host's error if focusing fails.
    pub fn cycle(&mut self, host: &mut dyn Host, direction: Direction) -> CoreResult<()> {
        let index = self.current_index()?;
        let len = self.state.components.len();
        let target = (index as isize + direction.step()).rem_euclid(len as isize) as usize;
        let id = self.state.components[target].id();

        focus(host, &id)?;
        self.refresh(host);
        Ok(())
    }

    /// Closes every element between the current one and the end in
    /// `direction`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoCurrentElement` when nothing is focused, or the
    /// host's error if a close fails.
    pub fn close_in_direction(&mut self, host: &mut dyn Host, direction: Direction) -> CoreResult<()> {
        let index = self.current_index()?;
        let targets: Vec<ComponentId> = match direction {
            Direction::Left => &self.state.components[..index],
            Direction::Right => &self.state.components[index + 1..],
        }
        .iter()
        .map(Component::id)
        .collect();

        self.close_all(host, &targets)
    }

    /// Closes every element except the current one.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoCurrentElement` when nothing is focused, or the
    /// host's error if a close fails.
    pub fn close_others(&mut self, host: &mut dyn Host) -> CoreResult<()> {
        let index = self.current_index()?;
        let targets: Vec<ComponentId> = self
            .state
            .components
            .iter()
            .enumerate()
            .filter(|(position, _)| *position != index)
            .map(|(_, component)| component.id())
            .collect();

        self.close_all(host, &targets)
    }

    /// Sorts the bar once and keeps the result as the custom order.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NothingToSort` when the bar is empty.
    pub fn sort_by(&mut self, host: &mut dyn Host, by: impl Into<SortBy>) -> CoreResult<()> {
        if self.state.components.is_empty() {
            return Err(CoreError::NothingToSort);
        }

        let by = by.into();
        let mut components = self.state.components.clone();
        let cwd = host.cwd();
        sort(
            &mut components,
            &by,
            &SortContext {
                custom_sort: None,
                cwd: &cwd,
            },
        );

        info!(?by, "sorted buffers");
        let ids = components
            .iter()
            .filter_map(|component| component.id().raw())
            .collect();
        self.set_custom_order(host, ids);
        self.refresh(host);
        Ok(())
    }

    /// Shows pick letters, waits for one key and runs `action` on the
    /// chosen document.
    ///
    /// A key that matches no visible letter cancels the pick. The bar is
    /// redrawn without letters afterwards whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns the error of `action`.
    pub fn pick<F>(&mut self, host: &mut dyn Host, action: F) -> CoreResult<()>
    where
        F: FnOnce(&mut dyn Host, DocumentId) -> CoreResult<()>,
    {
        self.state.is_picking = true;
        self.refresh(host);

        let key = host.read_key();
        let chosen = key
            .and_then(|letter| self.letters.id_for(letter))
            .filter(|id| {
                self.state
                    .visible_components
                    .iter()
                    .any(|component| component.id() == ComponentId::Document(*id))
            });
        let result = match chosen {
            Some(id) => action(host, id),
            None => Ok(()),
        };

        self.state.is_picking = false;
        self.refresh(host);
        result
    }

    /// Picks a document and focuses it.
    ///
    /// # Errors
    ///
    /// Returns the host's error if focusing fails.
    pub fn pick_buffer(&mut self, host: &mut dyn Host) -> CoreResult<()> {
        self.pick(host, |host, id| host.focus_document(id))
    }

    /// Picks a document and closes it.
    ///
    /// # Errors
    ///
    /// Returns the host's error if the close fails.
    pub fn pick_and_close(&mut self, host: &mut dyn Host) -> CoreResult<()> {
        self.pick(host, |host, id| {
            info!(id, "closing picked buffer");
            host.delete_document(id)
        })
    }

    /// Focuses the element at 1-based `index` (`-1` is the last) among the
    /// visible elements, or among all elements when `absolute`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::IndexOutOfRange` for indices outside the list.
    pub fn go_to(&mut self, host: &mut dyn Host, index: i64, absolute: bool) -> CoreResult<()> {
        let list = if absolute {
            &self.state.components
        } else {
            &self.state.visible_components
        };
        let position = resolve_position(index, list.len())?;
        let id = list[position].id();

        focus(host, &id)?;
        self.refresh(host);
        Ok(())
    }

    /// Applies `action` to the group called `name`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownGroup` if no such group exists, or the
    /// error of the action.
    pub fn group_action(
        &mut self,
        host: &mut dyn Host,
        name: &str,
        action: GroupAction,
    ) -> CoreResult<()> {
        if !self.groups.contains(name) {
            return Err(CoreError::UnknownGroup(name.to_string()));
        }
        let members = GroupState::members(&self.state.all_components, name);

        let result = match action {
            GroupAction::Close => {
                info!(group = name, count = members.len(), "closing group");
                let targets: Vec<ComponentId> =
                    members.iter().map(|id| ComponentId::Document(*id)).collect();
                close_each(host, &targets)
            }
            GroupAction::Toggle => {
                let hidden = self.groups.toggle(name)?;
                info!(group = name, hidden, "toggled group");
                Ok(())
            }
            GroupAction::Custom(run) => run(host, &members),
        };

        self.refresh(host);
        result
    }

    /// Pins the current buffer, or unpins it if it is already pinned.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoCurrentElement` when the focused element is not
    /// a buffer.
    pub fn toggle_pin(&mut self, host: &mut dyn Host) -> CoreResult<()> {
        let id = self
            .state
            .current()
            .and_then(Component::as_buffer)
            .map(|buffer| buffer.id)
            .ok_or(CoreError::NoCurrentElement)?;

        let pinned = self.groups.toggle_pin(id);
        let live: Vec<DocumentId> = host.documents().iter().map(|doc| doc.id).collect();
        self.groups.retain_pinned(&live);
        persistence::save(host, PINNED_KEY, self.groups.pinned());

        info!(id, pinned, "toggled pin");
        self.refresh(host);
        Ok(())
    }

    /// Forgets the custom order so the configured sort applies again.
    ///
    /// The stored order is cleared too when persistence is on.
    ///
    /// # Errors
    ///
    /// Never fails; the result keeps `execute` uniform.
    pub fn clear_order(&mut self, host: &mut dyn Host) -> CoreResult<()> {
        self.state.custom_sort = None;
        if self.config.persist_buffer_sort {
            persistence::save(host, POSITIONS_KEY, &[]);
        }
        info!("cleared custom order");
        self.refresh(host);
        Ok(())
    }

    /// Runs the configured action for a click on element `id`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownElement` when the bar does not list `id`,
    /// or the host's error if the action fails.
    pub fn handle_click(
        &mut self,
        host: &mut dyn Host,
        id: u64,
        button: MouseButton,
    ) -> CoreResult<()> {
        let mouse = &self.config.mouse;
        let action = match button {
            MouseButton::Left => mouse.left,
            MouseButton::Right => mouse.right,
            MouseButton::Middle => mouse.middle,
        };
        let target = self
            .state
            .components
            .iter()
            .map(Component::id)
            .find(|component| component.raw() == Some(id))
            .ok_or(CoreError::UnknownElement(id))?;

        match action {
            ClickAction::Focus => focus(host, &target)?,
            ClickAction::Close => close(host, &target)?,
            ClickAction::None => return Ok(()),
        }
        self.refresh(host);
        Ok(())
    }

    fn current_index(&self) -> CoreResult<usize> {
        self.state
            .current_element_index
            .ok_or(CoreError::NoCurrentElement)
    }

    fn close_all(&mut self, host: &mut dyn Host, targets: &[ComponentId]) -> CoreResult<()> {
        info!(count = targets.len(), "closing buffers");
        let result = close_each(host, targets);
        self.refresh(host);
        result
    }
}

/// Turns a 1-based position (`-1` for last) into an index.
fn resolve_position(position: i64, len: usize) -> CoreResult<usize> {
    let out_of_range = || CoreError::IndexOutOfRange {
        index: position,
        len,
    };
    if len == 0 {
        return Err(out_of_range());
    }
    if position == -1 {
        return Ok(len - 1);
    }
    usize::try_from(position)
        .ok()
        .filter(|position| (1..=len).contains(position))
        .map(|position| position - 1)
        .ok_or_else(out_of_range)
}

fn focus(host: &mut dyn Host, id: &ComponentId) -> CoreResult<()> {
    match id {
        ComponentId::Document(id) => host.focus_document(*id),
        ComponentId::Tabpage(id) => host.focus_tabpage(*id),
        ComponentId::Group(name) => Err(CoreError::UnknownGroup(name.clone())),
    }
}

/// Closes every target the host still has, carrying on past failures.
/// Returns the first failure.
fn close_each(host: &mut dyn Host, targets: &[ComponentId]) -> CoreResult<()> {
    let documents: Vec<DocumentId> = host.documents().iter().map(|doc| doc.id).collect();
    let tabpages: Vec<TabpageId> = host.tabpages().iter().map(|tab| tab.id).collect();

    let mut first_error = None;
    for target in targets {
        let open = match target {
            ComponentId::Document(id) => documents.contains(id),
            ComponentId::Tabpage(id) => tabpages.contains(id),
            ComponentId::Group(_) => true,
        };
        if !open {
            debug!(?target, "already closed");
            continue;
        }
        if let Err(err) = close(host, target) {
            warn!(?target, %err, "close failed");
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}

fn close(host: &mut dyn Host, id: &ComponentId) -> CoreResult<()> {
    match id {
        ComponentId::Document(id) => host.delete_document(*id),
        ComponentId::Tabpage(id) => host.close_tabpage(*id),
        ComponentId::Group(name) => Err(CoreError::UnknownGroup(name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bufbar_core::persistence::POSITIONS_KEY;
    use bufbar_core::{
        BufferlineConfig, GroupConfig, GroupMatcher, MemoryHost, Mode, SortKind, PINNED_GROUP,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    fn config() -> BufferlineConfig {
        BufferlineConfig {
            sort_by: SortKind::None,
            ..BufferlineConfig::default()
        }
    }

    fn setup(paths: &[&str], config: BufferlineConfig) -> (MemoryHost, Bufferline) {
        let mut host = MemoryHost::new(120);
        for path in paths {
            host.open(*path);
        }
        let mut bar = Bufferline::new(config);
        bar.setup(&mut host).expect("setup");
        (host, bar)
    }

    fn focused(host: &mut MemoryHost, bar: &mut Bufferline, id: DocumentId) {
        host.focus_document(id).expect("focus");
        bar.refresh(host);
    }

    // ==================== Move Tests ====================

    #[test]
    fn test_move_swaps_with_neighbour_and_persists() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        bar.move_current(&mut host, Direction::Right).expect("move");
        assert_eq!(bar.state().component_ids(), vec![2, 1, 3]);
        assert_eq!(bar.state().custom_sort, Some(vec![2, 1, 3]));
        assert_eq!(host.session_value(POSITIONS_KEY).as_deref(), Some("2,1,3"));
    }

    #[test]
    fn test_move_at_ends_is_noop() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs"], config());
        let draws = host.draw_count();
        bar.move_current(&mut host, Direction::Left).expect("first");
        assert_eq!(bar.state().component_ids(), vec![1, 2]);
        assert!(bar.state().custom_sort.is_none());

        focused(&mut host, &mut bar, 2);
        bar.move_current(&mut host, Direction::Right).expect("last");
        assert_eq!(bar.state().component_ids(), vec![1, 2]);
        assert_eq!(host.draw_count(), draws + 1);
    }

    #[test]
    fn test_move_wraps_when_configured() {
        let (mut host, mut bar) = setup(
            &["/a.rs", "/b.rs", "/c.rs"],
            BufferlineConfig {
                move_wraps_at_ends: true,
                ..config()
            },
        );
        bar.move_current(&mut host, Direction::Left).expect("wrap");
        assert_eq!(bar.state().component_ids(), vec![3, 2, 1]);

        bar.move_current(&mut host, Direction::Right).expect("wrap back");
        assert_eq!(bar.state().component_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_move_without_persistence() {
        let (mut host, mut bar) = setup(
            &["/a.rs", "/b.rs"],
            BufferlineConfig {
                persist_buffer_sort: false,
                ..config()
            },
        );
        bar.move_current(&mut host, Direction::Right).expect("move");
        assert!(host.session_value(POSITIONS_KEY).is_none());
        assert_eq!(bar.state().component_ids(), vec![2, 1]);
    }

    #[test]
    fn test_move_to_position() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs", "/d.rs"], config());
        bar.move_to(&mut host, -1, None).expect("to last");
        assert_eq!(bar.state().component_ids(), vec![2, 3, 4, 1]);

        bar.move_to(&mut host, 2, Some(2)).expect("explicit from");
        assert_eq!(bar.state().component_ids(), vec![2, 4, 3, 1]);

        let err = bar.move_to(&mut host, 9, None).expect_err("out of range");
        assert!(matches!(err, CoreError::IndexOutOfRange { index: 9, len: 4 }));
        assert_eq!(bar.state().component_ids(), vec![2, 4, 3, 1]);
    }

    // ==================== Cycle / Go To Tests ====================

    #[test]
    fn test_cycle_wraps() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        bar.cycle(&mut host, Direction::Left).expect("cycle");
        assert_eq!(host.current_document(), Some(3));
        bar.cycle(&mut host, Direction::Right).expect("cycle");
        assert_eq!(host.current_document(), Some(1));
        assert_eq!(bar.state().current_element_index, Some(0));
    }

    #[test]
    fn test_cycle_tabs_mode() {
        let mut host = MemoryHost::new(80);
        host.add_tabpage("one");
        let second = host.add_tabpage("two");
        let mut bar = Bufferline::new(BufferlineConfig {
            mode: Mode::Tabs,
            ..config()
        });
        bar.setup(&mut host).expect("setup");
        bar.cycle(&mut host, Direction::Right).expect("cycle");
        assert_eq!(host.current_tabpage(), Some(second));
    }

    #[test]
    fn test_go_to() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        bar.go_to(&mut host, 2, false).expect("second");
        assert_eq!(host.current_document(), Some(2));
        bar.go_to(&mut host, -1, true).expect("last");
        assert_eq!(host.current_document(), Some(3));

        assert!(matches!(
            bar.go_to(&mut host, 0, false),
            Err(CoreError::IndexOutOfRange { .. })
        ));
        assert!(bar.go_to(&mut host, 4, true).is_err());
        assert_eq!(host.current_document(), Some(3));
    }

    #[test]
    fn test_go_to_visible_only() {
        let mut host = MemoryHost::new(16);
        for name in ["/a.rs", "/b.rs", "/c.rs", "/d.rs", "/e.rs"] {
            host.open(name);
        }
        let mut bar = Bufferline::new(config());
        bar.setup(&mut host).expect("setup");

        let visible = bar.state().visible_components.len();
        assert!(visible < 5);
        let visible_i64 = i64::try_from(visible).expect("small");
        assert!(bar.go_to(&mut host, visible_i64 + 1, false).is_err());
        assert!(bar.go_to(&mut host, 5, true).is_ok());
        assert_eq!(host.current_document(), Some(5));
    }

    // ==================== Close Tests ====================

    #[test]
    fn test_close_in_direction() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs", "/d.rs"], config());
        focused(&mut host, &mut bar, 2);

        bar.close_in_direction(&mut host, Direction::Right).expect("close right");
        assert_eq!(host.document_ids(), vec![1, 2]);
        assert_eq!(bar.state().component_ids(), vec![1, 2]);

        bar.close_in_direction(&mut host, Direction::Left).expect("close left");
        assert_eq!(host.document_ids(), vec![2]);
    }

    #[test]
    fn test_close_skips_documents_the_host_already_closed() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs", "/d.rs"], config());
        // Closed behind the bar's back, no event.
        host.delete_document(4).expect("delete");

        bar.close_in_direction(&mut host, Direction::Right)
            .expect("close right");
        assert_eq!(host.document_ids(), vec![1]);
        assert_eq!(bar.state().component_ids(), vec![1]);
        assert_eq!(host.bar_text(), " a.rs |");
    }

    #[test]
    fn test_close_failure_still_redraws() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        let draws = host.draw_count();
        let targets = [
            ComponentId::Document(2),
            ComponentId::Group("docs".into()),
            ComponentId::Document(3),
        ];
        let err = bar
            .close_all(&mut host, &targets)
            .expect_err("a group label cannot be closed");
        assert!(matches!(err, CoreError::UnknownGroup(_)));
        assert_eq!(host.document_ids(), vec![1]);
        assert_eq!(bar.state().component_ids(), vec![1]);
        assert_eq!(host.draw_count(), draws + 1);
    }

    #[test]
    fn test_close_others() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        focused(&mut host, &mut bar, 2);
        bar.close_others(&mut host).expect("close others");
        assert_eq!(host.document_ids(), vec![2]);
        assert_eq!(bar.state().component_ids(), vec![2]);
    }

    #[test]
    fn test_close_without_current_fails() {
        let mut host = MemoryHost::new(80);
        let mut bar = Bufferline::new(config());
        bar.setup(&mut host).expect("setup");
        let draws = host.draw_count();
        assert!(matches!(
            bar.close_others(&mut host),
            Err(CoreError::NoCurrentElement)
        ));
        assert_eq!(host.draw_count(), draws);
    }

    // ==================== Sort Tests ====================

    #[test]
    fn test_sort_by_sets_custom_order() {
        let (mut host, mut bar) = setup(&["/c.toml", "/a.rs", "/b.md"], config());
        bar.sort_by(&mut host, SortKind::Extension).expect("sort");
        assert_eq!(bar.state().custom_sort, Some(vec![3, 2, 1]));
        assert_eq!(bar.state().component_ids(), vec![3, 2, 1]);
        assert_eq!(host.session_value(POSITIONS_KEY).as_deref(), Some("3,2,1"));
    }

    #[test]
    fn test_sort_by_on_empty_bar() {
        let mut host = MemoryHost::new(80);
        let mut bar = Bufferline::new(config());
        bar.setup(&mut host).expect("setup");

        let err = bar.sort_by(&mut host, SortKind::Id).expect_err("empty");
        assert_eq!(err.to_string(), "Unable to find buffers to sort");
        assert!(bar.state().custom_sort.is_none());
    }

    #[test]
    fn test_sort_by_custom_function() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        let by = SortBy::Custom(std::sync::Arc::new(|a: &Component, b: &Component| {
            a.id() > b.id()
        }));
        bar.sort_by(&mut host, by).expect("sort");
        assert_eq!(bar.state().component_ids(), vec![3, 2, 1]);
    }

    // ==================== Pick Tests ====================

    #[test]
    fn test_pick_focuses_chosen_buffer() {
        let (mut host, mut bar) = setup(&["/main.rs", "/lib.rs"], config());
        host.push_keys("l");
        bar.pick_buffer(&mut host).expect("pick");
        assert_eq!(host.current_document(), Some(2));
        assert!(!bar.state().is_picking);
        assert_eq!(host.bar_text(), " main.rs | lib.rs |");
    }

    #[test]
    fn test_pick_shows_letters_while_waiting() {
        let (mut host, mut bar) = setup(&["/main.rs", "/lib.rs"], config());
        host.push_escape();
        let draws = host.draw_count();
        bar.pick_buffer(&mut host).expect("cancelled pick");
        // Once with letters, once without.
        assert_eq!(host.draw_count(), draws + 2);
        assert_eq!(host.current_document(), Some(1));
    }

    #[test]
    fn test_pick_unknown_letter_cancels() {
        let (mut host, mut bar) = setup(&["/main.rs", "/lib.rs"], config());
        host.push_keys("z");
        bar.pick_and_close(&mut host).expect("cancelled");
        assert_eq!(host.document_ids(), vec![1, 2]);
    }

    #[test]
    fn test_pick_and_close() {
        let (mut host, mut bar) = setup(&["/main.rs", "/lib.rs"], config());
        host.push_keys("m");
        bar.pick_and_close(&mut host).expect("pick");
        assert_eq!(host.document_ids(), vec![2]);
        assert_eq!(bar.state().component_ids(), vec![2]);
    }

    #[test]
    fn test_pick_error_still_clears_letters() {
        let (mut host, mut bar) = setup(&["/main.rs"], config());
        host.push_keys("m");
        let result = bar.pick(&mut host, |_, _| Err(CoreError::Host("boom".into())));
        assert!(result.is_err());
        assert!(!bar.state().is_picking);
        assert_eq!(host.bar_text(), " main.rs |");
    }

    // ==================== Group Tests ====================

    fn grouped_config() -> BufferlineConfig {
        BufferlineConfig {
            groups: vec![GroupConfig {
                name: "docs".into(),
                matcher: GroupMatcher {
                    extensions: vec!["md".into()],
                    path_contains: Vec::new(),
                },
                priority: 1,
                hidden: false,
            }],
            ..config()
        }
    }

    #[test]
    fn test_group_toggle_hides_members() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.md", "/c.md"], grouped_config());
        assert_eq!(bar.state().component_ids(), vec![2, 3, 1]);

        bar.group_action(&mut host, "docs", GroupAction::Toggle)
            .expect("toggle");
        assert_eq!(bar.state().component_ids(), vec![1]);
        assert_eq!(host.bar_text(), " docs(2) | a.rs |");
    }

    #[test]
    fn test_group_close() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.md", "/c.md"], grouped_config());
        bar.group_action(&mut host, "docs", GroupAction::Close)
            .expect("close");
        assert_eq!(host.document_ids(), vec![1]);
    }

    #[test]
    fn test_group_custom_action() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.md", "/c.md"], grouped_config());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bar.group_action(
            &mut host,
            "docs",
            GroupAction::Custom(Box::new(move |_: &mut dyn Host, ids: &[DocumentId]| -> CoreResult<()> {
                sink.borrow_mut().extend_from_slice(ids);
                Ok(())
            })),
        )
        .expect("custom");
        assert_eq!(*seen.borrow(), vec![2, 3]);
    }

    #[test]
    fn test_group_unknown() {
        let (mut host, mut bar) = setup(&["/a.rs"], grouped_config());
        assert!(matches!(
            bar.group_action(&mut host, "nope", GroupAction::Toggle),
            Err(CoreError::UnknownGroup(_))
        ));
    }

    // ==================== Pin Tests ====================

    #[test]
    fn test_toggle_pin_moves_buffer_first() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        focused(&mut host, &mut bar, 3);

        bar.toggle_pin(&mut host).expect("pin");
        assert_eq!(bar.state().component_ids(), vec![3, 1, 2]);
        assert!(bar.groups().is_pinned(3));
        assert_eq!(host.session_value(PINNED_KEY).as_deref(), Some("3"));
        let current = bar.state().current().and_then(Component::as_buffer);
        assert_eq!(current.and_then(|b| b.group.as_deref()), Some(PINNED_GROUP));

        bar.toggle_pin(&mut host).expect("unpin");
        assert_eq!(bar.state().component_ids(), vec![1, 2, 3]);
        assert_eq!(host.session_value(PINNED_KEY).as_deref(), Some(""));
    }

    // ==================== Click / Execute Tests ====================

    #[test]
    fn test_click_actions() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        bar.handle_click(&mut host, 2, MouseButton::Left).expect("focus");
        assert_eq!(host.current_document(), Some(2));

        bar.handle_click(&mut host, 3, MouseButton::Right).expect("close");
        assert_eq!(host.document_ids(), vec![1, 2]);

        bar.handle_click(&mut host, 1, MouseButton::Middle).expect("nothing");
        assert_eq!(host.document_ids(), vec![1, 2]);

        assert!(matches!(
            bar.handle_click(&mut host, 42, MouseButton::Left),
            Err(CoreError::UnknownElement(42))
        ));
    }

    #[test]
    fn test_clear_order_restores_configured_sort() {
        let (mut host, mut bar) = setup(
            &["/b.rs", "/a.rs"],
            BufferlineConfig {
                sort_by: SortKind::Path,
                ..config()
            },
        );
        assert_eq!(bar.state().component_ids(), vec![2, 1]);
        bar.move_current(&mut host, Direction::Left).expect("move");
        assert_eq!(bar.state().component_ids(), vec![1, 2]);

        bar.execute(&mut host, Command::ClearOrder);
        assert!(bar.state().custom_sort.is_none());
        assert_eq!(host.session_value(POSITIONS_KEY).as_deref(), Some(""));
        assert_eq!(bar.state().component_ids(), vec![2, 1]);
    }

    #[test]
    fn test_execute_notifies_on_error() {
        let mut host = MemoryHost::new(80);
        let mut bar = Bufferline::new(config());
        bar.setup(&mut host).expect("setup");

        bar.execute(&mut host, Command::SortBy(SortKind::Path));

        let notifications = host.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].0, NotifyLevel::Warn);
        assert_eq!(notifications[0].1, "Unable to find buffers to sort");
    }

    #[test]
    fn test_execute_parsed_commands() {
        let (mut host, mut bar) = setup(&["/a.rs", "/b.rs", "/c.rs"], config());
        for text in ["cycle-next", "move-next", "go-to-buffer 1"] {
            let command: Command = text.parse().expect("parse");
            bar.execute(&mut host, command);
        }
        assert!(host.notifications().is_empty());
        assert_eq!(bar.state().component_ids(), vec![1, 3, 2]);
        assert_eq!(host.current_document(), Some(1));
    }

    #[test]
    fn test_resolve_position() {
        assert_eq!(resolve_position(1, 3).ok(), Some(0));
        assert_eq!(resolve_position(3, 3).ok(), Some(2));
        assert_eq!(resolve_position(-1, 3).ok(), Some(2));
        assert!(resolve_position(0, 3).is_err());
        assert!(resolve_position(-2, 3).is_err());
        assert!(resolve_position(1, 0).is_err());
    }
}
