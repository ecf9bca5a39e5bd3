//! The buffer line coordinator
//!
//! [`Bufferline`] owns everything that survives between renders: the
//! configuration, the [`BarState`] snapshot with the user's custom order,
//! pick letters and group state. Each render rebuilds the component list
//! from the host, orders and groups it, fits it into the host's width and
//! stores the result back for the index-based commands.
//!
//! # Example
//!
//! ```
//! use bufbar_core::{BufferlineConfig, MemoryHost};
//! use bufbar_ui::Bufferline;
//!
//! let mut host = MemoryHost::new(40);
//! host.open("/src/main.rs");
//! host.open("/src/lib.rs");
//!
//! let mut bar = Bufferline::new(BufferlineConfig::default());
//! bar.setup(&mut host).expect("supported host");
//!
//! assert_eq!(host.bar_text(), " main.rs | lib.rs |");
//! ```

use bufbar_core::names::{truncate_name, unique_names};
use bufbar_core::persistence::{self, PINNED_KEY, POSITIONS_KEY};
use bufbar_core::{
    apply_custom_order, sort, BarState, BufferElement, BufferlineConfig, CompareFn, Component,
    ComponentId, CoreError, CoreResult, GroupState, Host, HostEvent, LabelContext, LetterRegistry,
    Marker, Mode, NewDocumentPosition, NotifyLevel, Section, SortBy, SortContext, TabElement,
    truncate,
};
use ratatui::text::Line;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

/// Oldest host API the bar works with.
pub const MIN_HOST_VERSION: (u32, u32) = (0, 8);

/// Output of one render cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBar {
    /// The bar, indicators included
    pub line: Line<'static>,
    /// Components hidden on each side
    pub marker: Marker,
    /// Ids of the components that made it into the bar
    pub visible: Vec<ComponentId>,
    /// Column span of each visible component, left indicator included
    pub columns: Vec<(ComponentId, Range<usize>)>,
}

impl RenderedBar {
    /// Returns the component drawn at `column`, if any.
    #[must_use]
    pub fn element_at(&self, column: usize) -> Option<ComponentId> {
        self.columns
            .iter()
            .find(|(_, span)| span.contains(&column))
            .map(|(id, _)| id.clone())
    }
}

/// The buffer line.
///
/// Not thread-safe; it lives on the host's event-loop thread and every call
/// takes the host it should talk to.
pub struct Bufferline {
    pub(crate) config: BufferlineConfig,
    pub(crate) state: BarState,
    pub(crate) letters: LetterRegistry,
    pub(crate) groups: GroupState,
    pub(crate) sort_by: SortBy,
    unsupported_notified: bool,
}

impl Bufferline {
    /// Creates a bar from its configuration.
    #[must_use]
    pub fn new(config: BufferlineConfig) -> Self {
        Bufferline {
            state: BarState::default(),
            letters: LetterRegistry::new(&config.pick_alphabet),
            groups: GroupState::new(&config.groups),
            sort_by: SortBy::Kind(config.sort_by),
            unsupported_notified: false,
            config,
        }
    }

    /// Orders buffers with `compare` instead of the configured sort.
    #[must_use]
    pub fn with_comparator(mut self, compare: CompareFn) -> Self {
        self.sort_by = SortBy::Custom(compare);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BufferlineConfig {
        &self.config
    }

    /// Returns the snapshot of the last render.
    #[must_use]
    pub fn state(&self) -> &BarState {
        &self.state
    }

    /// Returns the group state.
    #[must_use]
    pub fn groups(&self) -> &GroupState {
        &self.groups
    }

    /// Checks the host version, restores persisted state and draws the bar.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnsupportedHost` when the host API is older than
    /// [`MIN_HOST_VERSION`]. The user is notified the first time only.
    pub fn setup(&mut self, host: &mut dyn Host) -> CoreResult<()> {
        let (major, minor) = host.api_version();
        if (major, minor) < MIN_HOST_VERSION {
            let err = CoreError::UnsupportedHost {
                found: format!("{major}.{minor}"),
                required: format!("{}.{}", MIN_HOST_VERSION.0, MIN_HOST_VERSION.1),
            };
            if !self.unsupported_notified {
                self.unsupported_notified = true;
                host.notify(NotifyLevel::Error, &err.to_string());
            }
            return Err(err);
        }

        self.restore_session(host);
        self.refresh(host);
        Ok(())
    }

    /// Reacts to an editor event and redraws.
    pub fn handle_event(&mut self, host: &mut dyn Host, event: HostEvent) {
        debug!(?event, "host event");
        match event {
            HostEvent::SessionLoaded => self.restore_session(host),
            HostEvent::DocumentAdded(id) => self.place_new_document(host, id),
            HostEvent::DocumentRead(_)
            | HostEvent::DocumentEntered(_)
            | HostEvent::TabEntered
            | HostEvent::ColorSchemeChanged
            | HostEvent::Resized => {}
        }
        self.refresh(host);
    }

    /// Renders and hands the line to the host.
    pub fn refresh(&mut self, host: &mut dyn Host) {
        self.prune_custom_order(host);
        let bar = self.render(&*host);
        host.draw(&bar.line);
    }

    /// Rebuilds the bar from the host's current documents or tab pages.
    pub fn render(&mut self, host: &dyn Host) -> RenderedBar {
        let config = &self.config;
        let measure = |text: &str| host.text_width(text);
        let ctx = LabelContext {
            theme: &config.theme,
            numbers: config.numbers,
            picking: self.state.is_picking,
            separator: &config.separator,
            measure: &measure,
        };

        let (mut components, live) = match config.mode {
            Mode::Buffers => build_buffers(host, config, &mut self.letters, &self.groups, &ctx),
            Mode::Tabs => (build_tabs(host, config, &ctx), Vec::new()),
        };

        let custom_order = self.state.custom_order();
        if let Some(order) = custom_order {
            components = apply_custom_order(components, order);
        }
        let cwd = host.cwd();
        sort(
            &mut components,
            &self.sort_by,
            &SortContext {
                custom_sort: custom_order,
                cwd: &cwd,
            },
        );

        let all = match config.mode {
            Mode::Buffers => self.groups.arrange(components, &ctx),
            Mode::Tabs => components,
        };

        let shown: Vec<Component> = all
            .iter()
            .filter(|component| !component.is_hidden())
            .cloned()
            .collect();
        let (before, current, after) = split_around_selected(shown);

        let available = host.available_width();
        let marker = Marker::new(
            host.text_width(&config.left_trunc_marker) + 1,
            host.text_width(&config.right_trunc_marker) + 1,
        );
        let truncation = truncate(before, current, after, available, marker);
        let marker = truncation.marker;
        let visible: Vec<ComponentId> = truncation.visible.iter().map(Component::id).collect();
        let mut column = Marker {
            right_count: 0,
            ..marker
        }
        .width();
        let columns = truncation
            .visible
            .iter()
            .map(|component| {
                let start = column;
                column += component.length();
                (component.id(), start..column)
            })
            .collect();

        debug!(
            components = all.len(),
            visible = visible.len(),
            width = available,
            left = marker.left_count,
            right = marker.right_count,
            "rendered bufferline"
        );

        self.state.update(all, &truncation.visible);
        let line = truncation.into_line(
            &config.left_trunc_marker,
            &config.right_trunc_marker,
            config.theme.marker(),
        );

        if config.mode == Mode::Buffers {
            self.letters.retain_live(&live);
        }

        RenderedBar {
            line,
            marker,
            visible,
            columns,
        }
    }

    /// Replaces the custom order and stores it when persistence is on.
    pub(crate) fn set_custom_order(&mut self, host: &mut dyn Host, mut ids: Vec<u64>) {
        // Ids missing from the new order (hidden group members) keep their
        // relative order at the end.
        for id in self
            .state
            .all_components
            .iter()
            .filter_map(|component| component.id().raw())
        {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        if self.config.persist_buffer_sort {
            persistence::save(host, POSITIONS_KEY, &ids);
        }
        self.state.custom_sort = Some(ids);
    }

    fn restore_session(&mut self, host: &mut dyn Host) {
        if self.config.persist_buffer_sort {
            if let Some(order) = persistence::load(&*host, POSITIONS_KEY) {
                info!(count = order.len(), "restored buffer order");
                self.state.custom_sort = (!order.is_empty()).then_some(order);
            }
        }
        if let Some(pinned) = persistence::load(&*host, PINNED_KEY) {
            self.groups.set_pinned(pinned);
        }
    }

    /// Forgets closed ids so the stored order tracks the open set.
    fn prune_custom_order(&mut self, host: &mut dyn Host) {
        let live = live_ids(&*host, self.config.mode);
        let Some(order) = self.state.custom_sort.as_mut() else {
            return;
        };
        let before = order.len();
        order.retain(|id| live.contains(id));
        if order.len() == before {
            return;
        }

        debug!(removed = before - order.len(), "pruned custom order");
        if self.config.persist_buffer_sort {
            persistence::save(host, POSITIONS_KEY, order);
        }
    }

    fn place_new_document(&mut self, host: &mut dyn Host, id: u64) {
        // Tab orders hold tab page ids, not documents.
        if self.config.mode == Mode::Tabs {
            return;
        }
        let current = self.state.current().and_then(|component| component.id().raw());
        let Some(order) = self.state.custom_sort.as_mut() else {
            return;
        };
        if order.contains(&id) {
            return;
        }

        match self.config.new_document_position {
            NewDocumentPosition::End => order.push(id),
            NewDocumentPosition::Start => order.insert(0, id),
            NewDocumentPosition::AfterCurrent => {
                let after = current
                    .and_then(|current| order.iter().position(|other| *other == current))
                    .map_or(order.len(), |index| index + 1);
                order.insert(after, id);
            }
        }

        if self.config.persist_buffer_sort {
            persistence::save(host, POSITIONS_KEY, order);
        }
    }
}

fn live_ids(host: &dyn Host, mode: Mode) -> Vec<u64> {
    match mode {
        Mode::Buffers => host.documents().iter().map(|doc| doc.id).collect(),
        Mode::Tabs => host.tabpages().iter().map(|tab| tab.id).collect(),
    }
}

fn build_buffers(
    host: &dyn Host,
    config: &BufferlineConfig,
    letters: &mut LetterRegistry,
    groups: &GroupState,
    ctx: &LabelContext<'_>,
) -> (Vec<Component>, Vec<u64>) {
    let documents = host.documents();
    let current = host.current_document();
    let paths: Vec<&Path> = documents.iter().map(|doc| doc.path.as_path()).collect();
    let names = unique_names(&paths);

    let components = documents
        .iter()
        .zip(names)
        .map(|(doc, name)| {
            let name = truncate_name(&name, config.max_name_length);
            let letter = if ctx.picking {
                letters.get_or_assign(doc.id, &name)
            } else {
                None
            };
            let element = BufferElement {
                id: doc.id,
                path: doc.path.clone(),
                name,
                modified: doc.modified,
                diagnostics: doc.diagnostics,
                tab_number: doc.tab_number,
                letter,
                group: groups.group_for(doc.id, &doc.path),
            };
            Component::buffer(element, current == Some(doc.id), ctx)
        })
        .collect();

    let live = documents.iter().map(|doc| doc.id).collect();
    (components, live)
}

fn build_tabs(host: &dyn Host, config: &BufferlineConfig, ctx: &LabelContext<'_>) -> Vec<Component> {
    let current = host.current_tabpage();
    host.tabpages()
        .into_iter()
        .map(|tab| {
            let element = TabElement {
                id: tab.id,
                number: tab.number,
                title: truncate_name(&tab.title, config.max_name_length),
            };
            Component::tab(element, current == Some(tab.id), ctx)
        })
        .collect()
}

fn split_around_selected(components: Vec<Component>) -> (Section, Option<Component>, Section) {
    let Some(index) = components.iter().position(Component::is_selected) else {
        return (Section::new(), None, components.into());
    };

    let mut before = Section::new();
    let mut current = None;
    let mut after = Section::new();
    for (position, component) in components.into_iter().enumerate() {
        match position.cmp(&index) {
            std::cmp::Ordering::Less => before.push(component),
            std::cmp::Ordering::Equal => current = Some(component),
            std::cmp::Ordering::Greater => after.push(component),
        }
    }
    (before, current, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bufbar_core::{Document, GroupConfig, GroupMatcher, MemoryHost, SortKind};
    use std::sync::Arc;

    fn config() -> BufferlineConfig {
        BufferlineConfig {
            sort_by: SortKind::None,
            ..BufferlineConfig::default()
        }
    }

    fn host_with(paths: &[&str], width: usize) -> MemoryHost {
        let mut host = MemoryHost::new(width);
        for path in paths {
            host.open(*path);
        }
        host
    }

    // ==================== Setup Tests ====================

    #[test]
    fn test_setup_draws_bar() {
        let mut host = host_with(&["/a.rs", "/b.rs"], 80);
        let mut bar = Bufferline::new(config());
        bar.setup(&mut host).expect("setup");
        assert_eq!(host.bar_text(), " a.rs | b.rs |");
        assert_eq!(host.draw_count(), 1);
        assert_eq!(bar.state().component_ids(), vec![1, 2]);
        assert_eq!(bar.state().current_element_index, Some(0));
    }

    #[test]
    fn test_setup_rejects_old_host_once() {
        let mut host = MemoryHost::new(80).with_version(0, 7);
        let mut bar = Bufferline::new(config());

        let err = bar.setup(&mut host).expect_err("old host");
        assert!(matches!(err, CoreError::UnsupportedHost { .. }));
        assert!(bar.setup(&mut host).is_err());

        assert_eq!(host.notifications().len(), 1);
        assert_eq!(host.notifications()[0].0, NotifyLevel::Error);
        assert!(host.notifications()[0].1.contains("0.7"));
        assert_eq!(host.draw_count(), 0);
    }

    #[test]
    fn test_setup_restores_persisted_order() {
        let mut host = host_with(&["/a.rs", "/b.rs", "/c.rs"], 80);
        host.set_session_value(POSITIONS_KEY, "3,1,x,2".to_string());
        let mut bar = Bufferline::new(config());
        bar.setup(&mut host).expect("setup");
        assert_eq!(bar.state().custom_sort, Some(vec![3, 1, 2]));
        assert_eq!(bar.state().component_ids(), vec![3, 1, 2]);
    }

    // ==================== Render Tests ====================

    #[test]
    fn test_render_sorts_without_custom_order() {
        let host = host_with(&["/b.toml", "/a.rs", "/c.md"], 80);
        let mut bar = Bufferline::new(BufferlineConfig {
            sort_by: SortKind::Extension,
            ..BufferlineConfig::default()
        });
        bar.render(&host);
        assert_eq!(bar.state().component_ids(), vec![3, 2, 1]);

        let mut bar = bar.with_comparator(Arc::new(|a: &Component, b: &Component| a.id() > b.id()));
        bar.render(&host);
        assert_eq!(bar.state().component_ids(), vec![3, 2, 1]);
    }

    #[test]
    fn test_render_disambiguates_names() {
        let host = host_with(&["/p/one/mod.rs", "/p/two/mod.rs"], 80);
        let mut bar = Bufferline::new(config());
        let rendered = bar.render(&host);
        assert_eq!(rendered.line.to_string(), " one/mod.rs | two/mod.rs |");
    }

    #[test]
    fn test_render_truncates_around_current() {
        let mut host = host_with(&["/a.rs", "/b.rs", "/c.rs", "/d.rs", "/e.rs"], 16);
        host.focus_document(3).expect("focus");
        let mut bar = Bufferline::new(config());

        let rendered = bar.render(&host);

        assert!(rendered.visible.contains(&ComponentId::Document(3)));
        assert!(rendered.line.width() <= 16);
        assert!(rendered.marker.left_count + rendered.marker.right_count > 0);
        assert_eq!(bar.state().components.len(), 5);
        assert_eq!(bar.state().visible_components.len(), rendered.visible.len());
    }

    #[test]
    fn test_element_at_maps_columns() {
        let host = host_with(&["/a.rs", "/b.rs"], 80);
        let mut bar = Bufferline::new(config());
        // " a.rs |" then " b.rs |"
        let rendered = bar.render(&host);
        assert_eq!(rendered.element_at(0), Some(ComponentId::Document(1)));
        assert_eq!(rendered.element_at(6), Some(ComponentId::Document(1)));
        assert_eq!(rendered.element_at(7), Some(ComponentId::Document(2)));
        assert_eq!(rendered.element_at(14), None);
    }

    #[test]
    fn test_element_at_skips_left_indicator() {
        let mut host = host_with(&["/a.rs", "/b.rs", "/c.rs", "/d.rs", "/e.rs"], 16);
        host.focus_document(5).expect("focus");
        let mut bar = Bufferline::new(config());
        let rendered = bar.render(&host);

        assert!(rendered.marker.left_count > 0);
        assert_eq!(rendered.element_at(0), None);
        let (first, span) = rendered.columns.first().expect("visible component");
        assert_eq!(span.start, rendered.line.spans[0].width());
        assert_eq!(rendered.element_at(span.start), Some(first.clone()));
    }

    #[test]
    fn test_render_blank_when_current_too_wide() {
        let mut host = MemoryHost::new(6);
        host.open("/a_long_name.rs");
        let mut bar = Bufferline::new(config());
        let rendered = bar.render(&host);
        assert_eq!(rendered.line.width(), 0);
        assert!(rendered.visible.is_empty());
        assert!(bar.state().visible_components.is_empty());
    }

    #[test]
    fn test_render_tabs_mode() {
        let mut host = MemoryHost::new(80);
        host.add_tabpage("main.rs");
        let second = host.add_tabpage("lib.rs");
        host.focus_tabpage(second).expect("focus");
        let mut bar = Bufferline::new(BufferlineConfig {
            mode: Mode::Tabs,
            ..config()
        });
        let rendered = bar.render(&host);
        assert_eq!(rendered.line.to_string(), " 1 main.rs | 2 lib.rs |");
        assert_eq!(bar.state().current_element_index, Some(1));
    }

    #[test]
    fn test_render_groups_and_hidden_members() {
        let host = host_with(&["/a.rs", "/README.md", "/b.rs"], 80);
        let mut bar = Bufferline::new(BufferlineConfig {
            groups: vec![GroupConfig {
                name: "docs".into(),
                matcher: GroupMatcher {
                    extensions: vec!["md".into()],
                    path_contains: Vec::new(),
                },
                priority: 1,
                hidden: true,
            }],
            ..config()
        });

        let rendered = bar.render(&host);
        assert_eq!(rendered.line.to_string(), " docs(1) | a.rs | b.rs |");
        assert_eq!(bar.state().all_components.len(), 4);
        assert_eq!(bar.state().component_ids(), vec![1, 3]);
    }

    #[test]
    fn test_letters_shown_only_while_picking() {
        let host = host_with(&["/main.rs", "/mod.rs"], 80);
        let mut bar = Bufferline::new(config());
        bar.state.is_picking = true;
        let rendered = bar.render(&host);
        assert_eq!(rendered.line.to_string(), " m main.rs | a mod.rs |");

        bar.state.is_picking = false;
        let rendered = bar.render(&host);
        assert_eq!(rendered.line.to_string(), " main.rs | mod.rs |");
    }

    #[test]
    fn test_badges_and_numbers() {
        let mut host = MemoryHost::new(80);
        host.add_document(Document::new(4, "/a.rs").with_modified(true).with_diagnostics(2));
        let mut bar = Bufferline::new(BufferlineConfig {
            numbers: bufbar_core::Numbers::Id,
            ..config()
        });
        let rendered = bar.render(&host);
        assert_eq!(rendered.line.to_string(), " 4. a.rs (2) ● |");
    }

    // ==================== Event Tests ====================

    #[test]
    fn test_session_loaded_restores_order_and_pins() {
        let mut host = host_with(&["/a.rs", "/b.rs"], 80);
        let mut bar = Bufferline::new(config());
        bar.setup(&mut host).expect("setup");

        host.set_session_value(POSITIONS_KEY, "2,1".to_string());
        host.set_session_value(PINNED_KEY, "1".to_string());
        bar.handle_event(&mut host, HostEvent::SessionLoaded);

        assert!(bar.groups().is_pinned(1));
        // Pinned documents render first regardless of the custom order.
        assert_eq!(bar.state().component_ids(), vec![1, 2]);
        assert_eq!(bar.state().custom_sort, Some(vec![2, 1]));
    }

    #[test]
    fn test_document_added_positions() {
        for (position, expected) in [
            (NewDocumentPosition::End, vec![2, 1, 3]),
            (NewDocumentPosition::Start, vec![3, 2, 1]),
            (NewDocumentPosition::AfterCurrent, vec![2, 1, 3]),
        ] {
            let mut host = host_with(&["/a.rs", "/b.rs"], 80);
            let mut bar = Bufferline::new(BufferlineConfig {
                new_document_position: position,
                ..config()
            });
            bar.setup(&mut host).expect("setup");
            bar.state.custom_sort = Some(vec![2, 1]);
            bar.refresh(&mut host);

            let id = host.open("/c.rs");
            bar.handle_event(&mut host, HostEvent::DocumentAdded(id));
            assert_eq!(bar.state().custom_sort, Some(expected.clone()), "{position:?}");
            assert_eq!(bar.state().component_ids(), expected);
        }
    }

    #[test]
    fn test_document_added_after_current_in_middle() {
        let mut host = host_with(&["/a.rs", "/b.rs", "/c.rs"], 80);
        let mut bar = Bufferline::new(BufferlineConfig {
            new_document_position: NewDocumentPosition::AfterCurrent,
            ..config()
        });
        bar.state.custom_sort = Some(vec![3, 1, 2]);
        bar.refresh(&mut host);

        let id = host.open("/d.rs");
        bar.handle_event(&mut host, HostEvent::DocumentAdded(id));
        assert_eq!(bar.state().custom_sort, Some(vec![3, 1, 4, 2]));
    }

    #[test]
    fn test_custom_order_forgets_closed_documents() {
        let mut host = host_with(&["/a.rs", "/b.rs"], 80);
        let mut bar = Bufferline::new(config());
        bar.setup(&mut host).expect("setup");
        bar.state.custom_sort = Some(vec![2, 1]);
        bar.refresh(&mut host);

        for round in 0..20 {
            let id = host.open(format!("/tmp_{round}.rs"));
            bar.handle_event(&mut host, HostEvent::DocumentAdded(id));
            host.delete_document(id).expect("delete");
            bar.refresh(&mut host);
        }

        assert_eq!(bar.state().custom_sort, Some(vec![2, 1]));
        assert_eq!(host.session_value(POSITIONS_KEY).as_deref(), Some("2,1"));
        assert_eq!(bar.state().component_ids(), vec![2, 1]);
    }

    #[test]
    fn test_document_added_ignored_in_tabs_mode() {
        let mut host = MemoryHost::new(80);
        host.add_tabpage("one");
        host.add_tabpage("two");
        let mut bar = Bufferline::new(BufferlineConfig {
            mode: Mode::Tabs,
            ..config()
        });
        bar.setup(&mut host).expect("setup");
        bar.state.custom_sort = Some(vec![2, 1]);

        let id = host.open("/a.rs");
        bar.handle_event(&mut host, HostEvent::DocumentAdded(id));
        assert_eq!(bar.state().custom_sort, Some(vec![2, 1]));
    }

    #[test]
    fn test_events_redraw() {
        let mut host = host_with(&["/a.rs"], 80);
        let mut bar = Bufferline::new(config());
        for event in [
            HostEvent::DocumentRead(1),
            HostEvent::DocumentEntered(1),
            HostEvent::TabEntered,
            HostEvent::ColorSchemeChanged,
            HostEvent::Resized,
        ] {
            bar.handle_event(&mut host, event);
        }
        assert_eq!(host.draw_count(), 5);
    }

    #[test]
    fn test_letters_released_for_closed_documents() {
        let mut host = host_with(&["/a.rs", "/b.rs"], 80);
        let mut bar = Bufferline::new(config());
        bar.state.is_picking = true;
        bar.render(&host);
        assert_eq!(bar.letters.len(), 2);

        host.delete_document(2).expect("delete");
        bar.render(&host);
        assert_eq!(bar.letters.len(), 1);
    }
}
