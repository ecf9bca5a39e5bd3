//! Renderable components of the buffer line.
//!
//! A [`Component`] is one segment of the bar: a document ([`BufferElement`]),
//! an editor tab page ([`TabElement`]) or the label that opens a group
//! ([`GroupSeparator`]). Every component knows its display width before
//! layout, and that width is exactly what [`Component::render`] produces.
//! The truncation engine relies on this and never measures rendered text.

use crate::config::Numbers;
use crate::host::{DocumentId, TabpageId};
use crate::theme::BarTheme;
use ratatui::style::Style;
use ratatui::text::Span;
use std::fmt;
use std::path::PathBuf;

const MODIFIED_ICON: &str = "●";

/// Identity of a component across render cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentId {
    /// A host document
    Document(DocumentId),
    /// A host tab page
    Tabpage(TabpageId),
    /// The label of a named group
    Group(String),
}

impl ComponentId {
    /// Returns the host id behind a document or tab page.
    ///
    /// Group labels have no host id.
    #[must_use]
    pub fn raw(&self) -> Option<u64> {
        match self {
            ComponentId::Document(id) | ComponentId::Tabpage(id) => Some(*id),
            ComponentId::Group(_) => None,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentId::Document(id) => write!(f, "document {id}"),
            ComponentId::Tabpage(id) => write!(f, "tab page {id}"),
            ComponentId::Group(name) => write!(f, "group {name}"),
        }
    }
}

/// Document data carried by a buffer component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferElement {
    /// Host document id
    pub id: DocumentId,
    /// Full document path
    pub path: PathBuf,
    /// Name shown in the bar (disambiguated and shortened)
    pub name: String,
    /// Unsaved changes
    pub modified: bool,
    /// Diagnostics count badge
    pub diagnostics: usize,
    /// Lowest tab page number showing the document
    pub tab_number: Option<usize>,
    /// Pick letter, assigned while picking
    pub letter: Option<char>,
    /// Group the document belongs to
    pub group: Option<String>,
}

/// Tab page data carried by a tab component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabElement {
    pub id: TabpageId,
    pub number: usize,
    pub title: String,
}

/// Label opening a named group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSeparator {
    pub name: String,
    /// Number of members in the group
    pub count: usize,
    /// Whether the group's members are hidden
    pub collapsed: bool,
}

/// Variant data of a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Buffer(BufferElement),
    Tab(TabElement),
    GroupSeparator(GroupSeparator),
}

/// Inputs needed to build component labels.
pub struct LabelContext<'a> {
    /// Palette used for label styles
    pub theme: &'a BarTheme,
    /// Number prefix shown before buffer names
    pub numbers: Numbers,
    /// Whether pick letters replace the number prefix
    pub picking: bool,
    /// Text drawn after every component
    pub separator: &'a str,
    /// Display width measurement, normally [`crate::Host::text_width`]
    pub measure: &'a dyn Fn(&str) -> usize,
}

/// One segment of the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    kind: ComponentKind,
    selected: bool,
    hidden: bool,
    label: Vec<Span<'static>>,
    separator: String,
    separator_style: Style,
    separator_selected_style: Style,
    length: usize,
}

impl Component {
    /// Builds a buffer component.
    ///
    /// The label reads `" [prefix]name[ (N)][ ●] "` followed by the separator.
    pub fn buffer(element: BufferElement, selected: bool, ctx: &LabelContext<'_>) -> Self {
        let theme = ctx.theme;
        let element_style = theme.element(selected);
        let mut label = vec![Span::styled(" ", element_style)];

        if ctx.picking {
            if let Some(letter) = element.letter {
                label.push(Span::styled(format!("{letter} "), theme.pick(selected)));
            }
        } else if ctx.numbers == Numbers::Id {
            label.push(Span::styled(format!("{}. ", element.id), element_style));
        }

        label.push(Span::styled(element.name.clone(), element_style));

        if element.diagnostics > 0 {
            label.push(Span::styled(
                format!(" ({})", element.diagnostics),
                theme.diagnostics(selected),
            ));
        }
        if element.modified {
            label.push(Span::styled(
                format!(" {MODIFIED_ICON}"),
                theme.modified(selected),
            ));
        }
        label.push(Span::styled(" ", element_style));

        Self::assemble(ComponentKind::Buffer(element), selected, label, ctx)
    }

    /// Builds a tab page component labelled `" N title "`.
    pub fn tab(element: TabElement, selected: bool, ctx: &LabelContext<'_>) -> Self {
        let style = ctx.theme.element(selected);
        let label = vec![Span::styled(
            format!(" {} {} ", element.number, element.title),
            style,
        )];
        Self::assemble(ComponentKind::Tab(element), selected, label, ctx)
    }

    /// Builds a group label; collapsed groups show their member count.
    pub fn group_separator(separator: GroupSeparator, ctx: &LabelContext<'_>) -> Self {
        let text = if separator.collapsed {
            format!(" {}({}) ", separator.name, separator.count)
        } else {
            format!(" {} ", separator.name)
        };
        let label = vec![Span::styled(text, ctx.theme.group())];
        Self::assemble(ComponentKind::GroupSeparator(separator), false, label, ctx)
    }

    fn assemble(
        kind: ComponentKind,
        selected: bool,
        label: Vec<Span<'static>>,
        ctx: &LabelContext<'_>,
    ) -> Self {
        let length = label
            .iter()
            .map(|span| (ctx.measure)(&*span.content))
            .sum::<usize>()
            + (ctx.measure)(ctx.separator);

        Component {
            kind,
            selected,
            hidden: false,
            label,
            separator: ctx.separator.to_string(),
            separator_style: ctx.theme.separator(selected),
            separator_selected_style: ctx.theme.separator(true),
            length,
        }
    }

    /// Returns the component's identity.
    #[must_use]
    pub fn id(&self) -> ComponentId {
        match &self.kind {
            ComponentKind::Buffer(buffer) => ComponentId::Document(buffer.id),
            ComponentKind::Tab(tab) => ComponentId::Tabpage(tab.id),
            ComponentKind::GroupSeparator(group) => ComponentId::Group(group.name.clone()),
        }
    }

    /// Returns the variant data.
    #[must_use]
    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// Narrows to buffer data; `None` for tabs and group labels.
    #[must_use]
    pub fn as_buffer(&self) -> Option<&BufferElement> {
        match &self.kind {
            ComponentKind::Buffer(buffer) => Some(buffer),
            _ => None,
        }
    }

    /// Narrows to tab page data.
    #[must_use]
    pub fn as_tab(&self) -> Option<&TabElement> {
        match &self.kind {
            ComponentKind::Tab(tab) => Some(tab),
            _ => None,
        }
    }

    /// Narrows to group label data.
    #[must_use]
    pub fn as_group_separator(&self) -> Option<&GroupSeparator> {
        match &self.kind {
            ComponentKind::GroupSeparator(group) => Some(group),
            _ => None,
        }
    }

    /// Group the component belongs to, if any.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        match &self.kind {
            ComponentKind::Buffer(buffer) => buffer.group.as_deref(),
            ComponentKind::Tab(_) => None,
            ComponentKind::GroupSeparator(group) => Some(&group.name),
        }
    }

    /// Group labels cannot take focus.
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        !matches!(self.kind, ComponentKind::GroupSeparator(_))
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Whether this is the focused document or tab page.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Display width in columns, separator included.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Pick letter of a buffer component.
    #[must_use]
    pub fn letter(&self) -> Option<char> {
        self.as_buffer().and_then(|buffer| buffer.letter)
    }

    /// Renders the component followed by its separator.
    ///
    /// The separator takes the selected style when either this component or
    /// its right neighbour is selected. Width never depends on `next`.
    #[must_use]
    pub fn render(&self, next: Option<&Component>) -> Vec<Span<'static>> {
        let touches_selected = self.selected || next.is_some_and(Component::is_selected);
        let style = if touches_selected {
            self.separator_selected_style
        } else {
            self.separator_style
        };

        let mut spans = self.label.clone();
        spans.push(Span::styled(self.separator.clone(), style));
        spans
    }

    /// Plain label text without the separator.
    #[must_use]
    pub fn label_text(&self) -> String {
        self.label.iter().map(|span| &*span.content).collect()
    }
}

/// Keeps components that can take focus and are not hidden.
#[must_use]
pub fn focusable(components: &[Component]) -> Vec<Component> {
    components
        .iter()
        .filter(|component| component.is_focusable() && !component.is_hidden())
        .cloned()
        .collect()
}
