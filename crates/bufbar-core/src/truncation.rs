//! Fitting the bar into the available width.
//!
//! The components left of the active one, the active one itself and the
//! components to its right arrive as three [`Section`]s. [`truncate`] drops
//! components from the outer ends of the longer side until everything,
//! including the "+N hidden" indicators, fits. The active component is
//! never dropped: if it alone is wider than the bar, the bar is left blank.

use crate::component::Component;
use crate::section::Section;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use tracing::trace;

/// Counts of components hidden on each side, with the fixed width of each
/// indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Marker {
    pub left_count: usize,
    pub right_count: usize,
    /// Icon width plus one space
    pub left_element_size: usize,
    /// Icon width plus one space
    pub right_element_size: usize,
}

impl Marker {
    /// Creates a marker with no hidden components.
    #[must_use]
    pub fn new(left_element_size: usize, right_element_size: usize) -> Self {
        Marker {
            left_count: 0,
            right_count: 0,
            left_element_size,
            right_element_size,
        }
    }

    /// Display width of both indicators at the current counts.
    #[must_use]
    pub fn width(&self) -> usize {
        cost(self.left_count, self.left_element_size) + cost(self.right_count, self.right_element_size)
    }

    fn reset(&mut self) {
        self.left_count = 0;
        self.right_count = 0;
    }
}

fn cost(count: usize, element_size: usize) -> usize {
    if count == 0 {
        0
    } else {
        count.to_string().len() + element_size
    }
}

/// Result of fitting the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Truncation {
    /// Rendered components, without indicators
    pub spans: Vec<Span<'static>>,
    pub marker: Marker,
    /// Components that made it into the bar, in order
    pub visible: Vec<Component>,
}

impl Truncation {
    /// Wraps the spans in the indicators: `"{left}{n} "` before and
    /// `" {n}{right}"` after. A blank bar stays blank; indicators are still
    /// drawn when every component was dropped.
    #[must_use]
    pub fn into_line(self, left_icon: &str, right_icon: &str, style: Style) -> Line<'static> {
        if self.spans.is_empty() && self.marker.left_count == 0 && self.marker.right_count == 0 {
            return Line::default();
        }

        let mut spans = Vec::with_capacity(self.spans.len() + 2);
        if self.marker.left_count > 0 {
            spans.push(Span::styled(
                format!("{left_icon}{} ", self.marker.left_count),
                style,
            ));
        }
        spans.extend(self.spans);
        if self.marker.right_count > 0 {
            spans.push(Span::styled(
                format!(" {}{right_icon}", self.marker.right_count),
                style,
            ));
        }
        Line::from(spans)
    }
}

/// Fits `before`, `current` and `after` into `available` columns.
///
/// Components are dropped from the head of `before` or the tail of `after`,
/// whichever side is wider (`before` on ties), and counted in the marker.
/// Once the indicators alone would push the active component out of the
/// bar, both counts start again from zero.
///
/// # Example
///
/// ```
/// use bufbar_core::section::Section;
/// use bufbar_core::truncation::{truncate, Marker};
///
/// let result = truncate(Section::new(), None, Section::new(), 80, Marker::new(2, 2));
/// assert!(result.visible.is_empty());
/// ```
pub fn truncate(
    mut before: Section,
    current: Option<Component>,
    mut after: Section,
    available: usize,
    mut marker: Marker,
) -> Truncation {
    let current_length = current.as_ref().map_or(0, Component::length);

    loop {
        let markers = marker.width();
        let total = before.length() + current_length + after.length() + markers;

        if available >= total {
            let mut visible = before.into_items();
            visible.extend(current);
            visible.extend(after.into_items());
            return Truncation {
                spans: render_all(&visible),
                marker,
                visible,
            };
        }

        if available < current_length {
            return Truncation {
                spans: Vec::new(),
                marker,
                visible: Vec::new(),
            };
        }

        if before.is_empty() && after.is_empty() {
            // Only the indicators are left to give up.
            marker.reset();
            continue;
        }

        let drop_before =
            !before.is_empty() && (after.is_empty() || before.length() >= after.length());
        if drop_before {
            before.drop_front();
            marker.left_count += 1;
        } else {
            after.drop_back();
            marker.right_count += 1;
        }
        trace!(
            left = marker.left_count,
            right = marker.right_count,
            "dropped component"
        );

        if current_length + markers > available {
            marker.reset();
        }
    }
}

fn render_all(components: &[Component]) -> Vec<Span<'static>> {
    components
        .iter()
        .enumerate()
        .flat_map(|(index, component)| component.render(components.get(index + 1)))
        .collect()
}
