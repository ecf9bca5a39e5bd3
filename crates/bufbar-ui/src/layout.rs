//! Screen layout for the terminal front end
//!
//! The bar takes the top row and the status line the bottom row. The
//! document view gets whatever is left.

use ratatui::prelude::*;

/// Regions of the terminal screen.
///
/// ```text
/// +---------------------------------+
/// | buffer line (1 row)             |
/// +---------------------------------+
/// | document view                   |
/// +---------------------------------+
/// | status line (1 row)             |
/// +---------------------------------+
/// ```
///
/// # Example
///
/// ```
/// use bufbar_ui::ScreenLayout;
/// use ratatui::prelude::Rect;
///
/// let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24));
/// assert_eq!(layout.bar, Rect::new(0, 0, 80, 1));
/// assert_eq!(layout.content, Rect::new(0, 1, 80, 22));
/// assert_eq!(layout.status, Rect::new(0, 23, 80, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    /// Row holding the buffer line
    pub bar: Rect,
    /// Document view
    pub content: Rect,
    /// Row holding the status line
    pub status: Rect,
}

impl ScreenLayout {
    /// Splits `area` into bar, content and status regions.
    ///
    /// On screens shorter than three rows the status line goes first, then
    /// the content. The bar is the last region to disappear.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        match area.height {
            0 => ScreenLayout::default(),
            1 => ScreenLayout {
                bar: area,
                ..ScreenLayout::default()
            },
            2 => ScreenLayout {
                bar: Rect::new(area.x, area.y, area.width, 1),
                content: Rect::new(area.x, area.y + 1, area.width, 1),
                status: Rect::default(),
            },
            _ => {
                let [bar, content, status] = Layout::vertical([
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .areas(area);
                ScreenLayout {
                    bar,
                    content,
                    status,
                }
            }
        }
    }

    /// Width of the bar row, which is the width the bar fits into.
    #[must_use]
    pub fn bar_width(&self) -> usize {
        usize::from(self.bar.width)
    }

    /// Whether `(column, row)` falls on the bar.
    #[must_use]
    pub fn on_bar(&self, column: u16, row: u16) -> bool {
        self.bar.contains(Position::new(column, row))
    }
}
