//! Widget drawing a rendered buffer line
//!
//! [`BufferBar`] paints the bar background across the whole row, then the
//! line produced by [`crate::Bufferline::render`] from the left edge. Any
//! columns the line does not use keep the fill colour.
//!
//! ## Example
//!
//! ```
//! use bufbar_core::BarTheme;
//! use bufbar_ui::widgets::BufferBar;
//! use ratatui::prelude::*;
//!
//! let theme = BarTheme::dark();
//! let line = Line::from(" main.rs |");
//! let area = Rect::new(0, 0, 20, 1);
//! let mut buf = Buffer::empty(area);
//! BufferBar::new(&line, &theme).render(area, &mut buf);
//! assert_eq!(buf[(1, 0)].symbol(), "m");
//! ```

use bufbar_core::BarTheme;
use ratatui::prelude::*;
use ratatui::widgets::Widget;

/// One-row widget showing the buffer line.
pub struct BufferBar<'a> {
    line: &'a Line<'static>,
    theme: &'a BarTheme,
}

impl<'a> BufferBar<'a> {
    /// Creates the widget for an already rendered line.
    #[must_use]
    pub fn new(line: &'a Line<'static>, theme: &'a BarTheme) -> Self {
        BufferBar { line, theme }
    }

    /// Display width of the line in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.line.width()
    }
}

impl Widget for BufferBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let row = Rect::new(area.x, area.y, area.width, 1);
        buf.set_style(row, self.theme.fill());
        buf.set_line(row.x, row.y, self.line, row.width);
    }
}
