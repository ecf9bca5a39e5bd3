//! Status line under the editor area
//!
//! Shows the bar's mode on the left and key hints on the right. The latest
//! notification is centred in the space between them. Sections that do not
//! fit are skipped rather than cut.

use bufbar_core::BarTheme;
use ratatui::prelude::*;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

/// Three-part status line.
///
/// ```ignore
/// let status = StatusLine::new(&theme)
///     .mode("PICK")
///     .message("Unable to find buffers to sort")
///     .hints("p:pick  q:quit");
/// frame.render_widget(status, area);
/// ```
pub struct StatusLine<'a> {
    mode: &'a str,
    message: &'a str,
    hints: &'a str,
    theme: &'a BarTheme,
}

impl<'a> StatusLine<'a> {
    #[must_use]
    pub fn new(theme: &'a BarTheme) -> Self {
        StatusLine {
            mode: "",
            message: "",
            hints: "",
            theme,
        }
    }

    /// Sets the mode shown on the left.
    #[must_use]
    pub fn mode(mut self, text: &'a str) -> Self {
        self.mode = text;
        self
    }

    /// Sets the centred message.
    #[must_use]
    pub fn message(mut self, text: &'a str) -> Self {
        self.message = text;
        self
    }

    /// Sets the right-aligned key hints.
    #[must_use]
    pub fn hints(mut self, text: &'a str) -> Self {
        self.hints = text;
        self
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let row = Rect::new(area.x, area.y, area.width, 1);
        buf.set_style(row, self.theme.fill());
        let width = usize::from(area.width);

        let mut left_end = 0;
        if !self.mode.is_empty() {
            let text = format!(" {} ", self.mode);
            if text.width() <= width {
                buf.set_string(row.x, row.y, &text, self.theme.element(true));
                left_end = text.width();
            }
        }

        let mut right_start = width;
        if !self.hints.is_empty() {
            let text = format!(" {} ", self.hints);
            let text_width = text.width();
            if text_width <= width - left_end {
                right_start = width - text_width;
                buf.set_string(row.x + to_u16(right_start), row.y, &text, self.theme.marker());
            }
        }

        let gap = right_start - left_end;
        let message_width = self.message.width();
        if !self.message.is_empty() && message_width <= gap {
            let x = left_end + (gap - message_width) / 2;
            buf.set_string(row.x + to_u16(x), row.y, self.message, self.theme.element(false));
        }
    }
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
