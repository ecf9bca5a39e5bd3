//! Ratatui widgets for drawing the bar in a terminal
//!
//! - [`BufferBar`] - The rendered buffer line on a filled row
//! - [`StatusLine`] - Mode, latest notification and key hints

pub mod buffer_bar;
pub mod status_line;

pub use buffer_bar::BufferBar;
pub use status_line::StatusLine;
