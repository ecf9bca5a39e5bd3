//! # bufbar-ui
//!
//! The buffer line itself, built on the types in [`bufbar_core`]:
//!
//! - [`Bufferline`] - Render cycle, host events and session restore
//! - [`commands`] - Cycling, moving, closing, picking, sorting and groups
//! - [`BufferBar`] and [`StatusLine`] - Ratatui widgets for terminal hosts
//! - [`ScreenLayout`] - Bar, content and status regions
//! - [`keymap`] - Default key bindings
//!
//! ## Example
//!
//! ```
//! use bufbar_core::{BufferlineConfig, Command, Direction, MemoryHost};
//! use bufbar_ui::Bufferline;
//!
//! let mut host = MemoryHost::new(80);
//! host.open("/src/main.rs");
//! host.open("/src/lib.rs");
//!
//! let mut bar = Bufferline::new(BufferlineConfig::default());
//! bar.setup(&mut host).expect("supported host");
//! bar.execute(&mut host, Command::Cycle(Direction::Right));
//!
//! assert_eq!(host.bar_text(), " main.rs | lib.rs |");
//! assert_eq!(bar.state().current_element_index, Some(1));
//! ```

pub mod bufferline;
pub mod commands;
pub mod keymap;
pub mod layout;
pub mod widgets;

pub use bufferline::{Bufferline, RenderedBar, MIN_HOST_VERSION};
pub use commands::GroupAction;
pub use keymap::{map_key, KeyAction, KEY_HINTS};
pub use layout::ScreenLayout;
pub use widgets::{BufferBar, StatusLine};

#[cfg(test)]
mod tests {
    use super::*;
    use bufbar_core::{BufferlineConfig, MemoryHost};

    #[test]
    fn test_exports() {
        let host = MemoryHost::new(40);
        let mut bar = Bufferline::new(BufferlineConfig::default());
        let rendered: RenderedBar = bar.render(&host);
        assert!(rendered.visible.is_empty());
        assert_eq!(MIN_HOST_VERSION, (0, 8));
        let _ = ScreenLayout::default();
        assert!(!KEY_HINTS.is_empty());
    }
}
