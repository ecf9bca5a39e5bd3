//! # bufbar-core
//!
//! Layout and state model of the bufbar buffer line.
//!
//! This crate holds everything the bar needs that does not depend on a
//! particular render loop: the component model, the truncation engine that
//! fits components into a column budget, sorting, groups, pick letters, the
//! session codec, configuration and the [`Host`] trait through which the bar
//! talks to its editor.
//!
//! ## Core Abstractions
//!
//! - [`Component`] - One segment of the bar (buffer, tab page or group label)
//! - [`Section`] - Ordered run of components with a cached width
//! - [`truncate`] - Fits three sections into the available width
//! - [`sort`] / [`SortBy`] - Built-in and custom orderings
//! - [`BarState`] - Snapshot of the last render plus the custom order
//! - [`Host`] - The editor the bar is embedded in; [`MemoryHost`] implements
//!   it in memory
//! - [`BufferlineConfig`] - TOML configuration
//! - [`CoreError`] - Error types
//!
//! ## Example
//!
//! ```
//! use bufbar_core::{truncate, Marker, Section};
//!
//! // Nothing to show: the bar is empty and no indicators are needed.
//! let result = truncate(Section::new(), None, Section::new(), 40, Marker::new(2, 2));
//! assert!(result.visible.is_empty());
//! assert_eq!(result.marker.left_count, 0);
//! ```

pub mod component;
pub mod config;
pub mod error;
pub mod event;
pub mod groups;
pub mod host;
pub mod letters;
pub mod names;
pub mod persistence;
pub mod section;
pub mod sorter;
pub mod state;
pub mod theme;
pub mod truncation;

pub use component::{
    focusable, BufferElement, Component, ComponentId, ComponentKind, GroupSeparator, LabelContext,
    TabElement,
};
pub use config::{
    BufferlineConfig, ClickAction, GroupConfig, GroupMatcher, Mode, MouseConfig,
    NewDocumentPosition, Numbers,
};
pub use error::{CoreError, CoreResult};
pub use event::{Command, Direction, HostEvent};
pub use groups::{GroupState, PINNED_GROUP};
pub use host::{Document, DocumentId, Host, MemoryHost, NotifyLevel, Tabpage, TabpageId};
pub use letters::LetterRegistry;
pub use section::Section;
pub use sorter::{apply_custom_order, sort, CompareFn, SortBy, SortContext, SortKind};
pub use state::BarState;
pub use theme::{BarColors, BarTheme};
pub use truncation::{truncate, Marker, Truncation};
