//! Core error types for bufbar-core
//!
//! This module provides the error taxonomy shared by the render cycle and
//! the command layer.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use toml::de::Error as ConfigParseError;

/// Errors raised by bufbar operations.
///
/// User-input errors (nothing to sort, no current element, out of range
/// indices) leave the state store untouched and are reported to the user
/// through a host notification. Configuration errors abort setup.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sort was requested while the bar holds no buffers.
    #[error("Unable to find buffers to sort")]
    NothingToSort,

    /// The active document or tab is not part of the bar.
    ///
    /// This occurs for move, cycle and directional close when the current
    /// document is unlisted or belongs to a hidden group.
    #[error("unable to find the current buffer in the bar")]
    NoCurrentElement,

    /// An index-based lookup fell outside the list.
    #[error("index {index} is out of range for {len} elements")]
    IndexOutOfRange { index: i64, len: usize },

    /// A click or lookup named an id the bar does not show.
    #[error("no element with id {0} in the bar")]
    UnknownElement(u64),

    /// A group action named a group that is not configured.
    #[error("group not found: {0}")]
    UnknownGroup(String),

    /// The host editor is older than the minimum supported API.
    #[error("unsupported host version {found}, bufbar requires {required} or newer")]
    UnsupportedHost { found: String, required: String },

    /// A command string could not be parsed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration file could not be parsed.
    #[error("invalid configuration at {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: ConfigParseError,
    },

    /// Underlying IO error bubbled up from configuration loading.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The host rejected an operation (delete, focus, ...).
    #[error("host error: {0}")]
    Host(String),
}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
