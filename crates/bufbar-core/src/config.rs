//! Buffer line configuration
//!
//! Options are read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) yields [`BufferlineConfig::default`].
//!
//! ```toml
//! mode = "buffers"
//! sort_by = "extension"
//! persist_buffer_sort = true
//!
//! [[groups]]
//! name = "docs"
//! priority = 2
//! matcher = { extensions = ["md", "txt"] }
//! ```

use crate::error::{CoreError, CoreResult};
use crate::sorter::SortKind;
use crate::theme::BarTheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default pick alphabet: home row first, then the rest of the keyboard.
pub const DEFAULT_PICK_ALPHABET: &str =
    "asdfjkl;ghnmxcvbziowerutyqpASDFJKLGHNMXCVBZIOWERUTYQP";

/// What the bar lists.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One element per open document
    #[default]
    Buffers,
    /// One element per editor tab page
    Tabs,
}

/// Number prefix shown before buffer names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Numbers {
    #[default]
    None,
    /// The host document id
    Id,
}

/// Where a new document lands when a custom order is active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NewDocumentPosition {
    #[default]
    End,
    Start,
    AfterCurrent,
}

/// What a mouse button does on an element.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClickAction {
    Focus,
    Close,
    None,
}

/// Mouse button bindings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MouseConfig {
    pub left: ClickAction,
    pub right: ClickAction,
    pub middle: ClickAction,
}

impl Default for MouseConfig {
    fn default() -> Self {
        MouseConfig {
            left: ClickAction::Focus,
            right: ClickAction::Close,
            middle: ClickAction::None,
        }
    }
}

/// Rule deciding which documents belong to a group.
///
/// A document matches when its extension is listed or its path contains
/// one of the substrings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct GroupMatcher {
    pub extensions: Vec<String>,
    pub path_contains: Vec<String>,
}

impl GroupMatcher {
    /// Returns true if `path` belongs to the group.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let extension_match = path
            .extension()
            .map(|ext| ext.to_string_lossy())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| *wanted == ext));
        let path_text = path.to_string_lossy();
        extension_match
            || self
                .path_contains
                .iter()
                .any(|needle| path_text.contains(needle.as_str()))
    }
}

/// A named group of documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupConfig {
    pub name: String,
    #[serde(default)]
    pub matcher: GroupMatcher,
    /// Lower priorities render first
    #[serde(default)]
    pub priority: u32,
    /// Start collapsed
    #[serde(default)]
    pub hidden: bool,
}

/// All buffer line options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BufferlineConfig {
    pub mode: Mode,
    pub numbers: Numbers,
    /// Names longer than this are cut with `…`; 0 disables the limit
    pub max_name_length: usize,
    /// Text drawn after each element
    pub separator: String,
    /// Icon of the left "+N hidden" indicator
    pub left_trunc_marker: String,
    /// Icon of the right "+N hidden" indicator
    pub right_trunc_marker: String,
    /// Automatic order used while no custom order is set
    pub sort_by: SortKind,
    /// Store manual orders in session state
    pub persist_buffer_sort: bool,
    /// Moving past either end wraps to the other end
    pub move_wraps_at_ends: bool,
    pub new_document_position: NewDocumentPosition,
    /// Letters offered in pick mode, in preference order
    pub pick_alphabet: String,
    pub groups: Vec<GroupConfig>,
    pub mouse: MouseConfig,
    pub theme: BarTheme,
}

impl Default for BufferlineConfig {
    fn default() -> Self {
        BufferlineConfig {
            mode: Mode::Buffers,
            numbers: Numbers::None,
            max_name_length: 18,
            separator: "|".to_string(),
            left_trunc_marker: "«".to_string(),
            right_trunc_marker: "»".to_string(),
            sort_by: SortKind::Id,
            persist_buffer_sort: true,
            move_wraps_at_ends: false,
            new_document_position: NewDocumentPosition::End,
            pick_alphabet: DEFAULT_PICK_ALPHABET.to_string(),
            groups: Vec::new(),
            mouse: MouseConfig::default(),
            theme: BarTheme::default(),
        }
    }
}

impl BufferlineConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed input or unknown option values.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if the file cannot be read and
    /// `CoreError::Config` if it cannot be parsed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|source| CoreError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file at [`BufferlineConfig::default_path`], falling back to
    /// defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_default() -> CoreResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Location of the user configuration file.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bufbar").join("config.toml"))
    }

    /// Returns the configured group with `name`.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&GroupConfig> {
        self.groups.iter().find(|group| group.name == name)
    }
}
