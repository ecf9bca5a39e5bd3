//! Host editor interface.
//!
//! The buffer line never owns documents or windows. Everything it knows
//! about the editor comes through the [`Host`] trait: which documents are
//! open, which one is focused, how wide the bar may be, and where session
//! state is stored. Commands reach back into the editor through the same
//! trait to delete documents or move focus.

mod memory;

pub use memory::MemoryHost;

use crate::error::CoreResult;
use ratatui::text::Line;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

/// Identifier the host assigns to an open document.
///
/// Ids are never reused within a session.
pub type DocumentId = u64;

/// Identifier the host assigns to a tab page.
pub type TabpageId = u64;

/// An open document as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Host document id
    pub id: DocumentId,
    /// Full path of the document
    pub path: PathBuf,
    /// Whether the document has unsaved changes
    pub modified: bool,
    /// Number of diagnostics reported for the document
    pub diagnostics: usize,
    /// Lowest tab page number the document is displayed in
    pub tab_number: Option<usize>,
}

impl Document {
    /// Creates an unmodified document with no diagnostics.
    pub fn new(id: DocumentId, path: impl Into<PathBuf>) -> Self {
        Document {
            id,
            path: path.into(),
            modified: false,
            diagnostics: 0,
            tab_number: None,
        }
    }

    /// Sets the modified flag.
    #[must_use]
    pub fn with_modified(mut self, modified: bool) -> Self {
        self.modified = modified;
        self
    }

    /// Sets the diagnostics count.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: usize) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Sets the tab page number the document is shown in.
    #[must_use]
    pub fn with_tab_number(mut self, tab_number: usize) -> Self {
        self.tab_number = Some(tab_number);
        self
    }

    /// Returns the final path component, or `[No Name]` for empty paths.
    #[must_use]
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

/// A tab page as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tabpage {
    /// Host tab page id
    pub id: TabpageId,
    /// One-based tab page number
    pub number: usize,
    /// Title shown in the bar (usually the focused document's name)
    pub title: String,
}

impl Tabpage {
    pub fn new(id: TabpageId, number: usize, title: impl Into<String>) -> Self {
        Tabpage {
            id,
            number,
            title: title.into(),
        }
    }
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

/// The editor the buffer line lives in.
///
/// All calls happen on the host's single event-loop thread. The only call
/// allowed to block is [`Host::read_key`], which waits for one keypress
/// while the bar is in pick mode.
pub trait Host {
    /// Returns the host API version as `(major, minor)`.
    fn api_version(&self) -> (u32, u32);

    /// Returns the focused document, if any.
    fn current_document(&self) -> Option<DocumentId>;

    /// Returns the listed documents in host order.
    fn documents(&self) -> Vec<Document>;

    /// Returns the tab pages in host order.
    fn tabpages(&self) -> Vec<Tabpage>;

    /// Returns the focused tab page, if any.
    fn current_tabpage(&self) -> Option<TabpageId>;

    /// Returns the working directory used for relative sorting.
    fn cwd(&self) -> PathBuf;

    /// Returns the number of columns available to the bar.
    fn available_width(&self) -> usize;

    /// Measures the display width of `text` in columns.
    ///
    /// The default uses Unicode East Asian width rules, which is what
    /// terminal hosts render with.
    fn text_width(&self, text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }

    /// Deletes a document regardless of unsaved changes.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Host` if the document cannot be deleted.
    fn delete_document(&mut self, id: DocumentId) -> CoreResult<()>;

    /// Closes a tab page.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Host` if the tab page cannot be closed.
    fn close_tabpage(&mut self, id: TabpageId) -> CoreResult<()>;

    /// Moves focus to a document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Host` if the document does not exist.
    fn focus_document(&mut self, id: DocumentId) -> CoreResult<()>;

    /// Moves focus to a tab page.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Host` if the tab page does not exist.
    fn focus_tabpage(&mut self, id: TabpageId) -> CoreResult<()>;

    /// Reads a value from session-scoped storage.
    fn session_value(&self, key: &str) -> Option<String>;

    /// Writes a value to session-scoped storage.
    fn set_session_value(&mut self, key: &str, value: String);

    /// Blocks until the user presses one key.
    ///
    /// Returns `None` when the key is not a printable character (escape,
    /// arrows, ...).
    fn read_key(&mut self) -> Option<char>;

    /// Shows a non-fatal message to the user.
    fn notify(&mut self, level: NotifyLevel, message: &str);

    /// Replaces the displayed bar with a freshly rendered line.
    fn draw(&mut self, line: &Line<'static>);
}

/// Returns the final path component as a string, `[No Name]` when absent.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "[No Name]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = Document::new(3, "/src/main.rs")
            .with_modified(true)
            .with_diagnostics(2)
            .with_tab_number(1);
        assert_eq!(doc.id, 3);
        assert!(doc.modified);
        assert_eq!(doc.diagnostics, 2);
        assert_eq!(doc.tab_number, Some(1));
    }

    #[test]
    fn test_document_file_name() {
        assert_eq!(Document::new(1, "/src/main.rs").file_name(), "main.rs");
        assert_eq!(Document::new(2, "").file_name(), "[No Name]");
    }

    #[test]
    fn test_host_is_object_safe() {
        fn accept_host(_host: &dyn Host) {}
        let host = MemoryHost::new(80);
        accept_host(&host);
    }

    #[test]
    fn test_default_text_width_counts_wide_chars() {
        let host = MemoryHost::new(80);
        assert_eq!(host.text_width("abc"), 3);
        assert_eq!(host.text_width("日本"), 4);
        assert_eq!(host.text_width("●"), 1);
    }
}
