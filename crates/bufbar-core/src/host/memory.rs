//! In-memory host editor.
//!
//! [`MemoryHost`] keeps documents, tab pages and session storage in plain
//! collections. The terminal shell wraps it, and the test suites use it as
//! the editor the bar talks to.

use super::{Document, DocumentId, Host, NotifyLevel, Tabpage, TabpageId};
use crate::error::{CoreError, CoreResult};
use ratatui::text::Line;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;

/// A host editor backed by in-memory collections.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    version: (u32, u32),
    documents: Vec<Document>,
    tabpages: Vec<Tabpage>,
    current_document: Option<DocumentId>,
    current_tabpage: Option<TabpageId>,
    cwd: PathBuf,
    width: usize,
    session: HashMap<String, String>,
    keys: VecDeque<Option<char>>,
    notifications: Vec<(NotifyLevel, String)>,
    bar: Option<Line<'static>>,
    draw_count: usize,
    next_id: u64,
}

impl MemoryHost {
    /// Creates an empty host whose bar is `width` columns wide.
    #[must_use]
    pub fn new(width: usize) -> Self {
        MemoryHost {
            version: (0, 10),
            documents: Vec::new(),
            tabpages: Vec::new(),
            current_document: None,
            current_tabpage: None,
            cwd: PathBuf::from("/"),
            width,
            session: HashMap::new(),
            keys: VecDeque::new(),
            notifications: Vec::new(),
            bar: None,
            draw_count: 0,
            next_id: 1,
        }
    }

    /// Overrides the reported API version.
    #[must_use]
    pub fn with_version(mut self, major: u32, minor: u32) -> Self {
        self.version = (major, minor);
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Opens a document at `path` and returns its id.
    ///
    /// The first document opened becomes the current one.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> DocumentId {
        let id = self.next_id;
        self.add_document(Document::new(id, path));
        id
    }

    /// Adds a fully described document.
    ///
    /// Later [`MemoryHost::open`] calls allocate ids above this one.
    pub fn add_document(&mut self, document: Document) {
        self.next_id = self.next_id.max(document.id + 1);
        if self.current_document.is_none() {
            self.current_document = Some(document.id);
        }
        self.documents.push(document);
    }

    /// Adds a tab page and returns its id.
    pub fn add_tabpage(&mut self, title: impl Into<String>) -> TabpageId {
        let id = self.next_id;
        self.next_id += 1;
        let number = self.tabpages.len() + 1;
        self.tabpages.push(Tabpage::new(id, number, title));
        if self.current_tabpage.is_none() {
            self.current_tabpage = Some(id);
        }
        id
    }

    /// Returns a document by id.
    #[must_use]
    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// Returns a mutable document by id.
    pub fn document_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.iter_mut().find(|doc| doc.id == id)
    }

    /// Sets the bar width.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Queues keypresses returned by later [`Host::read_key`] calls.
    pub fn push_keys(&mut self, keys: &str) {
        self.keys.extend(keys.chars().map(Some));
    }

    /// Queues a non-character keypress (escape and friends).
    pub fn push_escape(&mut self) {
        self.keys.push_back(None);
    }

    /// Returns notifications shown so far.
    #[must_use]
    pub fn notifications(&self) -> &[(NotifyLevel, String)] {
        &self.notifications
    }

    /// Returns the most recently drawn bar.
    #[must_use]
    pub fn bar(&self) -> Option<&Line<'static>> {
        self.bar.as_ref()
    }

    /// Returns the most recently drawn bar as plain text.
    #[must_use]
    pub fn bar_text(&self) -> String {
        self.bar
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Returns how many times the bar was drawn.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Returns the ids of open documents in host order.
    #[must_use]
    pub fn document_ids(&self) -> Vec<DocumentId> {
        self.documents.iter().map(|doc| doc.id).collect()
    }
}

impl Host for MemoryHost {
    fn api_version(&self) -> (u32, u32) {
        self.version
    }

    fn current_document(&self) -> Option<DocumentId> {
        self.current_document
    }

    fn documents(&self) -> Vec<Document> {
        self.documents.clone()
    }

    fn tabpages(&self) -> Vec<Tabpage> {
        self.tabpages.clone()
    }

    fn current_tabpage(&self) -> Option<TabpageId> {
        self.current_tabpage
    }

    fn cwd(&self) -> PathBuf {
        self.cwd.clone()
    }

    fn available_width(&self) -> usize {
        self.width
    }

    fn delete_document(&mut self, id: DocumentId) -> CoreResult<()> {
        let index = self
            .documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or_else(|| CoreError::Host(format!("no document with id {id}")))?;
        self.documents.remove(index);

        if self.current_document == Some(id) {
            // Focus falls to the document that took its slot, else the new last one.
            self.current_document = self
                .documents
                .get(index)
                .or_else(|| self.documents.last())
                .map(|doc| doc.id);
        }
        Ok(())
    }

    fn close_tabpage(&mut self, id: TabpageId) -> CoreResult<()> {
        let index = self
            .tabpages
            .iter()
            .position(|tab| tab.id == id)
            .ok_or_else(|| CoreError::Host(format!("no tab page with id {id}")))?;
        self.tabpages.remove(index);
        for (number, tab) in self.tabpages.iter_mut().enumerate() {
            tab.number = number + 1;
        }

        if self.current_tabpage == Some(id) {
            self.current_tabpage = self
                .tabpages
                .get(index)
                .or_else(|| self.tabpages.last())
                .map(|tab| tab.id);
        }
        Ok(())
    }

    fn focus_document(&mut self, id: DocumentId) -> CoreResult<()> {
        if self.document(id).is_none() {
            return Err(CoreError::Host(format!("no document with id {id}")));
        }
        self.current_document = Some(id);
        Ok(())
    }

    fn focus_tabpage(&mut self, id: TabpageId) -> CoreResult<()> {
        if !self.tabpages.iter().any(|tab| tab.id == id) {
            return Err(CoreError::Host(format!("no tab page with id {id}")));
        }
        self.current_tabpage = Some(id);
        Ok(())
    }

    fn session_value(&self, key: &str) -> Option<String> {
        self.session.get(key).cloned()
    }

    fn set_session_value(&mut self, key: &str, value: String) {
        self.session.insert(key.to_string(), value);
    }

    fn read_key(&mut self) -> Option<char> {
        self.keys.pop_front().flatten()
    }

    fn notify(&mut self, level: NotifyLevel, message: &str) {
        self.notifications.push((level, message.to_string()));
    }

    fn draw(&mut self, line: &Line<'static>) {
        self.bar = Some(line.clone());
        self.draw_count += 1;
    }
}
