//! A host that shows the bar in a real terminal.
//!
//! Documents, tab pages and session values live in a [`MemoryHost`]; this
//! type adds the screen. Every `draw` from the bar repaints the whole frame,
//! and `read_key` blocks on the terminal while a pick is running.

use bufbar_core::{
    BarTheme, CoreResult, Document, DocumentId, Host, MemoryHost, NotifyLevel, Tabpage, TabpageId,
};
use bufbar_ui::{BufferBar, ScreenLayout, StatusLine, KEY_HINTS};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use std::path::PathBuf;
use tracing::warn;

pub struct TerminalHost<B: Backend> {
    inner: MemoryHost,
    terminal: Terminal<B>,
    theme: BarTheme,
    bar: Line<'static>,
    message: Option<(NotifyLevel, String)>,
    picking: bool,
}

impl<B> TerminalHost<B>
where
    B: Backend,
    <B as Backend>::Error: std::error::Error + Send + Sync + 'static,
{
    pub fn new(inner: MemoryHost, terminal: Terminal<B>, theme: BarTheme) -> Self {
        TerminalHost {
            inner,
            terminal,
            theme,
            bar: Line::default(),
            message: None,
            picking: false,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Tells the document model how wide the bar row is.
    pub fn resize(&mut self, width: u16) {
        self.inner.set_width(usize::from(width));
    }

    /// Screen regions for the current terminal size.
    pub fn layout(&self) -> color_eyre::Result<ScreenLayout> {
        let size = self.terminal.size()?;
        Ok(ScreenLayout::new(Rect::new(0, 0, size.width, size.height)))
    }

    /// Repaints bar, document view and status line.
    pub fn repaint(&mut self) -> color_eyre::Result<()> {
        let documents = self.inner.documents();
        let current = self.inner.current_document();
        let theme = &self.theme;
        let bar = &self.bar;
        let mode = if self.picking { "PICK" } else { "NORMAL" };
        let message = self
            .message
            .as_ref()
            .map_or("", |(_, text)| text.as_str());

        self.terminal.draw(|frame| {
            let layout = ScreenLayout::new(frame.area());
            frame.render_widget(BufferBar::new(bar, theme), layout.bar);
            frame.render_widget(document_view(&documents, current), layout.content);
            frame.render_widget(
                StatusLine::new(theme)
                    .mode(mode)
                    .message(message)
                    .hints(KEY_HINTS),
                layout.status,
            );
        })?;
        Ok(())
    }

    /// Handles one terminal event during a pick. Returns the outcome once a
    /// key was pressed; resizes are applied and the wait goes on.
    fn pick_event(&mut self, event: Event) -> Option<Option<char>> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Char(c) => Some(Some(c)),
                _ => Some(None),
            },
            Event::Resize(width, _) => {
                self.resize(width);
                self.repaint_or_log();
                None
            }
            _ => None,
        }
    }

    fn repaint_or_log(&mut self) {
        if let Err(err) = self.repaint() {
            warn!(%err, "repaint failed");
        }
    }
}

fn document_view(documents: &[Document], current: Option<DocumentId>) -> Paragraph<'static> {
    let lines: Vec<Line<'static>> = documents
        .iter()
        .map(|doc| {
            let marker = if current == Some(doc.id) { "> " } else { "  " };
            let text = format!("{marker}{:>3}  {}", doc.id, doc.path.display());
            if current == Some(doc.id) {
                Line::from(text).bold()
            } else {
                Line::from(text)
            }
        })
        .collect();

    Paragraph::new(lines).block(Block::default().borders(Borders::TOP).title(" documents "))
}

impl<B> Host for TerminalHost<B>
where
    B: Backend,
    <B as Backend>::Error: std::error::Error + Send + Sync + 'static,
{
    fn api_version(&self) -> (u32, u32) {
        self.inner.api_version()
    }

    fn current_document(&self) -> Option<DocumentId> {
        self.inner.current_document()
    }

    fn documents(&self) -> Vec<Document> {
        self.inner.documents()
    }

    fn tabpages(&self) -> Vec<Tabpage> {
        self.inner.tabpages()
    }

    fn current_tabpage(&self) -> Option<TabpageId> {
        self.inner.current_tabpage()
    }

    fn cwd(&self) -> PathBuf {
        self.inner.cwd()
    }

    fn available_width(&self) -> usize {
        self.inner.available_width()
    }

    fn delete_document(&mut self, id: DocumentId) -> CoreResult<()> {
        self.inner.delete_document(id)
    }

    fn close_tabpage(&mut self, id: TabpageId) -> CoreResult<()> {
        self.inner.close_tabpage(id)
    }

    fn focus_document(&mut self, id: DocumentId) -> CoreResult<()> {
        self.inner.focus_document(id)
    }

    fn focus_tabpage(&mut self, id: TabpageId) -> CoreResult<()> {
        self.inner.focus_tabpage(id)
    }

    fn session_value(&self, key: &str) -> Option<String> {
        self.inner.session_value(key)
    }

    fn set_session_value(&mut self, key: &str, value: String) {
        self.inner.set_session_value(key, value);
    }

    fn read_key(&mut self) -> Option<char> {
        self.picking = true;
        self.repaint_or_log();

        let key = loop {
            match event::read() {
                Ok(event) => {
                    if let Some(key) = self.pick_event(event) {
                        break key;
                    }
                }
                Err(err) => {
                    warn!(%err, "failed to read key");
                    break None;
                }
            }
        };

        self.picking = false;
        key
    }

    fn notify(&mut self, level: NotifyLevel, message: &str) {
        self.inner.notify(level, message);
        self.message = Some((level, message.to_string()));
    }

    fn draw(&mut self, line: &Line<'static>) {
        self.inner.draw(line);
        self.bar = line.clone();
        self.repaint_or_log();
    }
}
