//! A host that renders highlights as text lines.
//!
//! Each highlighted range is printed as
//! `path:line:col-line:col<TAB>text<TAB>color`, with 1-indexed positions.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use wordlight_buffer::PositionRange;
use wordlight_core::{
    Document, DocumentId, DocumentManager, Host, Notifier, RenderStyle, Renderer, Settings,
    StyleHandle,
};

pub struct TerminalHost<W: Write> {
    settings: Settings,
    /// `--config` wins over the settings file
    config_override: Option<PathBuf>,
    documents: DocumentManager,
    styles: HashMap<u64, RenderStyle>,
    next_style: u64,
    out: W,
}

impl<W: Write> TerminalHost<W> {
    pub fn new(settings: Settings, config_override: Option<PathBuf>, out: W) -> Self {
        Self {
            settings,
            config_override,
            documents: DocumentManager::new(),
            styles: HashMap::new(),
            next_style: 0,
            out,
        }
    }

    /// Adds a document and gives it focus.
    pub fn open(&mut self, doc: Document) -> DocumentId {
        self.documents.add(doc)
    }

    /// Gives focus to a document. Returns true if focus moved.
    pub fn focus(&mut self, id: DocumentId) -> bool {
        self.documents.set_active(id)
    }

    pub fn document_ids(&self) -> Vec<DocumentId> {
        self.documents.order().to_vec()
    }

    pub fn document_path(&self, id: DocumentId) -> Option<&Path> {
        self.documents.get(id).and_then(Document::path)
    }

    /// Re-reads a document from disk.
    pub fn reload_document(&mut self, id: DocumentId) -> anyhow::Result<()> {
        if let Some(doc) = self.documents.get_mut(id) {
            doc.buffer_mut().reload()?;
        }
        Ok(())
    }

    /// Replaces the settings. Returns true if the word map path changed.
    pub fn set_settings(&mut self, settings: Settings) -> bool {
        let affects =
            self.config_override.is_none() && self.settings.affects_config_path(&settings);
        self.settings = settings;
        affects
    }

    /// Number of styles created and not yet released.
    pub fn live_styles(&self) -> usize {
        self.styles.len()
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalHost<W> {
    fn create_style(&mut self, style: &RenderStyle) -> StyleHandle {
        self.next_style += 1;
        self.styles.insert(self.next_style, style.clone());
        StyleHandle::new(self.next_style)
    }

    fn set_highlights(&mut self, handle: &StyleHandle, ranges: &[PositionRange]) {
        let Some(style) = self.styles.get(&handle.id()) else {
            tracing::warn!(%handle, "Highlight request for unknown style");
            return;
        };
        let Some(doc) = self.documents.active() else {
            return;
        };

        let name = doc.display_name();
        for range in ranges {
            let text = matched_text(doc, range).unwrap_or_default();
            if let Err(err) = writeln!(
                self.out,
                "{name}:{range}\t{text}\t{}",
                style.background_color
            ) {
                tracing::warn!("Cannot write highlight: {err}");
                return;
            }
        }
    }

    fn release_style(&mut self, handle: StyleHandle) {
        if self.styles.remove(&handle.id()).is_none() {
            tracing::warn!(%handle, "Released unknown style");
        }
    }
}

impl<W: Write> Notifier for TerminalHost<W> {
    fn info(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

impl<W: Write> Host for TerminalHost<W> {
    type Document = Document;

    fn config_path(&self) -> Option<PathBuf> {
        self.config_override
            .clone()
            .or_else(|| self.settings.config_path().map(Path::to_path_buf))
    }

    fn active_document(&self) -> Option<(DocumentId, &Document)> {
        self.documents.active().map(|doc| (doc.id(), doc))
    }
}

fn matched_text(doc: &Document, range: &PositionRange) -> Option<String> {
    let buffer = doc.buffer();
    let start = buffer.position_to_char_idx(range.start).ok()?;
    let end = buffer.position_to_char_idx(range.end).ok()?;
    buffer.slice(start..end).ok().map(|s| s.into_owned())
}
