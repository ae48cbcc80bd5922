//! Shared test host.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use wordlight_buffer::PositionRange;
use wordlight_core::{
    Document, DocumentId, DocumentManager, Host, Notifier, RenderStyle, Renderer, StyleHandle,
};

/// What a [`MockHost`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Error(String),
}

/// In-memory host that records every renderer and notifier call.
#[derive(Default)]
pub struct MockHost {
    pub config_path: Option<PathBuf>,
    pub documents: DocumentManager,
    pub styles: HashMap<u64, RenderStyle>,
    pub released: HashSet<u64>,
    pub created: usize,
    /// Latest ranges per style id
    pub highlights: HashMap<u64, Vec<PositionRange>>,
    pub render_calls: usize,
    pub notifications: Vec<Notification>,
    next_id: u64,
}

impl MockHost {
    pub fn with_config(path: impl AsRef<Path>) -> Self {
        Self {
            config_path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    pub fn open(&mut self, text: &str) -> DocumentId {
        self.documents.add(Document::untitled(text))
    }

    pub fn edit(&mut self, id: DocumentId, text: &str) {
        self.documents
            .get_mut(id)
            .expect("document is open")
            .buffer_mut()
            .set_text(text);
    }

    pub fn live_styles(&self) -> usize {
        self.styles.len()
    }

    /// Ranges currently shown for `color`, across all live styles.
    pub fn highlights_for(&self, color: &str) -> Vec<PositionRange> {
        let mut ranges: Vec<_> = self
            .styles
            .iter()
            .filter(|(_, style)| style.background_color == color)
            .flat_map(|(id, _)| self.highlights.get(id).cloned().unwrap_or_default())
            .collect();
        ranges.sort_by_key(|r| (r.start, r.end));
        ranges
    }

    pub fn last_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn clear_counters(&mut self) {
        self.render_calls = 0;
        self.notifications.clear();
    }
}

impl Renderer for MockHost {
    fn create_style(&mut self, style: &RenderStyle) -> StyleHandle {
        self.next_id += 1;
        self.created += 1;
        self.styles.insert(self.next_id, style.clone());
        StyleHandle::new(self.next_id)
    }

    fn set_highlights(&mut self, handle: &StyleHandle, ranges: &[PositionRange]) {
        assert!(
            self.styles.contains_key(&handle.id()),
            "render with dead {handle}"
        );
        self.render_calls += 1;
        self.highlights.insert(handle.id(), ranges.to_vec());
    }

    fn release_style(&mut self, handle: StyleHandle) {
        assert!(self.styles.remove(&handle.id()).is_some(), "double release of {handle}");
        self.highlights.remove(&handle.id());
        self.released.insert(handle.id());
    }
}

impl Notifier for MockHost {
    fn info(&mut self, message: &str) {
        self.notifications.push(Notification::Info(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.notifications.push(Notification::Error(message.to_string()));
    }
}

impl Host for MockHost {
    type Document = Document;

    fn config_path(&self) -> Option<PathBuf> {
        self.config_path.clone()
    }

    fn active_document(&self) -> Option<(DocumentId, &Document)> {
        self.documents.active().map(|doc| (doc.id(), doc))
    }
}

/// Writes `content` to `words.json` in `dir`.
pub fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("words.json");
    std::fs::write(&path, content).unwrap();
    path
}
