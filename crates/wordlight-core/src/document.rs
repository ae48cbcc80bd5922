//! Open documents on the host side.
//!
//! ## Learning: Type Aliases and Newtypes
//!
//! `DocumentId` is a newtype wrapper around `Uuid`: it can't be confused
//! with any other identifier, and the underlying type can change without
//! breaking callers.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;
use wordlight_buffer::{BufferResult, Position, TextBuffer};

use crate::highlight::DocumentSource;

/// Unique identifier for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Creates a new unique document ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document: a text buffer with identity and a display name.
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    buffer: TextBuffer,
    path: Option<PathBuf>,
    name: String,
}

impl Document {
    /// Creates an untitled document holding `text`.
    pub fn untitled(text: &str) -> Self {
        Self {
            id: DocumentId::new(),
            buffer: TextBuffer::from(text),
            path: None,
            name: "Untitled".to_string(),
        }
    }

    /// Opens a document from a file.
    pub fn from_file(path: impl AsRef<Path>) -> BufferResult<Self> {
        let path = path.as_ref();
        let buffer = TextBuffer::from_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            id: DocumentId::new(),
            buffer,
            path: Some(path.to_path_buf()),
            name,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Path for display, or the name for untitled documents.
    pub fn display_name(&self) -> Cow<'_, str> {
        match &self.path {
            Some(path) => path.to_string_lossy(),
            None => Cow::Borrowed(&self.name),
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffer
    }
}

impl DocumentSource for Document {
    fn text(&self) -> Cow<'_, str> {
        self.buffer.text()
    }

    fn position_at(&self, offset: usize) -> Position {
        self.buffer.position_at(offset)
    }
}

/// Manages the open documents and which one is active.
#[derive(Debug, Default)]
pub struct DocumentManager {
    /// All open documents
    documents: HashMap<DocumentId, Document>,

    /// Open order
    order: Vec<DocumentId>,

    /// Currently active document
    active: Option<DocumentId>,
}

impl DocumentManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document and makes it active.
    pub fn add(&mut self, doc: Document) -> DocumentId {
        let id = doc.id();
        self.documents.insert(id, doc);
        self.order.push(id);
        self.active = Some(id);
        id
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn get_mut(&mut self, id: DocumentId) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    /// Returns the active document.
    pub fn active(&self) -> Option<&Document> {
        self.active.and_then(|id| self.documents.get(&id))
    }

    /// Sets the active document. Unknown ids are ignored.
    ///
    /// Returns true if the active document changed.
    pub fn set_active(&mut self, id: DocumentId) -> bool {
        if self.documents.contains_key(&id) && self.active != Some(id) {
            self.active = Some(id);
            return true;
        }
        false
    }

    /// Document ids in open order.
    pub fn order(&self) -> &[DocumentId] {
        &self.order
    }
}
