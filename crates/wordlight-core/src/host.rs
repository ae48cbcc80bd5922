//! What the highlighter needs from its host.
//!
//! The host owns documents, settings, the UI and its style resources. The
//! highlighter only sees them through these traits, so the same controller
//! runs inside an editor, in the terminal binary, or against a test double.

use std::path::PathBuf;

use crate::document::DocumentId;
use crate::highlight::DocumentSource;
use crate::style::Renderer;

/// User-visible notifications.
pub trait Notifier {
    /// Informational message.
    fn info(&mut self, message: &str);

    /// Error message.
    fn error(&mut self, message: &str);
}

/// The host environment a [`WordHighlighter`](crate::WordHighlighter) runs in.
pub trait Host: Renderer + Notifier {
    type Document: DocumentSource;

    /// Current value of the word map path setting.
    fn config_path(&self) -> Option<PathBuf>;

    /// The document that has focus, if any.
    fn active_document(&self) -> Option<(DocumentId, &Self::Document)>;
}
