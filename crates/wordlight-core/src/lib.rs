//! # Wordlight Core
//!
//! Highlights configured words in a document, each in its own color.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     WordHighlighter                     │
//! │  ┌────────────────────┐    ┌─────────────────────────┐  │
//! │  │    ConfigStore     │    │  highlight::recompute   │  │
//! │  │  mapping + styles  │───►│ (text, words) → ranges  │  │
//! │  └────────────────────┘    └─────────────────────────┘  │
//! └───────────▲─────────────────────────────┬───────────────┘
//!             │ HostEvent                   │ Renderer / Notifier
//!       ┌─────┴─────────────────────────────▼─────┐
//!       │                  Host                   │
//!       └─────────────────────────────────────────┘
//! ```
//!
//! The matching core is a pure function of text and mapping
//! ([`highlight::compute`]); everything else manages when it runs and where
//! its output goes.

pub mod command;
pub mod controller;
pub mod document;
pub mod event;
pub mod highlight;
pub mod host;
pub mod mapping;
pub mod matcher;
pub mod settings;
pub mod store;
pub mod style;

pub use command::Command;
pub use controller::WordHighlighter;
pub use document::{Document, DocumentId, DocumentManager};
pub use event::{EventBus, EventHandler, HostEvent};
pub use highlight::{DocumentSource, HighlightRequest, RenderRequest};
pub use host::{Host, Notifier};
pub use mapping::WordColorMapping;
pub use matcher::{find_occurrences, WordMatcher};
pub use settings::{Settings, SettingsError};
pub use store::{ConfigStore, StyledWord};
pub use style::{OverviewRulerLane, RenderStyle, Renderer, StyleHandle};

use std::path::{Path, PathBuf};

/// Result type for highlighter operations
pub type HighlightResult<T> = Result<T, HighlightError>;

/// Errors raised while loading the word map.
///
/// Matching itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("Configuration path not set")]
    ConfigPathMissing,

    #[error("Cannot read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON{}: {source}", location(.path))]
    ConfigParse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration{}: {reason}", location(.path))]
    InvalidShape {
        path: Option<PathBuf>,
        reason: String,
    },
}

impl HighlightError {
    /// True for malformed JSON and for JSON of the wrong shape.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ConfigParse { .. } | Self::InvalidShape { .. })
    }

    /// Attaches the file a parse error came from.
    pub(crate) fn with_path(self, file: &Path) -> Self {
        match self {
            Self::ConfigParse { source, .. } => Self::ConfigParse {
                path: Some(file.to_path_buf()),
                source,
            },
            Self::InvalidShape { reason, .. } => Self::InvalidShape {
                path: Some(file.to_path_buf()),
                reason,
            },
            other => other,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HighlightError::ConfigRead {
            path: PathBuf::from("/nope/words.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Cannot read /nope/words.json: not found");
        assert!(!err.is_parse_error());

        let err = HighlightError::InvalidShape {
            path: None,
            reason: "expected a JSON object".into(),
        };
        assert_eq!(err.to_string(), "Invalid configuration: expected a JSON object");
        let err = err.with_path(Path::new("w.json"));
        assert_eq!(err.to_string(), "Invalid configuration in w.json: expected a JSON object");
    }
}
