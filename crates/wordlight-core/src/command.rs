//! Commands the highlighter contributes to the host.
//!
//! Hosts identify commands by string id (for palettes and key bindings);
//! inside the crate they are an enum so dispatch is exhaustive.

use serde::{Deserialize, Serialize};

/// Highlighter commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Command {
    /// Re-read the word map and refresh the active document
    Reload,
}

impl Command {
    /// Stable identifier used by the host.
    pub fn id(&self) -> &'static str {
        match self {
            Command::Reload => "word-highlighter.reload",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
