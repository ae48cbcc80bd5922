//! The highlighter as the host sees it.
//!
//! ## Learning: The Facade Pattern
//!
//! `WordHighlighter` ties the store, the matcher and the host together.
//! Hosts only construct it, feed it events and tear it down.
//!
//! ## Lifecycle
//!
//! ```text
//! activate ──► handle_event ... handle_event ──► deactivate
//!   │               │                               │
//!   load config     reload / recompute              release every style
//! ```

use std::ops::ControlFlow;

use crate::command::Command;
use crate::event::HostEvent;
use crate::highlight;
use crate::host::Host;
use crate::mapping::WordColorMapping;
use crate::store::ConfigStore;
use crate::{HighlightError, HighlightResult};

const NOTIFY_PREFIX: &str = "Word Highlighter";

/// Highlights configured words in the host's active document.
///
/// Owns the [`ConfigStore`]; there is no global state. Dropping a
/// highlighter without calling [`deactivate`](Self::deactivate) leaks its
/// host styles and logs a warning.
#[derive(Debug)]
pub struct WordHighlighter {
    store: ConfigStore,
}

impl WordHighlighter {
    /// Loads the configured word map and highlights the active document.
    ///
    /// A missing or broken configuration is reported to the user; the
    /// highlighter is still returned and stays idle until a reload succeeds.
    pub fn activate<H: Host>(host: &mut H) -> Self {
        tracing::info!("Word highlighter activated");
        let mut highlighter = Self {
            store: ConfigStore::new(),
        };
        let _ = highlighter.load_configuration(host);
        highlighter.update_decorations(host);
        highlighter
    }

    /// Releases every host style. Highlights disappear with them.
    pub fn deactivate<H: Host>(mut self, host: &mut H) {
        let released = self.store.clear(host);
        tracing::info!(released, "Word highlighter deactivated");
    }

    /// Reads the word map from the configured path.
    ///
    /// Outcomes are reported through the host's notifier. Without a
    /// configured path any previous mapping is dropped; a failed read or
    /// parse keeps it.
    pub fn load_configuration<H: Host>(&mut self, host: &mut H) -> HighlightResult<usize> {
        let Some(path) = host.config_path() else {
            self.store.clear(host);
            tracing::info!("No highlight configuration path set");
            host.info(&format!("{NOTIFY_PREFIX}: Configuration path not set"));
            return Err(HighlightError::ConfigPathMissing);
        };

        match self.store.reload(&path, host).map(|_| ()) {
            Ok(()) => {
                // Words whose matcher could not be built have no style.
                let count = self.store.styles().len();
                host.info(&format!(
                    "{NOTIFY_PREFIX}: Loaded {count} word(s) from configuration"
                ));
                Ok(count)
            }
            Err(err) => {
                tracing::error!(
                    path = %path.display(),
                    "Failed to load highlight configuration: {err}"
                );
                host.error(&format!(
                    "{NOTIFY_PREFIX}: Error loading configuration - {err}"
                ));
                Err(err)
            }
        }
    }

    /// Rescans the active document and renders the result.
    ///
    /// Returns the number of highlighted ranges. Without a mapping or an
    /// active document nothing happens.
    pub fn update_decorations<H: Host>(&self, host: &mut H) -> usize {
        let requests = match host.active_document() {
            Some((id, document)) => {
                tracing::trace!(%id, "Recomputing highlights");
                highlight::recompute(&self.store, document)
            }
            None => return 0,
        };
        highlight::render(&requests, host)
    }

    /// Runs a highlighter command.
    pub fn execute<H: Host>(&mut self, command: Command, host: &mut H) {
        tracing::debug!(%command, "Executing command");
        match command {
            Command::Reload => {
                // Failures were already reported to the user.
                let _ = self.load_configuration(host);
                self.update_decorations(host);
            }
        }
    }

    /// Reacts to one host event.
    ///
    /// Returns `Break` once the host asks to shut down.
    pub fn handle_event<H: Host>(&mut self, event: &HostEvent, host: &mut H) -> ControlFlow<()> {
        match event {
            HostEvent::ActiveDocumentChanged(Some(_)) => {
                self.update_decorations(host);
            }
            HostEvent::ActiveDocumentChanged(None) => {}
            HostEvent::DocumentChanged(id) => {
                let is_active = host.active_document().is_some_and(|(active, _)| active == *id);
                if is_active {
                    self.update_decorations(host);
                }
            }
            HostEvent::ConfigurationChanged {
                affects_config_path: true,
            } => {
                let _ = self.load_configuration(host);
                self.update_decorations(host);
            }
            HostEvent::ConfigurationChanged { .. } => {}
            HostEvent::Command(command) => self.execute(*command, host),
            HostEvent::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// The mapping currently in effect.
    pub fn mapping(&self) -> &WordColorMapping {
        self.store.mapping()
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }
}
