//! Host events that drive highlighting.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! Rather than registering callbacks that hold references into the
//! highlighter, the host emits plain values on a `tokio::sync::broadcast`
//! channel. The highlighter pulls them one at a time, so handlers never run
//! concurrently and no locking is needed.

use tokio::sync::broadcast;

use crate::command::Command;
use crate::document::DocumentId;

/// Events the host delivers to the highlighter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Focus moved to another document, or to none
    ActiveDocumentChanged(Option<DocumentId>),
    /// A document's text changed
    DocumentChanged(DocumentId),
    /// Host settings changed
    ConfigurationChanged {
        /// Whether the word map path setting is among the changes
        affects_config_path: bool,
    },
    /// The user invoked a command
    Command(Command),
    /// The host is shutting down
    Shutdown,
}

/// Event bus for broadcasting host events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<HostEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    pub fn new() -> Self {
        // Capacity of 256 events in the buffer
        let (sender, _) = broadcast::channel(256);
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: HostEvent) {
        // Ignore error if no receivers (not a problem)
        let _ = self.sender.send(event);
    }

    /// Subscribes to events.
    ///
    /// Returns a receiver that will get all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<HostEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper for receiving events in order.
///
/// ## Example
///
/// ```ignore
/// let mut events = EventHandler::new(bus.subscribe());
/// while let Some(event) = events.next().await {
///     if highlighter.handle_event(&event, &mut host).is_break() {
///         break;
///     }
/// }
/// ```
pub struct EventHandler {
    receiver: broadcast::Receiver<HostEvent>,
}

impl EventHandler {
    /// Creates a new event handler.
    pub fn new(receiver: broadcast::Receiver<HostEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next event.
    pub async fn next(&mut self) -> Option<HostEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                    // Continue loop to try again
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
