//! Decoupled event bus for observing the shell.
//!
//! Every store write (execution status, line tracker, workflow stage) is
//! announced via [`EventBus::emit`]. Hosts subscribe via
//! [`EventBus::subscribe`]. Built on [`tokio::sync::broadcast`] so
//! multiple listeners can react independently.

use serde::Serialize;
use tokio::sync::broadcast;

use crate::lines::LineIndex;
use crate::stage::Stage;
use crate::status::ExecutionStatus;

/// Events that flow out of the shell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The current execution record was written.
    ExecutionChanged {
        command: String,
        status: ExecutionStatus,
    },
    /// A new line pair became active.
    LineAdvanced { line: LineIndex },
    /// The workflow stage was set (even to the same value).
    StageChanged { stage: Stage },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
