//! The single "current execution" record.
//!
//! Each invocation overwrites the record; nothing is queued. Every write
//! is announced on the [`EventBus`] after it lands.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::events::{Event, EventBus};

/// Where an execution currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Failed,
    Finished,
}

/// The most recent execution: which command, and how it is going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Execution {
    pub command: String,
    pub status: ExecutionStatus,
}

/// Holds the current [`Execution`]. Last write wins.
pub struct ExecutionStore {
    current: Mutex<Option<Execution>>,
    events: Arc<EventBus>,
}

impl ExecutionStore {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            current: Mutex::new(None),
            events,
        }
    }

    /// Replace the whole record.
    pub fn set_execution(&self, command: &str, status: ExecutionStatus) {
        *self.lock() = Some(Execution {
            command: command.to_string(),
            status,
        });
        debug!(command, ?status, "execution set");
        self.events.emit(Event::ExecutionChanged {
            command: command.to_string(),
            status,
        });
    }

    /// Change only the status, keeping the command of the existing record.
    /// Without a record this is a no-op.
    pub fn update_execution_status(&self, status: ExecutionStatus) {
        let command = {
            let mut current = self.lock();
            match current.as_mut() {
                Some(execution) => {
                    execution.status = status;
                    execution.command.clone()
                }
                None => {
                    warn!(?status, "status update with no execution recorded");
                    return;
                }
            }
        };
        debug!(%command, ?status, "execution status updated");
        self.events.emit(Event::ExecutionChanged { command, status });
    }

    /// Snapshot of the current record.
    pub fn current(&self) -> Option<Execution> {
        self.lock().clone()
    }

    /// Status of the current record, if any.
    pub fn status(&self) -> Option<ExecutionStatus> {
        self.lock().as_ref().map(|e| e.status)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Execution>> {
        // The record is plain data; a poisoned lock still holds a valid value.
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}
