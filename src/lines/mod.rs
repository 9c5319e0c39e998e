//! Line pairs: one input element plus one output element per prompt cycle.
//!
//! The [`LineTracker`] says which pair is active. The host owns the actual
//! elements behind a [`LineRenderer`]; the engine only looks them up by
//! [`LineIndex`] and never creates or destroys them.

pub mod terminal;
pub mod transcript;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::{Event, EventBus};

/// Identifies one input/output line pair. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineIndex(u64);

impl LineIndex {
    pub const fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Element id of the input half, e.g. `input:3`.
    pub fn input_id(self) -> String {
        format!("input:{}", self.0)
    }

    /// Element id of the output half, e.g. `output:3`.
    pub fn output_id(self) -> String {
        format!("output:{}", self.0)
    }
}

impl fmt::Display for LineIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic counter of the active line pair.
pub struct LineTracker {
    current: AtomicU64,
    events: Arc<EventBus>,
}

impl LineTracker {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            current: AtomicU64::new(0),
            events,
        }
    }

    /// The active line pair.
    pub fn current(&self) -> LineIndex {
        LineIndex(self.current.load(Ordering::SeqCst))
    }

    /// Make the next line pair active and return it.
    pub fn advance(&self) -> LineIndex {
        let line = LineIndex(self.current.fetch_add(1, Ordering::SeqCst) + 1);
        debug!(%line, "line advanced");
        self.events.emit(Event::LineAdvanced { line });
        line
    }
}

/// Host-side access to line elements. Every method reports whether the
/// targeted element exists; a missing element is never an error.
pub trait LineRenderer: Send + Sync {
    /// Append text to the output element of `line`.
    fn append_output(&self, line: LineIndex, text: &str) -> bool;

    /// Set or clear the read-only flag of the input element of `line`.
    fn set_input_disabled(&self, line: LineIndex, disabled: bool) -> bool;

    /// Move focus to the input element of `line`.
    fn focus_input(&self, line: LineIndex) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids() {
        let line = LineIndex::new(7);
        assert_eq!(line.input_id(), "input:7");
        assert_eq!(line.output_id(), "output:7");
        assert_eq!(line.to_string(), "7");
    }

    #[test]
    fn tracker_starts_at_zero() {
        let tracker = LineTracker::new(Arc::new(EventBus::default()));
        assert_eq!(tracker.current(), LineIndex::new(0));
    }

    #[test]
    fn advance_is_monotonic() {
        let tracker = LineTracker::new(Arc::new(EventBus::default()));
        assert_eq!(tracker.advance(), LineIndex::new(1));
        assert_eq!(tracker.advance(), LineIndex::new(2));
        assert_eq!(tracker.current(), LineIndex::new(2));
    }

    #[tokio::test]
    async fn advance_emits_event() {
        let bus = Arc::new(EventBus::default());
        let tracker = LineTracker::new(Arc::clone(&bus));
        let mut rx = bus.subscribe();

        tracker.advance();

        assert_eq!(
            rx.recv().await.unwrap(),
            Event::LineAdvanced {
                line: LineIndex::new(1)
            }
        );
    }
}
