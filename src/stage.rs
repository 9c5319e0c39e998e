//! Process-wide progress through the authentication narrative.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::{Event, EventBus};

/// How far the website has been unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Stage {
    None = 0,
    KeyValidated = 1,
    PartialAccess = 2,
    FullAccess = 3,
}

impl Stage {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Values above 3 saturate to full access.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::None,
            1 => Self::KeyValidated,
            2 => Self::PartialAccess,
            _ => Self::FullAccess,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::KeyValidated => "key validated",
            Self::PartialAccess => "partial access",
            Self::FullAccess => "full access",
        }
    }
}

/// Holds the current [`Stage`] and announces every write.
pub struct StageStore {
    value: AtomicU8,
    events: Arc<EventBus>,
}

impl StageStore {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            value: AtomicU8::new(Stage::None.as_u8()),
            events,
        }
    }

    pub fn get(&self) -> Stage {
        Stage::from_u8(self.value.load(Ordering::SeqCst))
    }

    pub fn set(&self, stage: Stage) {
        self.value.store(stage.as_u8(), Ordering::SeqCst);
        debug!(stage = stage.label(), "stage set");
        self.events.emit(Event::StageChanged { stage });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_none() {
        let store = StageStore::new(Arc::new(EventBus::default()));
        assert_eq!(store.get(), Stage::None);
    }

    #[test]
    fn set_and_get() {
        let store = StageStore::new(Arc::new(EventBus::default()));
        store.set(Stage::PartialAccess);
        assert_eq!(store.get(), Stage::PartialAccess);
        store.set(Stage::None);
        assert_eq!(store.get(), Stage::None);
    }

    #[test]
    fn numeric_values_match_narrative() {
        assert_eq!(Stage::None.as_u8(), 0);
        assert_eq!(Stage::KeyValidated.as_u8(), 1);
        assert_eq!(Stage::PartialAccess.as_u8(), 2);
        assert_eq!(Stage::FullAccess.as_u8(), 3);
        assert_eq!(Stage::from_u8(2), Stage::PartialAccess);
        assert_eq!(Stage::from_u8(9), Stage::FullAccess);
    }

    #[tokio::test]
    async fn set_notifies_even_when_unchanged() {
        let bus = Arc::new(EventBus::default());
        let store = StageStore::new(Arc::clone(&bus));
        let mut rx = bus.subscribe();

        store.set(Stage::None);

        assert_eq!(
            rx.recv().await.unwrap(),
            Event::StageChanged { stage: Stage::None }
        );
    }
}
