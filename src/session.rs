//! Shared state handed to every execution.
//!
//! Nothing here is global: build one [`Session`] per shell (or per test)
//! and pass it around behind an `Arc`.

use std::sync::Arc;

use crate::clock::Clock;
use crate::events::EventBus;
use crate::lines::{LineRenderer, LineTracker};
use crate::programs::ProgramManager;
use crate::stage::StageStore;
use crate::status::ExecutionStore;

pub struct Session {
    pub lines: LineTracker,
    pub executions: ExecutionStore,
    pub stage: StageStore,
    pub programs: Arc<dyn ProgramManager>,
    pub renderer: Arc<dyn LineRenderer>,
    pub clock: Arc<dyn Clock>,
    pub events: Arc<EventBus>,
}

impl Session {
    pub fn new(
        renderer: Arc<dyn LineRenderer>,
        programs: Arc<dyn ProgramManager>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let events = Arc::new(EventBus::default());
        Self {
            lines: LineTracker::new(Arc::clone(&events)),
            executions: ExecutionStore::new(Arc::clone(&events)),
            stage: StageStore::new(Arc::clone(&events)),
            programs,
            renderer,
            clock,
            events,
        }
    }
}
