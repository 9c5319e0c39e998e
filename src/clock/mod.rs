//! Suspension points for command handlers.
//!
//! Handlers never call `tokio::time::sleep` directly; they go through a
//! [`Clock`] so tests can fast-forward with [`mock::MockClock`].

pub mod mock;

use std::time::Duration;

use async_trait::async_trait;

/// Something that can suspend a handler for a while.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real time, scaled by a pace factor. A pace of `0.0` never waits.
pub struct TokioClock {
    pace: f64,
}

impl TokioClock {
    pub fn new(pace: f64) -> Self {
        Self { pace }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        let scaled = duration.mul_f64(self.pace);
        if scaled.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(scaled).await;
        }
    }
}
