use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::Clock;

type Hook = Box<dyn FnOnce() + Send>;

/// A clock for tests. Never waits; records every requested duration and
/// runs the hook registered for the n-th suspension (0-based) while the
/// caller is suspended.
#[derive(Default)]
pub struct MockClock {
    sleeps: Mutex<Vec<Duration>>,
    hooks: Mutex<HashMap<usize, Hook>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `hook` during suspension number `index`.
    pub fn on_sleep(self, index: usize, hook: impl FnOnce() + Send + 'static) -> Self {
        self.hooks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(index, Box::new(hook));
        self
    }

    /// Every duration requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Clock for MockClock {
    async fn sleep(&self, duration: Duration) {
        let index = {
            let mut sleeps = self.sleeps.lock().unwrap_or_else(|e| e.into_inner());
            sleeps.push(duration);
            sleeps.len() - 1
        };
        let hook = self
            .hooks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&index);
        if let Some(hook) = hook {
            hook();
        }
        tokio::task::yield_now().await;
    }
}
