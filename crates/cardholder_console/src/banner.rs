//! Self-clearing status messages.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// How long a transient banner stays visible
pub const BANNER_TTL: Duration = Duration::from_millis(3000);

/// A message slot that clears itself after a fixed delay.
///
/// Each `show` spawns its own timer and pending timers are never
/// cancelled: re-showing before expiry leaves the earlier timer armed, so
/// the slot clears [`BANNER_TTL`] after the *first* show. Must be used
/// from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct TransientBanner {
    slot: Arc<Mutex<Option<String>>>,
    ttl: Duration,
}

impl Default for TransientBanner {
    fn default() -> Self {
        Self::new(BANNER_TTL)
    }
}

impl TransientBanner {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            ttl,
        }
    }

    /// Display `message` and arm a timer that clears the slot
    pub fn show(&self, message: impl Into<String>) {
        *self.lock() = Some(message.into());

        let slot = Arc::clone(&self.slot);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            *slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        });
    }

    /// Message currently on display
    pub fn current(&self) -> Option<String> {
        self.lock().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
