use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Collapses a burst of inputs into one ranking pass.
///
/// Each new input supersedes the one before it; a pass that slept through a
/// newer input reports itself stale so its results are discarded instead of
/// overwriting fresher ones.
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Register a new input and wait out the quiet period.
    /// Returns false when a newer input arrived while waiting.
    pub async fn settle(&self) -> bool {
        let current = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == current
    }
}
