//! # Debounce Primitive
//!
//! A value that commits only after its input has been quiet for `delay`.
//!
//! ## Timeline
//! ```text
//! delay = 500ms
//!
//!   t=0      set("ab")   ──► timer A armed for t=500
//!   t=300    set("abc")  ──► timer A aborted, timer B armed for t=800
//!   t=500    get() == "a"        (A never fires, "ab" is never observed)
//!   t=800    timer B fires ──► committed = "abc", subscribers notified
//! ```
//!
//! ## Cancellation
//! Every `set` bumps a generation counter and aborts the previous timer
//! task. A timer commits only if its generation is still current, checked
//! under the same lock `set` takes, so a superseded value can never land.
//! Dropping the [`Debounced`] cancels whatever is pending.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Default quiet window for search inputs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

struct Slot {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// A debounced value.
///
/// Must be used from within a Tokio runtime: [`Debounced::set`] spawns the
/// timer task.
pub struct Debounced<T> {
    delay: Duration,
    committed: Arc<watch::Sender<T>>,
    slot: Arc<Mutex<Slot>>,
}

impl<T> Debounced<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a debounced value whose committed value starts as `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Debounced {
            delay,
            committed: Arc::new(tx),
            slot: Arc::new(Mutex::new(Slot {
                generation: 0,
                pending: None,
            })),
        }
    }

    /// Records a new input value, restarting the quiet window.
    pub fn set(&self, value: T) {
        let deadline = Instant::now() + self.delay;
        let mut slot = self.slot.lock();

        slot.generation += 1;
        let generation = slot.generation;
        if let Some(previous) = slot.pending.take() {
            previous.abort();
        }

        let committed = Arc::clone(&self.committed);
        let shared = Arc::clone(&self.slot);
        slot.pending = Some(tokio::spawn(async move {
            sleep_until(deadline).await;

            let mut slot = shared.lock();
            if slot.generation != generation {
                return;
            }
            slot.pending = None;
            committed.send_replace(value);
            trace!(generation, "Debounced value committed");
        }));
    }

    /// Current committed value.
    pub fn get(&self) -> T {
        self.committed.borrow().clone()
    }

    /// Receiver notified on every commit.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.committed.subscribe()
    }

    /// Whether an input is waiting for its quiet window to elapse.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }

    /// Drops any pending input without committing it.
    pub fn cancel(&self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        if let Some(pending) = slot.pending.take() {
            pending.abort();
        }
    }

    /// Quiet window length.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<T> Drop for Debounced<T> {
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        if let Some(pending) = slot.pending.take() {
            pending.abort();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
