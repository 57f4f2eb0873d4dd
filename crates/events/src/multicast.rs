//! Shared computation results with last-value replay.
//!
//! A [`Multicast`] sits at the end of a derived computation. The computation
//! runs once per upstream event and publishes its result here; any number of
//! observers read from the cell without causing the computation to run again.
//!
//! ## Replay
//!
//! The cell remembers the most recent value. A subscriber arriving after the
//! first emission receives that value immediately, then later values as they
//! are published. Each subscriber holds at most one unread value, so an idle
//! subscriber never accumulates old collections; a reader that falls behind
//! skips to the newest value.
//!
//! Seeded with [`Multicast::with_initial`], the cell also serves as a stateful
//! input channel that always holds a current value (the selected-id channel).

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::subject::Subscription;

/// Multicast cache cell: compute once, replay the last result to late joiners.
#[derive(Debug)]
pub struct Multicast<T> {
    latest: watch::Sender<Option<T>>,
    emissions: AtomicU64,
}

impl<T: Clone> Multicast<T> {
    /// An empty cell; subscribers wait for the first publish.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial(value: T) -> Self {
        Self {
            latest: watch::Sender::new(Some(value)),
            emissions: AtomicU64::new(0),
        }
    }

    /// Store `value` as the latest result and wake every subscriber.
    ///
    /// Returns the number of live subscribers.
    pub fn publish(&self, value: T) -> usize {
        self.latest.send_replace(Some(value));
        self.emissions.fetch_add(1, Ordering::SeqCst);
        self.latest.receiver_count()
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let mut rx = self.latest.subscribe();
        // Unread from the start, so the current value (if any) is replayed.
        rx.mark_changed();
        Subscription::latest_of(rx)
    }

    pub fn latest(&self) -> Option<T> {
        self.latest.borrow().clone()
    }

    /// How many values have been published (the seed does not count).
    pub fn emissions(&self) -> u64 {
        self.emissions.load(Ordering::SeqCst)
    }

    /// Number of subscriptions still alive.
    pub fn subscriber_count(&self) -> usize {
        self.latest.receiver_count()
    }
}

impl<T: Clone> Default for Multicast<T> {
    fn default() -> Self {
        Self {
            latest: watch::Sender::new(None),
            emissions: AtomicU64::new(0),
        }
    }
}
