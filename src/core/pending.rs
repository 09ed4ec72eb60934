//! The pending counter: the only way to know a walk is over.
//!
//! Directories are discovered while the walk runs, so nothing knows the amount of work up
//! front. Every dispatched visit is counted with [PendingCount::add] before it is handed
//! off and released with [PendingCount::done] when it returns. A child is always added
//! before its parent is done, so the count can only reach zero once, after the last
//! directory has been listed.

use crossbeam_channel::{Receiver, Sender, bounded};
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct PendingCount {
    count: AtomicUsize,
    zero_tx: Sender<()>,
    zero_rx: Receiver<()>,
}

impl PendingCount {
    pub fn new() -> Self {
        let (zero_tx, zero_rx) = bounded(1);
        Self {
            count: AtomicUsize::new(0),
            zero_tx,
            zero_rx,
        }
    }

    /// Register one more unit of work. Must happen before the unit is dispatched.
    #[inline]
    pub fn add(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    /// Release one unit of work. The call that brings the count to zero fires the signal.
    pub fn done(&self) {
        let prev = self.count.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "pending count underflow");
        if prev == 1 {
            let _ = self.zero_tx.try_send(());
        }
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Block until the count has dropped to zero.
    ///
    /// Only meaningful after the first [PendingCount::add]; with nothing ever added there is
    /// nothing to wait for and this returns at once.
    pub fn wait(&self) {
        if self.get() == 0 && self.zero_rx.is_empty() {
            return;
        }
        let _ = self.zero_rx.recv();
    }
}

impl Default for PendingCount {
    fn default() -> Self {
        Self::new()
    }
}
