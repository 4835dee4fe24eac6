use std::sync::{Arc, Mutex};

use crate::model::PaymentEntry;

/// The in-memory collection of payout entries pending for the current day.
///
/// Process-wide shared state: clones share one list behind one mutex, which
/// is the single synchronization point for `append`, `snapshot` and `drain`.
/// The lock is never held across store or network I/O. Entries are not
/// persisted; a restart between accumulation and flush loses them.
#[derive(Clone, Default)]
pub struct Ledger {
    entries: Arc<Mutex<Vec<PaymentEntry>>>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail; insertion order is message order.
    pub fn append(&self, entry: PaymentEntry) {
        self.entries.lock().unwrap().push(entry);
    }

    /// Read-only copy of the current entries.
    pub fn snapshot(&self) -> Vec<PaymentEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Returns the current entries and clears the list in the same critical
    /// section, so no concurrent append or drain can observe an intermediate
    /// state.
    pub fn drain(&self) -> Vec<PaymentEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap())
    }
}
