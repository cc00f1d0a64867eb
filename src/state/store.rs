use std::{fmt, sync::Arc};

use tokio::sync::watch;

use super::{Snapshot, snapshot::timestamp_now};

/// Holder of the one current [`Snapshot`].
///
/// Cloning the store clones a handle, not the state. The poll loop
/// publishes, HTTP handlers read. Readers always get their own copy of a
/// fully written snapshot.
#[derive(Clone)]
pub struct StateStore {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl StateStore {
    /// Create a store seeded with `initial`.
    pub fn new(initial: Snapshot) -> Self {
        let (tx, _rx) = watch::channel(Self::stamped(initial));
        Self { tx: Arc::new(tx) }
    }

    /// Replace the current snapshot.
    ///
    /// A snapshot without an `updated` value gets the current time.
    pub fn publish(&self, snapshot: Snapshot) {
        self.tx.send_replace(Self::stamped(snapshot));
    }

    /// Independent copy of the current snapshot.
    pub fn current(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    fn stamped(mut snapshot: Snapshot) -> Snapshot {
        if snapshot.updated.trim().is_empty() {
            snapshot.updated = timestamp_now();
        }
        snapshot
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(Snapshot::init())
    }
}

impl fmt::Debug for StateStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateStore")
            .field("current", &self.current())
            .finish()
    }
}
