use crate::errors::{Result, StatusError};
use crate::model::Snapshot;

/// In-memory holder for the current and previous snapshots
///
/// Single-threaded by design: the poller replaces `current` once per tick,
/// hands it to the reconciliation engine, then calls [`SnapshotStore::commit`].
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    current: Snapshot,
    previous: Snapshot,
    max_entities: usize,
}

impl SnapshotStore {
    /// Create an empty store bounded to `max_entities` per snapshot
    pub fn new(max_entities: usize) -> Self {
        Self {
            current: Snapshot::empty(),
            previous: Snapshot::empty(),
            max_entities,
        }
    }

    /// Configured entity bound
    pub fn max_entities(&self) -> usize {
        self.max_entities
    }

    /// Most recently observed snapshot
    pub fn current_snapshot(&self) -> &Snapshot {
        &self.current
    }

    /// Snapshot as of the last [`SnapshotStore::commit`]
    pub fn previous_snapshot(&self) -> &Snapshot {
        &self.previous
    }

    /// Replace the current snapshot with a freshly observed one
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if the snapshot holds more than
    /// `max_entities` entities. The store is left unchanged; truncating or
    /// skipping the tick is the caller's call.
    pub fn replace_current(&mut self, snapshot: Snapshot) -> Result<()> {
        if snapshot.len() > self.max_entities {
            return Err(StatusError::CapacityExceeded {
                count: snapshot.len(),
                max: self.max_entities,
            });
        }
        tracing::debug!(entity_count = snapshot.len(), "Replaced current snapshot");
        self.current = snapshot;
        Ok(())
    }

    /// Copy current into previous
    pub fn commit(&mut self) {
        self.previous = self.current.clone();
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_ENTITIES)
    }
}
