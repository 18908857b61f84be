//! Atomic publication of index snapshots to concurrent readers.

use crate::index::error::InvalidEntryError;
use crate::index::store::IndexStore;
use crate::index::types::RawEntry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Holder of the current [`IndexStore`].
///
/// Readers take an `Arc` to the snapshot and query it without holding any
/// lock; a reload swaps the pointer, so a reader keeps seeing the version it
/// grabbed until it drops it.
#[derive(Debug)]
pub struct SharedIndex {
    current: RwLock<Arc<IndexStore>>,
    generation: AtomicU64,
}

impl SharedIndex {
    pub fn new(store: IndexStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
            generation: AtomicU64::new(0),
        }
    }

    /// The snapshot installed right now
    pub fn snapshot(&self) -> Arc<IndexStore> {
        // The guarded value is a single pointer, so a poisoned lock still holds a valid snapshot
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Install `store` and return the snapshot it replaced
    pub fn replace(&self, store: IndexStore) -> Arc<IndexStore> {
        let next = Arc::new(store);
        let entries = next.len();

        // Bumped under the write guard so the counter and the snapshot move together
        let (previous, generation) = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let previous = std::mem::replace(&mut *guard, next);
            (previous, self.generation.fetch_add(1, Ordering::AcqRel) + 1)
        };

        info!(generation, entries, "installed index snapshot");
        previous
    }

    /// Validate `entries` and install them; the current snapshot stays on failure
    pub fn reload<I>(&self, entries: I) -> Result<(), InvalidEntryError>
    where
        I: IntoIterator<Item = RawEntry>,
    {
        match IndexStore::load(entries) {
            Ok(store) => {
                self.replace(store);
                Ok(())
            }
            Err(e) => {
                warn!(position = e.position, category = %e.category, "rejected index reload");
                Err(e)
            }
        }
    }

    /// Number of successful replacements since construction
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
