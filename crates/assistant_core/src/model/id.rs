//! Process-wide entity identifier allocation.
//!
//! # Invariants
//! - Issued ids start at 1 and strictly increase for the allocator lifetime.
//! - `0` is never issued and is treated as an invalid id everywhere.
//! - Allocation is atomic, so one allocator may be shared across threads.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier shared by todos, todo lists and contacts.
pub type EntityId = u64;

/// Monotonic id source shared by every entity kind.
///
/// One instance is created per process and handed to entity constructors
/// by reference (usually through an `Arc`).
#[derive(Debug, Default)]
pub struct IdAllocator {
    last_issued: AtomicU64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id, strictly greater than every id returned before.
    pub fn next_id(&self) -> EntityId {
        self.last_issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Raises the floor so later ids are greater than `id`.
    ///
    /// Called with ids found in rehydrated snapshots; the counter is not
    /// persisted, so after a restart it would otherwise reissue them.
    pub fn observe(&self, id: EntityId) {
        self.last_issued.fetch_max(id, Ordering::SeqCst);
    }

    /// Last issued (or observed) id, `0` when nothing was issued yet.
    pub fn peek(&self) -> EntityId {
        self.last_issued.load(Ordering::SeqCst)
    }
}
