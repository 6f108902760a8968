//! Actor identifiers and allocation.
//!
//! An [`ActorId`] is a lightweight `u64` handle. Holding one never keeps an
//! actor alive: every lookup goes back through the [`Scene`](crate::Scene)
//! and may come back empty.

use serde::{Deserialize, Serialize};

/// A unique actor identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl ActorId {
    /// Create an actor id from a raw `u64` identifier.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor({})", self.0)
    }
}

/// Allocates monotonically increasing actor IDs.
///
/// Destroyed ids are never recycled.
#[derive(Debug)]
pub struct ActorIdAllocator {
    next_id: u64,
}

impl ActorIdAllocator {
    /// Creates a new allocator. IDs start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocates a fresh actor ID.
    pub fn allocate(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        ActorId(id)
    }

    /// Returns the number of actor ids allocated so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for ActorIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
