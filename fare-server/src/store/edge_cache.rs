//! Read-optimised adjacency cache feeding the planner.
//!
//! The cache is append-only per boarding location: storing the same pair
//! twice leaves two connections behind, unlike the route table. Duplicate
//! equal-weight edges do not change search results.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Connection, Fare, LocationCode};
use crate::planner::EdgeSnapshot;

#[derive(Debug, Default)]
pub struct EdgeCache {
    inner: RwLock<EdgeSnapshot>,
}

impl EdgeCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, EdgeSnapshot> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, EdgeSnapshot> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append the fare's connection to its boarding location's list.
    pub fn append_edge(&self, fare: &Fare) {
        self.write()
            .entry(fare.boarding)
            .or_default()
            .push(fare.connection());
    }

    /// Deep copy of the whole cache, safe to use without holding the lock.
    pub fn snapshot(&self) -> EdgeSnapshot {
        self.read().clone()
    }

    /// Connections leaving `boarding`, in insertion order.
    pub fn connections_from(&self, boarding: &LocationCode) -> Vec<Connection> {
        self.read().get(boarding).cloned().unwrap_or_default()
    }

    /// Number of cached connections, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    /// Replace the cache with an empty one.
    pub fn truncate(&self) {
        *self.write() = EdgeSnapshot::new();
    }
}
