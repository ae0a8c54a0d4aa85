//! Authoritative in-memory fare table and location registry.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Fare, LocationCode};

#[derive(Debug, Default)]
struct Tables {
    /// boarding → destination → cost. One cost per ordered pair.
    routes: HashMap<LocationCode, HashMap<LocationCode, u32>>,

    /// Every location seen in any stored fare.
    locations: HashSet<LocationCode>,
}

impl Tables {
    fn register(&mut self, fare: &Fare) {
        self.locations.insert(fare.boarding);
        self.locations.insert(fare.destination);
    }

    fn contains(&self, boarding: &LocationCode, destination: &LocationCode) -> bool {
        self.routes
            .get(boarding)
            .is_some_and(|dests| dests.contains_key(destination))
    }
}

/// The source of truth for "is this fare known".
///
/// A single reader/writer lock covers both the fare map and the registry.
/// Reads hand back owned values, never references into the table.
#[derive(Debug, Default)]
pub struct RouteTable {
    inner: RwLock<Tables>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    // Every write leaves the maps consistent, so a panic elsewhere while
    // holding the lock does not invalidate them.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Upsert a fare; the last write for a pair wins.
    ///
    /// Both endpoints are registered. Returns the cost it replaced, if any.
    pub fn store_fare(&self, fare: &Fare) -> Option<u32> {
        let mut tables = self.write();
        tables.register(fare);
        tables
            .routes
            .entry(fare.boarding)
            .or_default()
            .insert(fare.destination, fare.cost)
    }

    /// Insert a fare only if its pair is not stored yet.
    ///
    /// The check and the insert happen under one lock. Endpoints are
    /// registered only when the fare is inserted. Returns whether it was.
    pub fn insert_new(&self, fare: &Fare) -> bool {
        let mut tables = self.write();
        if tables.contains(&fare.boarding, &fare.destination) {
            return false;
        }
        tables.register(fare);
        tables
            .routes
            .entry(fare.boarding)
            .or_default()
            .insert(fare.destination, fare.cost);
        true
    }

    /// Cost of the fare from `boarding` to `destination`, if stored.
    pub fn get_cost(&self, boarding: &LocationCode, destination: &LocationCode) -> Option<u32> {
        self.read()
            .routes
            .get(boarding)
            .and_then(|dests| dests.get(destination))
            .copied()
    }

    pub fn contains(&self, boarding: &LocationCode, destination: &LocationCode) -> bool {
        self.read().contains(boarding, destination)
    }

    /// Remove the fare for the pair. Registered locations stay registered.
    ///
    /// Returns whether a fare was removed.
    pub fn delete_fare(&self, fare: &Fare) -> bool {
        let mut tables = self.write();
        let Some(dests) = tables.routes.get_mut(&fare.boarding) else {
            return false;
        };
        let removed = dests.remove(&fare.destination).is_some();
        if dests.is_empty() {
            tables.routes.remove(&fare.boarding);
        }
        removed
    }

    /// Returns true if the location was not registered before.
    pub fn register_location(&self, code: LocationCode) -> bool {
        self.write().locations.insert(code)
    }

    pub fn location_exists(&self, code: &LocationCode) -> bool {
        self.read().locations.contains(code)
    }

    /// All registered locations, in no particular order.
    pub fn list_locations(&self) -> Vec<LocationCode> {
        self.read().locations.iter().copied().collect()
    }

    /// Number of stored fares.
    pub fn fare_count(&self) -> usize {
        self.read().routes.values().map(HashMap::len).sum()
    }

    /// Replace the table with an empty one.
    pub fn truncate(&self) {
        *self.write() = Tables::default();
    }
}
