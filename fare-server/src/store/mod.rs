//! Fare storage: the authoritative route table, the derived edge cache and
//! the durable log.
//!
//! The route table and edge cache live for the whole process. They are
//! created once through [`StoreCell::connect`] and passed around explicitly.

mod edge_cache;
pub mod fare_log;
mod route_table;

use std::sync::{Arc, OnceLock};

pub use edge_cache::EdgeCache;
pub use fare_log::{FareLog, RecordError};
pub use route_table::RouteTable;

/// The two in-memory stores, always used together.
#[derive(Debug, Default)]
pub struct Stores {
    pub routes: RouteTable,
    pub edges: EdgeCache,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty both stores. Only meant for test isolation.
    pub fn truncate(&self) {
        self.routes.truncate();
        self.edges.truncate();
    }
}

/// Holder that creates the stores exactly once, however many callers race.
#[derive(Debug, Default)]
pub struct StoreCell {
    cell: OnceLock<Arc<Stores>>,
}

impl StoreCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// The stores, created on first call. Every call returns the same instance.
    pub fn connect(&self) -> Arc<Stores> {
        self.cell.get_or_init(|| Arc::new(Stores::new())).clone()
    }

    /// The stores if `connect` has run.
    pub fn get(&self) -> Option<Arc<Stores>> {
        self.cell.get().cloned()
    }
}
