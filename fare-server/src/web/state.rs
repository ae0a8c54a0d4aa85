//! Application state for the web layer.

use std::sync::Arc;

use crate::coordinator::WriteCoordinator;
use crate::store::Stores;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route table and edge cache, read by queries
    pub stores: Arc<Stores>,

    /// Write path for new fares
    pub coordinator: Arc<WriteCoordinator>,
}

impl AppState {
    /// Create a new app state over the coordinator's stores.
    pub fn new(coordinator: WriteCoordinator) -> Self {
        Self {
            stores: Arc::clone(coordinator.stores()),
            coordinator: Arc::new(coordinator),
        }
    }
}
