//! Cheapest-route planner.
//!
//! Each query takes a snapshot of the edge cache, maps every registered
//! location onto a dense index, and runs a lazy-heap Dijkstra search over
//! the resulting graph. Nothing is shared between queries.

mod dijkstra;
mod graph;
mod queue;

use tracing::debug;

pub use dijkstra::{ShortestPath, dijkstra, find_best_route, reconstruct_path};
pub use graph::{Edge, EdgeSnapshot, Graph, Mapper, UNREACHED, build_graph, build_mapper};
pub use queue::{EntryId, Item, PriorityQueue};

use crate::domain::{BestRoute, LocationCode, QueryError};
use crate::store::Stores;

/// Answer "cheapest route from `boarding` to `destination`".
///
/// Codes are upper-cased before validation. Both codes are validated before
/// either is looked up.
pub fn best_route(
    stores: &Stores,
    boarding: &str,
    destination: &str,
) -> Result<BestRoute, QueryError> {
    let from = LocationCode::parse_normalized(boarding)
        .map_err(|_| QueryError::InvalidLocationCode(boarding.to_string()))?;
    let to = LocationCode::parse_normalized(destination)
        .map_err(|_| QueryError::InvalidLocationCode(destination.to_string()))?;

    for code in [from, to] {
        if !stores.routes.location_exists(&code) {
            return Err(QueryError::LocationNotRegistered(code));
        }
    }

    // Snapshot before listing: every location in the snapshot is then
    // guaranteed to be in the listing.
    let snapshot = stores.edges.snapshot();
    let locations = stores.routes.list_locations();

    let result = find_best_route(&locations, &snapshot, from, to);
    match &result {
        Ok(best) => debug!(%from, %to, route = %best.route(), cost = best.cost, "best route found"),
        Err(e) => debug!(%from, %to, error = %e, "no best route"),
    }
    result
}
