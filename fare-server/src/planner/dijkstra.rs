//! Single-source shortest path over a [`Graph`].
//!
//! The frontier is a lazy heap. A cheaper way into a node pushes a new
//! item for it instead of lowering the queued one, and items for nodes that
//! were already expanded are skipped when popped. Items are prioritised by
//! the weight of the edge that produced them, not by the cumulative distance;
//! the cumulative distance lives in `distances`. The search stops as soon as
//! the destination has been expanded.

use tracing::trace;

use super::graph::{EdgeSnapshot, Graph, UNREACHED, build_graph, build_mapper};
use super::queue::{Item, PriorityQueue};
use crate::domain::{BestRoute, LocationCode, QueryError};

/// A path through the graph, as node indices from start to end inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    pub nodes: Vec<usize>,
    pub cost: u64,
}

/// Run the search from `start` until `end` is expanded or the frontier empties.
///
/// `distances` and `previous` must be freshly initialised (all `UNREACHED`
/// and `None`) and as long as the graph. They hold the final search state on
/// return. Returns `None` if `end` was never reached.
pub fn dijkstra(
    graph: &Graph,
    start: usize,
    end: usize,
    distances: &mut [u64],
    previous: &mut [Option<usize>],
) -> Option<ShortestPath> {
    let size = graph.len();
    if start >= size || end >= size || distances.len() < size || previous.len() < size {
        return None;
    }

    let mut queue = PriorityQueue::new();
    let mut visited = vec![false; size];

    distances[start] = 0;
    previous[start] = Some(start);
    queue.push(Item::new(start, 0));

    while let Some(Item { node, .. }) = queue.pop() {
        if visited[node] {
            continue;
        }

        for edge in graph.edges(node) {
            let candidate = distances[node].saturating_add(u64::from(edge.weight));
            if candidate >= distances[edge.to] {
                continue;
            }

            distances[edge.to] = candidate;
            previous[edge.to] = Some(node);
            queue.push(Item::new(edge.to, u64::from(edge.weight)));
        }

        visited[node] = true;

        if node == end {
            break;
        }
    }

    trace!(
        start,
        end,
        queued = queue.len(),
        "search finished"
    );

    previous[end]?;
    let nodes = reconstruct_path(start, end, previous)?;
    Some(ShortestPath {
        nodes,
        cost: distances[end],
    })
}

/// Walk `previous` back from `end` to `start` and return the path in order.
///
/// Returns `None` if the chain breaks or runs longer than the graph.
pub fn reconstruct_path(start: usize, end: usize, previous: &[Option<usize>]) -> Option<Vec<usize>> {
    let mut path = vec![end];
    let mut node = end;

    while node != start {
        node = (*previous.get(node)?)?;
        path.push(node);
        if path.len() > previous.len() {
            return None;
        }
    }

    path.reverse();
    Some(path)
}

/// Find the cheapest route between two locations over a snapshot.
///
/// `locations` must include every location mentioned in `snapshot` that
/// should take part in the search, plus both endpoints.
pub fn find_best_route(
    locations: &[LocationCode],
    snapshot: &EdgeSnapshot,
    from: LocationCode,
    to: LocationCode,
) -> Result<BestRoute, QueryError> {
    let mut mapper = build_mapper(locations);
    let graph = build_graph(snapshot, &mapper.index_by_name, mapper.len());

    let start = mapper
        .index_of(&from)
        .ok_or(QueryError::LocationNotRegistered(from))?;
    let end = mapper
        .index_of(&to)
        .ok_or(QueryError::LocationNotRegistered(to))?;

    let path = dijkstra(
        &graph,
        start,
        end,
        &mut mapper.distances,
        &mut mapper.previous,
    )
    .filter(|p| p.cost != UNREACHED)
    .ok_or(QueryError::RouteNotFound { from, to })?;

    let stops = path
        .nodes
        .iter()
        .map(|&i| mapper.name_of(i))
        .collect::<Option<Vec<_>>>()
        .ok_or(QueryError::RouteNotFound { from, to })?;

    Ok(BestRoute {
        stops,
        cost: path.cost,
    })
}
