//! Dense, integer-indexed graph built from an edge cache snapshot.
//!
//! Index assignment follows the order of the location listing handed to
//! [`build_mapper`]. That listing comes from an unordered set, so a graph is
//! only meaningful for the query it was built for.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{Connection, LocationCode};

/// Boarding location → outgoing connections, in insertion order.
pub type EdgeSnapshot = HashMap<LocationCode, Vec<Connection>>;

/// Distance of a node the search has not reached.
pub const UNREACHED: u64 = u64::MAX;

/// Bidirectional name ↔ index map plus fresh search state.
#[derive(Debug, Clone)]
pub struct Mapper {
    pub index_by_name: HashMap<LocationCode, usize>,
    pub name_by_index: Vec<LocationCode>,

    /// Best known distance from the start, `UNREACHED` initially.
    pub distances: Vec<u64>,

    /// Predecessor on the best known path, `None` initially.
    pub previous: Vec<Option<usize>>,
}

impl Mapper {
    pub fn len(&self) -> usize {
        self.name_by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_by_index.is_empty()
    }

    pub fn index_of(&self, code: &LocationCode) -> Option<usize> {
        self.index_by_name.get(code).copied()
    }

    pub fn name_of(&self, index: usize) -> Option<LocationCode> {
        self.name_by_index.get(index).copied()
    }
}

/// Assign each location a 0-based index in enumeration order.
///
/// Repeated locations keep their first index.
pub fn build_mapper(locations: &[LocationCode]) -> Mapper {
    let mut index_by_name = HashMap::with_capacity(locations.len());
    let mut name_by_index = Vec::with_capacity(locations.len());

    for &code in locations {
        if index_by_name.contains_key(&code) {
            continue;
        }
        index_by_name.insert(code, name_by_index.len());
        name_by_index.push(code);
    }

    let size = name_by_index.len();
    Mapper {
        index_by_name,
        name_by_index,
        distances: vec![UNREACHED; size],
        previous: vec![None; size],
    }
}

/// A directed, weighted edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub to: usize,
    pub weight: u32,
}

/// Adjacency rows indexed by node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    rows: Vec<Vec<Edge>>,
}

impl Graph {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Outgoing edges of `node`, empty for unknown nodes.
    pub fn edges(&self, node: usize) -> &[Edge] {
        self.rows.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Place every boarding location's connections on the row matching its index.
///
/// Locations without outgoing connections get an empty row. Connections
/// touching a location missing from `index_by_name` are dropped; the query
/// path lists locations after taking the snapshot, so this only happens for
/// hand-built inputs.
pub fn build_graph(
    snapshot: &EdgeSnapshot,
    index_by_name: &HashMap<LocationCode, usize>,
    size: usize,
) -> Graph {
    let mut rows = vec![Vec::new(); size];

    for (boarding, connections) in snapshot {
        let Some(&from) = index_by_name.get(boarding).filter(|&&i| i < size) else {
            trace!(boarding = %boarding, "skipping unindexed boarding location");
            continue;
        };

        rows[from] = connections
            .iter()
            .filter_map(|c| match index_by_name.get(&c.destination) {
                Some(&to) if to < size => Some(Edge { to, weight: c.cost }),
                _ => {
                    trace!(destination = %c.destination, "skipping unindexed destination");
                    None
                }
            })
            .collect();
    }

    Graph { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> LocationCode {
        LocationCode::parse(s).unwrap()
    }

    fn connection(dest: &str, cost: u32) -> Connection {
        Connection {
            destination: code(dest),
            cost,
        }
    }

    fn locations() -> Vec<LocationCode> {
        ["ORL", "BRC", "GRU", "CDG", "SCL"]
            .into_iter()
            .map(code)
            .collect()
    }

    fn snapshot() -> EdgeSnapshot {
        let mut snapshot = EdgeSnapshot::new();
        snapshot.insert(
            code("GRU"),
            vec![
                connection("BRC", 10),
                connection("CDG", 75),
                connection("SCL", 20),
                connection("ORL", 56),
            ],
        );
        snapshot.insert(code("BRC"), vec![connection("SCL", 5)]);
        snapshot.insert(code("ORL"), vec![connection("CDG", 5)]);
        snapshot.insert(code("SCL"), vec![connection("ORL", 20)]);
        snapshot
    }

    #[test]
    fn mapper_assigns_indices_in_order() {
        let locations = locations();
        let mapper = build_mapper(&locations);

        for (i, loc) in locations.iter().enumerate() {
            assert_eq!(mapper.index_of(loc), Some(i));
            assert_eq!(mapper.name_of(i), Some(*loc));
        }
        assert_eq!(mapper.len(), 5);
        assert!(mapper.distances.iter().all(|&d| d == UNREACHED));
        assert!(mapper.previous.iter().all(Option::is_none));
    }

    #[test]
    fn mapper_ignores_repeats() {
        let mapper = build_mapper(&[code("GRU"), code("BRC"), code("GRU")]);
        assert_eq!(mapper.len(), 2);
        assert_eq!(mapper.index_of(&code("GRU")), Some(0));
        assert_eq!(mapper.distances.len(), 2);
    }

    #[test]
    fn graph_rows_follow_indices() {
        let locations = locations();
        let mapper = build_mapper(&locations);
        let snapshot = snapshot();
        let graph = build_graph(&snapshot, &mapper.index_by_name, mapper.len());

        assert_eq!(graph.len(), locations.len());

        for loc in &locations {
            let row = graph.edges(mapper.index_of(loc).unwrap());
            let expected: Vec<Edge> = snapshot
                .get(loc)
                .map(|cs| {
                    cs.iter()
                        .map(|c| Edge {
                            to: mapper.index_of(&c.destination).unwrap(),
                            weight: c.cost,
                        })
                        .collect()
                })
                .unwrap_or_default();
            assert_eq!(row, expected.as_slice());
        }

        // CDG has no outgoing fares
        assert!(graph.edges(mapper.index_of(&code("CDG")).unwrap()).is_empty());
    }

    #[test]
    fn graph_drops_unindexed_locations() {
        let mapper = build_mapper(&[code("GRU"), code("BRC")]);
        let mut snapshot = EdgeSnapshot::new();
        snapshot.insert(code("GRU"), vec![connection("BRC", 1), connection("XYZ", 2)]);
        snapshot.insert(code("XYZ"), vec![connection("GRU", 3)]);

        let graph = build_graph(&snapshot, &mapper.index_by_name, mapper.len());
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edges(0), &[Edge { to: 1, weight: 1 }]);
        assert!(graph.edges(1).is_empty());
        assert!(graph.edges(7).is_empty());
    }
}
