use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Minimum normalised similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Integer map coordinates of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Calculate the straight-line distance to another position.
    ///
    /// Coordinates are widened to `f64` before subtracting, so any pair of
    /// `i64` positions yields a finite result.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stable index of a node within its owning [`Graph`].
///
/// Identifiers are assigned in lexicographic name order, so comparing two
/// ids gives the same answer as comparing the names they refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }
}

/// Location record supplied to [`Graph::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub name: String,
    pub position: Position,
}

impl NodeRecord {
    pub fn new(name: impl Into<String>, x: i64, y: i64) -> Self {
        Self {
            name: name.into(),
            position: Position::new(x, y),
        }
    }
}

/// Directed connection record supplied to [`Graph::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Named location with its outgoing edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    name: String,
    position: Position,
    edges: Vec<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Targets of this node's outgoing edges, in the order they were declared.
    pub fn edges(&self) -> &[NodeId] {
        &self.edges
    }
}

/// Owning arena of nodes used by the search engine.
///
/// Every edge target is guaranteed to exist in the graph. Once built, a graph
/// is never mutated, so it can be shared freely between concurrent searches.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Arc<Vec<Node>>,
    index: Arc<HashMap<String, NodeId>>,
}

impl Graph {
    /// Build a graph from location and connection records, then drop every
    /// location named in `excluded` along with all edges touching it.
    ///
    /// Duplicate location names and connections referencing unknown
    /// locations are rejected. Excluded names that match no location are
    /// ignored.
    pub fn build(
        nodes: &[NodeRecord],
        edges: &[EdgeRecord],
        excluded: &HashSet<String>,
    ) -> Result<Self> {
        let mut known: HashSet<&str> = HashSet::with_capacity(nodes.len());
        for record in nodes {
            if !known.insert(record.name.as_str()) {
                return Err(Error::DuplicateNode {
                    name: record.name.clone(),
                });
            }
        }

        for edge in edges {
            if !known.contains(edge.from.as_str()) {
                return Err(Error::UnknownEdgeSource {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
            if !known.contains(edge.to.as_str()) {
                return Err(Error::UnknownEdgeTarget {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }

        let unmatched = excluded
            .iter()
            .filter(|name| !known.contains(name.as_str()))
            .count();
        if unmatched > 0 {
            debug!(unmatched, "ignored exclusions naming unknown locations");
        }

        let mut retained: Vec<&NodeRecord> = nodes
            .iter()
            .filter(|record| !excluded.contains(&record.name))
            .collect();
        retained.sort_by(|a, b| a.name.cmp(&b.name));

        let index: HashMap<String, NodeId> = retained
            .iter()
            .enumerate()
            .map(|(i, record)| (record.name.clone(), NodeId(i)))
            .collect();

        let mut built: Vec<Node> = retained
            .iter()
            .map(|record| Node {
                name: record.name.clone(),
                position: record.position,
                edges: Vec::new(),
            })
            .collect();

        let mut edge_count = 0usize;
        for edge in edges {
            let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) else {
                continue;
            };
            let outgoing = &mut built[from.0].edges;
            if !outgoing.contains(&to) {
                outgoing.push(to);
                edge_count += 1;
            }
        }

        debug!(
            nodes = built.len(),
            edges = edge_count,
            excluded = nodes.len() - built.len(),
            "built location graph"
        );

        Ok(Self {
            nodes: Arc::new(built),
            index: Arc::new(index),
        })
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|node| node.edges.len()).sum()
    }

    /// Lookup a node identifier by its case-sensitive name.
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Lookup a node by identifier.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Return the outgoing neighbours of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].edges
    }

    /// Whether a directed edge `from -> to` exists. Panics like [`Graph::neighbours`].
    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.neighbours(from).contains(&to)
    }

    /// Iterate nodes with their identifiers in name order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId(i), node))
    }

    /// Resolve a name to an identifier, reporting similar names when absent.
    pub fn resolve(&self, name: &str) -> Result<NodeId> {
        self.node_id(name).ok_or_else(|| Error::UnknownNode {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    /// Return up to `limit` node names similar to `query`, best match first.
    ///
    /// Names are ranked by Jaro-Winkler similarity. Equal scores go to the
    /// longer shared prefix, then to the smaller name, so `D2` suggests `D1`
    /// ahead of `A2`.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.to_lowercase();
        let mut scored: Vec<(f64, usize, &str)> = self
            .nodes
            .iter()
            .map(|node| {
                let candidate = node.name.to_lowercase();
                let score = strsim::jaro_winkler(&query, &candidate);
                (score, shared_prefix_len(&query, &candidate), node.name.as_str())
            })
            .filter(|(score, _, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.1.cmp(&a.1))
                .then_with(|| a.2.cmp(b.2))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, _, name)| name.to_string())
            .collect()
    }
}

fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}
