use crate::graph::{Graph, NodeId};

/// Ordered route from start to goal, inclusive, with its accumulated cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    nodes: Vec<NodeId>,
    cost: f64,
}

impl Route {
    pub(crate) fn new(nodes: Vec<NodeId>, cost: f64) -> Self {
        Self { nodes, cost }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Total cost under the strategy that produced this route.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of edges travelled.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Resolve node identifiers to names.
    pub fn names<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.nodes.iter().map(|id| graph.node(*id).name()).collect()
    }
}

/// Walk the predecessor table back from `goal` and return the route in
/// start-to-goal order.
///
/// `predecessor` is indexed by [`NodeId::index`]; the start is the node whose
/// entry is `None`.
pub fn reconstruct(predecessor: &[Option<NodeId>], goal: NodeId) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        current = predecessor[node.index()];
    }
    path.reverse();
    path
}
