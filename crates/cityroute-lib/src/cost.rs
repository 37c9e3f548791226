//! Edge-cost and heuristic strategies for the A* search.
//!
//! A strategy decides what "shortest" means: [`EuclideanCost`] ranks routes
//! by travelled distance, [`HopCost`] by the number of connections used.
//! Both heuristics are admissible, so the search always returns a
//! minimum-cost route for the chosen strategy.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::graph::Node;

/// Pluggable cost model consulted by the search engine.
///
/// Implementations must return non-negative values, and `heuristic` must
/// never overestimate the true remaining cost to `goal`.
pub trait CostStrategy: Send + Sync {
    /// Cost of travelling the edge `from -> to`.
    fn edge_cost(&self, from: &Node, to: &Node) -> f64;

    /// Estimated remaining cost from `node` to `goal`.
    fn heuristic(&self, node: &Node, goal: &Node) -> f64;
}

/// Straight-line travel distance with a straight-line heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanCost;

impl CostStrategy for EuclideanCost {
    fn edge_cost(&self, from: &Node, to: &Node) -> f64 {
        from.position().distance_to(&to.position())
    }

    fn heuristic(&self, node: &Node, goal: &Node) -> f64 {
        node.position().distance_to(&goal.position())
    }
}

/// Every edge costs one hop; the heuristic is zero, which turns the search
/// into a uniform-cost search by hop count.
#[derive(Debug, Clone, Copy, Default)]
pub struct HopCost;

impl CostStrategy for HopCost {
    fn edge_cost(&self, _from: &Node, _to: &Node) -> f64 {
        1.0
    }

    fn heuristic(&self, _node: &Node, _goal: &Node) -> f64 {
        0.0
    }
}

/// User-facing heuristic selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    /// Straight-line distance.
    #[default]
    Distance,
    /// Fewest links.
    FewestLinks,
}

impl HeuristicKind {
    /// Instantiate the cost strategy for this selector.
    pub fn strategy(self) -> Box<dyn CostStrategy> {
        match self {
            HeuristicKind::Distance => Box::new(EuclideanCost),
            HeuristicKind::FewestLinks => Box::new(HopCost),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            HeuristicKind::Distance => "distance",
            HeuristicKind::FewestLinks => "fewest-links",
        };
        f.write_str(value)
    }
}

impl FromStr for HeuristicKind {
    type Err = Error;

    /// Accepts `distance`/`1` and `links`/`fewest-links`/`2`, ignoring case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "distance" => Ok(HeuristicKind::Distance),
            "2" | "links" | "fewest-links" => Ok(HeuristicKind::FewestLinks),
            _ => Err(Error::UnknownHeuristic {
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::graph::{Graph, NodeRecord};

    fn pair() -> Graph {
        let nodes = vec![NodeRecord::new("A", 0, 0), NodeRecord::new("B", 3, 4)];
        Graph::build(&nodes, &[], &HashSet::new()).unwrap()
    }

    #[test]
    fn euclidean_uses_true_distance() {
        let graph = pair();
        let a = graph.node(graph.node_id("A").unwrap());
        let b = graph.node(graph.node_id("B").unwrap());

        assert_eq!(EuclideanCost.edge_cost(a, b), 5.0);
        assert_eq!(EuclideanCost.heuristic(a, b), 5.0);
        assert_eq!(EuclideanCost.heuristic(b, b), 0.0);
    }

    #[test]
    fn hop_cost_ignores_geometry() {
        let graph = pair();
        let a = graph.node(graph.node_id("A").unwrap());
        let b = graph.node(graph.node_id("B").unwrap());

        assert_eq!(HopCost.edge_cost(a, b), 1.0);
        assert_eq!(HopCost.heuristic(a, b), 0.0);
    }

    #[test]
    fn heuristic_kind_parses_aliases() {
        assert_eq!(
            "distance".parse::<HeuristicKind>().unwrap(),
            HeuristicKind::Distance
        );
        assert_eq!("1".parse::<HeuristicKind>().unwrap(), HeuristicKind::Distance);
        assert_eq!(
            "Fewest-Links".parse::<HeuristicKind>().unwrap(),
            HeuristicKind::FewestLinks
        );
        assert_eq!("2".parse::<HeuristicKind>().unwrap(), HeuristicKind::FewestLinks);
        assert_eq!("links".parse::<HeuristicKind>().unwrap(), HeuristicKind::FewestLinks);
        assert!("3".parse::<HeuristicKind>().is_err());
        assert!("hops".parse::<HeuristicKind>().is_err());
        assert!("straight-line".parse::<HeuristicKind>().is_err());
    }

    #[test]
    fn heuristic_kind_display_round_trips() {
        for kind in [HeuristicKind::Distance, HeuristicKind::FewestLinks] {
            assert_eq!(kind.to_string().parse::<HeuristicKind>().unwrap(), kind);
        }
    }
}
