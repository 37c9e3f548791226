use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::cost::HeuristicKind;
use crate::error::Result;
use crate::loader::RoadMap;
use crate::search::{search, search_observed, SearchOutcome};
use crate::trace::SearchObserver;

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub heuristic: HeuristicKind,
    /// Locations removed from the map before searching.
    pub avoid: Vec<String>,
}

impl RouteRequest {
    /// Convenience constructor for straight-line-distance routes without
    /// exclusions.
    pub fn distance(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            heuristic: HeuristicKind::Distance,
            avoid: Vec::new(),
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn avoiding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.avoid.extend(names.into_iter().map(Into::into));
        self
    }

    /// Exclusion set handed to graph construction.
    pub fn excluded(&self) -> HashSet<String> {
        self.avoid.iter().cloned().collect()
    }
}

/// How a planning request concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Found,
    NoPath,
    Cancelled,
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteStatus::Found => "found",
            RouteStatus::NoPath => "no path",
            RouteStatus::Cancelled => "cancelled",
        };
        f.write_str(value)
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub heuristic: HeuristicKind,
    pub start: String,
    pub goal: String,
    pub status: RouteStatus,
    /// Location names from start to goal; empty unless `status` is `Found`.
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn is_found(&self) -> bool {
        self.status == RouteStatus::Found
    }
}

/// Compute a route using the requested heuristic and exclusions.
///
/// Excluded locations are removed before the start and goal are resolved,
/// so excluding either endpoint reports it as unknown.
pub fn plan_route(map: &RoadMap, request: &RouteRequest) -> Result<RoutePlan> {
    plan(map, request, None)
}

/// Like [`plan_route`], notifying `observer` before every expansion.
pub fn plan_route_observed(
    map: &RoadMap,
    request: &RouteRequest,
    observer: &mut dyn SearchObserver,
) -> Result<RoutePlan> {
    plan(map, request, Some(observer))
}

fn plan(
    map: &RoadMap,
    request: &RouteRequest,
    observer: Option<&mut dyn SearchObserver>,
) -> Result<RoutePlan> {
    let graph = map.build_graph(&request.excluded())?;
    let strategy = request.heuristic.strategy();

    let outcome = match observer {
        Some(observer) => search_observed(
            &graph,
            &request.start,
            &request.goal,
            strategy.as_ref(),
            observer,
        )?,
        None => search(&graph, &request.start, &request.goal, strategy.as_ref())?,
    };

    let (status, steps, total_cost) = match outcome {
        SearchOutcome::Found(route) => (
            RouteStatus::Found,
            route
                .names(&graph)
                .into_iter()
                .map(str::to_string)
                .collect(),
            Some(route.cost()),
        ),
        SearchOutcome::NoPath => (RouteStatus::NoPath, Vec::new(), None),
        SearchOutcome::Cancelled => (RouteStatus::Cancelled, Vec::new(), None),
    };

    Ok(RoutePlan {
        heuristic: request.heuristic,
        start: request.start.clone(),
        goal: request.goal.clone(),
        status,
        steps,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeRecord, NodeRecord};

    fn line_map() -> RoadMap {
        RoadMap::new(
            vec![
                NodeRecord::new("A", 0, 0),
                NodeRecord::new("B", 1, 0),
                NodeRecord::new("C", 2, 0),
            ],
            vec![EdgeRecord::new("A", "B"), EdgeRecord::new("B", "C")],
        )
    }

    #[test]
    fn route_plan_hop_count() {
        let plan = plan_route(&line_map(), &RouteRequest::distance("A", "C")).unwrap();
        assert!(plan.is_found());
        assert_eq!(plan.steps, vec!["A", "B", "C"]);
        assert_eq!(plan.hop_count(), 2);
        assert_eq!(plan.total_cost, Some(2.0));
    }

    #[test]
    fn avoided_waypoint_yields_no_path() {
        let request = RouteRequest::distance("A", "C").avoiding(["B"]);
        let plan = plan_route(&line_map(), &request).unwrap();
        assert_eq!(plan.status, RouteStatus::NoPath);
        assert!(plan.steps.is_empty());
        assert_eq!(plan.total_cost, None);
    }

    #[test]
    fn avoided_goal_is_unknown() {
        let request = RouteRequest::distance("A", "C").avoiding(["C"]);
        let err = plan_route(&line_map(), &request).unwrap_err();
        assert!(format!("{err}").contains("unknown location name: C"));
    }
}
