use std::fmt::Write;

use serde::Serialize;

use crate::cost::HeuristicKind;
use crate::error::{Error, Result};
use crate::graph::Position;
use crate::loader::RoadMap;
use crate::routing::RoutePlan;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header, one numbered line per step, and totals.
    PlainText,
    /// `+`/`|`/`-` prefixed names only.
    Basic,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Straight-line length of the leg arriving at this step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub heuristic: HeuristicKind,
    pub hops: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
    /// Cost under the heuristic's own cost model (distance or hop count).
    pub total_cost: f64,
    /// Straight-line distance travelled, regardless of heuristic.
    pub total_distance: f64,
}

impl RouteSummary {
    /// Convert a found [`RoutePlan`] into a summary with resolved coordinates.
    pub fn from_plan(map: &RoadMap, plan: &RoutePlan) -> Result<Self> {
        let (Some(first), Some(last)) = (plan.steps.first(), plan.steps.last()) else {
            return Err(Error::EmptyRoutePlan);
        };

        let mut previous: Option<Position> = None;
        let mut total_distance = 0.0;
        let mut steps = Vec::with_capacity(plan.steps.len());
        for (index, name) in plan.steps.iter().enumerate() {
            let position = map.position(name);
            let distance = match (previous, position) {
                (Some(from), Some(to)) => Some(from.distance_to(&to)),
                _ => None,
            };
            total_distance += distance.unwrap_or(0.0);
            previous = position;
            steps.push(RouteStep {
                index,
                name: name.clone(),
                position,
                distance,
            });
        }

        Ok(Self {
            heuristic: plan.heuristic,
            hops: plan.hop_count(),
            start: RouteEndpoint {
                name: first.clone(),
                position: map.position(first),
            },
            goal: RouteEndpoint {
                name: last.clone(),
                position: map.position(last),
            },
            steps,
            total_cost: plan.total_cost.unwrap_or(0.0),
            total_distance,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Basic => self.render_basic(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route from {} to {} ({} hops; heuristic: {}):",
            self.start.name, self.goal.name, self.hops, self.heuristic
        );
        for step in &self.steps {
            let position = step
                .position
                .map(|p| format!(" {p}"))
                .unwrap_or_default();
            match step.distance {
                Some(distance) => {
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {}{} (+{:.2})",
                        step.index, step.name, position, distance
                    );
                }
                None => {
                    let _ = writeln!(buffer, "{:>3}: {}{}", step.index, step.name, position);
                }
            }
        }
        let _ = writeln!(buffer, "\nTotal distance: {:.2}", self.total_distance);
        if self.heuristic == HeuristicKind::FewestLinks {
            let _ = writeln!(buffer, "Total links: {:.0}", self.total_cost);
        }
        buffer
    }

    fn render_basic(&self) -> String {
        let mut buffer = String::new();
        let len = self.steps.len();
        for (i, step) in self.steps.iter().enumerate() {
            let prefix = if i == 0 {
                '+'
            } else if i + 1 == len {
                '-'
            } else {
                '|'
            };
            let _ = writeln!(buffer, "{} {}", prefix, step.name);
        }
        buffer
    }
}
