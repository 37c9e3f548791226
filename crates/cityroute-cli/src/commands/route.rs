//! Route command handler for computing paths between locations.

use std::io;

use anyhow::{anyhow, Context, Result};

use cityroute_lib::{
    load_roadmap, plan_route, plan_route_observed, DatasetPaths, Error as RouteError,
    HeuristicKind, RoadMap, RoutePlan, RouteRequest, RouteStatus, RouteSummary,
};

use crate::output::OutputFormat;
use crate::stepper::InteractiveStepper;
use crate::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting location name.
    pub from: String,
    /// Destination location name.
    pub to: String,
    /// Locations removed from the map before searching.
    pub avoid: Vec<String>,
    /// Cost model used for the search.
    pub heuristic: HeuristicKind,
    /// Pause after every expansion.
    pub step: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library [`RouteRequest`].
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest::distance(self.from.clone(), self.to.clone())
            .with_heuristic(self.heuristic)
            .avoiding(self.avoid.iter().cloned())
    }
}

/// Handle the route subcommand.
///
/// Succeeds only when a route is found; an exhausted or cancelled search is
/// reported as an error so the process exits non-zero.
pub fn handle_route_command(
    paths: &DatasetPaths,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let map = load_map(paths)?;
    let request = args.to_request();

    let planned = if args.step {
        let stdin = io::stdin();
        let mut stepper =
            InteractiveStepper::new(stdin.lock(), io::stderr(), ColorPalette::detect());
        plan_route_observed(&map, &request, &mut stepper)
    } else {
        plan_route(&map, &request)
    };
    let plan = planned.map_err(handle_route_failure)?;

    report_plan(&map, &plan, &request, format)
}

pub(crate) fn load_map(paths: &DatasetPaths) -> Result<RoadMap> {
    load_roadmap(paths).with_context(|| {
        format!(
            "failed to load map from {} and {}",
            paths.locations.display(),
            paths.connections.display()
        )
    })
}

fn report_plan(
    map: &RoadMap,
    plan: &RoutePlan,
    request: &RouteRequest,
    format: OutputFormat,
) -> Result<()> {
    match plan.status {
        RouteStatus::Found => {
            let summary = RouteSummary::from_plan(map, plan)
                .context("failed to build route summary for display")?;
            format
                .render_route_result(&summary)
                .context("failed to write route")?;
            Ok(())
        }
        RouteStatus::NoPath => Err(anyhow!(format_route_not_found_message(
            &plan.start,
            &plan.goal,
            request
        ))),
        RouteStatus::Cancelled => Err(anyhow!(
            "Search cancelled before a route from {} to {} was found.",
            plan.start,
            plan.goal
        )),
    }
}

fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownNode { name, suggestions } => {
            anyhow!(format_unknown_location_message(&name, &suggestions))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_location_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_route_not_found_message(start: &str, goal: &str, request: &RouteRequest) -> String {
    let mut message = format!("No route found between {} and {}.", start, goal);
    if request.avoid.is_empty() {
        message.push_str(&format!(
            " Connections are one-way; check that {} is reachable from {}.",
            goal, start
        ));
    } else {
        message.push_str(" Try removing some --avoid locations.");
    }
    message
}
