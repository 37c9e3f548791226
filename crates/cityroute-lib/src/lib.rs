//! cityroute library entry points.
//!
//! This crate loads a road map of named locations, builds a directed graph
//! from it, and finds routes between locations with a generalised A* search
//! that ranks candidates either by travelled distance or by number of links.
//! Higher-level consumers (the CLI) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod cost;
pub mod error;
pub mod graph;
pub mod loader;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;
pub mod trace;

pub use cost::{CostStrategy, EuclideanCost, HeuristicKind, HopCost};
pub use error::{Error, Result};
pub use graph::{EdgeRecord, Graph, Node, NodeId, NodeRecord, Position};
pub use loader::{load_roadmap, parse_connections, parse_locations, DatasetPaths, RoadMap};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{reconstruct, Route};
pub use routing::{plan_route, plan_route_observed, RoutePlan, RouteRequest, RouteStatus};
pub use search::{search, search_observed, SearchOutcome};
pub use trace::{
    CancelOnFlag, ExpansionStep, FrontierEntry, NoopObserver, RecordedStep, SearchObserver,
    StepControl, TraceRecorder,
};
