//! Generalised A* search over a [`Graph`].
//!
//! The frontier is ordered by `f = g + h`, then by `g`, then by name, so
//! repeated searches over the same graph always expand nodes in the same
//! order and return the same route. A node, once expanded, is never
//! re-opened; with the admissible, consistent heuristics in
//! [`crate::cost`] the first expansion of the goal yields a minimum-cost
//! route.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::cost::CostStrategy;
use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::path::{reconstruct, Route};
use crate::trace::{ExpansionStep, FrontierEntry, SearchObserver, StepControl};

/// Result of a well-formed search request.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A minimum-cost route was found.
    Found(Route),
    /// The frontier emptied before the goal was reached.
    NoPath,
    /// An observer asked the search to stop.
    Cancelled,
}

impl SearchOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            SearchOutcome::Found(route) => Some(route),
            _ => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            SearchOutcome::Found(route) => Some(route),
            _ => None,
        }
    }
}

/// Find a minimum-cost route from `start` to `goal` under `strategy`.
///
/// Unknown start or goal names are errors; an unreachable goal is reported
/// as [`SearchOutcome::NoPath`].
pub fn search(
    graph: &Graph,
    start: &str,
    goal: &str,
    strategy: &dyn CostStrategy,
) -> Result<SearchOutcome> {
    let start = graph.resolve(start)?;
    let goal = graph.resolve(goal)?;
    Ok(run(graph, start, goal, strategy, None))
}

/// Like [`search`], notifying `observer` before each expansion.
pub fn search_observed(
    graph: &Graph,
    start: &str,
    goal: &str,
    strategy: &dyn CostStrategy,
    observer: &mut dyn SearchObserver,
) -> Result<SearchOutcome> {
    let start = graph.resolve(start)?;
    let goal = graph.resolve(goal)?;
    Ok(run(graph, start, goal, strategy, Some(observer)))
}

fn run(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    strategy: &dyn CostStrategy,
    mut observer: Option<&mut dyn SearchObserver>,
) -> SearchOutcome {
    if start == goal {
        return SearchOutcome::Found(Route::new(vec![start], 0.0));
    }

    let goal_node = graph.node(goal);
    let mut state = SearchState::new(graph.len());
    state.best_cost[start.index()] = Some(0.0);
    state.frontier.upsert(
        start,
        0.0,
        strategy.heuristic(graph.node(start), goal_node),
    );

    let mut iteration = 0usize;
    while let Some(key) = state.frontier.pop() {
        let current = key.node;
        let cost = key.cost.0;
        state.closed[current.index()] = true;
        iteration += 1;

        let current_node = graph.node(current);
        trace!(
            node = current_node.name(),
            cost,
            frontier = state.frontier.len(),
            "expanding node"
        );

        if let Some(observer) = observer.as_deref_mut() {
            let frontier = state.frontier.snapshot(graph);
            let step = ExpansionStep {
                iteration,
                node: current,
                name: current_node.name(),
                cost,
                priority: key.priority.0,
                frontier: &frontier,
            };
            if observer.on_expand(&step) == StepControl::Cancel {
                debug!(expansions = iteration, "search cancelled by observer");
                return SearchOutcome::Cancelled;
            }
        }

        if current == goal {
            let route = Route::new(reconstruct(&state.predecessor, goal), cost);
            debug!(
                expansions = iteration,
                hops = route.hop_count(),
                cost,
                "route found"
            );
            return SearchOutcome::Found(route);
        }

        for &neighbour in current_node.edges() {
            if state.closed[neighbour.index()] {
                continue;
            }

            let neighbour_node = graph.node(neighbour);
            let tentative = cost + strategy.edge_cost(current_node, neighbour_node);
            let improves = state.best_cost[neighbour.index()]
                .map_or(true, |best| tentative < best);
            if !improves {
                continue;
            }

            state.best_cost[neighbour.index()] = Some(tentative);
            state.predecessor[neighbour.index()] = Some(current);
            let priority = tentative + strategy.heuristic(neighbour_node, goal_node);
            state.frontier.upsert(neighbour, tentative, priority);
        }
    }

    debug!(expansions = iteration, "frontier exhausted without reaching goal");
    SearchOutcome::NoPath
}

/// Per-invocation bookkeeping, indexed by [`NodeId::index`].
struct SearchState {
    frontier: Frontier,
    best_cost: Vec<Option<f64>>,
    predecessor: Vec<Option<NodeId>>,
    closed: Vec<bool>,
}

impl SearchState {
    fn new(size: usize) -> Self {
        Self {
            frontier: Frontier::new(size),
            best_cost: vec![None; size],
            predecessor: vec![None; size],
            closed: vec![false; size],
        }
    }
}

/// Open set supporting in-place priority updates.
///
/// `queue` holds at most one key per node; `keys` remembers that key so an
/// improved cost replaces the old entry instead of duplicating it.
struct Frontier {
    queue: BTreeSet<FrontierKey>,
    keys: Vec<Option<FrontierKey>>,
}

impl Frontier {
    fn new(size: usize) -> Self {
        Self {
            queue: BTreeSet::new(),
            keys: vec![None; size],
        }
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn upsert(&mut self, node: NodeId, cost: f64, priority: f64) {
        if let Some(previous) = self.keys[node.index()].take() {
            self.queue.remove(&previous);
        }
        let key = FrontierKey {
            priority: FloatOrd(priority),
            cost: FloatOrd(cost),
            node,
        };
        self.queue.insert(key);
        self.keys[node.index()] = Some(key);
    }

    fn pop(&mut self) -> Option<FrontierKey> {
        let key = self.queue.pop_first()?;
        self.keys[key.node.index()] = None;
        Some(key)
    }

    fn snapshot<'g>(&self, graph: &'g Graph) -> Vec<FrontierEntry<'g>> {
        self.queue
            .iter()
            .map(|key| FrontierEntry {
                node: key.node,
                name: graph.node(key.node).name(),
                cost: key.cost.0,
                priority: key.priority.0,
            })
            .collect()
    }
}

/// Frontier ordering: lowest priority, then lowest cost, then lowest id.
/// Node ids follow name order, so the final tie-break is by name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    priority: FloatOrd,
    cost: FloatOrd,
    node: NodeId,
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
