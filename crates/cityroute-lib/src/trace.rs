//! Observation hooks for the search loop.
//!
//! A [`SearchObserver`] is notified once per expansion with a read-only
//! [`ExpansionStep`] snapshot. Observers may block (for example to wait for a
//! keypress) and may ask the search to stop by returning
//! [`StepControl::Cancel`]. Running without an observer produces the same
//! route as running with one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::graph::NodeId;

/// Frontier member as seen by an observer, ordered best-first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierEntry<'a> {
    pub node: NodeId,
    pub name: &'a str,
    /// Best-known accumulated cost from the start.
    pub cost: f64,
    /// Cost plus heuristic; the frontier is sorted by this value.
    pub priority: f64,
}

/// Snapshot passed to [`SearchObserver::on_expand`].
#[derive(Debug, Clone, Copy)]
pub struct ExpansionStep<'a> {
    /// 1-based expansion counter.
    pub iteration: usize,
    pub node: NodeId,
    pub name: &'a str,
    pub cost: f64,
    pub priority: f64,
    /// Remaining frontier after the expanded node was removed.
    pub frontier: &'a [FrontierEntry<'a>],
}

/// Whether the search should carry on after an observer returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepControl {
    Continue,
    Cancel,
}

/// Receives one callback per node expansion.
pub trait SearchObserver {
    fn on_expand(&mut self, step: &ExpansionStep<'_>) -> StepControl;
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_expand(&mut self, step: &ExpansionStep<'_>) -> StepControl {
        (**self).on_expand(step)
    }
}

/// Cancels the search once a shared flag is raised, otherwise defers to the
/// wrapped observer.
///
/// The flag is checked at every expansion boundary, so another thread can
/// abort a long search cleanly.
#[derive(Debug)]
pub struct CancelOnFlag<O> {
    inner: O,
    flag: Arc<AtomicBool>,
}

impl<O> CancelOnFlag<O> {
    pub fn new(inner: O, flag: Arc<AtomicBool>) -> Self {
        Self { inner, flag }
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: SearchObserver> SearchObserver for CancelOnFlag<O> {
    fn on_expand(&mut self, step: &ExpansionStep<'_>) -> StepControl {
        if self.flag.load(Ordering::Relaxed) {
            return StepControl::Cancel;
        }
        self.inner.on_expand(step)
    }
}

/// Observer that never interferes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_expand(&mut self, _step: &ExpansionStep<'_>) -> StepControl {
        StepControl::Continue
    }
}

/// Owned copy of an [`ExpansionStep`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedStep {
    pub iteration: usize,
    pub name: String,
    pub cost: f64,
    pub priority: f64,
    /// `(name, priority)` pairs in frontier order.
    pub frontier: Vec<(String, f64)>,
}

impl From<&ExpansionStep<'_>> for RecordedStep {
    fn from(step: &ExpansionStep<'_>) -> Self {
        Self {
            iteration: step.iteration,
            name: step.name.to_string(),
            cost: step.cost,
            priority: step.priority,
            frontier: step
                .frontier
                .iter()
                .map(|entry| (entry.name.to_string(), entry.priority))
                .collect(),
        }
    }
}

/// Collects every expansion for later inspection.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    steps: Vec<RecordedStep>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[RecordedStep] {
        &self.steps
    }

    /// Names of expanded nodes in expansion order.
    pub fn expansion_order(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name.as_str()).collect()
    }
}

impl SearchObserver for TraceRecorder {
    fn on_expand(&mut self, step: &ExpansionStep<'_>) -> StepControl {
        self.steps.push(RecordedStep::from(step));
        StepControl::Continue
    }
}
