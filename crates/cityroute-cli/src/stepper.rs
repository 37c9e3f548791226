//! Interactive step-by-step search observer.
//!
//! Prints every expansion together with the open frontier and waits for the
//! user before letting the search continue. Typing `q` cancels the search.

use std::io::{BufRead, Write};

use cityroute_lib::{ExpansionStep, SearchObserver, StepControl};
use tracing::warn;

use crate::terminal::ColorPalette;

/// Observer that pauses after printing each expansion.
///
/// Reaching end of input lets the search run to completion, so piping an
/// empty stdin prints the full trace without blocking.
pub struct InteractiveStepper<R, W> {
    input: R,
    output: W,
    palette: ColorPalette,
    paused: bool,
}

impl<R: BufRead, W: Write> InteractiveStepper<R, W> {
    pub fn new(input: R, output: W, palette: ColorPalette) -> Self {
        Self {
            input,
            output,
            palette,
            paused: true,
        }
    }

    fn print_step(&mut self, step: &ExpansionStep<'_>) -> std::io::Result<()> {
        let p = self.palette;
        writeln!(
            self.output,
            "Step {}: expanding {}{}{} (cost {}{:.2}{}, estimate {}{:.2}{})",
            step.iteration,
            p.white_bold,
            step.name,
            p.reset,
            p.cyan,
            step.cost,
            p.reset,
            p.cyan,
            step.priority,
            p.reset
        )?;
        if step.frontier.is_empty() {
            writeln!(self.output, "  {}frontier: <empty>{}", p.gray, p.reset)?;
        } else {
            let entries = step
                .frontier
                .iter()
                .map(|entry| format!("{} ({:.2})", entry.name, entry.priority))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(self.output, "  {}frontier: {}{}", p.gray, entries, p.reset)?;
        }
        if self.paused {
            write!(self.output, "Press Enter to continue, q to cancel: ")?;
        }
        self.output.flush()
    }

    fn read_control(&mut self) -> StepControl {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                self.paused = false;
                let _ = writeln!(self.output);
                StepControl::Continue
            }
            Ok(_) if line.trim().eq_ignore_ascii_case("q") => StepControl::Cancel,
            Ok(_) => StepControl::Continue,
            Err(err) => {
                warn!(error = %err, "failed to read step input; continuing without pausing");
                self.paused = false;
                StepControl::Continue
            }
        }
    }
}

impl<R: BufRead, W: Write> SearchObserver for InteractiveStepper<R, W> {
    fn on_expand(&mut self, step: &ExpansionStep<'_>) -> StepControl {
        if let Err(err) = self.print_step(step) {
            warn!(error = %err, "failed to write step trace");
        }
        if self.paused {
            self.read_control()
        } else {
            StepControl::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::io::Cursor;

    use cityroute_lib::{
        search_observed, EdgeRecord, EuclideanCost, Graph, NodeRecord, SearchOutcome,
    };

    fn line_graph() -> Graph {
        let nodes = vec![
            NodeRecord::new("A", 0, 0),
            NodeRecord::new("B", 3, 4),
            NodeRecord::new("C", 6, 8),
        ];
        let edges = vec![EdgeRecord::new("A", "B"), EdgeRecord::new("B", "C")];
        Graph::build(&nodes, &edges, &HashSet::new()).expect("graph builds")
    }

    fn run(input: &str) -> (SearchOutcome, String) {
        let graph = line_graph();
        let mut output = Vec::new();
        let mut stepper = InteractiveStepper::new(
            Cursor::new(input.as_bytes()),
            &mut output,
            ColorPalette::plain(),
        );
        let outcome =
            search_observed(&graph, "A", "C", &EuclideanCost, &mut stepper).expect("endpoints");
        drop(stepper);
        (outcome, String::from_utf8(output).expect("utf8 output"))
    }

    #[test]
    fn enter_continues_to_the_goal() {
        let (outcome, output) = run("\n\n\n");
        assert!(matches!(outcome, SearchOutcome::Found(_)));
        assert!(output.contains("Step 1: expanding A (cost 0.00, estimate 10.00)"));
        assert!(output.contains("Step 2: expanding B (cost 5.00, estimate 10.00)"));
        assert!(output.contains("Step 3: expanding C"));
    }

    #[test]
    fn q_cancels_the_search() {
        let (outcome, output) = run("\nq\n");
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert!(output.contains("Step 2: expanding B"));
        assert!(!output.contains("Step 3"));
    }

    #[test]
    fn end_of_input_stops_pausing() {
        let (outcome, output) = run("");
        assert!(matches!(outcome, SearchOutcome::Found(_)));
        assert_eq!(output.matches("Press Enter").count(), 1);
        assert!(output.contains("frontier: <empty>"));
    }
}
