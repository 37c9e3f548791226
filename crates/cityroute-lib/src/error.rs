use thiserror::Error;

/// Convenient result alias for the cityroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Exhausting the frontier or cancelling a search are ordinary outcomes and
/// are reported through [`crate::SearchOutcome`], never through this type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when two location records share a name.
    #[error("duplicate location name: {name}")]
    DuplicateNode { name: String },

    /// Raised when a connection starts at a location that does not exist.
    #[error("connection {from} -> {to} starts at unknown location {from}")]
    UnknownEdgeSource { from: String, to: String },

    /// Raised when a connection leads to a location that does not exist.
    #[error("connection {from} -> {to} leads to unknown location {to}")]
    UnknownEdgeTarget { from: String, to: String },

    /// Raised when a location name could not be found in the graph.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a heuristic selector is not recognised.
    #[error("unknown heuristic '{value}'; expected 'distance' (1) or 'fewest-links' (2)")]
    UnknownHeuristic { value: String },

    /// Raised when a connections line cannot be parsed.
    #[error("malformed connection on line {line}: {message}")]
    MalformedConnection { line: usize, message: String },

    /// Raised when a computed route plan lacks any locations.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
