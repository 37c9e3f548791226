//! Map command handler: lists every location with its outgoing connections.

use std::collections::HashSet;
use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use cityroute_lib::{DatasetPaths, Graph, Position};

use crate::commands::route::load_map;
use crate::output::{render_json, OutputFormat};

/// Arguments for the map command.
#[derive(Debug, Clone, Default)]
pub struct MapCommandArgs {
    /// Locations removed before listing.
    pub avoid: Vec<String>,
}

/// One listed location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    pub name: String,
    pub position: Position,
    pub connections: Vec<String>,
}

/// Whole-map listing with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapListing {
    pub locations: Vec<MapEntry>,
    pub connection_count: usize,
}

impl MapListing {
    /// Collect entries in name order.
    pub fn from_graph(graph: &Graph) -> Self {
        let locations = graph
            .nodes()
            .map(|(id, node)| MapEntry {
                name: node.name().to_string(),
                position: node.position(),
                connections: graph
                    .neighbours(id)
                    .iter()
                    .map(|&target| graph.node(target).name().to_string())
                    .collect(),
            })
            .collect();
        Self {
            locations,
            connection_count: graph.edge_count(),
        }
    }

    /// `NAME (x, y) -> [T1, T2]` per location followed by totals.
    pub fn render_text(&self) -> String {
        let mut buffer = String::new();
        for entry in &self.locations {
            let _ = writeln!(
                buffer,
                "{} {} -> [{}]",
                entry.name,
                entry.position,
                entry.connections.join(", ")
            );
        }
        let _ = writeln!(
            buffer,
            "\n{} locations, {} connections",
            self.locations.len(),
            self.connection_count
        );
        buffer
    }
}

/// Handle the map subcommand.
pub fn handle_map_command(
    paths: &DatasetPaths,
    format: OutputFormat,
    args: &MapCommandArgs,
) -> Result<()> {
    let map = load_map(paths)?;
    let excluded: HashSet<String> = args.avoid.iter().cloned().collect();
    let graph = map
        .build_graph(&excluded)
        .context("failed to build map graph")?;
    let listing = MapListing::from_graph(&graph);

    match format {
        OutputFormat::Json => render_json(&listing).context("failed to write map")?,
        OutputFormat::Text | OutputFormat::Basic => print!("{}", listing.render_text()),
    }
    Ok(())
}
