//! Text-file loader for road maps.
//!
//! Two whitespace-separated files describe a map:
//!
//! - `locations.txt`: one `NAME X Y` line per location.
//! - `connections.txt`: one `NAME COUNT TARGET...` line per location, listing
//!   the locations reachable from `NAME`.
//!
//! Either file may end with a line reading `END`. Unparsable location lines
//! are skipped with a warning; unparsable connection lines are rejected.

use std::collections::{HashMap, HashSet};
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{EdgeRecord, Graph, NodeRecord, Position};

/// Default filename for the locations file inside a data directory.
pub const LOCATIONS_FILENAME: &str = "locations.txt";
/// Default filename for the connections file inside a data directory.
pub const CONNECTIONS_FILENAME: &str = "connections.txt";
/// Environment variable naming the default data directory.
pub const DATA_DIR_ENV: &str = "CITYROUTE_DATA_DIR";

const END_MARKER: &str = "END";

/// Locations of the two map files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub locations: PathBuf,
    pub connections: PathBuf,
}

impl DatasetPaths {
    /// Use the default filenames inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            locations: dir.join(LOCATIONS_FILENAME),
            connections: dir.join(CONNECTIONS_FILENAME),
        }
    }

    /// Resolve map file paths.
    ///
    /// The data directory is `data_dir` when given, otherwise the directory
    /// named by `CITYROUTE_DATA_DIR`, otherwise the current directory.
    /// Explicit `locations`/`connections` paths override the defaults.
    pub fn resolve(
        data_dir: Option<&Path>,
        locations: Option<&Path>,
        connections: Option<&Path>,
    ) -> Self {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => env::var_os(DATA_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        let defaults = Self::in_dir(&dir);
        let resolved = Self {
            locations: locations
                .map(Path::to_path_buf)
                .unwrap_or(defaults.locations),
            connections: connections
                .map(Path::to_path_buf)
                .unwrap_or(defaults.connections),
        };
        debug!(
            locations = %resolved.locations.display(),
            connections = %resolved.connections.display(),
            "resolved map files"
        );
        resolved
    }
}

/// Parsed map records, ready to be turned into a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct RoadMap {
    pub locations: Vec<NodeRecord>,
    pub connections: Vec<EdgeRecord>,
    /// Number of location lines skipped because they could not be parsed.
    pub skipped_locations: usize,
    positions: HashMap<String, Position>,
}

impl RoadMap {
    pub fn new(locations: Vec<NodeRecord>, connections: Vec<EdgeRecord>) -> Self {
        let positions = locations
            .iter()
            .map(|record| (record.name.clone(), record.position))
            .collect();
        Self {
            locations,
            connections,
            skipped_locations: 0,
            positions,
        }
    }

    /// Coordinates of a location by name.
    pub fn position(&self, name: &str) -> Option<Position> {
        self.positions.get(name).copied()
    }

    /// Build the search graph, removing every location named in `excluded`.
    pub fn build_graph(&self, excluded: &HashSet<String>) -> Result<Graph> {
        Graph::build(&self.locations, &self.connections, excluded)
    }
}

/// Load both map files and parse them into a [`RoadMap`].
pub fn load_roadmap(paths: &DatasetPaths) -> Result<RoadMap> {
    let locations = parse_locations(BufReader::new(File::open(&paths.locations)?))?;
    let connections = parse_connections(BufReader::new(File::open(&paths.connections)?))?;

    let skipped = locations.skipped;
    let mut map = RoadMap::new(locations.records, connections);
    map.skipped_locations = skipped;

    debug!(
        locations = map.locations.len(),
        connections = map.connections.len(),
        skipped,
        "loaded road map"
    );
    Ok(map)
}

/// Location records parsed from a reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLocations {
    pub records: Vec<NodeRecord>,
    pub skipped: usize,
}

/// Parse `NAME X Y` lines, skipping (and logging) any that are malformed.
pub fn parse_locations<R: BufRead>(reader: R) -> Result<ParsedLocations> {
    let mut parsed = ParsedLocations::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == END_MARKER {
            break;
        }

        match parse_location_line(trimmed) {
            Some(record) => parsed.records.push(record),
            None => {
                warn!(line = line_no, content = trimmed, "skipping malformed location line");
                parsed.skipped += 1;
            }
        }
    }
    Ok(parsed)
}

fn parse_location_line(line: &str) -> Option<NodeRecord> {
    let mut fields = line.split_whitespace();
    let name = fields.next()?;
    let x = fields.next()?.parse().ok()?;
    let y = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some(NodeRecord::new(name, x, y))
}

/// Parse `NAME COUNT TARGET...` lines into directed edge records.
///
/// The number of targets must match `COUNT`.
pub fn parse_connections<R: BufRead>(reader: R) -> Result<Vec<EdgeRecord>> {
    let mut edges = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == END_MARKER {
            break;
        }

        let mut fields = trimmed.split_whitespace();
        let Some(from) = fields.next() else {
            continue;
        };
        let count: usize = fields
            .next()
            .ok_or_else(|| malformed(line_no, "missing connection count"))?
            .parse()
            .map_err(|_| malformed(line_no, "connection count is not a number"))?;
        let targets: Vec<&str> = fields.collect();
        if targets.len() != count {
            return Err(malformed(
                line_no,
                &format!("expected {count} targets, found {}", targets.len()),
            ));
        }

        edges.extend(targets.into_iter().map(|to| EdgeRecord::new(from, to)));
    }
    Ok(edges)
}

fn malformed(line: usize, message: &str) -> Error {
    Error::MalformedConnection {
        line,
        message: message.to_string(),
    }
}
