//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use cityroute_lib::{load_roadmap, DatasetPaths, RoadMap};

/// Path to fixtures directory shared by the workspace tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Load the checked-in fixture map.
#[allow(dead_code)]
pub fn fixture_roadmap() -> RoadMap {
    load_roadmap(&DatasetPaths::in_dir(&fixtures_dir())).expect("fixture map loads")
}

/// Small deterministic pseudo-random generator for building test graphs.
#[allow(dead_code)]
pub struct Lcg(u64);

#[allow(dead_code)]
impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}
