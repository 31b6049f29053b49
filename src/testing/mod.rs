//! Scenario testing system for deterministic controller testing
//!
//! Provides infrastructure for running scripted shot sequences against the
//! possession controller and checking its state and notifications.

pub mod assertions;
pub mod fakes;
pub mod parser;
pub mod runner;

use std::fs;
use std::path::{Path, PathBuf};

pub use assertions::{AssertionError, ScenarioState, check_sequence, check_state};
pub use fakes::{BodyCommand, RecordingBall, RecordingFeedback};
pub use parser::{ScenarioDefinition, ScenarioExpectations, ScenarioSetup, StateAssertion, Step};
pub use runner::{TestResult, run_scenario};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// Collect `.toml` scenarios under `base`, sorted, optionally filtered by
/// a substring of their path relative to `base`
pub fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    discover_recursive(base, base, filter, &mut found);
    found.sort();
    found
}

fn discover_recursive(base: &Path, current: &Path, filter: Option<&str>, found: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(current) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            discover_recursive(base, &path, filter, found);
        } else if path.extension().map(|e| e == "toml").unwrap_or(false) {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            found.push(path);
        }
    }
}
