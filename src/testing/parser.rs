//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Complete scenario definition from TOML file
#[derive(Debug, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub setup: ScenarioSetup,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub expect: ScenarioExpectations,
}

/// Holder pose and controller tuning at the start of a scenario
#[derive(Debug, Default, Deserialize)]
pub struct ScenarioSetup {
    /// Holder eye position, defaults to the free-throw spot
    pub holder: Option<[f32; 3]>,
    /// Aim heading, defaults to facing the hoop (-Z)
    pub aim: Option<[f32; 3]>,
    pub charge_step: Option<u32>,
    pub base_speed: Option<f32>,
    pub reset_delay: Option<f32>,
}

/// One scripted action against the controller
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    ChargeStart,
    /// Advance one fixed timestep and tick, `count` times
    Tick {
        #[serde(default = "default_count")]
        count: u32,
    },
    /// Release with the setup aim, or an override
    Release { aim: Option<[f32; 3]> },
    Reset,
    /// Jump the clock forward by `secs`, then tick once
    Wait { secs: f64 },
    /// Move the holder (the held ball follows on the next tick)
    MoveHolder { to: [f32; 3] },
}

fn default_count() -> u32 {
    1
}

/// Expected scenario outcomes
#[derive(Debug, Default, Deserialize)]
pub struct ScenarioExpectations {
    /// Feedback notifications in order, e.g. `["ChargeStart", "ShotRelease"]`
    #[serde(default)]
    pub sequence: Vec<String>,
    /// State checks after given steps (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// State assertion after a step (1-based index into `steps`)
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_step: usize,
    #[serde(default)]
    pub checks: Vec<String>,
}

pub fn parse_scenario(content: &str) -> Result<ScenarioDefinition, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

/// Parse a scenario file from path
pub fn parse_scenario_file(path: &Path) -> Result<ScenarioDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    parse_scenario(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}
