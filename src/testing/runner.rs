//! Scenario execution engine
//!
//! Drives a [`PossessionController`] directly with recording collaborators
//! and simulated timers, so scenarios are exact and need no Bevy app.

use std::time::Duration;

use bevy::prelude::*;

use super::assertions::{AssertionError, ScenarioState, check_sequence, check_state};
use super::fakes::{RecordingBall, RecordingFeedback};
use super::parser::{ScenarioDefinition, Step};
use crate::constants::*;
use crate::shooting::{HolderPose, PossessionController, ShotConfig, ShotContext, SimTimers};

/// Result of running a scenario
#[derive(Debug)]
pub enum TestResult {
    Pass { steps: usize, ticks: u64 },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Controller plus its collaborators for one scenario run
struct ScenarioRig {
    controller: PossessionController,
    ball: RecordingBall,
    timers: SimTimers,
    feedback: RecordingFeedback,
    holder: HolderPose,
    ticks: u64,
}

impl ScenarioRig {
    fn tick(&mut self, dt: Duration) {
        self.timers.advance(dt);
        let mut ctx = ShotContext {
            ball: &mut self.ball,
            timers: &mut self.timers,
            feedback: &mut self.feedback,
        };
        self.controller.on_tick(&self.holder, &mut ctx);
        self.ticks += 1;
    }

    fn apply(&mut self, step: &Step, dt: Duration) -> Result<(), String> {
        match step {
            Step::ChargeStart => {
                let mut ctx = ShotContext {
                    ball: &mut self.ball,
                    timers: &mut self.timers,
                    feedback: &mut self.feedback,
                };
                self.controller.on_charge_start(&mut ctx);
            }
            Step::Tick { count } => {
                for _ in 0..*count {
                    self.tick(dt);
                }
            }
            Step::Release { aim } => {
                let aim = aim.map(Vec3::from_array).unwrap_or(self.holder.aim);
                let mut ctx = ShotContext {
                    ball: &mut self.ball,
                    timers: &mut self.timers,
                    feedback: &mut self.feedback,
                };
                self.controller.on_charge_release(aim, &mut ctx);
            }
            Step::Reset => {
                let mut ctx = ShotContext {
                    ball: &mut self.ball,
                    timers: &mut self.timers,
                    feedback: &mut self.feedback,
                };
                self.controller.reset(&self.holder, &mut ctx);
            }
            Step::Wait { secs } => {
                let wait = Duration::try_from_secs_f64(*secs)
                    .map_err(|_| format!("wait secs must be finite and >= 0, got {}", secs))?;
                self.tick(wait);
            }
            Step::MoveHolder { to } => self.holder.position = Vec3::from_array(*to),
        }
        Ok(())
    }

    fn snapshot(&self) -> ScenarioState {
        ScenarioState {
            state: self.controller.state(),
            charge: self.controller.charge().value(),
            charge_starts: self.feedback.charge_starts,
            fully_charged: self.feedback.fully_charged,
            releases: self.feedback.releases,
            resets: self.feedback.resets.clone(),
            last_impulse: self.feedback.last_release.map(|(_, impulse)| impulse),
            pending_timer: self.controller.pending_reset().is_some(),
            ball_position: self.ball.position,
            ball_velocity: self.ball.velocity,
        }
    }
}

fn shot_config(test: &ScenarioDefinition) -> Result<ShotConfig, String> {
    let defaults = ShotConfig::default();
    let reset_delay = match test.setup.reset_delay {
        Some(secs) => Duration::try_from_secs_f32(secs)
            .map_err(|_| format!("reset_delay must be finite and >= 0, got {}", secs))?,
        None => defaults.reset_delay,
    };
    Ok(ShotConfig {
        charge_step: test.setup.charge_step.unwrap_or(defaults.charge_step),
        base_speed: test.setup.base_speed.unwrap_or(defaults.base_speed),
        reset_delay,
    })
}

/// Run a single scenario and return the result
pub fn run_scenario(test: &ScenarioDefinition) -> TestResult {
    if let Some(bad) = test
        .expect
        .state
        .iter()
        .find(|a| a.after_step == 0 || a.after_step > test.steps.len())
    {
        return TestResult::Error {
            message: format!(
                "after_step {} outside 1..={}",
                bad.after_step,
                test.steps.len()
            ),
        };
    }

    let config = match shot_config(test) {
        Ok(config) => config,
        Err(message) => return TestResult::Error { message },
    };

    let holder = HolderPose::new(
        test.setup.holder.map(Vec3::from_array).unwrap_or(SHOOTER_SPAWN),
        test.setup
            .aim
            .map(Vec3::from_array)
            .unwrap_or(Vec3::NEG_Z)
            .normalize_or_zero(),
    );
    let mut rig = ScenarioRig {
        controller: PossessionController::new(config),
        ball: RecordingBall {
            position: holder.hold_point(),
            ..default()
        },
        timers: SimTimers::new(),
        feedback: RecordingFeedback::default(),
        holder,
        ticks: 0,
    };
    let dt = Duration::from_secs_f64(1.0 / PHYSICS_HZ);

    for (index, step) in test.steps.iter().enumerate() {
        let step_number = index + 1;
        if let Err(message) = rig.apply(step, dt) {
            return TestResult::Error {
                message: format!("step {}: {}", step_number, message),
            };
        }

        let state = rig.snapshot();
        for assertion in test.expect.state.iter().filter(|a| a.after_step == step_number) {
            if let Err(mut error) = check_state(assertion, &state) {
                error.step = Some(step_number);
                return TestResult::Fail { error };
            }
        }
    }

    if let Err(error) = check_sequence(&test.expect.sequence, &rig.feedback.log) {
        return TestResult::Fail { error };
    }

    TestResult::Pass {
        steps: test.steps.len(),
        ticks: rig.ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parser::{parse_scenario, parse_scenario_file};
    use crate::testing::{SCENARIOS_DIR, discover_scenarios};
    use std::path::Path;

    #[test]
    fn test_inline_full_charge() {
        let scenario = parse_scenario(
            r#"
name = "inline"
[[steps]]
action = "charge_start"
[[steps]]
action = "tick"
count = 50
[[steps]]
action = "release"

[[expect.state]]
after_step = 2
checks = ["charge = 100", "fully_charged = 1"]

[[expect.state]]
after_step = 3
checks = ["state = Released", "impulse.x = 0", "impulse.y = 17", "impulse.z = -15"]
"#,
        )
        .unwrap();
        match run_scenario(&scenario) {
            TestResult::Pass { ticks, .. } => assert_eq!(ticks, 50),
            other => panic!("expected pass, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_carries_step() {
        let scenario = parse_scenario(
            r#"
name = "wrong"
[[steps]]
action = "charge_start"
[[expect.state]]
after_step = 1
checks = ["state = Held"]
"#,
        )
        .unwrap();
        match run_scenario(&scenario) {
            TestResult::Fail { error } => assert_eq!(error.step, Some(1)),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_step_is_error() {
        let scenario = parse_scenario(
            "name = \"bad\"\n[[expect.state]]\nafter_step = 3\nchecks = []\n",
        )
        .unwrap();
        assert!(matches!(run_scenario(&scenario), TestResult::Error { .. }));
    }

    #[test]
    fn test_negative_reset_delay_is_error() {
        let scenario = parse_scenario(
            "name = \"neg\"\n[setup]\nreset_delay = -1.0\n[[steps]]\naction = \"charge_start\"\n",
        )
        .unwrap();
        match run_scenario(&scenario) {
            TestResult::Error { message } => assert!(message.contains("reset_delay")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_infinite_wait_is_error() {
        let scenario = parse_scenario(
            "name = \"forever\"\n[[steps]]\naction = \"wait\"\nsecs = inf\n",
        )
        .unwrap();
        match run_scenario(&scenario) {
            TestResult::Error { message } => assert!(message.starts_with("step 1")),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_bundled_scenarios_pass() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join(SCENARIOS_DIR);
        let files = discover_scenarios(&dir, None);
        assert!(!files.is_empty(), "no scenarios under {}", dir.display());

        for path in files {
            let scenario = parse_scenario_file(&path).unwrap();
            match run_scenario(&scenario) {
                TestResult::Pass { .. } => {}
                TestResult::Fail { error } => panic!("{}: {}", path.display(), error),
                TestResult::Error { message } => panic!("{}: {}", path.display(), message),
            }
        }
    }
}
