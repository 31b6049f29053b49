//! Global gameplay tuning settings (decoupled from UI)

use std::time::Duration;

use bevy::log::warn;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::ball::BallPhysicsParams;
use crate::constants::*;
use crate::shooting::ShotConfig;

fn default_base_speed() -> f32 {
    BASE_SPEED
}
fn default_charge_step() -> u32 {
    CHARGE_STEP
}
fn default_reset_delay() -> f32 {
    RESET_DELAY
}
fn default_gravity() -> f32 {
    GRAVITY
}
fn default_ball_bounce() -> f32 {
    BALL_BOUNCE
}
fn default_rim_bounce() -> f32 {
    RIM_BOUNCE
}
fn default_backboard_bounce() -> f32 {
    BACKBOARD_BOUNCE
}
fn default_linear_damping() -> f32 {
    BALL_LINEAR_DAMPING
}
fn default_angular_damping() -> f32 {
    BALL_ANGULAR_DAMPING
}

/// Path to global gameplay tuning config
pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";

/// Serializable tuning values stored in config.
/// Every field is optional in the file and falls back to its constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameplayTuning {
    #[serde(default = "default_base_speed")]
    pub base_speed: f32,
    #[serde(default = "default_charge_step")]
    pub charge_step: u32,
    #[serde(default = "default_reset_delay")]
    pub reset_delay: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_ball_bounce")]
    pub ball_bounce: f32,
    #[serde(default = "default_rim_bounce")]
    pub rim_bounce: f32,
    #[serde(default = "default_backboard_bounce")]
    pub backboard_bounce: f32,
    #[serde(default = "default_linear_damping")]
    pub linear_damping: f32,
    #[serde(default = "default_angular_damping")]
    pub angular_damping: f32,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            base_speed: default_base_speed(),
            charge_step: default_charge_step(),
            reset_delay: default_reset_delay(),
            gravity: default_gravity(),
            ball_bounce: default_ball_bounce(),
            rim_bounce: default_rim_bounce(),
            backboard_bounce: default_backboard_bounce(),
            linear_damping: default_linear_damping(),
            angular_damping: default_angular_damping(),
        }
    }
}

impl GameplayTuning {
    pub fn apply_to(&self, tweaks: &mut PhysicsTweaks) {
        tweaks.base_speed = self.base_speed.max(0.0);
        tweaks.charge_step = self.charge_step.clamp(1, MAX_POWER);
        tweaks.reset_delay = if self.reset_delay.is_finite() {
            self.reset_delay.clamp(0.0, MAX_RESET_DELAY)
        } else {
            RESET_DELAY
        };
        tweaks.gravity = self.gravity;
        tweaks.ball_bounce = self.ball_bounce.clamp(0.0, 1.0);
        tweaks.rim_bounce = self.rim_bounce.clamp(0.0, 1.0);
        tweaks.backboard_bounce = self.backboard_bounce.clamp(0.0, 1.0);
        tweaks.linear_damping = self.linear_damping.clamp(0.0, 1.0);
        tweaks.angular_damping = self.angular_damping.clamp(0.0, 1.0);
    }
}

/// Runtime-adjustable shot and physics values
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PhysicsTweaks {
    pub base_speed: f32,
    pub charge_step: u32,
    pub reset_delay: f32,
    pub gravity: f32,
    pub ball_bounce: f32,
    pub rim_bounce: f32,
    pub backboard_bounce: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for PhysicsTweaks {
    fn default() -> Self {
        let mut tweaks = Self {
            base_speed: 0.0,
            charge_step: 0,
            reset_delay: 0.0,
            gravity: 0.0,
            ball_bounce: 0.0,
            rim_bounce: 0.0,
            backboard_bounce: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
        };
        GameplayTuning::default().apply_to(&mut tweaks);
        tweaks
    }
}

impl PhysicsTweaks {
    pub fn shot_config(&self) -> ShotConfig {
        ShotConfig {
            charge_step: self.charge_step,
            base_speed: self.base_speed,
            reset_delay: Duration::try_from_secs_f32(self.reset_delay)
                .unwrap_or(Duration::from_secs_f32(RESET_DELAY)),
        }
    }

    pub fn physics_params(&self) -> BallPhysicsParams {
        BallPhysicsParams {
            gravity: self.gravity,
            floor_bounce: self.ball_bounce,
            rim_bounce: self.rim_bounce,
            backboard_bounce: self.backboard_bounce,
            linear_damping: self.linear_damping,
            angular_damping: self.angular_damping,
        }
    }
}

pub fn parse_gameplay_tuning(contents: &str) -> Result<GameplayTuning, String> {
    serde_json::from_str(contents).map_err(|e| e.to_string())
}

pub fn load_gameplay_tuning_from_file(path: &str) -> Result<GameplayTuning, String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    parse_gameplay_tuning(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
}

pub fn apply_global_tuning(tweaks: &mut PhysicsTweaks) -> Result<(), String> {
    match load_gameplay_tuning_from_file(GAMEPLAY_TUNING_FILE) {
        Ok(tuning) => {
            tuning.apply_to(tweaks);
            Ok(())
        }
        Err(err) => {
            GameplayTuning::default().apply_to(tweaks);
            Err(err)
        }
    }
}

pub fn load_global_tuning_system(mut tweaks: bevy::prelude::ResMut<PhysicsTweaks>) {
    if let Err(err) = apply_global_tuning(&mut tweaks) {
        warn!("{}, using default tuning", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let tuning = parse_gameplay_tuning(r#"{ "base_speed": 18.0, "charge_step": 4 }"#).unwrap();
        assert_eq!(tuning.base_speed, 18.0);
        assert_eq!(tuning.charge_step, 4);
        assert_eq!(tuning.reset_delay, RESET_DELAY);
        assert_eq!(tuning.gravity, GRAVITY);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(parse_gameplay_tuning("{}").unwrap(), GameplayTuning::default());
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(parse_gameplay_tuning("{ base_speed: }").is_err());
    }

    #[test]
    fn test_apply_clamps_out_of_range() {
        let tuning = GameplayTuning {
            charge_step: 0,
            ball_bounce: 3.0,
            reset_delay: -1.0,
            ..GameplayTuning::default()
        };
        let mut tweaks = PhysicsTweaks::default();
        tuning.apply_to(&mut tweaks);
        assert_eq!(tweaks.charge_step, 1);
        assert_eq!(tweaks.ball_bounce, 1.0);
        assert_eq!(tweaks.reset_delay, 0.0);

        let huge = GameplayTuning {
            reset_delay: 1e30,
            ..GameplayTuning::default()
        };
        huge.apply_to(&mut tweaks);
        assert_eq!(tweaks.reset_delay, MAX_RESET_DELAY);
        assert_eq!(
            tweaks.shot_config().reset_delay,
            Duration::from_secs_f32(MAX_RESET_DELAY)
        );

        let inf = parse_gameplay_tuning(r#"{ "reset_delay": 1e39 }"#).unwrap();
        inf.apply_to(&mut tweaks);
        assert_eq!(tweaks.reset_delay, RESET_DELAY);
    }

    #[test]
    fn test_shot_config_survives_bad_delay() {
        let tweaks = PhysicsTweaks {
            reset_delay: f32::INFINITY,
            ..PhysicsTweaks::default()
        };
        assert_eq!(tweaks.shot_config().reset_delay, ShotConfig::default().reset_delay);
    }

    #[test]
    fn test_default_tweaks_match_constants() {
        let tweaks = PhysicsTweaks::default();
        let config = tweaks.shot_config();
        assert_eq!(config, ShotConfig::default());
        assert_eq!(tweaks.physics_params(), BallPhysicsParams::default());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_gameplay_tuning_from_file("config/does_not_exist.json").unwrap_err();
        assert!(err.contains("does_not_exist.json"));
    }
}
