//! Event type definitions for the logging system

use serde::{Deserialize, Serialize};

use crate::camera::CameraMode;
use crate::shooting::ResetReason;
use crate::tuning::PhysicsTweaks;

/// Tuning snapshot for analytics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    // Shot
    pub base_speed: f32,
    pub charge_step: u32,
    pub reset_delay: f32,
    // Ball physics
    pub gravity: f32,
    pub ball_bounce: f32,
    pub rim_bounce: f32,
    pub backboard_bounce: f32,
}

impl From<&PhysicsTweaks> for GameConfig {
    fn from(tweaks: &PhysicsTweaks) -> Self {
        Self {
            base_speed: tweaks.base_speed,
            charge_step: tweaks.charge_step,
            reset_delay: tweaks.reset_delay,
            gravity: tweaks.gravity,
            ball_bounce: tweaks.ball_bounce,
            rim_bounce: tweaks.rim_bounce,
            backboard_bounce: tweaks.backboard_bounce,
        }
    }
}

/// All game events that can be logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (generated once per game launch)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,
    },
    /// Tuning snapshot (logged after session start)
    Config(GameConfig),

    // === Shot Events ===
    /// Player began charging
    ChargeStart,
    /// Meter reached maximum this cycle
    FullyCharged,
    /// Ball left the hands
    ShotRelease { charge: u32, impulse: (f32, f32, f32) },
    /// Ball returned to the holder
    BallReset { reason: ResetReason },

    // === Scoring Events ===
    /// Ball dropped through the hoop
    Goal { score: u32 },

    // === View Events ===
    CameraMode { mode: CameraMode },
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SS",
            GameEvent::Config(_) => "CF",
            GameEvent::ChargeStart => "CS",
            GameEvent::FullyCharged => "FC",
            GameEvent::ShotRelease { .. } => "SR",
            GameEvent::BallReset { .. } => "BR",
            GameEvent::Goal { .. } => "G",
            GameEvent::CameraMode { .. } => "CM",
        }
    }
}
