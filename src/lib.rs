//! Hoopshot - a first-person basketball shooting game built with Bevy
//!
//! This crate provides all game components, resources, and systems organized into modules.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod events;
pub mod settings;
pub mod simulation;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod camera;
pub mod input;
pub mod menu;
pub mod player;
pub mod scoring;
pub mod shooting;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ball::{AngularVelocity, Ball, BallMotion, BallPhysicsParams, Velocity};
pub use camera::{CameraMode, GameCamera, OrbitState};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use events::{
    BusEvent, EventBus, EventLogConfig, EventLogger, GameConfig, GameEvent, update_event_bus_time,
};
pub use input::PlayerInput;
pub use menu::{MainMenu, menu_closed, menu_open};
pub use player::Shooter;
pub use scoring::{Score, ScoreSensor};
pub use settings::{CurrentSettings, InitSettings, save_settings_system};
pub use shooting::{
    BallBody, ChargeLevel, HolderPose, PossessionController, PossessionState, ResetReason,
    ShotConfig, ShotContext, ShotFeedback, SimTimers, TimerHandle, TimerService, compute_impulse,
};
pub use tuning::{GameplayTuning, PhysicsTweaks};
