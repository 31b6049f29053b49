//! Simulation setup systems
//!
//! Contains entity spawning for headless simulation and the fixed-step
//! system chain used by both the game and the headless app.

use bevy::prelude::*;

use crate::ball::{AngularVelocity, Ball, Velocity, ball_physics};
use crate::constants::*;
use crate::menu::menu_closed;
use crate::player::{spawn_shooter, turn_shooter};
use crate::scoring::check_scoring;
use crate::shooting::{drive_possession, sync_controller_config};
use crate::world::spawn_score_sensor;

/// Setup system for simulation: shooter, a mesh-less ball, and the score sensor
pub fn sim_setup(mut commands: Commands) {
    spawn_shooter(&mut commands);
    commands.spawn((
        Transform::from_translation(SHOOTER_SPAWN + HOLD_OFFSET),
        Ball,
        Velocity::default(),
        AngularVelocity::default(),
    ));
    spawn_score_sensor(&mut commands);
}

/// Register the per-step gameplay chain.
///
/// Order matters: aim, then possession (timers, input, controller tick),
/// then ballistics for a released ball, then the score check.
pub fn add_fixed_step_systems(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (
            sync_controller_config,
            turn_shooter,
            drive_possession,
            ball_physics,
            check_scoring,
        )
            .chain()
            .run_if(menu_closed),
    );
}
