//! Systems wiring the possession controller into the fixed-step loop

use bevy::prelude::*;

use super::collaborators::{BallBody, HolderPose, ShotContext};
use super::possession::PossessionController;
use super::timers::SimTimers;
use crate::ball::{AngularVelocity, Ball, Velocity};
use crate::constants::*;
use crate::events::EventBus;
use crate::input::PlayerInput;
use crate::player::Shooter;
use crate::tuning::PhysicsTweaks;

/// Moment of inertia of a solid sphere
const BALL_INERTIA: f32 = 0.4 * BALL_MASS * BALL_RADIUS * BALL_RADIUS;

/// [`BallBody`] over the ball entity's components
pub struct BallBodyMut<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut Velocity,
    pub angular_velocity: &'a mut AngularVelocity,
}

impl BallBody for BallBodyMut<'_> {
    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position;
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity.0 = velocity;
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular_velocity.0 = angular_velocity;
        if angular_velocity == Vec3::ZERO {
            self.transform.rotation = Quat::IDENTITY;
        }
    }

    fn apply_impulse(&mut self, impulse: Vec3, at: Vec3) {
        self.velocity.0 += impulse / BALL_MASS;
        let lever = at - self.transform.translation;
        self.angular_velocity.0 += lever.cross(impulse) / BALL_INERTIA;
    }
}

/// Advance timers, apply buffered input, and tick the possession controller.
/// Runs once per fixed step so charge rate is independent of frame rate.
pub fn drive_possession(
    fixed_time: Res<Time<Fixed>>,
    mut input: ResMut<PlayerInput>,
    mut controller: ResMut<PossessionController>,
    mut timers: ResMut<SimTimers>,
    mut event_bus: ResMut<EventBus>,
    shooter_query: Query<&Transform, (With<Shooter>, Without<Ball>)>,
    mut ball_query: Query<(&mut Transform, &mut Velocity, &mut AngularVelocity), With<Ball>>,
) {
    timers.advance(fixed_time.timestep());

    let Ok(shooter_transform) = shooter_query.single() else {
        return;
    };
    let Ok((transform, velocity, angular_velocity)) = ball_query.single_mut() else {
        return;
    };

    let holder = HolderPose::from_transform(shooter_transform);
    let mut body = BallBodyMut {
        transform: transform.into_inner(),
        velocity: velocity.into_inner(),
        angular_velocity: angular_velocity.into_inner(),
    };
    let mut ctx = ShotContext {
        ball: &mut body,
        timers: &mut *timers,
        feedback: &mut *event_bus,
    };

    if input.take_reset_pressed() {
        controller.reset(&holder, &mut ctx);
    }
    if input.take_charge_pressed() {
        controller.on_charge_start(&mut ctx);
    }
    if input.take_charge_released()
        && let Some(impulse) = controller.on_charge_release(holder.aim, &mut ctx)
    {
        info!(
            "Shot released: impulse ({:.2}, {:.2}, {:.2})",
            impulse.x, impulse.y, impulse.z
        );
    }

    controller.on_tick(&holder, &mut ctx);
}

/// Push tuning changes into the controller
pub fn sync_controller_config(
    tweaks: Res<PhysicsTweaks>,
    mut controller: ResMut<PossessionController>,
) {
    if tweaks.is_changed() {
        controller.set_config(tweaks.shot_config());
    }
}
