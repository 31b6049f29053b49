//! Recording collaborators for driving the possession controller without Bevy

use bevy::prelude::*;

use crate::constants::BALL_MASS;
use crate::shooting::{BallBody, ResetReason, ShotFeedback};

/// A command the controller issued to the ball body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyCommand {
    SetPosition(Vec3),
    SetVelocity(Vec3),
    SetAngularVelocity(Vec3),
    ApplyImpulse { impulse: Vec3, at: Vec3 },
}

/// Ball body that tracks its state and logs every command
#[derive(Debug, Default)]
pub struct RecordingBall {
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub commands: Vec<BodyCommand>,
}

impl BallBody for RecordingBall {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.commands.push(BodyCommand::SetPosition(position));
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.commands.push(BodyCommand::SetVelocity(velocity));
    }

    fn set_angular_velocity(&mut self, angular_velocity: Vec3) {
        self.angular_velocity = angular_velocity;
        self.commands
            .push(BodyCommand::SetAngularVelocity(angular_velocity));
    }

    fn apply_impulse(&mut self, impulse: Vec3, at: Vec3) {
        self.velocity += impulse / BALL_MASS;
        self.commands.push(BodyCommand::ApplyImpulse { impulse, at });
    }
}

/// Counts feedback notifications and keeps their order
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    /// Notification names in arrival order
    pub log: Vec<&'static str>,
    pub charge_starts: u32,
    pub fully_charged: u32,
    pub releases: u32,
    pub last_release: Option<(u32, Vec3)>,
    pub resets: Vec<ResetReason>,
}

impl ShotFeedback for RecordingFeedback {
    fn charge_started(&mut self) {
        self.charge_starts += 1;
        self.log.push("ChargeStart");
    }

    fn fully_charged(&mut self) {
        self.fully_charged += 1;
        self.log.push("FullyCharged");
    }

    fn shot_released(&mut self, charge: u32, impulse: Vec3) {
        self.releases += 1;
        self.log.push("ShotRelease");
        self.last_release = Some((charge, impulse));
    }

    fn ball_reset(&mut self, reason: ResetReason) {
        self.resets.push(reason);
        self.log.push("BallReset");
    }
}
