//! Capabilities the possession controller consumes but does not own

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::HOLD_OFFSET;

/// Pose of whoever is holding the ball, sampled once per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolderPose {
    pub position: Vec3,
    /// Unit aim heading
    pub aim: Vec3,
}

impl HolderPose {
    pub fn new(position: Vec3, aim: Vec3) -> Self {
        Self { position, aim }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            aim: transform.forward().as_vec3(),
        }
    }

    /// Where a held ball sits
    pub fn hold_point(&self) -> Vec3 {
        self.position + HOLD_OFFSET
    }
}

/// Handle to the ball's rigid body
pub trait BallBody {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn set_velocity(&mut self, velocity: Vec3);
    fn set_angular_velocity(&mut self, angular_velocity: Vec3);
    fn apply_impulse(&mut self, impulse: Vec3, at: Vec3);
}

/// Opaque id for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Cancellable one-shot timers
pub trait TimerService {
    fn schedule_after(&mut self, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
    /// True exactly once: the first poll after the timer has expired.
    fn take_fired(&mut self, handle: TimerHandle) -> bool;
}

/// Why the ball went back to the holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetReason {
    /// Player pressed reset (or a new game started)
    Manual,
    /// Post-release timer expired
    Timeout,
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetReason::Manual => write!(f, "manual"),
            ResetReason::Timeout => write!(f, "timeout"),
        }
    }
}

impl FromStr for ResetReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(ResetReason::Manual),
            "timeout" => Ok(ResetReason::Timeout),
            _ => Err(format!("unknown reset reason: {}", s)),
        }
    }
}

/// Fire-and-forget notifications for UI and logging
pub trait ShotFeedback {
    fn charge_started(&mut self) {}
    fn fully_charged(&mut self) {}
    fn shot_released(&mut self, _charge: u32, _impulse: Vec3) {}
    fn ball_reset(&mut self, _reason: ResetReason) {}
}

/// Feedback sink that drops everything
pub struct NoFeedback;

impl ShotFeedback for NoFeedback {}

/// Collaborators borrowed for the duration of one controller call
pub struct ShotContext<'a> {
    pub ball: &'a mut dyn BallBody,
    pub timers: &'a mut dyn TimerService,
    pub feedback: &'a mut dyn ShotFeedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_reason_text_matches_display() {
        for reason in [ResetReason::Manual, ResetReason::Timeout] {
            assert_eq!(reason.to_string().parse::<ResetReason>(), Ok(reason));
        }
        assert!("dunk".parse::<ResetReason>().is_err());
    }
}
