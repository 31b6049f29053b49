//! Scoring module - score tracking and check_scoring system

use bevy::prelude::*;

use crate::ball::{Ball, Velocity};
use crate::constants::*;
use crate::events::{EventBus, GameEvent};

/// Points scored this session
#[derive(Resource, Default, Debug)]
pub struct Score {
    pub points: u32,
}

/// Trigger disc under the rim.
/// `inside` remembers whether the ball was in the volume last step so a
/// single pass can only score once.
#[derive(Component, Default, Debug)]
pub struct ScoreSensor {
    pub inside: bool,
    /// Ball translation seen on the previous step
    pub last_ball: Option<Vec3>,
}

/// Centre of the sensor disc
pub fn sensor_center() -> Vec3 {
    HOOP_POSITION - Vec3::Y * SENSOR_DROP
}

/// Whether the ball centre moving from `prev` to `curr` touched the sensor
/// disc. Sweeping the step keeps fast drops from tunnelling past the thin slab.
pub fn sweeps_sensor(prev: Vec3, curr: Vec3, center: Vec3) -> bool {
    let bottom = center.y - SENSOR_HALF_HEIGHT;
    let top = center.y + SENSOR_HALF_HEIGHT;
    let low = prev.y.min(curr.y);
    let high = prev.y.max(curr.y);
    if high < bottom || low > top {
        return false;
    }

    // Point on the step closest to the disc plane
    let target_y = center.y.clamp(low, high);
    let span = curr.y - prev.y;
    let t = if span.abs() > f32::EPSILON {
        ((target_y - prev.y) / span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let point = prev.lerp(curr, t);

    let radial = Vec2::new(point.x - center.x, point.z - center.z);
    radial.length_squared() < SENSOR_RADIUS * SENSOR_RADIUS
}

/// Returns true when this step is a fresh downward entry
pub fn register_pass(sensor: &mut ScoreSensor, inside: bool, velocity: Vec3) -> bool {
    let entered = inside && !sensor.inside;
    sensor.inside = inside;
    entered && velocity.y < -SENSOR_MIN_FALL_SPEED
}

/// Award a point when the ball drops through the hoop.
/// Possession is untouched; the ball keeps flying until its reset.
pub fn check_scoring(
    mut score: ResMut<Score>,
    mut event_bus: ResMut<EventBus>,
    ball_query: Query<(&Transform, &Velocity), With<Ball>>,
    mut sensor_query: Query<(&Transform, &mut ScoreSensor), Without<Ball>>,
) {
    for (ball_transform, velocity) in &ball_query {
        let curr = ball_transform.translation;

        for (sensor_transform, mut sensor) in &mut sensor_query {
            // Sweep from where the ball actually was; velocity may have been
            // reflected by a rim or backboard contact this step
            let prev = sensor.last_ball.replace(curr).unwrap_or(curr);
            let inside = sweeps_sensor(prev, curr, sensor_transform.translation);
            if register_pass(&mut sensor, inside, velocity.0) {
                score.points += 1;
                event_bus.emit(GameEvent::Goal {
                    score: score.points,
                });
                info!("SCORE! {} points", score.points);
            }
        }
    }
}
