//! Ballistic motion for the released ball
//!
//! Semi-implicit Euler under gravity with velocity damping, plus three contact
//! shapes: the court floor (infinite plane), the backboard (box) and the rim
//! (horizontal ring). Only runs while the ball is out of the shooter's hands.

use bevy::prelude::*;

use crate::ball::components::*;
use crate::constants::*;
use crate::shooting::PossessionController;
use crate::tuning::PhysicsTweaks;

/// Physical parameters for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPhysicsParams {
    pub gravity: f32,
    pub floor_bounce: f32,
    pub rim_bounce: f32,
    pub backboard_bounce: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for BallPhysicsParams {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            floor_bounce: BALL_BOUNCE,
            rim_bounce: RIM_BOUNCE,
            backboard_bounce: BACKBOARD_BOUNCE,
            linear_damping: BALL_LINEAR_DAMPING,
            angular_damping: BALL_ANGULAR_DAMPING,
        }
    }
}

/// Kinematic state of the ball, decoupled from ECS components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallMotion {
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub rotation: Quat,
}

impl BallMotion {
    pub fn at(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            angular_velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Apply gravity, damping and integrate position/rotation
pub fn integrate(motion: &mut BallMotion, params: &BallPhysicsParams, dt: f32) {
    motion.velocity.y -= params.gravity * dt;
    motion.velocity *= (1.0 - params.linear_damping).powf(dt);
    motion.angular_velocity *= (1.0 - params.angular_damping).powf(dt);
    motion.position += motion.velocity * dt;

    let spin = motion.angular_velocity * dt;
    if spin != Vec3::ZERO {
        motion.rotation = (Quat::from_scaled_axis(spin) * motion.rotation).normalize();
    }
}

/// Remove the approaching normal component of velocity, scaled by restitution
fn reflect(velocity: &mut Vec3, normal: Vec3, bounce: f32) {
    let approach = velocity.dot(normal);
    if approach < 0.0 {
        *velocity -= (1.0 + bounce) * approach * normal;
    }
}

/// Bounce off (or roll along) the court plane at y = 0
pub fn collide_floor(motion: &mut BallMotion, bounce: f32, dt: f32) -> bool {
    if motion.position.y >= BALL_RADIUS {
        return false;
    }
    motion.position.y = BALL_RADIUS;

    if motion.velocity.y < 0.0 {
        let impact_speed = -motion.velocity.y;
        motion.velocity.y = impact_speed * bounce;

        if motion.velocity.y < BALL_REST_SPEED {
            // Settled - roll with friction instead of bouncing
            motion.velocity.y = 0.0;
            let roll = BALL_FLOOR_FRICTION.powf(dt);
            motion.velocity.x *= roll;
            motion.velocity.z *= roll;
        } else {
            motion.velocity.x *= BALL_FLOOR_FRICTION;
            motion.velocity.z *= BALL_FLOOR_FRICTION;
        }
    }

    // Contact forces rolling without slipping
    motion.angular_velocity = Vec3::Y.cross(motion.velocity) / BALL_RADIUS;
    true
}

/// Bounce off an axis-aligned box
pub fn collide_box(motion: &mut BallMotion, center: Vec3, half_extents: Vec3, bounce: f32) -> bool {
    let closest = motion
        .position
        .clamp(center - half_extents, center + half_extents);
    let offset = motion.position - closest;
    let dist_sq = offset.length_squared();
    if dist_sq >= BALL_RADIUS * BALL_RADIUS {
        return false;
    }

    // Center inside the box: push out through the front face
    let normal = offset.try_normalize().unwrap_or(Vec3::Z);
    motion.position = closest + normal * BALL_RADIUS;
    reflect(&mut motion.velocity, normal, bounce);
    true
}

/// Bounce off a horizontal ring (torus) centred at `center`
pub fn collide_ring(
    motion: &mut BallMotion,
    center: Vec3,
    major_radius: f32,
    tube_radius: f32,
    bounce: f32,
) -> bool {
    let d = motion.position - center;
    let radial = Vec3::new(d.x, 0.0, d.z).try_normalize().unwrap_or(Vec3::X);
    let nearest = center + radial * major_radius;

    let offset = motion.position - nearest;
    let reach = BALL_RADIUS + tube_radius;
    if offset.length_squared() >= reach * reach {
        return false;
    }

    let normal = offset.try_normalize().unwrap_or(Vec3::Y);
    motion.position = nearest + normal * reach;
    reflect(&mut motion.velocity, normal, bounce);
    true
}

/// One full step: integrate then resolve contacts against the court and hoop
pub fn step_ball(motion: &mut BallMotion, params: &BallPhysicsParams, dt: f32) {
    integrate(motion, params, dt);
    collide_floor(motion, params.floor_bounce, dt);
    collide_box(
        motion,
        BACKBOARD_CENTER,
        BACKBOARD_SIZE / 2.0,
        params.backboard_bounce,
    );
    collide_ring(
        motion,
        HOOP_POSITION,
        RIM_RADIUS,
        RIM_TUBE_RADIUS,
        params.rim_bounce,
    );
}

/// Advance the released ball by one fixed step
pub fn ball_physics(
    tweaks: Res<PhysicsTweaks>,
    fixed_time: Res<Time<Fixed>>,
    controller: Res<PossessionController>,
    mut query: Query<(&mut Transform, &mut Velocity, &mut AngularVelocity), With<Ball>>,
) {
    // Held balls are pinned by the possession controller
    if controller.is_holding() {
        return;
    }

    let dt = fixed_time.timestep().as_secs_f32();
    let params = tweaks.physics_params();

    for (mut transform, mut velocity, mut spin) in &mut query {
        let mut motion = BallMotion {
            position: transform.translation,
            velocity: velocity.0,
            angular_velocity: spin.0,
            rotation: transform.rotation,
        };

        step_ball(&mut motion, &params, dt);

        transform.translation = motion.position;
        transform.rotation = motion.rotation;
        velocity.0 = motion.velocity;
        spin.0 = motion.angular_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn undamped() -> BallPhysicsParams {
        BallPhysicsParams {
            linear_damping: 0.0,
            angular_damping: 0.0,
            ..default()
        }
    }

    #[test]
    fn test_free_fall_step() {
        let mut motion = BallMotion::at(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO);
        integrate(&mut motion, &undamped(), DT);
        assert!((motion.velocity.y + GRAVITY * DT).abs() < 1e-6);
        assert!((motion.position.y - (2.0 - GRAVITY * DT * DT)).abs() < 1e-6);
    }

    #[test]
    fn test_floor_bounce() {
        let mut motion = BallMotion::at(Vec3::new(0.0, 0.2, 0.0), Vec3::new(1.0, -5.0, 0.0));
        assert!(collide_floor(&mut motion, BALL_BOUNCE, DT));
        assert_eq!(motion.position.y, BALL_RADIUS);
        assert!((motion.velocity.y - 3.5).abs() < 1e-5);
        assert!((motion.velocity.x - BALL_FLOOR_FRICTION).abs() < 1e-6);
        // Rolling to +x spins about -z
        assert!(motion.angular_velocity.z < 0.0);
    }

    #[test]
    fn test_ball_settles_on_floor() {
        let params = BallPhysicsParams::default();
        let mut motion = BallMotion::at(Vec3::new(0.0, BALL_RADIUS, 0.0), Vec3::ZERO);
        for _ in 0..120 {
            integrate(&mut motion, &params, DT);
            collide_floor(&mut motion, params.floor_bounce, DT);
        }
        assert_eq!(motion.position.y, BALL_RADIUS);
        assert_eq!(motion.velocity.y, 0.0);
    }

    #[test]
    fn test_swish_through_rim() {
        let mut motion = BallMotion::at(HOOP_POSITION + Vec3::new(0.0, 0.1, 0.0), Vec3::NEG_Y * 4.0);
        assert!(!collide_ring(
            &mut motion,
            HOOP_POSITION,
            RIM_RADIUS,
            RIM_TUBE_RADIUS,
            RIM_BOUNCE
        ));
        assert_eq!(motion.velocity, Vec3::NEG_Y * 4.0);
    }

    #[test]
    fn test_rim_deflects_ball() {
        let mut motion = BallMotion::at(
            HOOP_POSITION + Vec3::new(RIM_RADIUS, 0.2, 0.0),
            Vec3::new(0.0, -3.0, 0.0),
        );
        assert!(collide_ring(
            &mut motion,
            HOOP_POSITION,
            RIM_RADIUS,
            RIM_TUBE_RADIUS,
            RIM_BOUNCE
        ));
        assert!((motion.velocity.y - 1.5).abs() < 1e-5);
        let clearance = (motion.position - (HOOP_POSITION + Vec3::X * RIM_RADIUS)).length();
        assert!((clearance - (BALL_RADIUS + RIM_TUBE_RADIUS)).abs() < 1e-5);
    }

    #[test]
    fn test_backboard_bounce() {
        let face_z = BACKBOARD_CENTER.z + BACKBOARD_SIZE.z / 2.0;
        let mut motion = BallMotion::at(
            Vec3::new(0.0, BACKBOARD_CENTER.y, face_z + 0.1),
            Vec3::new(0.0, 0.0, -4.0),
        );
        assert!(collide_box(
            &mut motion,
            BACKBOARD_CENTER,
            BACKBOARD_SIZE / 2.0,
            BACKBOARD_BOUNCE
        ));
        assert!((motion.velocity.z - 2.4).abs() < 1e-5);
        assert!((motion.position.z - (face_z + BALL_RADIUS)).abs() < 1e-5);
    }

    #[test]
    fn test_box_miss() {
        let mut motion = BallMotion::at(Vec3::new(5.0, 1.0, 0.0), Vec3::X);
        assert!(!collide_box(
            &mut motion,
            BACKBOARD_CENTER,
            BACKBOARD_SIZE / 2.0,
            BACKBOARD_BOUNCE
        ));
    }

    #[test]
    fn test_full_power_shot_reaches_hoop_height() {
        // Ball leaves the hands with the full-charge impulse
        let impulse = crate::shooting::compute_impulse(MAX_POWER, Vec3::NEG_Z, BASE_SPEED);
        let mut motion = BallMotion::at(SHOOTER_SPAWN + HOLD_OFFSET, impulse / BALL_MASS);
        let params = BallPhysicsParams::default();

        let mut peak = motion.position.y;
        for _ in 0..120 {
            step_ball(&mut motion, &params, DT);
            peak = peak.max(motion.position.y);
        }
        assert!(peak > HOOP_POSITION.y, "peak {} below rim", peak);
    }
}
