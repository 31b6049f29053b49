//! Shot release impulse calculation

use bevy::prelude::*;

use crate::constants::*;

/// Fraction of full speed a release at `charge` produces.
///
/// Floored at [`MIN_VELOCITY_FACTOR`] so a release at zero charge still lobs the
/// ball instead of dropping it. Charge above [`MAX_POWER`] is clamped.
pub fn velocity_factor(charge: u32) -> f32 {
    let charge = charge.min(MAX_POWER);
    (charge as f32 / MAX_POWER as f32).max(MIN_VELOCITY_FACTOR)
}

/// Impulse handed to the ball when a charged shot is released.
///
/// Horizontal components follow the aim heading. The vertical component is a
/// charge-driven lift (`base_speed * 0.8 * factor`) plus a flat boost that keeps
/// even weak shots arcing.
pub fn compute_impulse(charge: u32, aim: Vec3, base_speed: f32) -> Vec3 {
    let factor = velocity_factor(charge);
    let speed = base_speed * factor;

    Vec3::new(
        aim.x * speed,
        speed * VERTICAL_SCALE + VERTICAL_BOOST,
        aim.z * speed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_charge_straight_ahead() {
        let impulse = compute_impulse(100, Vec3::NEG_Z, 15.0);
        assert_eq!(impulse, Vec3::new(0.0, 17.0, -15.0));
    }

    #[test]
    fn test_velocity_floor() {
        let dir = Vec3::new(0.6, 0.0, -0.8);
        let floor = compute_impulse(0, dir, 15.0);
        for charge in 1..10 {
            let impulse = compute_impulse(charge, dir, 15.0);
            assert_eq!(
                impulse.to_array().map(f32::to_bits),
                floor.to_array().map(f32::to_bits),
                "charge {} should clamp to the velocity floor",
                charge
            );
        }
        // First charge above the floor
        assert_ne!(compute_impulse(11, dir, 15.0), floor);
    }

    #[test]
    fn test_zero_charge_still_lobs() {
        let impulse = compute_impulse(0, Vec3::NEG_Z, 15.0);
        assert!((impulse.z - -1.5).abs() < 1e-6);
        assert!((impulse.y - (1.5 * 0.8 + 5.0)).abs() < 1e-6);
    }

    #[test]
    fn test_overcharge_clamped() {
        let dir = Vec3::new(-0.3, 0.0, -0.95);
        assert_eq!(compute_impulse(250, dir, 15.0), compute_impulse(100, dir, 15.0));
    }

    #[test]
    fn test_deterministic() {
        let dir = Vec3::new(0.2, 0.1, -0.97);
        let a = compute_impulse(64, dir, 15.0);
        let b = compute_impulse(64, dir, 15.0);
        assert_eq!(a.to_array().map(f32::to_bits), b.to_array().map(f32::to_bits));
    }

    #[test]
    fn test_half_charge_scales_linearly() {
        let half = compute_impulse(50, Vec3::X, 20.0);
        assert!((half.x - 10.0).abs() < 1e-6);
        assert!((half.y - (10.0 * 0.8 + 5.0)).abs() < 1e-6);
        assert_eq!(half.z, 0.0);
    }
}
