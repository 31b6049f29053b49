//! Tunable constants for hoopshot
//!
//! All gameplay values are defined here for easy tweaking.
//! Distances are in meters, times in seconds.

use bevy::prelude::*;

// =============================================================================
// COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.1, 0.1, 0.1); // Dark arena
pub const COURT_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);
pub const BALL_COLOR: Color = Color::srgb(1.0, 0.55, 0.0); // Basketball orange
pub const RIM_COLOR: Color = Color::srgb(1.0, 0.0, 0.0);
pub const BACKBOARD_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.7); // Clear acrylic
pub const PADDING_COLOR: Color = Color::srgb(0.8, 0.0, 0.0); // Safety red
pub const POLE_COLOR: Color = Color::srgb(0.33, 0.33, 0.33);
pub const NET_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);

pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8);
pub const TEXT_SECONDARY: Color = Color::srgb(0.7, 0.65, 0.55);
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4);

// =============================================================================
// SHOT METER
// =============================================================================

pub const MAX_POWER: u32 = 100;
pub const CHARGE_STEP: u32 = 2; // Charge gained per fixed step while charging
pub const SWEET_SPOT_MIN: u32 = 40; // Cosmetic only, never gates a release
pub const SWEET_SPOT_MAX: u32 = 70;

// =============================================================================
// SHOT RELEASE
// =============================================================================

pub const BASE_SPEED: f32 = 15.0;
pub const MIN_VELOCITY_FACTOR: f32 = 0.1; // Zero-charge releases still throw
pub const VERTICAL_SCALE: f32 = 0.8; // Lift relative to horizontal speed
pub const VERTICAL_BOOST: f32 = 5.0; // Flat upward kick added to every shot
pub const RESET_DELAY: f32 = 5.0; // Ball returns to hand this long after release
pub const MAX_RESET_DELAY: f32 = 600.0; // Upper bound accepted from tuning files

// =============================================================================
// TIMING
// =============================================================================

pub const PHYSICS_HZ: f64 = 60.0;

// =============================================================================
// SHOOTER
// =============================================================================

pub const SHOOTER_SPAWN: Vec3 = Vec3::new(0.0, 1.8, 5.0); // Eye height
pub const HOLD_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0); // Ball position relative to eye
pub const AIM_TURN_SPEED: f32 = 1.2; // Radians per second

// =============================================================================
// CAMERA
// =============================================================================

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const ORBIT_CAMERA_START: Vec3 = Vec3::new(10.0, 5.0, 10.0);
pub const ORBIT_TARGET: Vec3 = Vec3::new(0.0, 2.0, 0.0); // Hoop area
pub const ORBIT_DRAG_SENSITIVITY: f32 = 0.005; // Radians per pixel of mouse drag
pub const ORBIT_PITCH_LIMIT: f32 = 1.4;

// =============================================================================
// BALL PHYSICS
// =============================================================================

pub const BALL_RADIUS: f32 = 0.24;
pub const BALL_MASS: f32 = 1.0;
pub const GRAVITY: f32 = 9.82;
pub const BALL_BOUNCE: f32 = 0.7; // Floor restitution
pub const RIM_BOUNCE: f32 = 0.5;
pub const BACKBOARD_BOUNCE: f32 = 0.6;
pub const BALL_LINEAR_DAMPING: f32 = 0.01; // Fraction of velocity lost per second
pub const BALL_ANGULAR_DAMPING: f32 = 0.01;
pub const BALL_FLOOR_FRICTION: f32 = 0.9; // Horizontal velocity retained per floor bounce
pub const BALL_REST_SPEED: f32 = 0.3; // Vertical bounce below this settles onto the floor

// =============================================================================
// COURT & HOOP
// =============================================================================

pub const COURT_SIZE: f32 = 30.0;
pub const HOOP_POSITION: Vec3 = Vec3::new(0.0, 3.05, -10.0); // Rim center
pub const RIM_RADIUS: f32 = 0.45;
pub const RIM_TUBE_RADIUS: f32 = 0.02;
pub const BACKBOARD_SIZE: Vec3 = Vec3::new(1.83, 1.07, 0.05); // 72" x 42"
pub const BACKBOARD_CENTER: Vec3 = Vec3::new(0.0, 3.65, -10.6);
pub const TARGET_BOX_SIZE: Vec2 = Vec2::new(0.61, 0.46); // 24" x 18"
pub const TARGET_BOX_LINE: f32 = 0.02;
pub const PADDING_HEIGHT: f32 = 0.1;
pub const POLE_RADIUS: f32 = 0.1;
pub const NET_HEIGHT: f32 = 0.45;

// Score sensor: thin disc just under the rim
pub const SENSOR_RADIUS: f32 = RIM_RADIUS * 0.9;
pub const SENSOR_DROP: f32 = 0.1; // Distance below rim height
pub const SENSOR_HALF_HEIGHT: f32 = 0.025;
pub const SENSOR_MIN_FALL_SPEED: f32 = 0.1; // Ball must be moving down faster than this
