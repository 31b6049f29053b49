//! Ball-related components

use bevy::prelude::*;

use crate::constants::*;

/// Marker for the ball entity
#[derive(Component)]
pub struct Ball;

/// Linear velocity in meters per second
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec3);

/// Angular velocity in radians per second (axis * rate)
#[derive(Component, Default, Debug, Clone, Copy, PartialEq)]
pub struct AngularVelocity(pub Vec3);

/// Spawn the ball at the shooter's hands
pub fn spawn_ball(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(BALL_RADIUS).mesh().uv(32, 18))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: BALL_COLOR,
                perceptual_roughness: 0.8,
                ..default()
            })),
            Transform::from_translation(SHOOTER_SPAWN + HOLD_OFFSET),
            Ball,
            Velocity::default(),
            AngularVelocity::default(),
        ))
        .id()
}
