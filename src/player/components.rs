//! Shooter components

use bevy::prelude::*;

use crate::constants::*;

/// Marker for the entity holding and aiming the ball.
/// Its transform is the holder pose: translation is eye position,
/// forward is the aim heading.
#[derive(Component)]
pub struct Shooter;

/// Spawn the shooter at the free-throw spot, facing the hoop
pub fn spawn_shooter(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            Transform::from_translation(SHOOTER_SPAWN).looking_to(Vec3::NEG_Z, Vec3::Y),
            Shooter,
        ))
        .id()
}
