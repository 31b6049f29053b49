//! Aim heading control

use bevy::prelude::*;

use crate::constants::*;
use crate::input::PlayerInput;
use crate::player::Shooter;

/// Turn the shooter left/right from buffered input.
/// Yaw only, the aim heading stays level.
pub fn turn_shooter(
    input: Res<PlayerInput>,
    fixed_time: Res<Time<Fixed>>,
    mut shooter_query: Query<&mut Transform, With<Shooter>>,
) {
    if input.turn == 0.0 {
        return;
    }

    let angle = -input.turn * AIM_TURN_SPEED * fixed_time.timestep().as_secs_f32();
    for mut transform in &mut shooter_query {
        transform.rotate_y(angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_right_rotates_aim_clockwise() {
        let mut app = App::new();
        app.insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ));
        app.insert_resource(PlayerInput {
            turn: 1.0,
            ..default()
        });
        app.add_systems(FixedUpdate, turn_shooter);
        let shooter = app
            .world_mut()
            .spawn((
                Transform::from_translation(SHOOTER_SPAWN).looking_to(Vec3::NEG_Z, Vec3::Y),
                Shooter,
            ))
            .id();

        app.world_mut().run_schedule(FixedUpdate);

        let transform = app.world().get::<Transform>(shooter).unwrap();
        let aim = transform.forward().as_vec3();
        assert!(aim.x > 0.0, "turning right should swing aim toward +x: {:?}", aim);
        assert!(aim.y.abs() < 1e-6);
    }
}
