//! Input module - PlayerInput resource and capture_input system

use bevy::prelude::*;

/// Buffered input for the shooter.
///
/// Edge flags accumulate in `Update` until a fixed step consumes them, so a
/// click that lands between two fixed steps is never lost.
#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub charge_pressed: bool,  // LMB down - start charging
    pub charge_released: bool, // LMB up - release the shot
    pub reset_pressed: bool,   // R key - return ball to hand
    pub turn: f32,             // Left/right arrows, -1.0..=1.0 (continuous)
}

impl PlayerInput {
    pub fn take_charge_pressed(&mut self) -> bool {
        std::mem::take(&mut self.charge_pressed)
    }

    pub fn take_charge_released(&mut self) -> bool {
        std::mem::take(&mut self.charge_released)
    }

    pub fn take_reset_pressed(&mut self) -> bool {
        std::mem::take(&mut self.reset_pressed)
    }

    /// Drop any buffered edges (used when the menu opens or closes)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Runs in Update to capture input state before it's cleared.
pub fn capture_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<PlayerInput>,
) {
    if mouse.just_pressed(MouseButton::Left) {
        input.charge_pressed = true;
    }
    if mouse.just_released(MouseButton::Left) {
        input.charge_released = true;
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        input.reset_pressed = true;
    }

    let mut turn = 0.0;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        turn -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        turn += 1.0;
    }
    input.turn = turn;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes_edges() {
        let mut input = PlayerInput {
            charge_pressed: true,
            reset_pressed: true,
            ..default()
        };
        assert!(input.take_charge_pressed());
        assert!(!input.take_charge_pressed());
        assert!(!input.take_charge_released());
        assert!(input.take_reset_pressed());
        assert!(!input.reset_pressed);
    }

    #[test]
    fn test_capture_buffers_click_until_consumed() {
        let mut app = App::new();
        app.init_resource::<PlayerInput>();
        app.init_resource::<ButtonInput<KeyCode>>();
        app.init_resource::<ButtonInput<MouseButton>>();
        app.add_systems(Update, capture_input);

        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowLeft);
        app.update();

        // Edge is gone from ButtonInput but still buffered
        app.world_mut()
            .resource_mut::<ButtonInput<MouseButton>>()
            .clear();
        app.update();

        let input = app.world().resource::<PlayerInput>();
        assert!(input.charge_pressed);
        assert!(!input.charge_released);
        assert_eq!(input.turn, -1.0);
    }
}
