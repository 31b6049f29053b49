//! Shot meter UI components and systems

use bevy::prelude::*;

use crate::constants::*;
use crate::shooting::{ChargeLevel, PossessionController, PossessionState};

const METER_WIDTH: f32 = 240.0;
const METER_HEIGHT: f32 = 18.0;
/// Glow pulses per second once the meter is full
const FULL_PULSE_RATE: f32 = 4.0;

/// Shot meter frame (shown only while charging)
#[derive(Component)]
pub struct ShotMeter;

/// Shot meter fill bar
#[derive(Component)]
pub struct ShotMeterFill;

/// Fill colour: amber outside the sweet spot, green inside, pulsing white when full
pub fn meter_fill_color(charge: ChargeLevel, elapsed_secs: f32) -> Color {
    if charge.is_full() {
        let pulse = 0.5 + 0.5 * (elapsed_secs * FULL_PULSE_RATE * std::f32::consts::TAU).sin();
        Color::srgb(1.0, 0.85 + 0.15 * pulse, 0.4 + 0.6 * pulse)
    } else if charge.in_sweet_spot() {
        Color::srgb(0.2, 0.85, 0.3)
    } else {
        Color::srgb(0.95, 0.6, 0.1)
    }
}

/// Spawn the meter at the bottom centre of the screen
pub fn spawn_shot_meter(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(60.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-METER_WIDTH / 2.0)),
                width: Val::Px(METER_WIDTH),
                height: Val::Px(METER_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(TEXT_SECONDARY),
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            Visibility::Hidden,
            ShotMeter,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Percent(0.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(meter_fill_color(ChargeLevel::ZERO, 0.0)),
                ShotMeterFill,
            ));
        });
}

/// Update shot meter display
pub fn update_shot_meter(
    time: Res<Time>,
    controller: Res<PossessionController>,
    mut meter_query: Query<(&mut Visibility, &mut BorderColor), With<ShotMeter>>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<ShotMeterFill>>,
) {
    let charging = controller.state() == PossessionState::Charging;
    let charge = controller.charge();

    for (mut visibility, mut border) in &mut meter_query {
        *visibility = if charging {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
        *border = if charging && charge.is_full() {
            BorderColor::all(TEXT_ACCENT)
        } else {
            BorderColor::all(TEXT_SECONDARY)
        };
    }

    if !charging {
        return;
    }

    for (mut node, mut color) in &mut fill_query {
        node.width = Val::Percent(charge.fraction() * 100.0);
        color.0 = meter_fill_color(charge, time.elapsed_secs());
    }
}
