//! HUD components and systems (score, camera mode, controls)

use bevy::prelude::*;

use crate::camera::CameraMode;
use crate::constants::*;
use crate::scoring::Score;

/// Score text component
#[derive(Component)]
pub struct ScoreText;

/// Camera mode label component
#[derive(Component)]
pub struct CameraModeText;

pub fn spawn_hud(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.6)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
                ScoreText,
            ));
            parent.spawn((
                Text::new("Camera: First Person"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_ACCENT),
                CameraModeText,
            ));
            parent.spawn((
                Text::new("LMB: charge/shoot | Left/Right: aim | R: reset | T: camera | Esc: menu"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));
        });
}

/// Update score display
pub fn update_score_text(score: Res<Score>, mut text_query: Query<&mut Text, With<ScoreText>>) {
    if !score.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    text.0 = format!("Score: {}", score.points);
}

pub fn update_camera_mode_text(
    mode: Res<CameraMode>,
    mut text_query: Query<&mut Text, With<CameraModeText>>,
) {
    if !mode.is_changed() {
        return;
    }
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };
    text.0 = format!("Camera: {}", mode.label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_text_follows_score() {
        let mut app = App::new();
        app.insert_resource(Score { points: 3 });
        app.add_systems(Update, update_score_text);
        let text = app.world_mut().spawn((Text::new(""), ScoreText)).id();
        app.update();
        assert_eq!(app.world().get::<Text>(text).unwrap().0, "Score: 3");
    }
}
