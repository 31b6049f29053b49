//! Start menu overlay - gameplay systems wait until the player hits Play
//!
//! Enter or the Play button closes the menu and puts the ball back in hand.
//! Escape reopens it.

use bevy::prelude::*;

use crate::constants::*;
use crate::input::PlayerInput;

/// Resource tracking whether the menu is up
#[derive(Resource, Debug)]
pub struct MainMenu {
    pub open: bool,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self { open: true }
    }
}

/// Root node of the menu overlay
#[derive(Component)]
pub struct MenuRoot;

#[derive(Component)]
pub struct PlayButton;

/// Run condition: gameplay may advance
pub fn menu_closed(menu: Res<MainMenu>) -> bool {
    !menu.open
}

/// Run condition: menu is showing
pub fn menu_open(menu: Res<MainMenu>) -> bool {
    menu.open
}

/// Open/close the menu from keys or the Play button
pub fn handle_menu_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    play_query: Query<&Interaction, (Changed<Interaction>, With<PlayButton>)>,
    mut menu: ResMut<MainMenu>,
    mut input: ResMut<PlayerInput>,
) {
    if menu.open {
        let play_clicked = play_query.iter().any(|i| *i == Interaction::Pressed);
        if play_clicked || keyboard.just_pressed(KeyCode::Enter) {
            menu.open = false;
            // Fresh game: drop stale clicks and put the ball in hand
            input.clear();
            input.reset_pressed = true;
            info!("Game started");
        }
    } else if keyboard.just_pressed(KeyCode::Escape) {
        menu.open = true;
        input.clear();
        info!("Menu opened");
    }
}

/// Show or hide the overlay when the menu state changes
pub fn update_menu_visibility(
    menu: Res<MainMenu>,
    mut root_query: Query<&mut Visibility, With<MenuRoot>>,
) {
    if !menu.is_changed() {
        return;
    }
    for mut visibility in &mut root_query {
        *visibility = if menu.open {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Spawn the menu overlay (called from setup)
pub fn spawn_menu(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            GlobalZIndex(10),
            Visibility::Visible,
            MenuRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("HOOPSHOT"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(TEXT_ACCENT),
            ));
            parent.spawn((
                Text::new("Hold the left mouse button to charge, release to shoot"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));
            parent
                .spawn((
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(32.0), Val::Px(12.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BorderColor::all(TEXT_ACCENT),
                    BackgroundColor(Color::srgba(0.2, 0.2, 0.2, 0.9)),
                    PlayButton,
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Play"),
                        TextFont {
                            font_size: 28.0,
                            ..default()
                        },
                        TextColor(TEXT_PRIMARY),
                    ));
                });
        });
}
