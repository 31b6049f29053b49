//! Hoopshot - a first-person basketball shooting game built with Bevy
//!
//! Main entry point: app setup and system registration.

use bevy::prelude::*;
use hoopshot::{
    CameraMode, ConfigWatcher, CurrentSettings, EventBus, EventLogConfig, EventLogger, InitSettings,
    MainMenu, OrbitState, PhysicsTweaks, PlayerInput, PossessionController, Score, SimTimers, ball,
    camera, config_watcher, constants::*, events, input, menu, player, save_settings_system,
    simulation, tuning, ui, world,
};

fn main() {
    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let no_log = args.iter().any(|a| a == "--no-log");
    let orbital = args.iter().any(|a| a == "--orbital");

    // Load persistent settings (uses defaults if file doesn't exist)
    let current_settings = CurrentSettings::new(InitSettings::load());

    // Save settings on first run to ensure file exists
    if let Err(e) = current_settings.settings.save() {
        warn!("Failed to save initial settings: {}", e);
    }

    let camera_mode = if orbital {
        CameraMode::Orbital
    } else {
        current_settings.settings.camera_mode
    };
    let log_config = EventLogConfig {
        enabled: current_settings.settings.event_log && !no_log,
        ..default()
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hoopshot".into(),
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(BACKGROUND_COLOR))
    .insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    })
    .insert_resource(Time::<Fixed>::from_hz(PHYSICS_HZ))
    .insert_resource(current_settings)
    .insert_resource(camera_mode)
    .insert_resource(EventBus::new())
    .insert_resource(EventLogger::new(log_config))
    .init_resource::<PhysicsTweaks>()
    .init_resource::<PossessionController>()
    .init_resource::<SimTimers>()
    .init_resource::<PlayerInput>()
    .init_resource::<Score>()
    .init_resource::<MainMenu>()
    .init_resource::<OrbitState>()
    .init_resource::<ConfigWatcher>()
    // Tuning must be loaded before the log records it
    .add_systems(
        Startup,
        (tuning::load_global_tuning_system, setup, events::start_event_log).chain(),
    )
    // Input is buffered only while playing; the click on Play must not start a charge
    .add_systems(
        Update,
        (
            input::capture_input.run_if(menu::menu_closed),
            menu::handle_menu_input,
            menu::update_menu_visibility,
        )
            .chain(),
    )
    .add_systems(
        Update,
        (
            camera::toggle_camera_mode,
            camera::orbit_drag,
            camera::update_camera,
        )
            .chain()
            .run_if(menu::menu_closed),
    )
    .add_systems(
        Update,
        (
            ui::update_shot_meter,
            ui::update_score_text,
            ui::update_camera_mode_text,
        ),
    )
    .add_systems(
        Update,
        (
            config_watcher::check_config_changes,
            events::log_tuning_changes,
            save_settings_system,
        ),
    )
    .add_systems(First, events::update_event_bus_time)
    .add_systems(PostUpdate, events::write_bus_events);

    simulation::add_fixed_step_systems(&mut app);
    app.run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    camera::spawn_camera(&mut commands);
    world::spawn_world(&mut commands, &mut meshes, &mut materials);
    player::spawn_shooter(&mut commands);
    ball::spawn_ball(&mut commands, &mut meshes, &mut materials);

    ui::spawn_hud(&mut commands);
    ui::spawn_shot_meter(&mut commands);
    menu::spawn_menu(&mut commands);
}
