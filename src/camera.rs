//! Camera modes: first-person from the shooter's eyes, or orbiting the hoop

use std::fmt;
use std::str::FromStr;

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::events::{EventBus, GameEvent};
use crate::player::Shooter;
use crate::settings::CurrentSettings;

/// Active camera mode
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    FirstPerson,
    Orbital,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::FirstPerson => CameraMode::Orbital,
            CameraMode::Orbital => CameraMode::FirstPerson,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CameraMode::FirstPerson => "First Person",
            CameraMode::Orbital => "Orbital",
        }
    }
}

impl fmt::Display for CameraMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraMode::FirstPerson => write!(f, "first_person"),
            CameraMode::Orbital => write!(f, "orbital"),
        }
    }
}

impl FromStr for CameraMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_person" => Ok(CameraMode::FirstPerson),
            "orbital" => Ok(CameraMode::Orbital),
            _ => Err(format!("unknown camera mode: {}", s)),
        }
    }
}

/// Marker for the main camera
#[derive(Component)]
pub struct GameCamera;

/// Spherical coordinates of the orbit camera around [`ORBIT_TARGET`]
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitState {
    fn default() -> Self {
        let offset = ORBIT_CAMERA_START - ORBIT_TARGET;
        let distance = offset.length();
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
        }
    }
}

impl OrbitState {
    pub fn position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        ORBIT_TARGET
            + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Rotate by a mouse drag in pixels
    pub fn drag(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_DRAG_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ORBIT_DRAG_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }
}

/// Spawn the main camera
pub fn spawn_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(SHOOTER_SPAWN).looking_to(Vec3::NEG_Z, Vec3::Y),
        GameCamera,
    ));
}

/// Toggle camera mode with T
pub fn toggle_camera_mode(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut mode: ResMut<CameraMode>,
    mut event_bus: ResMut<EventBus>,
    mut settings: ResMut<CurrentSettings>,
) {
    if !keyboard.just_pressed(KeyCode::KeyT) {
        return;
    }
    *mode = mode.toggled();
    info!("Switching to {} camera", mode.label());
    event_bus.emit(GameEvent::CameraMode { mode: *mode });
    settings.settings.camera_mode = *mode;
    settings.mark_dirty();
}

/// Right-drag rotates the orbit camera
pub fn orbit_drag(
    mode: Res<CameraMode>,
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut orbit: ResMut<OrbitState>,
) {
    if *mode != CameraMode::Orbital || !mouse.pressed(MouseButton::Right) {
        return;
    }
    if motion.delta != Vec2::ZERO {
        orbit.drag(motion.delta);
    }
}

/// Place the camera for the current mode
pub fn update_camera(
    mode: Res<CameraMode>,
    orbit: Res<OrbitState>,
    shooter_query: Query<&Transform, (With<Shooter>, Without<GameCamera>)>,
    mut camera_query: Query<&mut Transform, With<GameCamera>>,
) {
    let Ok(mut camera) = camera_query.single_mut() else {
        return;
    };

    match *mode {
        CameraMode::FirstPerson => {
            if let Ok(shooter) = shooter_query.single() {
                *camera = *shooter;
            }
        }
        CameraMode::Orbital => {
            *camera = Transform::from_translation(orbit.position()).looking_at(ORBIT_TARGET, Vec3::Y);
        }
    }
}
