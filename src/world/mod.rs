//! Court, hoop and lighting

use bevy::prelude::*;

use crate::constants::*;
use crate::scoring::{ScoreSensor, sensor_center};

/// Marker for the rim ring
#[derive(Component)]
pub struct Rim;

/// Marker for the backboard panel
#[derive(Component)]
pub struct Backboard;

/// Spawn the court floor
pub fn spawn_court(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(COURT_SIZE, COURT_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: COURT_COLOR,
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::default(),
    ));
}

/// Spawn the hoop: rim, backboard with target box, padding, pole and net
pub fn spawn_hoop(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    // Rim
    commands.spawn((
        Mesh3d(meshes.add(Torus {
            minor_radius: RIM_TUBE_RADIUS,
            major_radius: RIM_RADIUS,
        })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: RIM_COLOR,
            metallic: 0.6,
            ..default()
        })),
        Transform::from_translation(HOOP_POSITION),
        Rim,
    ));

    // Backboard
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(BACKBOARD_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: BACKBOARD_COLOR,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(BACKBOARD_CENTER),
        Backboard,
    ));

    // Target box outline, bottom edge level with the rim
    let line_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    let face_z = BACKBOARD_CENTER.z + BACKBOARD_SIZE.z / 2.0 + 0.001;
    let box_center = Vec3::new(
        BACKBOARD_CENTER.x,
        HOOP_POSITION.y + TARGET_BOX_SIZE.y / 2.0,
        face_z,
    );
    let horizontal = meshes.add(Cuboid::new(TARGET_BOX_SIZE.x, TARGET_BOX_LINE, 0.001));
    let vertical = meshes.add(Cuboid::new(TARGET_BOX_LINE, TARGET_BOX_SIZE.y, 0.001));
    for dy in [-TARGET_BOX_SIZE.y / 2.0, TARGET_BOX_SIZE.y / 2.0] {
        commands.spawn((
            Mesh3d(horizontal.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::from_translation(box_center + Vec3::Y * dy),
        ));
    }
    for dx in [-TARGET_BOX_SIZE.x / 2.0, TARGET_BOX_SIZE.x / 2.0] {
        commands.spawn((
            Mesh3d(vertical.clone()),
            MeshMaterial3d(line_material.clone()),
            Transform::from_translation(box_center + Vec3::X * dx),
        ));
    }

    // Padding along the bottom edge
    let board_bottom = BACKBOARD_CENTER.y - BACKBOARD_SIZE.y / 2.0;
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(
            BACKBOARD_SIZE.x,
            PADDING_HEIGHT,
            BACKBOARD_SIZE.z * 2.0,
        ))),
        MeshMaterial3d(materials.add(PADDING_COLOR)),
        Transform::from_xyz(
            BACKBOARD_CENTER.x,
            board_bottom - PADDING_HEIGHT / 2.0,
            BACKBOARD_CENTER.z,
        ),
    ));

    // Pole behind the board
    let pole_height = BACKBOARD_CENTER.y;
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(POLE_RADIUS, pole_height))),
        MeshMaterial3d(materials.add(POLE_COLOR)),
        Transform::from_xyz(
            BACKBOARD_CENTER.x,
            pole_height / 2.0,
            BACKBOARD_CENTER.z - BACKBOARD_SIZE.z / 2.0 - POLE_RADIUS,
        ),
    ));

    // Net, tapering under the rim
    commands.spawn((
        Mesh3d(meshes.add(ConicalFrustum {
            radius_top: RIM_RADIUS,
            radius_bottom: RIM_RADIUS * 0.6,
            height: NET_HEIGHT,
        })),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: NET_COLOR,
            alpha_mode: AlphaMode::Blend,
            cull_mode: None,
            ..default()
        })),
        Transform::from_translation(HOOP_POSITION - Vec3::Y * (NET_HEIGHT / 2.0)),
    ));
}

/// Spawn the invisible score trigger under the rim
pub fn spawn_score_sensor(commands: &mut Commands) {
    commands.spawn((
        Transform::from_translation(sensor_center()),
        ScoreSensor::default(),
    ));
}

pub fn spawn_lights(commands: &mut Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 12.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Spawn everything static in the scene
pub fn spawn_world(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    spawn_court(commands, meshes, materials);
    spawn_hoop(commands, meshes, materials);
    spawn_score_sensor(commands);
    spawn_lights(commands);
}
