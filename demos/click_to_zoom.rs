//! Demonstrates clicking on objects to zoom them up to the camera using `bevy_zoom_to_camera`.
//!
//! - Click an object to bring it in front of the camera, filling the view
//! - Click it again to send it back to where it came from
//! - The orbit camera is locked while an object is zoomed in
//! - Press 'Space' to toggle the first object from the keyboard

use std::f32::consts::PI;

use bevy::color::palettes::basic::SILVER;
use bevy::prelude::*;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use bevy_zoom_to_camera::prelude::*;

const ZOOM_DURATION_MS: f32 = 1200.0;
const OBJECT_HEIGHT: f32 = 1.0;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            PanOrbitCameraPlugin,
            ZoomToCameraPlugin,
            MeshPickingPlugin,
            BrpExtrasPlugin::default(),
        ))
        .insert_resource(ZoomToCameraConfig {
            duration_ms: ZOOM_DURATION_MS,
            ..default()
        })
        .add_systems(Startup, setup)
        .add_systems(Update, toggle_first_with_keyboard)
        .add_observer(log_zoom_begin)
        .add_observer(log_zoom_end)
        .run();
}

#[derive(Resource)]
struct Zoomables(Vec<Entity>);

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(30.0, 30.0))),
        MeshMaterial3d(materials.add(Color::from(SILVER))),
        Pickable::IGNORE,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 1500.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, PI / 4.0, -PI / 4.0)),
    ));

    // A framed picture: a flat panel with a thin border, as one zoomable hierarchy
    let picture = commands
        .spawn((
            Transform::from_xyz(-3.0, OBJECT_HEIGHT + 0.5, -2.0)
                .with_rotation(Quat::from_rotation_y(0.6)),
            Visibility::default(),
            ZoomToCamera,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.6, 1.0, 0.05))),
                MeshMaterial3d(materials.add(Color::srgb(0.9, 0.8, 0.4))),
            ));
            parent.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.8, 1.2, 0.02))),
                MeshMaterial3d(materials.add(Color::srgb(0.2, 0.15, 0.1))),
                Transform::from_xyz(0.0, 0.0, -0.03),
            ));
        })
        .id();

    let cube = commands
        .spawn((
            Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.5, 0.5, 0.9))),
            Transform::from_xyz(0.0, OBJECT_HEIGHT, 0.0),
            ZoomToCamera,
        ))
        .id();

    let sphere = commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(0.5))),
            MeshMaterial3d(materials.add(Color::srgb(0.9, 0.3, 0.2))),
            Transform::from_xyz(3.0, OBJECT_HEIGHT, 1.0).with_scale(Vec3::splat(0.6)),
            ZoomToCamera,
        ))
        .id();

    commands.spawn((
        PanOrbitCamera {
            radius: Some(10.0),
            pitch: Some(0.35),
            ..default()
        },
        Transform::from_xyz(0.0, 4.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Text::new("Click an object to zoom it in or out, Space toggles the picture"),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));

    commands.insert_resource(Zoomables(vec![picture, cube, sphere]));
}

fn toggle_first_with_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    zoomables: Res<Zoomables>,
    mut commands: Commands,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        if let Some(&first) = zoomables.0.first() {
            commands.trigger(ToggleZoom::new(first));
        }
    }
}

fn log_zoom_begin(begin: On<ZoomBegin>) {
    info!("{:?} started {:?}", begin.entity, begin.direction);
}

fn log_zoom_end(end: On<ZoomEnd>) {
    info!(
        "{:?} finished {:?}, next click goes {:?}",
        end.entity, end.completed, end.next
    );
}
