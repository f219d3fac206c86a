//! Persistent scene: camera, lights and ground grid.
//!
//! Nothing here is torn down by a stage reset or a geometry change.

mod orbit;

pub use orbit::*;

use bevy::prelude::*;
use bevy::window::WindowResized;
use bevy_infinite_grid::{InfiniteGridBundle, InfiniteGridPlugin, InfiniteGridSettings};

use crate::constants::lighting;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InfiniteGridPlugin)
            .add_plugins(OrbitCameraPlugin)
            .add_systems(Startup, (spawn_lights, spawn_grid))
            .add_systems(Update, log_window_resize);
    }
}

/// Key, fill and back directional lights plus a low ambient term
fn spawn_lights(mut commands: Commands) {
    // Applies to every camera that has no `AmbientLight` of its own
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: lighting::AMBIENT_BRIGHTNESS,
        affects_lightmapped_meshes: true,
    });

    let lights = [
        ("Key Light", lighting::KEY_ILLUMINANCE, lighting::KEY_POSITION),
        ("Fill Light", lighting::FILL_ILLUMINANCE, lighting::FILL_POSITION),
        ("Back Light", lighting::BACK_ILLUMINANCE, lighting::BACK_POSITION),
    ];

    for (name, illuminance, position) in lights {
        commands.spawn((
            Name::new(name),
            DirectionalLight {
                illuminance,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
}

fn spawn_grid(mut commands: Commands) {
    commands.spawn(InfiniteGridBundle {
        settings: InfiniteGridSettings {
            x_axis_color: Color::srgb(0.8, 0.2, 0.2),
            z_axis_color: Color::srgb(0.2, 0.2, 0.8),
            minor_line_color: Color::srgba(0.3, 0.3, 0.3, 0.5),
            major_line_color: Color::srgba(0.5, 0.5, 0.5, 0.7),
            fadeout_distance: 60.0,
            dot_fadeout_strength: 0.1,
            scale: 2.0,
        },
        ..default()
    });
}

/// The camera's aspect ratio and viewport follow the window inside Bevy's own
/// camera systems; this only records the change.
fn log_window_resize(mut events: MessageReader<WindowResized>) {
    for event in events.read() {
        debug!("Window resized to {}x{}", event.width, event.height);
    }
}
