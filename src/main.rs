//! Standalone viewer binary.

use bevy::prelude::*;
use mesh_stages::MeshStagesPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Mesh Stages".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(MeshStagesPlugin)
        .run();
}
