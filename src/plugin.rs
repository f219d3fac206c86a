use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::animation::AnimationPlugin;
use crate::geometry::GeometryPlugin;
use crate::info::InfoPlugin;
use crate::scene::ScenePlugin;
use crate::stages::StagesPlugin;
use crate::ui::{SettingsPlugin, UiPlugin};

/// Bundles the whole visualizer: scene, geometry, stages and UI
pub struct MeshStagesPlugin;

impl Plugin for MeshStagesPlugin {
    fn build(&self, app: &mut App) {
        app
            // Third-party plugins
            .add_plugins(EguiPlugin::default())
            // Settings first; everything below reads them
            .add_plugins(SettingsPlugin)
            // Core
            .add_plugins(ScenePlugin)
            .add_plugins(GeometryPlugin)
            .add_plugins(AnimationPlugin)
            .add_plugins(StagesPlugin)
            .add_plugins(InfoPlugin)
            // UI
            .add_plugins(UiPlugin);
    }
}
