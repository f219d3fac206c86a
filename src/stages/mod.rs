//! Four-stage reveal: vertices, edges, faces, then the assembled mesh.
//!
//! Each trigger either builds its stage's display objects (first time) or toggles
//! their visibility as a group. Edges and faces need the display vertices; the mesh
//! needs the faces. Triggers whose prerequisite is missing do nothing.
//! A reset, or any geometry change, despawns everything and starts over.

mod controller;
mod spawn;

pub use controller::*;
pub use spawn::{StageAssets, rod_between, triangle_mesh};

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::geometry::GeometrySet;
use crate::utils::ui_wants_keyboard;

/// Display object for one extracted vertex
#[derive(Component, Debug, Clone, Copy)]
pub struct DisplayVertex(pub u32);

/// Display object for one undirected edge
#[derive(Component, Debug, Clone, Copy)]
pub struct DisplayEdge(pub [u32; 2]);

/// Display object for one triangle, by face index
#[derive(Component, Debug, Clone, Copy)]
pub struct DisplayFace(pub u32);

/// The assembled, shaded solid
#[derive(Component, Debug, Clone, Copy)]
pub struct DisplayMesh;

/// Run (or toggle) one stage
#[derive(Message, Debug, Clone, Copy)]
pub struct StageTriggerEvent {
    pub stage: Stage,
}

/// Remove every display object and return to the empty state
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetStagesEvent;

pub struct StagesPlugin;

impl Plugin for StagesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<StageTriggerEvent>()
            .add_message::<ResetStagesEvent>()
            .init_resource::<StageController>()
            .add_systems(Startup, spawn::setup_stage_assets)
            .add_systems(
                Update,
                (stage_hotkeys, spawn::reset_stages, spawn::apply_stage_triggers)
                    .chain()
                    .after(GeometrySet),
            );
    }
}

/// Number keys 1-4 trigger the stages, R resets
fn stage_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut triggers: MessageWriter<StageTriggerEvent>,
    mut resets: MessageWriter<ResetStagesEvent>,
    mut contexts: EguiContexts,
) {
    if ui_wants_keyboard(&mut contexts) {
        return;
    }

    let bindings = [
        (KeyCode::Digit1, Stage::Vertices),
        (KeyCode::Digit2, Stage::Edges),
        (KeyCode::Digit3, Stage::Faces),
        (KeyCode::Digit4, Stage::Mesh),
    ];
    for (key, stage) in bindings {
        if keyboard.just_pressed(key) {
            triggers.write(StageTriggerEvent { stage });
        }
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        resets.write(ResetStagesEvent);
    }
}
