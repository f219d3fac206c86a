//! Counts and status text shown in the info panel.
//!
//! Read-side only: refreshed from [`MeshData`] whenever the geometry changes, and
//! given a status line by the stage systems.

use bevy::prelude::*;

use crate::extract::MeshData;
use crate::geometry::{GeometryChangedEvent, GeometrySet};

/// Status line shown when no stage has been run
pub const DEFAULT_STATUS: &str = "Click \"Show Vertices\" to begin";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct InfoPanel {
    /// Name of the active shape or loaded file
    pub source_label: String,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub face_count: usize,
    pub status: String,
}

impl Default for InfoPanel {
    fn default() -> Self {
        Self {
            source_label: String::new(),
            vertex_count: 0,
            edge_count: 0,
            face_count: 0,
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

impl InfoPanel {
    pub fn set_counts(&mut self, data: &MeshData) {
        self.vertex_count = data.vertices.len();
        self.edge_count = data.edges.len();
        self.face_count = data.faces.len();
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn reset_status(&mut self) {
        self.status = DEFAULT_STATUS.to_string();
    }
}

pub struct InfoPlugin;

impl Plugin for InfoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InfoPanel>()
            .add_systems(Update, refresh_counts.after(GeometrySet));
    }
}

fn refresh_counts(
    mut events: MessageReader<GeometryChangedEvent>,
    data: Res<MeshData>,
    mut info: ResMut<InfoPanel>,
) {
    let Some(event) = events.read().last() else {
        return;
    };

    info.source_label = event.source.label();
    info.set_counts(&data);
}
