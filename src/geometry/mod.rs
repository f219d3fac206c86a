//! The active geometry: one primitive or one loaded OBJ mesh at a time.
//!
//! Every successful replacement re-extracts [`MeshData`] and announces a
//! [`GeometryChangedEvent`]; the stage controller and info panel react to that.

mod obj;
mod shapes;

pub use obj::*;
pub use shapes::*;

use bevy::prelude::*;

use crate::extract::MeshData;
use crate::ui::Settings;

/// Where the active geometry came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeometrySource {
    Primitive(MeshShape),
    File { name: String },
}

impl GeometrySource {
    pub fn label(&self) -> String {
        match self {
            GeometrySource::Primitive(shape) => shape.display_name().to_string(),
            GeometrySource::File { name } => name.clone(),
        }
    }
}

impl Default for GeometrySource {
    fn default() -> Self {
        GeometrySource::Primitive(MeshShape::default())
    }
}

/// The single live geometry buffer
#[derive(Resource, Default)]
pub struct ActiveGeometry {
    pub source: GeometrySource,
    pub mesh: Handle<Mesh>,
}

/// Replace the active geometry with a fresh primitive
#[derive(Message, Debug, Clone, Copy)]
pub struct SelectShapeEvent {
    pub shape: MeshShape,
}

/// Replace the active geometry with the contents of an OBJ file
#[derive(Message, Debug, Clone)]
pub struct LoadMeshFileEvent {
    pub name: String,
    pub contents: String,
}

/// A mesh file could not be used; the previous geometry is still active
#[derive(Message, Debug, Clone)]
pub struct MeshLoadFailedEvent {
    pub name: String,
    pub message: String,
}

/// The active geometry was replaced and [`MeshData`] re-extracted
#[derive(Message, Debug, Clone)]
pub struct GeometryChangedEvent {
    pub source: GeometrySource,
}

/// Systems that replace the geometry and re-extract its data
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometrySet;

pub struct GeometryPlugin;

impl Plugin for GeometryPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SelectShapeEvent>()
            .add_message::<LoadMeshFileEvent>()
            .add_message::<MeshLoadFailedEvent>()
            .add_message::<GeometryChangedEvent>()
            .init_resource::<ActiveGeometry>()
            .init_resource::<MeshData>()
            .add_systems(Startup, select_initial_shape)
            .add_systems(
                Update,
                (handle_select_shape, handle_load_mesh_file, refresh_mesh_data)
                    .chain()
                    .in_set(GeometrySet),
            );
    }
}

fn select_initial_shape(settings: Res<Settings>, mut events: MessageWriter<SelectShapeEvent>) {
    events.write(SelectShapeEvent {
        shape: settings.initial_shape,
    });
}

fn handle_select_shape(
    mut events: MessageReader<SelectShapeEvent>,
    mut active: ResMut<ActiveGeometry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut changed: MessageWriter<GeometryChangedEvent>,
) {
    for event in events.read() {
        let source = GeometrySource::Primitive(event.shape);
        replace_geometry(&mut active, &mut meshes, source.clone(), event.shape.create_mesh());
        info!("Geometry: {}", source.label());
        changed.write(GeometryChangedEvent { source });
    }
}

fn handle_load_mesh_file(
    mut events: MessageReader<LoadMeshFileEvent>,
    settings: Res<Settings>,
    mut active: ResMut<ActiveGeometry>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut changed: MessageWriter<GeometryChangedEvent>,
    mut failed: MessageWriter<MeshLoadFailedEvent>,
) {
    for event in events.read() {
        match parse_obj(&event.contents, settings.fit_extent) {
            Ok(mesh) => {
                let source = GeometrySource::File {
                    name: event.name.clone(),
                };
                replace_geometry(&mut active, &mut meshes, source.clone(), mesh);
                info!("Geometry: loaded {}", event.name);
                changed.write(GeometryChangedEvent { source });
            }
            Err(e) => {
                error!("Failed to load {}: {}", event.name, e);
                failed.write(MeshLoadFailedEvent {
                    name: event.name.clone(),
                    message: e.to_string(),
                });
            }
        }
    }
}

fn replace_geometry(
    active: &mut ActiveGeometry,
    meshes: &mut Assets<Mesh>,
    source: GeometrySource,
    mesh: Mesh,
) {
    // The previous buffer is freed once its last strong handle drops
    active.mesh = meshes.add(mesh);
    active.source = source;
}

fn refresh_mesh_data(
    mut events: MessageReader<GeometryChangedEvent>,
    active: Res<ActiveGeometry>,
    meshes: Res<Assets<Mesh>>,
    mut data: ResMut<MeshData>,
) {
    // Several changes in one frame collapse into the last one
    if events.read().last().is_none() {
        return;
    }

    *data = meshes
        .get(&active.mesh)
        .map(MeshData::from_mesh)
        .unwrap_or_default();

    if data.is_empty() {
        warn!("Active geometry has no usable positions; stages will build nothing");
        return;
    }

    info!(
        "Extracted {} vertices, {} edges, {} faces",
        data.vertices.len(),
        data.edges.len(),
        data.faces.len()
    );
}
