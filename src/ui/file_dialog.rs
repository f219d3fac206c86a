use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy::prelude::*;
use bevy::window::FileDragAndDrop;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass};
use egui_file_dialog::FileDialog;

use crate::geometry::{LoadMeshFileEvent, MeshLoadError, MeshLoadFailedEvent};

const OBJ_FILTER: &str = "Wavefront OBJ";

/// Resource managing the egui file dialog used to pick mesh files
#[derive(Resource)]
pub struct FileDialogState {
    pub dialog: FileDialog,
    /// Directory of the last picked file, reused as the next starting point
    pub last_directory: Option<PathBuf>,
}

impl Default for FileDialogState {
    fn default() -> Self {
        Self {
            dialog: FileDialog::new(),
            last_directory: None,
        }
    }
}

impl FileDialogState {
    /// Open the dialog to pick an OBJ file
    pub fn open_pick_mesh(&mut self) {
        let mut dialog = FileDialog::new()
            .title("Load Mesh")
            .add_file_filter(OBJ_FILTER, Arc::new(|path: &Path| is_obj_path(path)))
            .default_file_filter(OBJ_FILTER);
        if let Some(dir) = &self.last_directory {
            dialog = dialog.initial_directory(dir.clone());
        }
        self.dialog = dialog;
        self.dialog.pick_file();
    }
}

pub struct FileDialogPlugin;

impl Plugin for FileDialogPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FileDialogState>()
            .add_systems(EguiPrimaryContextPass, update_file_dialog)
            .add_systems(Update, handle_dropped_files);
    }
}

fn is_obj_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("obj"))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Read a mesh file's text, tagging failures with the path
pub fn read_mesh_file(path: &Path) -> Result<String, MeshLoadError> {
    std::fs::read_to_string(path).map_err(|source| MeshLoadError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })
}

/// Hand a picked or dropped file to the geometry systems
fn submit_mesh_file(
    path: &Path,
    load_events: &mut MessageWriter<LoadMeshFileEvent>,
    failed_events: &mut MessageWriter<MeshLoadFailedEvent>,
) {
    let name = display_name(path);
    match read_mesh_file(path) {
        Ok(contents) => {
            info!("Read mesh file: {:?}", path);
            load_events.write(LoadMeshFileEvent { name, contents });
        }
        Err(e) => {
            error!("{}", e);
            failed_events.write(MeshLoadFailedEvent {
                name,
                message: e.to_string(),
            });
        }
    }
}

fn update_file_dialog(
    mut contexts: EguiContexts,
    mut state: ResMut<FileDialogState>,
    mut load_events: MessageWriter<LoadMeshFileEvent>,
    mut failed_events: MessageWriter<MeshLoadFailedEvent>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    state.dialog.update(ctx);

    if let Some(path) = state.dialog.take_picked() {
        state.last_directory = path.parent().map(Path::to_path_buf);
        submit_mesh_file(&path, &mut load_events, &mut failed_events);
    }

    Ok(())
}

/// Files dropped onto the window load like picked ones
fn handle_dropped_files(
    mut drops: MessageReader<FileDragAndDrop>,
    mut load_events: MessageWriter<LoadMeshFileEvent>,
    mut failed_events: MessageWriter<MeshLoadFailedEvent>,
) {
    for drop in drops.read() {
        let FileDragAndDrop::DroppedFile { path_buf, .. } = drop else {
            continue;
        };

        if !is_obj_path(path_buf) {
            warn!("Ignoring dropped file {:?}: not an .obj file", path_buf);
            failed_events.write(MeshLoadFailedEvent {
                name: display_name(path_buf),
                message: "only Wavefront .obj files can be loaded".to_string(),
            });
            continue;
        }
        submit_mesh_file(path_buf, &mut load_events, &mut failed_events);
    }
}
