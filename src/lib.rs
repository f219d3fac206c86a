//! # Mesh Stages
//!
//! An interactive 3D viewer that takes a mesh apart and rebuilds it in four steps:
//! its vertices, the edges between them, the triangular faces, and finally the
//! shaded solid.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use mesh_stages::MeshStagesPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(MeshStagesPlugin)
//!         .run();
//! }
//! ```
//!
//! ## Controls
//!
//! - **Left drag**: orbit, **right/middle drag**: pan, **wheel**: zoom
//! - **1-4**: show vertices, connect edges, form faces, assemble mesh
//! - **R**: reset the stages
//!
//! Pick a primitive or load a Wavefront `.obj` file from the side panel, or drop
//! one onto the window.

pub mod animation;
pub mod constants;
pub mod extract;
pub mod geometry;
pub mod info;
mod plugin;
pub mod scene;
pub mod stages;
pub mod ui;
pub mod utils;

pub use plugin::MeshStagesPlugin;

// Re-export commonly used types
pub use extract::MeshData;
pub use geometry::{
    ActiveGeometry, GeometryChangedEvent, GeometrySource, LoadMeshFileEvent, MeshLoadError,
    MeshLoadFailedEvent, MeshShape, SelectShapeEvent,
};
pub use info::InfoPanel;
pub use stages::{ResetStagesEvent, Stage, StageController, StageState, StageTriggerEvent};
pub use ui::Settings;
