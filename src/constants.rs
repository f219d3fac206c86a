//! Centralized constants for the visualizer
//!
//! Colors, sizes and reveal timings shared across the stage, scene and UI modules.

use bevy::prelude::*;

/// Fixed dimensions of the built-in primitives
pub mod shape_dimensions {
    /// Edge length of the cube
    pub const CUBE_SIZE: f32 = 2.0;
    /// Radius of the cylinder and cone bases
    pub const RADIUS: f32 = 1.0;
    /// Height of the cylinder and cone
    pub const HEIGHT: f32 = 2.0;
    /// Radial segments of the cylinder and cone
    pub const RADIAL_SEGMENTS: u32 = 24;
    pub const SPHERE_RADIUS: f32 = 1.2;
    pub const SPHERE_SECTORS: u32 = 24;
    pub const SPHERE_STACKS: u32 = 16;
}

/// Colors of the display objects for each stage
pub mod stage_colors {
    use super::*;

    pub const VERTEX: Color = Color::srgb(1.0, 0.42, 0.21);
    pub const EDGE: Color = Color::srgb(0.3, 0.8, 1.0);
    pub const FACE: Color = Color::srgb(0.55, 0.4, 0.95);
    pub const SOLID: Color = Color::srgb(0.2, 0.55, 1.0);
}

/// Timing of the staged reveal animations, in seconds
pub mod reveal {
    /// Delay added per vertex index
    pub const VERTEX_STAGGER: f32 = 0.05;
    pub const VERTEX_DURATION: f32 = 0.5;
    /// Delay added per edge index
    pub const EDGE_STAGGER: f32 = 0.03;
    pub const EDGE_DURATION: f32 = 0.3;
    /// Delay added per face index
    pub const FACE_STAGGER: f32 = 0.05;
    pub const FACE_DURATION: f32 = 0.5;
    /// Final opacity of a face fill
    pub const FACE_OPACITY: f32 = 0.7;
    pub const MESH_DURATION: f32 = 1.0;
}

/// Sizes of the display objects
pub mod display_sizes {
    /// Radius of a display vertex sphere
    pub const VERTEX_RADIUS: f32 = 0.06;
    /// Radius of a display edge rod
    pub const EDGE_RADIUS: f32 = 0.012;
}

/// Persistent scene lighting
pub mod lighting {
    use super::*;

    pub const KEY_ILLUMINANCE: f32 = 9000.0;
    pub const KEY_POSITION: Vec3 = Vec3::new(5.0, 8.0, 6.0);
    pub const FILL_ILLUMINANCE: f32 = 3500.0;
    pub const FILL_POSITION: Vec3 = Vec3::new(-6.0, 3.0, 4.0);
    pub const BACK_ILLUMINANCE: f32 = 5000.0;
    pub const BACK_POSITION: Vec3 = Vec3::new(0.0, 5.0, -8.0);
    pub const AMBIENT_BRIGHTNESS: f32 = 250.0;
}

/// Camera projection
pub mod camera {
    pub const FOV_DEGREES: f32 = 50.0;
    pub const NEAR: f32 = 0.1;
    pub const FAR: f32 = 1000.0;
}
