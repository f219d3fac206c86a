use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::shape_dimensions as dims;

/// Built-in primitive solids offered by the shape selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect, Default)]
pub enum MeshShape {
    #[default]
    Cube,
    Cylinder,
    Cone,
    Sphere,
}

impl MeshShape {
    pub const ALL: [Self; 4] = [Self::Cube, Self::Cylinder, Self::Cone, Self::Sphere];

    pub fn display_name(&self) -> &'static str {
        match self {
            MeshShape::Cube => "Cube",
            MeshShape::Cylinder => "Cylinder",
            MeshShape::Cone => "Cone",
            MeshShape::Sphere => "Sphere",
        }
    }

    /// Parse a selector value (`cube`, `cylinder`, `cone`, `sphere`), ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|shape| shape.display_name().eq_ignore_ascii_case(name))
    }

    /// Create a fresh mesh for this shape. Dimensions are fixed per shape.
    pub fn create_mesh(&self) -> Mesh {
        match self {
            MeshShape::Cube => Mesh::from(Cuboid::from_length(dims::CUBE_SIZE)),
            MeshShape::Cylinder => Cylinder::new(dims::RADIUS, dims::HEIGHT)
                .mesh()
                .resolution(dims::RADIAL_SEGMENTS)
                .segments(1)
                .build(),
            MeshShape::Cone => Cone::new(dims::RADIUS, dims::HEIGHT)
                .mesh()
                .resolution(dims::RADIAL_SEGMENTS)
                .build(),
            MeshShape::Sphere => Sphere::new(dims::SPHERE_RADIUS)
                .mesh()
                .uv(dims::SPHERE_SECTORS, dims::SPHERE_STACKS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(MeshShape::from_name("cube"), Some(MeshShape::Cube));
        assert_eq!(MeshShape::from_name("Cylinder"), Some(MeshShape::Cylinder));
        assert_eq!(MeshShape::from_name(" CONE "), Some(MeshShape::Cone));
        assert_eq!(MeshShape::from_name("sphere"), Some(MeshShape::Sphere));
        assert_eq!(MeshShape::from_name("torus"), None);
    }

    #[test]
    fn every_shape_builds_an_indexed_triangle_mesh() {
        for shape in MeshShape::ALL {
            let mesh = shape.create_mesh();
            assert!(mesh.attribute(Mesh::ATTRIBUTE_POSITION).is_some());
            let indices = mesh.indices().expect("primitives are indexed");
            assert_eq!(indices.len() % 3, 0, "{shape:?}");
        }
    }
}
