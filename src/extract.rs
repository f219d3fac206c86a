//! Mesh data extraction.
//!
//! Turns a renderer-native [`Mesh`] into the three lists the stage reveal works
//! from: vertex positions, triangle index triples, and undirected edges.
//!
//! Extraction is read-only. Vertices are taken verbatim in buffer order, so a
//! primitive with split vertices (a box has four per side) reports every copy.

use std::collections::HashSet;

use bevy::mesh::{Indices, VertexAttributeValues};
use bevy::prelude::*;

/// Vertex, face and edge lists derived from one geometry.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions in buffer order. Faces and edges index into this.
    pub vertices: Vec<Vec3>,
    /// Triangles as vertex index triples, in extraction order.
    pub faces: Vec<[u32; 3]>,
    /// Undirected edges normalized to `[min, max]`, in discovery order.
    pub edges: Vec<[u32; 2]>,
}

impl MeshData {
    /// Extract from a Bevy mesh.
    ///
    /// A mesh without a `Float32x3` position attribute yields empty lists.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            return Self::default();
        };

        let indices: Option<Vec<u32>> = mesh.indices().map(|indices| match indices {
            Indices::U16(values) => values.iter().map(|&i| i as u32).collect(),
            Indices::U32(values) => values.clone(),
        });

        Self::from_buffers(positions, indices.as_deref())
    }

    /// Extract from a flat position buffer and an optional index buffer.
    ///
    /// Without an index buffer the positions are read as a plain triangle list.
    pub fn from_buffers(positions: &[[f32; 3]], indices: Option<&[u32]>) -> Self {
        let vertices: Vec<Vec3> = positions.iter().map(|&p| Vec3::from_array(p)).collect();

        let faces: Vec<[u32; 3]> = match indices {
            Some(indices) => indices
                .chunks_exact(3)
                .map(|tri| [tri[0], tri[1], tri[2]])
                .collect(),
            None => (0..(vertices.len() / 3) as u32)
                .map(|f| [f * 3, f * 3 + 1, f * 3 + 2])
                .collect(),
        };

        let edges = unique_edges(&faces);

        Self {
            vertices,
            faces,
            edges,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Collect the undirected edges of a triangle list, each pair once.
pub fn unique_edges(faces: &[[u32; 3]]) -> Vec<[u32; 2]> {
    let mut seen: HashSet<(u32, u32)> = HashSet::with_capacity(faces.len() * 2);
    let mut edges = Vec::with_capacity(faces.len() * 3 / 2);

    for &[a, b, c] in faces {
        for (from, to) in [(a, b), (b, c), (c, a)] {
            let key = (from.min(to), from.max(to));
            if seen.insert(key) {
                edges.push([key.0, key.1]);
            }
        }
    }

    edges
}
