//! Wavefront OBJ loading.
//!
//! Only the first model in the file is used. Positions are re-centred and scaled so
//! that files authored in any unit fit the default camera framing.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use thiserror::Error;

/// Failure while turning a user-supplied file into a mesh
#[derive(Debug, Error)]
pub enum MeshLoadError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid OBJ data: {0}")]
    Parse(#[from] tobj::LoadError),
    #[error("the file contains no triangle geometry")]
    NoGeometry,
}

/// Parse OBJ text into a triangle mesh whose largest extent equals `fit_extent`.
///
/// A non-positive `fit_extent` keeps the file's own coordinates.
pub fn parse_obj(contents: &str, fit_extent: f32) -> Result<Mesh, MeshLoadError> {
    let mut reader = contents.as_bytes();
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &tobj::GPU_LOAD_OPTIONS, |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;

    let model = models.into_iter().next().ok_or(MeshLoadError::NoGeometry)?;
    let mesh = model.mesh;
    if mesh.positions.len() < 9 || mesh.indices.len() < 3 {
        return Err(MeshLoadError::NoGeometry);
    }

    let mut positions: Vec<[f32; 3]> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    if fit_extent > 0.0 {
        fit_to_extent(&mut positions, fit_extent);
    }

    let normals: Vec<[f32; 3]> = mesh
        .normals
        .chunks_exact(3)
        .map(|n| [n[0], n[1], n[2]])
        .collect();
    let has_normals = normals.len() == positions.len();

    let mut out = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_indices(Indices::U32(mesh.indices));

    if has_normals {
        out.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    } else {
        out.compute_normals();
    }

    Ok(out)
}

/// Centre positions on their bounding box and scale uniformly so the largest side
/// of the box equals `extent`.
pub fn fit_to_extent(positions: &mut [[f32; 3]], extent: f32) {
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for p in positions.iter() {
        let p = Vec3::from_array(*p);
        min = min.min(p);
        max = max.max(p);
    }

    let center = (min + max) * 0.5;
    let largest = (max - min).max_element();
    // Degenerate (single point or empty): only re-centre
    let scale = if largest > f32::EPSILON { extent / largest } else { 1.0 };

    for p in positions.iter_mut() {
        *p = ((Vec3::from_array(*p) - center) * scale).to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::MeshData;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 4 0 0
v 4 2 0
v 0 2 0
f 1 2 3 4
";

    #[test]
    fn quad_is_triangulated() {
        let mesh = parse_obj(QUAD, 0.0).unwrap();
        let data = MeshData::from_mesh(&mesh);

        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.faces.len(), 2);
        assert_eq!(data.edges.len(), 5);
        assert!(mesh.attribute(Mesh::ATTRIBUTE_NORMAL).is_some());
    }

    #[test]
    fn only_first_object_is_used() {
        let text = "\
o first
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o second
v 0 0 1
v 1 0 1
v 0 1 1
v 1 1 1
f 4 5 6
f 5 7 6
";
        let data = MeshData::from_mesh(&parse_obj(text, 0.0).unwrap());
        assert_eq!(data.faces.len(), 1);
        assert_eq!(data.vertices.len(), 3);
    }

    #[test]
    fn fit_centres_and_scales() {
        let data = MeshData::from_mesh(&parse_obj(QUAD, 2.0).unwrap());

        let max_x = data.vertices.iter().map(|v| v.x).fold(f32::MIN, f32::max);
        let min_x = data.vertices.iter().map(|v| v.x).fold(f32::MAX, f32::min);
        assert!((max_x - 1.0).abs() < 1e-5);
        assert!((min_x + 1.0).abs() < 1e-5);
        for v in &data.vertices {
            assert!(v.y.abs() <= 0.5 + 1e-5);
        }
    }

    #[test]
    fn degenerate_positions_are_only_recentred() {
        let mut positions = [[3.0, 3.0, 3.0]; 2];
        fit_to_extent(&mut positions, 5.0);
        assert_eq!(positions, [[0.0; 3]; 2]);
    }

    #[test]
    fn malformed_vertex_is_a_parse_error() {
        let err = parse_obj("v 0 zero 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", 0.0).unwrap_err();
        assert!(matches!(err, MeshLoadError::Parse(_)), "{err:?}");
    }

    #[test]
    fn empty_file_has_no_geometry() {
        assert!(matches!(parse_obj("", 1.0), Err(MeshLoadError::NoGeometry)));
        assert!(matches!(
            parse_obj("# just a comment\n", 1.0),
            Err(MeshLoadError::NoGeometry)
        ));
    }
}
