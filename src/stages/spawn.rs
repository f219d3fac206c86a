//! Building, showing and tearing down the display objects of each stage.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use super::{
    DisplayEdge, DisplayFace, DisplayMesh, DisplayVertex, ResetStagesEvent, Stage,
    StageController, StageStep, StageTriggerEvent,
};
use crate::animation::{Ease, Tween};
use crate::constants::{display_sizes, reveal, stage_colors};
use crate::extract::MeshData;
use crate::geometry::{ActiveGeometry, GeometryChangedEvent};
use crate::info::InfoPanel;

/// Meshes and materials shared by every display vertex and edge
#[derive(Resource)]
pub struct StageAssets {
    pub vertex_mesh: Handle<Mesh>,
    pub vertex_material: Handle<StandardMaterial>,
    /// Unit-height rod, stretched along Y to each edge's length
    pub edge_mesh: Handle<Mesh>,
}

pub(super) fn setup_stage_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(StageAssets {
        vertex_mesh: meshes.add(Sphere::new(display_sizes::VERTEX_RADIUS).mesh().uv(12, 8)),
        vertex_material: materials.add(StandardMaterial {
            base_color: stage_colors::VERTEX,
            emissive: stage_colors::VERTEX.to_linear() * 0.4,
            ..default()
        }),
        edge_mesh: meshes.add(
            Cylinder::new(display_sizes::EDGE_RADIUS, 1.0)
                .mesh()
                .resolution(8)
                .build(),
        ),
    });
}

/// Tear down every display object on request or when the geometry changes.
pub(super) fn reset_stages(
    mut commands: Commands,
    mut resets: MessageReader<ResetStagesEvent>,
    mut changes: MessageReader<GeometryChangedEvent>,
    mut controller: ResMut<StageController>,
    mut info: ResMut<InfoPanel>,
) {
    let requested = resets.read().count() > 0;
    let changed = changes.read().count() > 0;
    if !requested && !changed {
        return;
    }

    let entities = controller.reset();
    for &entity in &entities {
        commands.entity(entity).try_despawn();
    }
    info.reset_status();

    info!("Stages reset: removed {} display objects", entities.len());
}

pub(super) fn apply_stage_triggers(
    mut commands: Commands,
    mut events: MessageReader<StageTriggerEvent>,
    mut controller: ResMut<StageController>,
    data: Res<MeshData>,
    active: Res<ActiveGeometry>,
    stage_assets: Res<StageAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    vertex_transforms: Query<&Transform, With<DisplayVertex>>,
    mut info: ResMut<InfoPanel>,
) {
    for event in events.read() {
        let stage = event.stage;

        match controller.plan(stage) {
            StageStep::Blocked => {
                debug!("{} ignored: nothing to build on yet", stage.action_label());
            }
            StageStep::SetVisible(visible) => {
                set_group_visibility(&mut commands, controller.entities(stage), visible);
                controller.set_visible(stage, visible);
                info.set_status(format!(
                    "{} {}",
                    stage.noun(),
                    if visible { "shown" } else { "hidden" }
                ));
            }
            StageStep::Create => {
                let entities = match stage {
                    Stage::Vertices => spawn_vertices(&mut commands, &data, &stage_assets),
                    Stage::Edges => {
                        let live = live_positions(
                            controller.entities(Stage::Vertices),
                            &vertex_transforms,
                            &data,
                        );
                        spawn_edges(&mut commands, &data, &live, &stage_assets, &mut materials)
                    }
                    Stage::Faces => {
                        let live = live_positions(
                            controller.entities(Stage::Vertices),
                            &vertex_transforms,
                            &data,
                        );
                        spawn_faces(&mut commands, &data, &live, &mut meshes, &mut materials)
                    }
                    Stage::Mesh => {
                        let Some(entity) =
                            spawn_solid(&mut commands, &active, &mut meshes, &mut materials)
                        else {
                            warn!("Assemble Mesh: active geometry is not loaded");
                            continue;
                        };
                        let faces = controller.entities(Stage::Faces);
                        set_group_visibility(&mut commands, faces, false);
                        vec![entity]
                    }
                };

                info!("{}: built {} display objects", stage.action_label(), entities.len());
                info.set_status(creation_status(stage, entities.len()));
                controller.record_created(stage, entities);
            }
        }
    }
}

fn creation_status(stage: Stage, count: usize) -> String {
    match stage {
        Stage::Vertices => format!("Showing {count} vertices"),
        Stage::Edges => format!("Connecting {count} edges"),
        Stage::Faces => format!("Forming {count} faces"),
        Stage::Mesh => "Mesh assembled".to_string(),
    }
}

fn set_group_visibility(commands: &mut Commands, entities: &[Entity], visible: bool) {
    let visibility = if visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for &entity in entities {
        commands.entity(entity).try_insert(visibility);
    }
}

/// Current positions of the display vertices, indexed like `MeshData::vertices`.
///
/// Falls back to the extracted position for vertices whose spawn has not been
/// applied yet (stages triggered in the same frame).
fn live_positions(
    vertices: &[Entity],
    transforms: &Query<&Transform, With<DisplayVertex>>,
    data: &MeshData,
) -> Vec<Vec3> {
    data.vertices
        .iter()
        .enumerate()
        .map(|(i, &extracted)| {
            vertices
                .get(i)
                .and_then(|&entity| transforms.get(entity).ok())
                .map_or(extracted, |transform| transform.translation)
        })
        .collect()
}

fn position_at(positions: &[Vec3], index: u32) -> Vec3 {
    positions.get(index as usize).copied().unwrap_or(Vec3::ZERO)
}

fn spawn_vertices(commands: &mut Commands, data: &MeshData, assets: &StageAssets) -> Vec<Entity> {
    data.vertices
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            commands
                .spawn((
                    Name::new(format!("Vertex {i}")),
                    DisplayVertex(i as u32),
                    Mesh3d(assets.vertex_mesh.clone()),
                    MeshMaterial3d(assets.vertex_material.clone()),
                    Transform::from_translation(position).with_scale(Vec3::ZERO),
                    Tween::scale(0.0, 1.0, reveal::VERTEX_DURATION)
                        .with_delay(i as f32 * reveal::VERTEX_STAGGER)
                        .with_ease(Ease::BackOut),
                ))
                .id()
        })
        .collect()
}

fn spawn_edges(
    commands: &mut Commands,
    data: &MeshData,
    live: &[Vec3],
    assets: &StageAssets,
    materials: &mut Assets<StandardMaterial>,
) -> Vec<Entity> {
    data.edges
        .iter()
        .enumerate()
        .map(|(i, &[a, b])| {
            // Per-edge material so each fade runs independently
            let material = materials.add(StandardMaterial {
                base_color: stage_colors::EDGE.with_alpha(0.0),
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..default()
            });
            commands
                .spawn((
                    Name::new(format!("Edge {a}-{b}")),
                    DisplayEdge([a, b]),
                    Mesh3d(assets.edge_mesh.clone()),
                    MeshMaterial3d(material),
                    rod_between(position_at(live, a), position_at(live, b)),
                    Tween::opacity(0.0, 1.0, reveal::EDGE_DURATION)
                        .with_delay(i as f32 * reveal::EDGE_STAGGER)
                        .with_ease(Ease::QuadOut),
                ))
                .id()
        })
        .collect()
}

fn spawn_faces(
    commands: &mut Commands,
    data: &MeshData,
    live: &[Vec3],
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Vec<Entity> {
    data.faces
        .iter()
        .enumerate()
        .map(|(i, &[a, b, c])| {
            let mesh = meshes.add(triangle_mesh(
                position_at(live, a),
                position_at(live, b),
                position_at(live, c),
            ));
            let material = materials.add(StandardMaterial {
                base_color: stage_colors::FACE.with_alpha(0.0),
                alpha_mode: AlphaMode::Blend,
                double_sided: true,
                cull_mode: None,
                ..default()
            });
            commands
                .spawn((
                    Name::new(format!("Face {i}")),
                    DisplayFace(i as u32),
                    Mesh3d(mesh),
                    MeshMaterial3d(material),
                    Transform::IDENTITY,
                    Tween::opacity(0.0, reveal::FACE_OPACITY, reveal::FACE_DURATION)
                        .with_delay(i as f32 * reveal::FACE_STAGGER)
                        .with_ease(Ease::QuadOut),
                ))
                .id()
        })
        .collect()
}

fn spawn_solid(
    commands: &mut Commands,
    active: &ActiveGeometry,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Option<Entity> {
    let mesh = meshes.get(&active.mesh)?.clone();
    let material = materials.add(StandardMaterial {
        base_color: stage_colors::SOLID,
        perceptual_roughness: 0.45,
        metallic: 0.1,
        ..default()
    });

    let entity = commands
        .spawn((
            Name::new(format!("Mesh ({})", active.source.label())),
            DisplayMesh,
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(material),
            Transform::from_scale(Vec3::ZERO),
            Tween::scale(0.0, 1.0, reveal::MESH_DURATION).with_ease(Ease::CubicOut),
        ))
        .id();
    Some(entity)
}

/// Place a unit-height Y-aligned rod so it spans `a` to `b`.
pub fn rod_between(a: Vec3, b: Vec3) -> Transform {
    let delta = b - a;
    let length = delta.length();
    let rotation = if length > f32::EPSILON {
        Quat::from_rotation_arc(Vec3::Y, delta / length)
    } else {
        Quat::IDENTITY
    };

    Transform {
        translation: (a + b) * 0.5,
        rotation,
        scale: Vec3::new(1.0, length, 1.0),
    }
}

/// A single flat-shaded triangle in world space.
pub fn triangle_mesh(a: Vec3, b: Vec3, c: Vec3) -> Mesh {
    let normal = (b - a).cross(c - a).normalize_or_zero();
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(
            Mesh::ATTRIBUTE_POSITION,
            vec![a.to_array(), b.to_array(), c.to_array()],
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, vec![normal.to_array(); 3])
        .with_inserted_indices(Indices::U32(vec![0, 1, 2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometrySource, MeshShape};
    use crate::info::DEFAULT_STATUS;
    use crate::stages::StageState;
    use bevy::mesh::VertexAttributeValues;
    use std::collections::HashSet;

    /// Stage systems over the default cube, with no renderer or window
    fn cube_app() -> App {
        let mut app = App::new();
        app.add_message::<StageTriggerEvent>()
            .add_message::<ResetStagesEvent>()
            .add_message::<GeometryChangedEvent>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<StageController>()
            .init_resource::<InfoPanel>()
            .add_systems(Startup, setup_stage_assets)
            .add_systems(Update, (reset_stages, apply_stage_triggers).chain());

        let cube = MeshShape::Cube.create_mesh();
        let data = MeshData::from_mesh(&cube);
        let mesh = app.world_mut().resource_mut::<Assets<Mesh>>().add(cube);
        app.insert_resource(data).insert_resource(ActiveGeometry {
            source: GeometrySource::Primitive(MeshShape::Cube),
            mesh,
        });
        app.update();
        app
    }

    fn trigger(app: &mut App, stage: Stage) {
        app.world_mut().write_message(StageTriggerEvent { stage });
        app.update();
    }

    fn entities_with<C: Component>(app: &mut App) -> HashSet<Entity> {
        let world = app.world_mut();
        world.query_filtered::<Entity, With<C>>().iter(world).collect()
    }

    fn visibilities_of<C: Component>(app: &mut App) -> Vec<Visibility> {
        let world = app.world_mut();
        world
            .query_filtered::<&Visibility, With<C>>()
            .iter(world)
            .copied()
            .collect()
    }

    fn display_count(app: &mut App) -> usize {
        entities_with::<DisplayVertex>(app).len()
            + entities_with::<DisplayEdge>(app).len()
            + entities_with::<DisplayFace>(app).len()
            + entities_with::<DisplayMesh>(app).len()
    }

    #[test]
    fn edges_and_faces_need_vertices_first() {
        let mut app = cube_app();
        trigger(&mut app, Stage::Edges);
        trigger(&mut app, Stage::Faces);
        trigger(&mut app, Stage::Mesh);

        assert_eq!(display_count(&mut app), 0);
        assert!(app.world().resource::<StageController>().is_empty());
        assert_eq!(app.world().resource::<InfoPanel>().status, DEFAULT_STATUS);
    }

    #[test]
    fn second_trigger_hides_the_same_vertices() {
        let mut app = cube_app();
        trigger(&mut app, Stage::Vertices);
        let spawned = entities_with::<DisplayVertex>(&mut app);
        assert_eq!(spawned.len(), 24);
        assert_eq!(app.world().resource::<InfoPanel>().status, "Showing 24 vertices");

        trigger(&mut app, Stage::Vertices);
        assert_eq!(entities_with::<DisplayVertex>(&mut app), spawned);
        assert!(visibilities_of::<DisplayVertex>(&mut app)
            .iter()
            .all(|v| *v == Visibility::Hidden));
        assert_eq!(
            app.world().resource::<StageController>().state(Stage::Vertices),
            StageState::Created { visible: false }
        );

        trigger(&mut app, Stage::Vertices);
        assert_eq!(entities_with::<DisplayVertex>(&mut app), spawned);
        assert!(visibilities_of::<DisplayVertex>(&mut app)
            .iter()
            .all(|v| *v == Visibility::Visible));
    }

    #[test]
    fn full_reveal_builds_every_stage_and_assemble_hides_faces() {
        let mut app = cube_app();
        for stage in Stage::ALL {
            trigger(&mut app, stage);
        }

        assert_eq!(entities_with::<DisplayVertex>(&mut app).len(), 24);
        assert_eq!(entities_with::<DisplayEdge>(&mut app).len(), 30);
        assert_eq!(entities_with::<DisplayFace>(&mut app).len(), 12);
        assert_eq!(entities_with::<DisplayMesh>(&mut app).len(), 1);

        assert!(visibilities_of::<DisplayFace>(&mut app)
            .iter()
            .all(|v| *v == Visibility::Hidden));
        assert_eq!(
            app.world().resource::<StageController>().state(Stage::Faces),
            StageState::Created { visible: false }
        );
        assert_eq!(app.world().resource::<InfoPanel>().status, "Mesh assembled");

        // A second assemble toggles the solid instead of building another
        trigger(&mut app, Stage::Mesh);
        assert_eq!(entities_with::<DisplayMesh>(&mut app).len(), 1);
        assert_eq!(visibilities_of::<DisplayMesh>(&mut app), vec![Visibility::Hidden]);
    }

    #[test]
    fn edges_start_on_the_vertex_spheres() {
        let mut app = cube_app();
        trigger(&mut app, Stage::Vertices);
        trigger(&mut app, Stage::Edges);

        let world = app.world_mut();
        let vertices: Vec<(u32, Vec3)> = world
            .query::<(&DisplayVertex, &Transform)>()
            .iter(world)
            .map(|(v, t)| (v.0, t.translation))
            .collect();
        let mut edges = world.query::<(&DisplayEdge, &Transform)>();
        for (edge, transform) in edges.iter(world) {
            let [a, b] = edge.0;
            let end = |i: u32| vertices.iter().find(|(v, _)| *v == i).map(|(_, p)| *p);
            let (Some(pa), Some(pb)) = (end(a), end(b)) else {
                panic!("edge {a}-{b} has no display vertex");
            };
            assert!(transform.translation.distance((pa + pb) * 0.5) < 1e-5);
        }
    }

    #[test]
    fn geometry_change_despawns_everything() {
        let mut app = cube_app();
        for stage in Stage::ALL {
            trigger(&mut app, stage);
        }
        assert!(display_count(&mut app) > 0);

        app.world_mut().write_message(GeometryChangedEvent {
            source: GeometrySource::Primitive(MeshShape::Sphere),
        });
        app.update();

        assert_eq!(display_count(&mut app), 0);
        assert!(app.world().resource::<StageController>().is_empty());
        assert_eq!(app.world().resource::<InfoPanel>().status, DEFAULT_STATUS);
    }

    #[test]
    fn reset_is_idempotent_and_allows_a_rebuild() {
        let mut app = cube_app();
        trigger(&mut app, Stage::Vertices);
        trigger(&mut app, Stage::Faces);

        for _ in 0..2 {
            app.world_mut().write_message(ResetStagesEvent);
            app.update();
            assert_eq!(display_count(&mut app), 0);
            assert!(app.world().resource::<StageController>().is_empty());
        }

        trigger(&mut app, Stage::Vertices);
        assert_eq!(entities_with::<DisplayVertex>(&mut app).len(), 24);
    }

    #[test]
    fn rod_spans_its_endpoints() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(1.0, 0.0, 4.0);
        let rod = rod_between(a, b);

        assert_eq!(rod.translation, Vec3::new(1.0, 0.0, 2.0));
        assert!((rod.scale.y - 4.0).abs() < 1e-5);
        // The rod's local +Y half-extent should land on `b`
        let tip = rod.transform_point(Vec3::new(0.0, 0.5, 0.0));
        assert!(tip.distance(b) < 1e-4, "tip at {tip}");
    }

    #[test]
    fn degenerate_rod_has_no_rotation() {
        let rod = rod_between(Vec3::ONE, Vec3::ONE);
        assert_eq!(rod.rotation, Quat::IDENTITY);
        assert_eq!(rod.scale.y, 0.0);
    }

    #[test]
    fn triangle_normal_follows_winding() {
        let mesh = triangle_mesh(Vec3::ZERO, Vec3::X, Vec3::Y);
        let Some(VertexAttributeValues::Float32x3(normals)) =
            mesh.attribute(Mesh::ATTRIBUTE_NORMAL)
        else {
            panic!("missing normals");
        };
        assert_eq!(normals, &vec![[0.0, 0.0, 1.0]; 3]);
    }

    #[test]
    fn creation_status_reports_counts() {
        assert_eq!(creation_status(Stage::Vertices, 8), "Showing 8 vertices");
        assert_eq!(creation_status(Stage::Mesh, 1), "Mesh assembled");
    }
}
