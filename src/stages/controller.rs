use bevy::prelude::*;

/// One of the four reveal phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Stage {
    Vertices,
    Edges,
    Faces,
    Mesh,
}

impl Stage {
    pub const ALL: [Self; 4] = [Self::Vertices, Self::Edges, Self::Faces, Self::Mesh];

    /// Label of the button that triggers this stage
    pub fn action_label(&self) -> &'static str {
        match self {
            Stage::Vertices => "Show Vertices",
            Stage::Edges => "Connect Edges",
            Stage::Faces => "Form Faces",
            Stage::Mesh => "Assemble Mesh",
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            Stage::Vertices => "Vertices",
            Stage::Edges => "Edges",
            Stage::Faces => "Faces",
            Stage::Mesh => "Mesh",
        }
    }

    /// The stage whose display objects must already exist
    pub fn prerequisite(&self) -> Option<Stage> {
        match self {
            Stage::Vertices => None,
            Stage::Edges | Stage::Faces => Some(Stage::Vertices),
            Stage::Mesh => Some(Stage::Faces),
        }
    }
}

/// Whether a stage's display objects exist, and if so whether they are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StageState {
    #[default]
    Uncreated,
    Created { visible: bool },
}

impl StageState {
    pub fn is_created(&self) -> bool {
        matches!(self, StageState::Created { .. })
    }
}

/// What a stage trigger should do given the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStep {
    /// Build the display objects for the first time
    Create,
    /// Show or hide the existing group
    SetVisible(bool),
    /// Prerequisite stage has not been created; do nothing
    Blocked,
}

#[derive(Debug, Default)]
struct StageSlot {
    state: StageState,
    entities: Vec<Entity>,
}

/// Owns the reveal state and display entities of every stage.
///
/// The controller only decides and records; spawning, visibility and despawning
/// are carried out by the systems in `stages::spawn`.
#[derive(Resource, Debug, Default)]
pub struct StageController {
    vertices: StageSlot,
    edges: StageSlot,
    faces: StageSlot,
    mesh: StageSlot,
}

impl StageController {
    fn slot(&self, stage: Stage) -> &StageSlot {
        match stage {
            Stage::Vertices => &self.vertices,
            Stage::Edges => &self.edges,
            Stage::Faces => &self.faces,
            Stage::Mesh => &self.mesh,
        }
    }

    fn slot_mut(&mut self, stage: Stage) -> &mut StageSlot {
        match stage {
            Stage::Vertices => &mut self.vertices,
            Stage::Edges => &mut self.edges,
            Stage::Faces => &mut self.faces,
            Stage::Mesh => &mut self.mesh,
        }
    }

    pub fn state(&self, stage: Stage) -> StageState {
        self.slot(stage).state
    }

    /// Display entities of a stage, in list order
    pub fn entities(&self, stage: Stage) -> &[Entity] {
        &self.slot(stage).entities
    }

    /// Decide what triggering `stage` does now.
    pub fn plan(&self, stage: Stage) -> StageStep {
        match self.state(stage) {
            StageState::Created { visible } => StageStep::SetVisible(!visible),
            StageState::Uncreated => {
                let ready = stage
                    .prerequisite()
                    .is_none_or(|pre| self.state(pre).is_created());
                if ready { StageStep::Create } else { StageStep::Blocked }
            }
        }
    }

    /// Record the display entities built for `stage`; the group starts visible.
    ///
    /// Building the mesh hides the face fills.
    pub fn record_created(&mut self, stage: Stage, entities: Vec<Entity>) {
        let slot = self.slot_mut(stage);
        slot.state = StageState::Created { visible: true };
        slot.entities = entities;

        if stage == Stage::Mesh && self.faces.state.is_created() {
            self.faces.state = StageState::Created { visible: false };
        }
    }

    /// Set a created stage's visibility flag. Ignored for uncreated stages.
    pub fn set_visible(&mut self, stage: Stage, visible: bool) {
        let slot = self.slot_mut(stage);
        if slot.state.is_created() {
            slot.state = StageState::Created { visible };
        }
    }

    /// Forget every stage and hand back all display entities for despawning.
    pub fn reset(&mut self) -> Vec<Entity> {
        let mut entities = Vec::new();
        for stage in Stage::ALL {
            let slot = std::mem::take(self.slot_mut(stage));
            entities.extend(slot.entities);
        }
        entities
    }

    pub fn is_empty(&self) -> bool {
        Stage::ALL.iter().all(|&stage| {
            self.state(stage) == StageState::Uncreated && self.entities(stage).is_empty()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_many(world: &mut World, n: usize) -> Vec<Entity> {
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn fresh_controller_only_allows_vertices() {
        let controller = StageController::default();
        assert!(controller.is_empty());
        assert_eq!(controller.plan(Stage::Vertices), StageStep::Create);
        assert_eq!(controller.plan(Stage::Edges), StageStep::Blocked);
        assert_eq!(controller.plan(Stage::Faces), StageStep::Blocked);
        assert_eq!(controller.plan(Stage::Mesh), StageStep::Blocked);
    }

    #[test]
    fn second_trigger_toggles_instead_of_duplicating() {
        let mut world = World::new();
        let mut controller = StageController::default();

        controller.record_created(Stage::Vertices, spawn_many(&mut world, 8));
        assert_eq!(controller.entities(Stage::Vertices).len(), 8);
        assert_eq!(controller.plan(Stage::Vertices), StageStep::SetVisible(false));

        controller.set_visible(Stage::Vertices, false);
        assert_eq!(controller.plan(Stage::Vertices), StageStep::SetVisible(true));

        controller.set_visible(Stage::Vertices, true);
        assert_eq!(
            controller.state(Stage::Vertices),
            StageState::Created { visible: true }
        );
        assert_eq!(controller.entities(Stage::Vertices).len(), 8);
    }

    #[test]
    fn edges_and_faces_unlock_after_vertices() {
        let mut world = World::new();
        let mut controller = StageController::default();
        controller.record_created(Stage::Vertices, spawn_many(&mut world, 3));

        assert_eq!(controller.plan(Stage::Edges), StageStep::Create);
        assert_eq!(controller.plan(Stage::Faces), StageStep::Create);
        assert_eq!(controller.plan(Stage::Mesh), StageStep::Blocked);
    }

    #[test]
    fn hidden_vertices_still_unlock_edges() {
        let mut world = World::new();
        let mut controller = StageController::default();
        controller.record_created(Stage::Vertices, spawn_many(&mut world, 3));
        controller.set_visible(Stage::Vertices, false);

        assert_eq!(controller.plan(Stage::Edges), StageStep::Create);
    }

    #[test]
    fn empty_geometry_still_counts_as_created() {
        let mut controller = StageController::default();
        controller.record_created(Stage::Vertices, Vec::new());

        assert!(controller.state(Stage::Vertices).is_created());
        assert_eq!(controller.plan(Stage::Edges), StageStep::Create);
    }

    #[test]
    fn assembling_hides_faces_and_toggles_only_the_mesh() {
        let mut world = World::new();
        let mut controller = StageController::default();
        controller.record_created(Stage::Vertices, spawn_many(&mut world, 3));
        controller.record_created(Stage::Faces, spawn_many(&mut world, 1));
        assert_eq!(controller.plan(Stage::Mesh), StageStep::Create);

        controller.record_created(Stage::Mesh, spawn_many(&mut world, 1));
        assert_eq!(
            controller.state(Stage::Faces),
            StageState::Created { visible: false }
        );
        assert_eq!(controller.plan(Stage::Mesh), StageStep::SetVisible(false));

        controller.set_visible(Stage::Mesh, false);
        assert_eq!(
            controller.state(Stage::Faces),
            StageState::Created { visible: false }
        );
    }

    #[test]
    fn set_visible_ignores_uncreated_stage() {
        let mut controller = StageController::default();
        controller.set_visible(Stage::Edges, true);
        assert_eq!(controller.state(Stage::Edges), StageState::Uncreated);
    }

    #[test]
    fn reset_returns_everything_and_is_a_fixed_point() {
        let mut world = World::new();
        let mut controller = StageController::default();
        controller.record_created(Stage::Vertices, spawn_many(&mut world, 4));
        controller.record_created(Stage::Edges, spawn_many(&mut world, 5));
        controller.record_created(Stage::Faces, spawn_many(&mut world, 2));
        controller.record_created(Stage::Mesh, spawn_many(&mut world, 1));

        let despawned = controller.reset();
        assert_eq!(despawned.len(), 12);
        assert!(controller.is_empty());
        assert_eq!(controller.plan(Stage::Vertices), StageStep::Create);
        assert_eq!(controller.plan(Stage::Edges), StageStep::Blocked);

        assert!(controller.reset().is_empty());
        assert!(controller.is_empty());
    }
}
