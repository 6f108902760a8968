//! The editor world.
//!
//! [`TileWorld`] owns the scene, the local player controller and every tile
//! manager. It is the only place that connects them: the controller produces
//! interaction events, its router names the targets, and the world resolves
//! those ids to managers and hands each one the scene to mutate.

use std::collections::BTreeMap;

use engine_scene::{ActorId, PlayerController, Scene};
use tracing::{debug, info, warn};

use crate::config::TileManagerConfig;
use crate::error::SetupError;
use crate::input::InputEdges;
use crate::manager::{InteractionOutcome, TileGameManager};
use crate::setup::LevelSetup;

/// Scene, controller and managers of one editing session.
#[derive(Debug)]
pub struct TileWorld {
    scene: Scene,
    controller: PlayerController,
    managers: BTreeMap<ActorId, TileGameManager>,
}

impl TileWorld {
    pub const CONTROLLER_LABEL: &'static str = "PlayerController";
    pub const MANAGER_LABEL: &'static str = "TileGameManager";

    /// An empty world with a ground plane at `ground_height` and a player controller.
    ///
    /// # Errors
    ///
    /// Propagates scene errors from spawning the controller.
    pub fn new(ground_height: f32) -> Result<Self, SetupError> {
        let mut scene = Scene::new(ground_height);
        let controller = PlayerController::spawn(&mut scene, Self::CONTROLLER_LABEL)?;
        Ok(Self {
            scene,
            controller,
            managers: BTreeMap::new(),
        })
    }

    /// Build a world from a level setup: spawn the tile types in order, spawn
    /// one manager whose catalog lists them, and begin play.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for duplicate labels or an invalid manager config.
    pub fn from_setup(setup: &LevelSetup) -> Result<Self, SetupError> {
        let mut world = Self::new(setup.ground_height)?;
        let mut tile_types = Vec::with_capacity(setup.tile_types.len());
        for tile in &setup.tile_types {
            let id = world.scene.spawn_tile(tile.label.clone(), tile.instanced_mesh())?;
            tile_types.push(id);
        }
        let manager = world.spawn_manager(Self::MANAGER_LABEL, setup.manager.clone(), tile_types)?;
        world.begin_play();
        info!(
            %manager,
            tile_types = setup.tile_types.len(),
            "level ready"
        );
        Ok(world)
    }

    /// Spawn a manager actor with the given catalog. It receives no events
    /// until [`TileWorld::begin_play`] registers it.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] for a duplicate label or an invalid config.
    pub fn spawn_manager(
        &mut self,
        label: &str,
        config: TileManagerConfig,
        tile_types: Vec<ActorId>,
    ) -> Result<ActorId, SetupError> {
        let id = self.scene.spawn_actor(label)?;
        let mut manager = match TileGameManager::new(id, config) {
            Ok(manager) => manager,
            Err(e) => {
                self.scene.destroy_actor(id);
                return Err(e.into());
            }
        };
        manager.set_tile_types(tile_types);
        self.managers.insert(id, manager);
        Ok(id)
    }

    /// Begin play for every manager.
    pub fn begin_play(&mut self) {
        for manager in self.managers.values_mut() {
            manager.begin_play(&self.scene, &mut self.controller);
        }
    }

    /// Trace under the cursor and route the event to every registered manager.
    ///
    /// Returns each target's outcome. Targets that no longer exist are skipped,
    /// and a trace that misses produces no event at all.
    pub fn dispatch_interaction(&mut self) -> Vec<(ActorId, InteractionOutcome)> {
        let event = match self.controller.trace_under_cursor(&self.scene) {
            Ok(Some(event)) => event,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "cursor trace failed");
                return Vec::new();
            }
        };
        let edges = InputEdges::from_input(self.controller.input());

        let mut outcomes = Vec::new();
        for target in self.controller.router().targets() {
            let Some(manager) = self.managers.get_mut(target) else {
                debug!(%target, "interaction target no longer exists");
                continue;
            };
            let outcome = manager.on_actor_interaction(&mut self.scene, &event, edges);
            debug!(%target, ?outcome, "interaction handled");
            outcomes.push((*target, outcome));
        }
        outcomes
    }

    /// Advance every manager by one frame and rebuild stale navigation.
    pub fn tick(&mut self, dt: f64) {
        for manager in self.managers.values_mut() {
            manager.tick(dt);
        }
        self.scene.flush_navigation();
    }

    /// Remove a manager. Its router entry becomes stale and is skipped.
    pub fn destroy_manager(&mut self, id: ActorId) -> bool {
        self.scene.destroy_actor(id);
        self.managers.remove(&id).is_some()
    }

    /// Returns a reference to the scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns a mutable reference to the scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Returns a reference to the player controller.
    #[must_use]
    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    /// Returns a mutable reference to the player controller.
    pub fn controller_mut(&mut self) -> &mut PlayerController {
        &mut self.controller
    }

    /// Iterate over all managers in id order.
    pub fn managers(&self) -> impl Iterator<Item = &TileGameManager> {
        self.managers.values()
    }
}

#[cfg(test)]
mod tests {
    use engine_math::Vec3;
    use engine_scene::{InputKey, Ray};

    use super::*;
    use crate::grid::{GridCoord, Occupancy};
    use crate::setup::TileTypeSetup;

    fn setup() -> LevelSetup {
        LevelSetup {
            manager: TileManagerConfig::default(),
            ground_height: 5.0,
            tile_types: vec![
                TileTypeSetup::new("TileA", "/Game/Tiles/SM_A"),
                TileTypeSetup::new("TileB", "/Game/Tiles/SM_B"),
            ],
        }
    }

    fn only_manager(world: &TileWorld) -> &TileGameManager {
        world.managers().next().unwrap()
    }

    fn frame(world: &mut TileWorld, x: f32, y: f32, press: &[InputKey]) -> Vec<(ActorId, InteractionOutcome)> {
        let controller = world.controller_mut();
        controller.input_mut().begin_frame();
        for key in press {
            controller.input_mut().press(*key);
        }
        controller.set_cursor(Ray::straight_down(x, y, 1000.0));
        world.dispatch_interaction()
    }

    #[test]
    fn test_from_setup_builds_catalog_and_registers() {
        let world = TileWorld::from_setup(&setup()).unwrap();
        let manager = only_manager(&world);
        assert_eq!(manager.tile_types().len(), 2);
        assert_eq!(
            world.scene().actor_label(manager.tile_types()[0]),
            Some("TileA")
        );
        assert!(world.controller().router().contains(manager.id()));
        assert_eq!(
            manager.tile_preview().mesh.as_ref().map(|m| m.path()),
            Some("/Game/Tiles/SM_A")
        );
    }

    #[test]
    fn test_from_setup_rejects_bad_config() {
        let mut bad = setup();
        bad.manager.grid_size = -1.0;
        assert!(matches!(TileWorld::from_setup(&bad), Err(SetupError::Config(_))));
    }

    #[test]
    fn test_from_setup_rejects_duplicate_labels() {
        let mut bad = setup();
        bad.tile_types[1].label = "TileA".to_string();
        assert!(matches!(TileWorld::from_setup(&bad), Err(SetupError::Scene(_))));
    }

    #[test]
    fn test_dispatch_without_cursor_is_empty() {
        let mut world = TileWorld::from_setup(&setup()).unwrap();
        assert!(world.dispatch_interaction().is_empty());
    }

    #[test]
    fn test_click_then_hold_places_once() {
        let mut world = TileWorld::from_setup(&setup()).unwrap();

        let outcomes = frame(&mut world, 150.0, -80.0, &[InputKey::LeftMouseButton]);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0].1, InteractionOutcome::Placed { cell, .. } if cell == GridCoord::new(18, 15)));

        // Button still held next frame: no edge, so this is a hover.
        let outcomes = frame(&mut world, 150.0, -80.0, &[InputKey::LeftMouseButton]);
        assert_eq!(
            outcomes[0].1,
            InteractionOutcome::Hovered {
                location: Vec3::new(200.0, -100.0, 5.5)
            }
        );

        let manager = only_manager(&world);
        let tile_a = manager.tile_types()[0];
        assert_eq!(manager.occupancy(18, 15), Some(Occupancy::Occupied(tile_a)));
        assert_eq!(world.scene().tile(tile_a).unwrap().placed_count(), 1);
    }

    #[test]
    fn test_scroll_then_place_uses_new_type() {
        let mut world = TileWorld::from_setup(&setup()).unwrap();
        frame(&mut world, 0.0, 0.0, &[InputKey::MouseScrollUp]);
        frame(&mut world, 0.0, 0.0, &[InputKey::LeftMouseButton]);
        let manager = only_manager(&world);
        let tile_b = manager.tile_types()[1];
        assert_eq!(manager.occupancy(16, 16), Some(Occupancy::Occupied(tile_b)));
    }

    #[test]
    fn test_tick_flushes_navigation() {
        let mut world = TileWorld::from_setup(&setup()).unwrap();
        frame(&mut world, 0.0, 0.0, &[InputKey::LeftMouseButton]);
        let tile_a = only_manager(&world).tile_types()[0];
        assert!(world.scene().tile(tile_a).unwrap().instanced_mesh.is_navigation_dirty());
        world.tick(1.0 / 60.0);
        assert!(!world.scene().tile(tile_a).unwrap().instanced_mesh.is_navigation_dirty());
        assert_eq!(only_manager(&world).frames(), 1);
    }

    #[test]
    fn test_destroyed_manager_is_skipped() {
        let mut world = TileWorld::from_setup(&setup()).unwrap();
        let id = only_manager(&world).id();
        assert!(world.destroy_manager(id));
        assert!(world.controller().router().contains(id));
        assert!(frame(&mut world, 0.0, 0.0, &[InputKey::LeftMouseButton]).is_empty());
    }

    #[test]
    fn test_two_managers_share_scene() {
        let mut world = TileWorld::new(0.0).unwrap();
        let tile = world
            .scene_mut()
            .spawn_tile("TileA", TileTypeSetup::new("TileA", "/Game/A").instanced_mesh())
            .unwrap();
        let first = world
            .spawn_manager("First", TileManagerConfig::default(), vec![tile])
            .unwrap();
        let second = world
            .spawn_manager("Second", TileManagerConfig::default(), vec![tile])
            .unwrap();
        world.begin_play();

        let outcomes = frame(&mut world, 0.0, 0.0, &[InputKey::LeftMouseButton]);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].0, first);
        assert_eq!(outcomes[1].0, second);
        // Each manager tracks its own grid but both append to the same tile type.
        assert_eq!(world.scene().tile(tile).unwrap().placed_count(), 2);
    }
}
