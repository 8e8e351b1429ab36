//! # TestScene: headless harness for the skyline scene
//!
//! Wraps a `bevy::app::App` with `MinimalPlugins` + `ScenePlugin` so the
//! population and reveal pipeline can be driven without a window, a GPU or
//! real model files. Time advances in fixed steps.

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::grid_populator::{BuildingGrid, BuildingInstance, BuildingRegistry, GridPopulated};
use crate::reveal::RevealSchedule;
use crate::scene_rng::SceneRng;
use crate::scene_status::SceneStatus;
use crate::settings::SceneSettings;
use crate::templates::{BuildingTemplate, BuildingTemplates, SharedBuildingMaterial};
use crate::tween::{CancelReveal, RevealTween};
use crate::ScenePlugin;

/// Seed used unless a test picks its own.
pub const TEST_SEED: u64 = 42;

/// Simulated time per `tick`.
pub const TICK: Duration = Duration::from_millis(50);

const MATERIAL_ID: u128 = 0x5ca1_ab1e_0000_0000_0000_0000_0000_0001;
const MESH_ID_BASE: u128 = 0x5ca1_ab1e_0000_0000_0000_0000_0001_0000;

/// A headless Bevy App wrapping `ScenePlugin` for integration testing.
pub struct TestScene {
    app: App,
}

impl Default for TestScene {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScene {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// A scene with default settings, a fixed seed and a shared material,
    /// still waiting for templates.
    pub fn new() -> Self {
        Self::with_settings(SceneSettings {
            seed: Some(TEST_SEED),
            ..default()
        })
    }

    pub fn with_settings(settings: SceneSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));
        app.insert_resource(settings);
        app.add_plugins(ScenePlugin);
        app.insert_resource(SharedBuildingMaterial(Handle::weak_from_u128(MATERIAL_ID)));

        // Run one update so Startup systems execute and the clock starts.
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Setup (builder pattern, consumes and returns Self)
    // -----------------------------------------------------------------------

    pub fn with_grid(mut self, cols: u32, rows: u32) -> Self {
        {
            let mut settings = self.app.world_mut().resource_mut::<SceneSettings>();
            settings.cols = cols;
            settings.rows = rows;
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.world_mut().resource_mut::<SceneSettings>().seed = Some(seed);
        self.app.insert_resource(SceneRng::from_seed_u64(seed));
        self
    }

    /// Drop the shared material, as if rendering never set it up.
    pub fn without_material(mut self) -> Self {
        self.app
            .world_mut()
            .remove_resource::<SharedBuildingMaterial>();
        self
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Deliver `count` templates with distinct mesh handles, as the model
    /// loader would. Population runs on the next tick.
    pub fn load_templates(&mut self, count: usize) {
        let templates = (0..count)
            .map(|i| {
                BuildingTemplate::new(
                    format!("building_{i}"),
                    Handle::weak_from_u128(MESH_ID_BASE + i as u128),
                )
            })
            .collect();
        self.load_template_list(templates);
    }

    pub fn load_template_list(&mut self, templates: Vec<BuildingTemplate>) {
        self.app.insert_resource(BuildingTemplates(templates));
    }

    pub fn cancel_reveal(&mut self, entity: Entity) {
        self.app.world_mut().send_event(CancelReveal(entity));
    }

    /// Run `n` updates of `TICK` each.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    /// Run enough updates to cover `secs` seconds.
    pub fn tick_secs(&mut self, secs: f32) {
        let n = (secs / TICK.as_secs_f32()).ceil() as u32;
        self.tick(n);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Access the ECS world mutably (needed for queries in Bevy).
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn registry(&self) -> &BuildingRegistry {
        self.app.world().resource::<BuildingRegistry>()
    }

    pub fn schedule(&self) -> &RevealSchedule {
        self.app.world().resource::<RevealSchedule>()
    }

    pub fn status(&self) -> &SceneStatus {
        self.app.world().resource::<SceneStatus>()
    }

    pub fn shared_material(&self) -> Handle<StandardMaterial> {
        Handle::weak_from_u128(MATERIAL_ID)
    }

    pub fn transform(&self, entity: Entity) -> Transform {
        *self
            .app
            .world()
            .get::<Transform>(entity)
            .expect("entity should have a Transform")
    }

    pub fn instance(&self, entity: Entity) -> BuildingInstance {
        *self
            .app
            .world()
            .get::<BuildingInstance>(entity)
            .expect("entity should be a BuildingInstance")
    }

    pub fn tween(&self, entity: Entity) -> Option<RevealTween> {
        self.app.world().get::<RevealTween>(entity).cloned()
    }

    pub fn templates(&self) -> &BuildingTemplates {
        self.app.world().resource::<BuildingTemplates>()
    }

    pub fn mesh_of(&self, entity: Entity) -> Option<Handle<Mesh>> {
        self.app
            .world()
            .get::<Mesh3d>(entity)
            .map(|m| m.0.clone())
    }

    /// `GridPopulated` events sent during the last update.
    pub fn populated_events(&self) -> Vec<GridPopulated> {
        self.app
            .world()
            .resource::<Events<GridPopulated>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    pub fn material_of(&self, entity: Entity) -> Option<Handle<StandardMaterial>> {
        self.app
            .world()
            .get::<MeshMaterial3d<StandardMaterial>>(entity)
            .map(|m| m.0.clone())
    }

    /// Local translations of every instance, in registry order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.registry()
            .instances
            .iter()
            .map(|&e| self.transform(e).translation)
            .collect()
    }

    pub fn container_count(&mut self) -> usize {
        let world = self.app.world_mut();
        world
            .query_filtered::<Entity, With<BuildingGrid>>()
            .iter(world)
            .count()
    }
}
