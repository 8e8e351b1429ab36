//! Integration tests for the population → reveal pipeline using the
//! `TestScene` harness.

use bevy::prelude::*;

use crate::grid_populator::{BuildingGrid, GridPopulated};
use crate::populate_error::PopulateError;
use crate::reveal::{reveal_timing, RevealTrigger};
use crate::scene_status::SceneStatus;
use crate::test_harness::TestScene;
use crate::tween::TweenState;

const CELL: f32 = 3.0;

/// Ticks covering population, the 0.5 s trigger and a small grid's reveal.
fn run_to_revealed(scene: &mut TestScene) {
    scene.tick_secs(2.5);
}

// ===========================================================================
// 1. Population
// ===========================================================================

#[test]
fn two_by_two_grid_with_three_templates() {
    let mut scene = TestScene::new().with_grid(2, 2).with_seed(7);
    scene.load_templates(3);
    scene.tick(1);

    assert_eq!(scene.registry().len(), 4);
    assert_eq!(*scene.status(), SceneStatus::Populated { instances: 4 });

    let xz: Vec<(f32, f32)> = scene.positions().iter().map(|p| (p.x, p.z)).collect();
    assert_eq!(
        xz,
        vec![(0.0, 0.0), (0.0, CELL), (CELL, 0.0), (CELL, CELL)],
        "positions should follow insertion order, i outer"
    );

    let shared = scene.shared_material();
    for &e in &scene.registry().instances {
        let material = scene.material_of(e).expect("instance should have a material");
        assert_eq!(material.id(), shared.id(), "every clone shares one material");

        let template = scene
            .templates()
            .get(scene.instance(e).template)
            .expect("instance points at a loaded template");
        let mesh = scene.mesh_of(e).expect("instance should have a mesh");
        assert_eq!(mesh.id(), template.mesh.id(), "clone reuses its template's mesh");
    }
}

#[test]
fn population_announces_instance_count() {
    let mut scene = TestScene::new().with_grid(3, 2);
    scene.load_templates(2);
    scene.tick(1);
    assert_eq!(
        scene.populated_events(),
        vec![GridPopulated { instances: 6 }]
    );
}

#[test]
fn failed_population_announces_nothing() {
    let mut scene = TestScene::new().with_grid(2, 2);
    scene.load_templates(0);
    scene.tick(1);
    assert!(scene.populated_events().is_empty());
}

#[test]
fn registry_has_n_squared_instances() {
    for n in [1u32, 3, 8, 20] {
        let mut scene = TestScene::new().with_grid(n, n);
        scene.load_templates(2);
        scene.tick(1);
        assert_eq!(scene.registry().len(), (n * n) as usize, "grid size {n}");
    }
}

#[test]
fn rectangular_grid_uses_cols_times_rows() {
    let mut scene = TestScene::new().with_grid(3, 5);
    scene.load_templates(1);
    scene.tick(1);
    assert_eq!(scene.registry().len(), 15);
    let max_x = scene.positions().iter().map(|p| p.x).fold(0.0, f32::max);
    let max_z = scene.positions().iter().map(|p| p.z).fold(0.0, f32::max);
    assert_eq!(max_x, 2.0 * CELL);
    assert_eq!(max_z, 4.0 * CELL);
}

#[test]
fn instances_start_hidden_below_floor() {
    let mut scene = TestScene::new().with_grid(4, 4);
    scene.load_templates(2);
    scene.tick(1);
    for p in scene.positions() {
        assert_eq!(p.y, -14.0);
    }
    for &e in &scene.registry().instances {
        let t = scene.transform(e);
        assert!(t.scale.y >= 0.0 && t.scale.y < 0.018);
        assert_eq!(t.scale.x, 0.01);
    }
}

#[test]
fn instances_are_parented_to_offset_container() {
    let mut scene = TestScene::new().with_grid(2, 2);
    scene.load_templates(3);
    scene.tick(1);

    assert_eq!(scene.container_count(), 1);
    let container = scene.registry().container.expect("container spawned");
    assert!(scene.world_mut().get::<BuildingGrid>(container).is_some());
    assert_eq!(
        scene.transform(container).translation,
        Vec3::new(-12.0, 1.0, -12.0)
    );

    let instances = scene.registry().instances.clone();
    for e in instances {
        let parent = scene
            .world_mut()
            .get::<Parent>(e)
            .expect("instance should have a parent")
            .get();
        assert_eq!(parent, container);
    }
}

#[test]
fn fixed_seed_reproduces_grid() {
    let build = || {
        let mut scene = TestScene::new().with_grid(6, 6).with_seed(1234);
        scene.load_templates(4);
        scene.tick(1);
        let instances = scene.registry().instances.clone();
        instances
            .into_iter()
            .map(|e| (scene.instance(e).template, scene.transform(e).scale.y))
            .collect::<Vec<_>>()
    };
    assert_eq!(build(), build());
}

#[test]
fn empty_template_list_is_reported() {
    let mut scene = TestScene::new().with_grid(2, 2);
    scene.load_templates(0);
    scene.tick(20);

    assert_eq!(
        *scene.status(),
        SceneStatus::PopulateFailed(PopulateError::NoTemplates)
    );
    assert!(scene.status().is_failed());
    assert!(scene.registry().is_empty());
    assert_eq!(scene.container_count(), 0);
    assert!(!scene.world_mut().contains_resource::<RevealTrigger>());
    assert!(!scene.schedule().is_started());
}

#[test]
fn missing_material_is_reported() {
    let mut scene = TestScene::new().with_grid(2, 2).without_material();
    scene.load_templates(3);
    scene.tick(1);
    assert_eq!(
        *scene.status(),
        SceneStatus::PopulateFailed(PopulateError::MissingMaterial)
    );
    assert!(scene.registry().is_empty());
}

#[test]
fn zero_sized_grid_is_reported() {
    let mut scene = TestScene::new().with_grid(0, 4);
    scene.load_templates(3);
    scene.tick(1);
    assert_eq!(
        *scene.status(),
        SceneStatus::PopulateFailed(PopulateError::EmptyGrid { cols: 0, rows: 4 })
    );
}

// ===========================================================================
// 2. Reveal
// ===========================================================================

#[test]
fn reveal_waits_for_trigger_delay() {
    let mut scene = TestScene::new().with_grid(2, 2);
    scene.load_templates(3);
    scene.tick(1);
    // Stay short of 0.5 s after population.
    scene.tick(7);

    assert!(!scene.schedule().is_started());
    for &e in &scene.registry().instances {
        assert!(scene.tween(e).is_none());
    }
    assert!(scene.positions().iter().all(|p| p.y == -14.0));
}

#[test]
fn reveal_starts_exactly_at_trigger_delay() {
    let mut scene = TestScene::new().with_grid(2, 2);
    scene.load_templates(3);
    scene.tick(1);
    // The trigger counts from the frame after population: 9 ticks = 0.45 s.
    scene.tick(9);
    assert!(!scene.schedule().is_started());
    assert!(matches!(*scene.status(), SceneStatus::Populated { .. }));

    scene.tick(1);
    assert!(scene.schedule().is_started());
    assert_eq!(*scene.status(), SceneStatus::Revealing);

    // Tweens attached on the firing frame have not been charged any time.
    let order = scene.schedule().order.clone();
    for &e in &order {
        let tween = scene.tween(e).expect("scheduled instance has a tween");
        assert_eq!(tween.elapsed, 0.0);
        assert_eq!(tween.state, TweenState::Waiting);
        assert_eq!(scene.transform(e).translation.y, -14.0);
    }

    scene.tick(1);
    let first = scene.tween(order[0]).expect("first tween");
    assert!((first.elapsed - 0.05).abs() < 1e-6);
}

#[test]
fn reveal_schedules_far_rows_first() {
    let mut scene = TestScene::new().with_grid(3, 3);
    scene.load_templates(2);
    scene.tick(1);
    scene.tick(10);

    assert_eq!(*scene.status(), SceneStatus::Revealing);
    let order = scene.schedule().order.clone();
    assert_eq!(order.len(), 9);

    let z: Vec<f32> = order.iter().map(|&e| scene.transform(e).translation.z).collect();
    for pair in z.windows(2) {
        assert!(pair[0] >= pair[1], "z order {z:?}");
    }

    for (k, &e) in order.iter().enumerate() {
        let tween = scene.tween(e).expect("scheduled instance has a tween");
        let timing = reveal_timing(k);
        assert_eq!(scene.schedule().index_of(e), Some(k));
        assert_eq!(tween.index, k);
        assert_eq!(tween.delay, timing.delay);
        assert_eq!(tween.duration, timing.duration);
        assert_eq!(tween.target, 1.0);
    }
}

#[test]
fn registry_keeps_insertion_order_after_reveal() {
    let mut scene = TestScene::new().with_grid(2, 2);
    scene.load_templates(3);
    scene.tick(1);
    let before = scene.registry().instances.clone();
    run_to_revealed(&mut scene);
    assert_eq!(scene.registry().instances, before);
    assert_ne!(scene.schedule().order, before);
}

#[test]
fn every_building_rises_to_revealed_height() {
    let mut scene = TestScene::new().with_grid(4, 4);
    scene.load_templates(3);
    scene.tick(1);
    run_to_revealed(&mut scene);

    assert_eq!(*scene.status(), SceneStatus::Revealed);
    assert_eq!(scene.schedule().finished, 16);
    assert!(scene.positions().iter().all(|p| p.y == 1.0));
    let instances = scene.registry().instances.clone();
    for e in instances {
        assert_eq!(
            scene.tween(e).map(|t| t.state),
            Some(TweenState::Finished)
        );
    }
}

#[test]
fn first_in_order_rises_before_last() {
    let mut scene = TestScene::new().with_grid(20, 20);
    scene.load_templates(3);
    scene.tick(1);
    // Trigger fires at 0.5 s; look shortly after.
    scene.tick_secs(0.7);

    let order = scene.schedule().order.clone();
    let first = scene.transform(order[0]).translation.y;
    let last = scene.transform(*order.last().unwrap()).translation.y;
    assert!(first > -14.0, "first building should be moving, y = {first}");
    assert_eq!(last, -14.0, "last building should still wait");
}

#[test]
fn cancelled_reveal_stops_only_that_building() {
    let mut scene = TestScene::new().with_grid(3, 3);
    scene.load_templates(2);
    scene.tick(1);
    scene.tick(10);

    let order = scene.schedule().order.clone();
    let cancelled = order[8];
    scene.cancel_reveal(cancelled);
    run_to_revealed(&mut scene);

    assert_eq!(*scene.status(), SceneStatus::Revealed);
    assert_eq!(scene.schedule().finished, 8);
    assert_eq!(
        scene.tween(cancelled).map(|t| t.state),
        Some(TweenState::Cancelled)
    );
    assert!(scene.transform(cancelled).translation.y < 1.0);
    for &e in &order[..8] {
        assert_eq!(scene.transform(e).translation.y, 1.0);
    }
}

#[test]
fn despawned_building_does_not_stall_reveal() {
    let mut scene = TestScene::new().with_grid(2, 2);
    scene.load_templates(3);
    scene.tick(1);
    scene.tick(10);

    let order = scene.schedule().order.clone();
    assert!(scene.world_mut().despawn(order[1]));
    run_to_revealed(&mut scene);

    assert_eq!(*scene.status(), SceneStatus::Revealed);
    assert_eq!(scene.schedule().finished, 3);
    for &e in [order[0], order[2], order[3]].iter() {
        assert_eq!(scene.transform(e).translation.y, 1.0);
    }
}
