//! Reveal sequencing: orders the registry and schedules one staggered
//! rise tween per building.

use bevy::prelude::*;

use crate::config::{REVEAL_BASE_DURATION, REVEAL_HEIGHT, REVEAL_STEP, REVEAL_TRIGGER_DELAY};
use crate::grid_populator::BuildingRegistry;
use crate::scene_status::SceneStatus;
use crate::settings::SceneSettings;
use crate::tween::{RevealFinished, RevealTween};

/// Delay and duration of the tween at reveal index `k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTiming {
    pub delay: f32,
    pub duration: f32,
}

/// `delay = k / 350`, `duration = 0.3 + k / 350`.
pub fn reveal_timing(index: usize) -> RevealTiming {
    let stagger = index as f32 / REVEAL_STEP;
    RevealTiming {
        delay: stagger,
        duration: REVEAL_BASE_DURATION + stagger,
    }
}

/// Stable sort by Z ascending, then reverse. Equal Z values come out in
/// reverse insertion order. NaN keys follow `f32::total_cmp`, so a NaN Z
/// lands first in the reveal.
pub fn reveal_order<T: Copy>(items: &[(T, f32)]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
    sorted.reverse();
    sorted.into_iter().map(|(item, _)| item).collect()
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// One-shot timer between population and the reveal.
#[derive(Resource, Debug)]
pub struct RevealTrigger(pub Timer);

impl Default for RevealTrigger {
    fn default() -> Self {
        Self(Timer::from_seconds(REVEAL_TRIGGER_DELAY, TimerMode::Once))
    }
}

/// Reveal order and completion bookkeeping.
#[derive(Resource, Debug, Default)]
pub struct RevealSchedule {
    /// Instances in reveal order; position is the tween index.
    pub order: Vec<Entity>,
    /// Tweens that reached their target.
    pub finished: usize,
}

impl RevealSchedule {
    pub fn is_started(&self) -> bool {
        !self.order.is_empty()
    }

    /// Index of `entity` in the reveal order.
    pub fn index_of(&self, entity: Entity) -> Option<usize> {
        self.order.iter().position(|&e| e == entity)
    }

    /// Whether every scheduled tween has finished or been cancelled.
    /// Instances despawned mid-reveal count as done; instances whose tween
    /// is not attached yet do not.
    pub fn is_complete(&self, tweens: &Query<Option<&RevealTween>>) -> bool {
        self.is_started()
            && self.order.iter().all(|&e| match tweens.get(e) {
                Ok(Some(tween)) => tween.state.is_done(),
                Ok(None) => false,
                Err(_) => true,
            })
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Tick the trigger and schedule the reveal when it fires.
#[allow(clippy::too_many_arguments)]
pub fn tick_reveal_trigger(
    mut commands: Commands,
    time: Res<Time>,
    mut trigger: ResMut<RevealTrigger>,
    registry: Res<BuildingRegistry>,
    settings: Res<SceneSettings>,
    transforms: Query<&Transform>,
    mut schedule: ResMut<RevealSchedule>,
    mut status: ResMut<SceneStatus>,
) {
    if !trigger.0.tick(time.delta()).just_finished() {
        return;
    }
    commands.remove_resource::<RevealTrigger>();

    let keyed: Vec<(Entity, f32)> = registry
        .instances
        .iter()
        .filter_map(|&e| match transforms.get(e) {
            Ok(t) => Some((e, t.translation.z)),
            Err(_) => {
                warn!("Building {e:?} has no Transform, leaving it out of the reveal");
                None
            }
        })
        .collect();

    schedule.order = reveal_order(&keyed);
    schedule.finished = 0;

    for (index, &entity) in schedule.order.iter().enumerate() {
        let timing = reveal_timing(index);
        commands.entity(entity).insert(RevealTween::new(
            index,
            REVEAL_HEIGHT,
            timing.delay,
            timing.duration,
            settings.ease,
        ));
    }

    info!(
        "Revealing {} buildings over {:.2}s",
        schedule.order.len(),
        schedule
            .order
            .len()
            .checked_sub(1)
            .map(|last| {
                let t = reveal_timing(last);
                t.delay + t.duration
            })
            .unwrap_or(0.0)
    );
    *status = SceneStatus::Revealing;
}

/// Count finished tweens and mark the scene revealed once no tween is live.
pub fn track_reveal_progress(
    mut finished: EventReader<RevealFinished>,
    tweens: Query<Option<&RevealTween>>,
    mut schedule: ResMut<RevealSchedule>,
    mut status: ResMut<SceneStatus>,
) {
    schedule.finished += finished.read().count();

    if *status != SceneStatus::Revealing {
        return;
    }
    if schedule.is_complete(&tweens) {
        info!(
            "Reveal complete: {}/{} buildings risen",
            schedule.finished,
            schedule.order.len()
        );
        *status = SceneStatus::Revealed;
    }
}
