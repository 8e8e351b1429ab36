//! Delayed, eased tweens of a building's local Y.
//!
//! A `RevealTween` waits for its delay, captures the current Y as its start
//! value, then eases towards the target over its duration. Tweens run
//! independently: one that loses its target is dropped on its own while the
//! rest keep going.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Easing curve used by reveal tweens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealEase {
    /// `1 - (1 - t)^3`
    #[default]
    CubicOut,
    /// `1 - (1 - t)^4`
    QuartOut,
}

impl RevealEase {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            RevealEase::CubicOut => ease_out_cubic(t),
            RevealEase::QuartOut => ease_out_quart(t),
        }
    }
}

/// Ease-out cubic: decelerating end
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t) * (1.0 - t)
}

/// Ease-out quart: stronger deceleration than cubic
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}

// ---------------------------------------------------------------------------
// Tween component
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenState {
    /// Still inside the start delay.
    Waiting,
    Running,
    Finished,
    Cancelled,
}

impl TweenState {
    pub fn is_done(self) -> bool {
        matches!(self, TweenState::Finished | TweenState::Cancelled)
    }
}

/// Animates `Transform::translation.y` to `target`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RevealTween {
    /// Position in the reveal order.
    pub index: usize,
    pub target: f32,
    /// Seconds to wait before moving.
    pub delay: f32,
    /// Seconds from start to target once moving.
    pub duration: f32,
    pub ease: RevealEase,
    pub elapsed: f32,
    /// Y captured when the delay elapsed.
    pub start: Option<f32>,
    pub state: TweenState,
}

impl RevealTween {
    pub fn new(index: usize, target: f32, delay: f32, duration: f32, ease: RevealEase) -> Self {
        Self {
            index,
            target,
            delay,
            duration,
            ease,
            elapsed: 0.0,
            start: None,
            state: TweenState::Waiting,
        }
    }

    /// Advance by `dt` seconds given the current Y. Returns the new Y when
    /// the tween moved the target this step.
    pub fn advance(&mut self, dt: f32, current_y: f32) -> Option<f32> {
        if self.state.is_done() {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed < self.delay {
            return None;
        }

        let start = *self.start.get_or_insert(current_y);
        self.state = TweenState::Running;

        let progress = if self.duration > 0.0 {
            ((self.elapsed - self.delay) / self.duration).min(1.0)
        } else {
            1.0
        };
        if progress >= 1.0 {
            self.state = TweenState::Finished;
            return Some(self.target);
        }
        Some(start + (self.target - start) * self.ease.apply(progress))
    }

    pub fn cancel(&mut self) {
        if !self.state.is_done() {
            self.state = TweenState::Cancelled;
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Sent when a reveal tween reaches its target.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFinished {
    pub entity: Entity,
    pub index: usize,
}

/// Request to stop a reveal tween where it is.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelReveal(pub Entity);

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Step every live reveal tween and write the eased Y. A tween attached
/// this frame starts its clock on the next one.
pub fn advance_reveal_tweens(
    time: Res<Time>,
    mut tweens: Query<(Entity, &mut RevealTween, Option<&mut Transform>)>,
    mut finished: EventWriter<RevealFinished>,
) {
    let dt = time.delta_secs();
    for (entity, mut tween, transform) in &mut tweens {
        if tween.is_added() || tween.state.is_done() {
            continue;
        }
        let Some(mut transform) = transform else {
            warn!(
                "Reveal tween {} on {entity:?} has no Transform, dropping it",
                tween.index
            );
            tween.cancel();
            continue;
        };
        if let Some(y) = tween.advance(dt, transform.translation.y) {
            transform.translation.y = y;
        }
        if tween.state == TweenState::Finished {
            finished.send(RevealFinished {
                entity,
                index: tween.index,
            });
        }
    }
}

/// Apply `CancelReveal` requests. Unknown entities are ignored.
pub fn cancel_reveal_tweens(
    mut requests: EventReader<CancelReveal>,
    mut tweens: Query<&mut RevealTween>,
) {
    for CancelReveal(entity) in requests.read() {
        if let Ok(mut tween) = tweens.get_mut(*entity) {
            tween.cancel();
        }
    }
}
