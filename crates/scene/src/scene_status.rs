use bevy::prelude::*;

use crate::populate_error::PopulateError;

/// Where the scene is in its one-way load → populate → reveal lifecycle.
///
/// Failures end here instead of vanishing: a failed model load or a
/// rejected population leaves the status in a terminal error variant.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub enum SceneStatus {
    /// Waiting for the building model.
    #[default]
    Loading,
    /// The model at this path failed to load.
    LoadFailed(String),
    /// Templates arrived but population was rejected.
    PopulateFailed(PopulateError),
    /// Instances exist and are hidden, waiting for the reveal trigger.
    Populated { instances: usize },
    /// Reveal tweens are scheduled and running.
    Revealing,
    /// Every reveal tween has finished or been cancelled.
    Revealed,
}

impl SceneStatus {
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            SceneStatus::LoadFailed(_) | SceneStatus::PopulateFailed(_)
        )
    }
}
