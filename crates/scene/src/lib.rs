use bevy::prelude::*;

pub mod config;
pub mod grid_populator;
pub mod populate_error;
pub mod reveal;
pub mod scene_rng;
pub mod scene_status;
pub mod settings;
pub mod templates;
pub mod tween;

#[cfg(test)]
pub mod test_harness;

#[cfg(test)]
mod integration_tests;

use grid_populator::{BuildingRegistry, GridPopulated};
use reveal::{RevealSchedule, RevealTrigger};
use scene_rng::SceneRng;
use scene_status::SceneStatus;
use settings::SceneSettings;
use templates::BuildingTemplates;
use tween::{CancelReveal, RevealFinished};

/// Ordering of the population → reveal pipeline inside `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneSet {
    Populate,
    Reveal,
    Animate,
}

/// Headless core of the skyline scene: grid population, reveal
/// sequencing and reveal tweens. Rendering supplies templates and the
/// shared material; everything else happens here.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        // Settings may be inserted by the app (or a test) before the plugin.
        if !app.world().contains_resource::<SceneSettings>() {
            app.insert_resource(SceneSettings::from_env());
        }

        app.init_resource::<SceneRng>()
            .init_resource::<BuildingRegistry>()
            .init_resource::<RevealSchedule>()
            .init_resource::<SceneStatus>()
            .add_event::<GridPopulated>()
            .add_event::<RevealFinished>()
            .add_event::<CancelReveal>()
            .configure_sets(
                Update,
                (SceneSet::Populate, SceneSet::Reveal, SceneSet::Animate).chain(),
            )
            .add_systems(
                Update,
                grid_populator::populate_on_templates_ready
                    .run_if(resource_added::<BuildingTemplates>)
                    .in_set(SceneSet::Populate),
            )
            .add_systems(
                Update,
                // The trigger starts counting on the frame after population.
                reveal::tick_reveal_trigger
                    .run_if(resource_exists::<RevealTrigger>)
                    .run_if(not(resource_added::<RevealTrigger>))
                    .in_set(SceneSet::Reveal),
            )
            .add_systems(
                Update,
                (
                    tween::cancel_reveal_tweens,
                    tween::advance_reveal_tweens,
                    reveal::track_reveal_progress,
                )
                    .chain()
                    .in_set(SceneSet::Animate),
            );
    }
}
