//! Scene RNG resource.
//!
//! Wraps `ChaCha8Rng` so a fixed seed reproduces the exact same grid of
//! templates and heights on every platform.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::settings::SceneSettings;

/// RNG used by grid population. Systems take `ResMut<SceneRng>` and use
/// `rng.0` (a `ChaCha8Rng` implementing `rand::Rng`).
#[derive(Resource)]
pub struct SceneRng(pub ChaCha8Rng);

impl SceneRng {
    /// Create a new `SceneRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}

impl FromWorld for SceneRng {
    fn from_world(world: &mut World) -> Self {
        match world.get_resource::<SceneSettings>().and_then(|s| s.seed) {
            Some(seed) => Self::from_seed_u64(seed),
            None => Self::from_entropy(),
        }
    }
}
