use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;

use scene::settings::{FogSettings, SceneSettings};

use crate::camera::SceneCamera;
use crate::palette::parse_color;

const DEFAULT_FOG_COLOR: Color = Color::srgb(0.208, 0.235, 0.235);

/// Linear distance fog from the palette: fully clear at `near`, fully
/// fogged at `far`.
pub fn scene_fog(fog: &FogSettings) -> DistanceFog {
    DistanceFog {
        color: parse_color(&fog.color, DEFAULT_FOG_COLOR),
        falloff: FogFalloff::Linear {
            start: fog.near,
            end: fog.far,
        },
        ..default()
    }
}

/// Re-applies fog (and the matching clear color) when settings change.
pub fn apply_fog_settings(
    settings: Res<SceneSettings>,
    mut commands: Commands,
    cameras: Query<Entity, With<SceneCamera>>,
) {
    let fog = scene_fog(&settings.palette.fog);
    commands.insert_resource(ClearColor(fog.color));
    for entity in &cameras {
        commands.entity(entity).insert(fog.clone());
    }
}
