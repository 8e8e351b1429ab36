use bevy::prelude::*;

pub mod backdrop;
pub mod camera;
pub mod diagnostics;
pub mod fog;
pub mod model_loading;
pub mod palette;
pub mod viewport;

use scene::settings::{LightSettings, SceneSettings};
use scene::SceneSet;

use model_loading::BuildingModel;
use palette::parse_color;
use scene::templates::BuildingTemplates;
use viewport::SurfaceSize;

/// Everything that needs a window or a GPU: camera, lights, fog, the
/// backdrop, model loading and input.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceSize>()
            .add_systems(
                Startup,
                (
                    camera::setup_camera,
                    setup_lighting,
                    backdrop::spawn_backdrop,
                    model_loading::setup_shared_material,
                    model_loading::load_building_model,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                model_loading::extract_building_templates
                    .run_if(resource_exists::<BuildingModel>)
                    .run_if(not(resource_exists::<BuildingTemplates>))
                    .before(SceneSet::Populate),
            )
            .add_systems(
                Update,
                (
                    viewport::handle_window_resize,
                    diagnostics::log_templates_on_click,
                    fog::apply_fog_settings.run_if(resource_changed::<SceneSettings>),
                ),
            );
    }
}

fn light_position(light: &LightSettings) -> Vec3 {
    Vec3::from_array(light.position)
}

fn setup_lighting(mut commands: Commands, settings: Res<SceneSettings>) {
    let palette = &settings.palette;

    commands.insert_resource(AmbientLight {
        color: parse_color(&palette.ambient_color, Color::WHITE),
        brightness: palette.ambient_brightness,
    });

    let spot = &palette.spot_light;
    commands.spawn((
        Name::new("spot_light"),
        SpotLight {
            color: parse_color(&spot.color, Color::WHITE),
            intensity: spot.intensity,
            range: spot.range,
            shadows_enabled: spot.shadows,
            ..default()
        },
        Transform::from_translation(light_position(spot)).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let point = &palette.point_light;
    commands.spawn((
        Name::new("point_light"),
        PointLight {
            color: parse_color(&point.color, Color::WHITE),
            intensity: point.intensity,
            range: point.range,
            shadows_enabled: point.shadows,
            ..default()
        },
        Transform::from_translation(light_position(point)),
    ));
}
