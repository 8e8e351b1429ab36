use bevy::prelude::*;

use scene::settings::{MaterialSettings, SceneSettings};

use crate::palette::parse_color;

const FLOOR_HALF_SIZE: f32 = 100.0;
const BACKGROUND_HALF_WIDTH: f32 = 200.0;
const BACKGROUND_HALF_HEIGHT: f32 = 50.0;
const BACKGROUND_POSITION: Vec3 = Vec3::new(0.0, 10.0, -150.0);

/// Marker for the floor plane.
#[derive(Component)]
pub struct Floor;

/// Marker for the upright plane behind the skyline.
#[derive(Component)]
pub struct BackgroundShape;

/// 200x200 plane at Y = 0 facing up.
fn build_floor_mesh() -> Mesh {
    Mesh::from(Plane3d::new(Vec3::Y, Vec2::splat(FLOOR_HALF_SIZE)))
}

/// 400x100 plane facing the camera (+Z).
fn build_background_mesh() -> Mesh {
    Mesh::from(Plane3d::new(
        Vec3::Z,
        Vec2::new(BACKGROUND_HALF_WIDTH, BACKGROUND_HALF_HEIGHT),
    ))
}

/// A `StandardMaterial` from palette material settings.
pub fn palette_material(settings: &MaterialSettings) -> StandardMaterial {
    StandardMaterial {
        base_color: parse_color(&settings.color, Color::BLACK),
        emissive: parse_color(&settings.emissive, Color::BLACK).to_linear(),
        metallic: settings.metallic,
        perceptual_roughness: settings.roughness,
        ..default()
    }
}

/// Startup system: spawn the floor and the background shape.
pub fn spawn_backdrop(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<SceneSettings>,
) {
    let palette = &settings.palette;

    commands.spawn((
        Floor,
        Name::new("floor"),
        Mesh3d(meshes.add(build_floor_mesh())),
        MeshMaterial3d(materials.add(palette_material(&palette.floor))),
        Transform::IDENTITY,
    ));

    commands.spawn((
        BackgroundShape,
        Name::new("background_shape"),
        Mesh3d(meshes.add(build_background_mesh())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: parse_color(&palette.background_color, Color::WHITE),
            ..default()
        })),
        Transform::from_translation(BACKGROUND_POSITION),
    ));
}
