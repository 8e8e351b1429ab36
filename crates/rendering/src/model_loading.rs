//! Loads the building glTF file and turns its meshes into the
//! `BuildingTemplates` the grid populator clones.

use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfMesh};
use bevy::prelude::*;

use scene::scene_status::SceneStatus;
use scene::settings::SceneSettings;
use scene::templates::{BuildingTemplate, BuildingTemplates, SharedBuildingMaterial};

use crate::backdrop::palette_material;

/// The glTF file holding the building meshes, while it is loading.
#[derive(Resource, Debug, Clone)]
pub struct BuildingModel {
    pub path: String,
    pub handle: Handle<Gltf>,
}

/// Startup system: create the one material every building instance shares.
pub fn setup_shared_material(
    mut commands: Commands,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<SceneSettings>,
) {
    let material = materials.add(palette_material(&settings.palette.building));
    commands.insert_resource(SharedBuildingMaterial(material));
}

/// Startup system: start loading the building model.
pub fn load_building_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<SceneSettings>,
) {
    let path = settings.model_path.clone();
    info!("Loading building model from {}", path);
    let handle = asset_server.load(path.clone());
    commands.insert_resource(BuildingModel { path, handle });
}

/// Where a building model load stands on a given frame.
#[derive(Debug, Clone)]
pub enum ModelLoad {
    Pending,
    Failed(String),
    Loaded(Vec<BuildingTemplate>),
}

/// Polls the model until it is loaded or has failed. On success the
/// templates are inserted, which starts grid population.
pub fn extract_building_templates(
    mut commands: Commands,
    model: Res<BuildingModel>,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    mut status: ResMut<SceneStatus>,
) {
    let load = poll_building_model(&model, &asset_server, &gltfs, &gltf_meshes);
    settle_model_load(load, &model.path, &mut commands, &mut status);
}

fn poll_building_model(
    model: &BuildingModel,
    asset_server: &AssetServer,
    gltfs: &Assets<Gltf>,
    gltf_meshes: &Assets<GltfMesh>,
) -> ModelLoad {
    match asset_server.load_state(&model.handle) {
        LoadState::Failed(err) => ModelLoad::Failed(err.to_string()),
        LoadState::Loaded => {
            let Some(gltf) = gltfs.get(&model.handle) else {
                return ModelLoad::Pending;
            };

            let mut named = Vec::new();
            for mesh_handle in &gltf.meshes {
                let Some(mesh) = gltf_meshes.get(mesh_handle) else {
                    warn!("Building model {} references a missing mesh", model.path);
                    continue;
                };
                let primitives: Vec<Handle<Mesh>> =
                    mesh.primitives.iter().map(|p| p.mesh.clone()).collect();
                named.push((mesh.name.clone(), primitives));
            }
            ModelLoad::Loaded(templates_from_meshes(named))
        }
        _ => ModelLoad::Pending,
    }
}

/// Applies a finished load: templates on success, `LoadFailed` on error.
/// Either way the model stops being polled.
pub fn settle_model_load(
    load: ModelLoad,
    path: &str,
    commands: &mut Commands,
    status: &mut SceneStatus,
) {
    match load {
        ModelLoad::Pending => {}
        ModelLoad::Failed(err) => {
            error!("Failed to load building model {}: {}", path, err);
            *status = SceneStatus::LoadFailed(format!("{path}: {err}"));
            commands.remove_resource::<BuildingModel>();
        }
        ModelLoad::Loaded(templates) => {
            info!(
                "Building model {} loaded: {} templates",
                path,
                templates.len()
            );
            commands.insert_resource(BuildingTemplates(templates));
            commands.remove_resource::<BuildingModel>();
        }
    }
}

/// One template per mesh primitive, in file order. A mesh with several
/// primitives yields `name#index` templates.
pub fn templates_from_meshes(
    meshes: impl IntoIterator<Item = (String, Vec<Handle<Mesh>>)>,
) -> Vec<BuildingTemplate> {
    let mut templates = Vec::new();
    for (name, primitives) in meshes {
        let single = primitives.len() == 1;
        for (i, handle) in primitives.into_iter().enumerate() {
            let template_name = if single {
                name.clone()
            } else {
                format!("{name}#{i}")
            };
            templates.push(BuildingTemplate::new(template_name, handle));
        }
    }
    templates
}
