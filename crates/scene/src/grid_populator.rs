//! Grid population: clones building templates into a fixed grid.
//!
//! Planning (`plan_grid`) is pure and only consumes randomness; spawning
//! (`populate_grid`) turns a plan into entities parented to one container.
//! X/Z positions are a deterministic function of the grid cell. Template
//! choice and height scale are the only random inputs.

use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use rand::Rng;

use crate::config::{CONTAINER_MARGIN, CONTAINER_Y};
use crate::populate_error::PopulateError;
use crate::reveal::RevealTrigger;
use crate::scene_rng::SceneRng;
use crate::scene_status::SceneStatus;
use crate::settings::SceneSettings;
use crate::templates::{BuildingTemplate, BuildingTemplates, SharedBuildingMaterial};

// ---------------------------------------------------------------------------
// Components, resources, events
// ---------------------------------------------------------------------------

/// A building clone placed in the grid.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildingInstance {
    /// Index into `BuildingTemplates`.
    pub template: usize,
    /// Grid cell `(i, j)`; `i` maps to X and `j` to Z.
    pub cell: UVec2,
}

/// Marker for the container entity every building is parented to.
#[derive(Component, Debug, Default)]
pub struct BuildingGrid;

/// Every building instance in insertion (row-major) order.
#[derive(Resource, Debug, Default)]
pub struct BuildingRegistry {
    pub container: Option<Entity>,
    pub instances: Vec<Entity>,
}

impl BuildingRegistry {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn is_populated(&self) -> bool {
        self.container.is_some()
    }
}

/// Sent once the population pass has spawned every instance.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPopulated {
    pub instances: usize,
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Grid dimensions and spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    pub cell_size: f32,
}

impl GridSpec {
    pub fn square(size: u32, cell_size: f32) -> Self {
        Self {
            cols: size,
            rows: size,
            cell_size,
        }
    }

    pub fn from_settings(settings: &SceneSettings) -> Self {
        Self {
            cols: settings.cols,
            rows: settings.rows,
            cell_size: settings.cell_size,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Local X/Z of cell `(i, j)`.
    pub fn cell_position(&self, i: u32, j: u32) -> Vec2 {
        Vec2::new(i as f32 * self.cell_size, j as f32 * self.cell_size)
    }

    /// Translation of the container: `-(size + 10)` on X and Z, 1 on Y.
    /// This only roughly centres the grid.
    pub fn container_offset(&self) -> Vec3 {
        Vec3::new(
            -(self.cols as f32) - CONTAINER_MARGIN,
            CONTAINER_Y,
            -(self.rows as f32) - CONTAINER_MARGIN,
        )
    }
}

/// Range of the random height scale: `random() * (max - min + margin)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub min: f32,
    pub max: f32,
    pub margin: f32,
}

impl ScaleRange {
    pub fn from_settings(settings: &SceneSettings) -> Self {
        Self {
            min: settings.min_scale,
            max: settings.max_scale,
            margin: settings.scale_margin,
        }
    }

    /// Exclusive upper bound of `sample`.
    pub fn span(&self) -> f32 {
        self.max - self.min + self.margin
    }

    /// A value in `[0, span)`, not `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen::<f32>() * self.span()
    }
}

/// Where and how one clone is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub template: usize,
    pub cell: UVec2,
    /// Local translation inside the container.
    pub translation: Vec3,
    pub scale: Vec3,
}

/// Plan every clone of the grid, row-major with `i` outer and `j` inner.
///
/// Each cell draws a template index (uniform, with replacement) and then a
/// height scale, in that order.
pub fn plan_grid<R: Rng + ?Sized>(
    templates: &[BuildingTemplate],
    spec: GridSpec,
    scale: ScaleRange,
    rng: &mut R,
) -> Result<Vec<Placement>, PopulateError> {
    if templates.is_empty() {
        return Err(PopulateError::NoTemplates);
    }
    if spec.cols == 0 || spec.rows == 0 {
        return Err(PopulateError::EmptyGrid {
            cols: spec.cols,
            rows: spec.rows,
        });
    }

    let mut plan = Vec::with_capacity(spec.cell_count());
    for i in 0..spec.cols {
        for j in 0..spec.rows {
            let template = rng.gen_range(0..templates.len());
            let t = &templates[template];
            let scale_y = scale.sample(rng);
            let xz = spec.cell_position(i, j);
            plan.push(Placement {
                template,
                cell: UVec2::new(i, j),
                translation: Vec3::new(xz.x, t.default_y, xz.y),
                scale: Vec3::new(t.scale, scale_y, t.scale),
            });
        }
    }
    Ok(plan)
}

// ---------------------------------------------------------------------------
// Spawning
// ---------------------------------------------------------------------------

/// Spawn the container and one clone per planned cell, recording them in
/// `registry`. Returns the number of instances spawned.
pub fn populate_grid(
    commands: &mut Commands,
    templates: &BuildingTemplates,
    material: &SharedBuildingMaterial,
    settings: &SceneSettings,
    rng: &mut SceneRng,
    registry: &mut BuildingRegistry,
) -> Result<usize, PopulateError> {
    if registry.is_populated() {
        return Err(PopulateError::AlreadyPopulated);
    }

    let spec = GridSpec::from_settings(settings);
    let plan = plan_grid(
        &templates.0,
        spec,
        ScaleRange::from_settings(settings),
        &mut rng.0,
    )?;

    let container = commands
        .spawn((
            BuildingGrid,
            Name::new("building_grid"),
            Transform::from_translation(spec.container_offset()),
            Visibility::default(),
        ))
        .id();

    registry.container = Some(container);
    registry.instances.reserve(plan.len());

    for placement in &plan {
        let template = &templates.0[placement.template];
        let mut entity = commands.spawn((
            BuildingInstance {
                template: placement.template,
                cell: placement.cell,
            },
            Mesh3d(template.mesh.clone()),
            MeshMaterial3d(material.0.clone()),
            Transform {
                translation: placement.translation,
                scale: placement.scale,
                ..default()
            },
            Visibility::default(),
        ));
        if !template.cast_shadows {
            entity.insert(NotShadowCaster);
        }
        if !template.receive_shadows {
            entity.insert(NotShadowReceiver);
        }
        entity.set_parent(container);
        registry.instances.push(entity.id());
    }

    Ok(plan.len())
}

/// Populate the grid as soon as the model loader delivers templates, then
/// arm the reveal trigger.
#[allow(clippy::too_many_arguments)]
pub fn populate_on_templates_ready(
    mut commands: Commands,
    templates: Res<BuildingTemplates>,
    material: Option<Res<SharedBuildingMaterial>>,
    settings: Res<SceneSettings>,
    mut rng: ResMut<SceneRng>,
    mut registry: ResMut<BuildingRegistry>,
    mut status: ResMut<SceneStatus>,
    mut populated: EventWriter<GridPopulated>,
) {
    let result = match material {
        Some(material) => populate_grid(
            &mut commands,
            &templates,
            &material,
            &settings,
            &mut rng,
            &mut registry,
        ),
        None => Err(PopulateError::MissingMaterial),
    };

    match result {
        Ok(instances) => {
            info!(
                "Populated {}x{} building grid: {} instances from {} templates",
                settings.cols,
                settings.rows,
                instances,
                templates.len()
            );
            *status = SceneStatus::Populated { instances };
            commands.insert_resource(RevealTrigger::default());
            populated.send(GridPopulated { instances });
        }
        Err(e) => {
            error!("Building grid population failed: {e}");
            *status = SceneStatus::PopulateFailed(e);
        }
    }
}
