/// Number of cells along each side of the default building grid.
pub const GRID_SIZE: u32 = 40;
/// Spacing between adjacent grid cells, in world units.
pub const CELL_SIZE: f32 = 3.0;

/// Lower bound of the nominal building height scale.
pub const MIN_SCALE: f32 = 0.001;
/// Upper bound of the nominal building height scale.
pub const MAX_SCALE: f32 = 0.009;
/// Extra headroom added on top of `MAX_SCALE - MIN_SCALE`, so sampled
/// scales reach past `MAX_SCALE`.
pub const SCALE_MARGIN: f32 = 0.01;

/// Uniform scale applied to every template when the model finishes loading.
pub const TEMPLATE_SCALE: f32 = 0.01;
/// Local Y of a template (and of every clone until revealed). Below the floor.
pub const HIDDEN_Y: f32 = -14.0;

/// Added to the grid size when offsetting the container on X and Z.
pub const CONTAINER_MARGIN: f32 = 10.0;
/// Local Y of the building container.
pub const CONTAINER_Y: f32 = 1.0;

/// Local Y every building rises to.
pub const REVEAL_HEIGHT: f32 = 1.0;
/// Divisor turning a reveal index into seconds of delay.
pub const REVEAL_STEP: f32 = 350.0;
/// Shortest reveal tween duration, in seconds (index 0).
pub const REVEAL_BASE_DURATION: f32 = 0.3;
/// Seconds between population completing and the reveal starting.
pub const REVEAL_TRIGGER_DELAY: f32 = 0.5;

/// Asset path of the building model, relative to `assets/`.
pub const BUILDING_MODEL_PATH: &str = "models/buildings.glb";

/// Environment variable naming a JSON settings file.
pub const SETTINGS_ENV_VAR: &str = "SKYLINE_SETTINGS";
