//! Runtime scene settings.
//!
//! `SceneSettings` holds everything that differs between scene variants:
//! grid dimensions, the height-scale range, the RNG seed, reveal easing and
//! the lighting/fog/color palette. Defaults reproduce the crimson night
//! skyline; a JSON file named by `SKYLINE_SETTINGS` can override any field.

use std::fmt;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    BUILDING_MODEL_PATH, CELL_SIZE, GRID_SIZE, MAX_SCALE, MIN_SCALE, SCALE_MARGIN,
    SETTINGS_ENV_VAR,
};
use crate::tween::RevealEase;

// ---------------------------------------------------------------------------
// SettingsError
// ---------------------------------------------------------------------------

/// Errors that can occur while reading a settings file.
#[derive(Debug)]
pub enum SettingsError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The file is not valid settings JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {e}"),
            SettingsError::Parse(e) => write!(f, "Parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A positioned light. `intensity` is in Bevy units (lumens for point and
/// spot lights).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSettings {
    pub color: String,
    pub intensity: f32,
    pub position: [f32; 3],
    pub range: f32,
    pub shadows: bool,
}

/// Linear distance fog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FogSettings {
    pub color: String,
    pub near: f32,
    pub far: f32,
}

/// Shared building material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSettings {
    pub color: String,
    pub emissive: String,
    pub metallic: f32,
    pub roughness: f32,
}

/// Lighting, fog and surface colors. Hex strings are `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub fog: FogSettings,
    pub ambient_color: String,
    pub ambient_brightness: f32,
    pub spot_light: LightSettings,
    pub point_light: LightSettings,
    pub building: MaterialSettings,
    pub floor: MaterialSettings,
    pub background_color: String,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            fog: FogSettings {
                color: "#353c3c".to_string(),
                near: 1.0,
                far: 208.0,
            },
            ambient_color: "#a00a0a".to_string(),
            ambient_brightness: 400.0,
            spot_light: LightSettings {
                color: "#ff0000".to_string(),
                intensity: 4_000_000.0,
                position: [641.0, -462.0, 509.0],
                range: 1500.0,
                shadows: true,
            },
            point_light: LightSettings {
                color: "#d3263a".to_string(),
                intensity: 8_200_000.0,
                position: [16.0, 100.0, -68.0],
                range: 400.0,
                shadows: false,
            },
            building: MaterialSettings {
                color: "#000000".to_string(),
                emissive: "#000000".to_string(),
                metallic: 0.0,
                roughness: 0.77,
            },
            floor: MaterialSettings {
                color: "#000000".to_string(),
                emissive: "#000000".to_string(),
                metallic: 0.0,
                roughness: 0.0,
            },
            background_color: "#ffffff".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// SceneSettings
// ---------------------------------------------------------------------------

/// Scene-wide settings resource, read by population, reveal and rendering.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Cells along X (the `i` axis).
    pub cols: u32,
    /// Cells along Z (the `j` axis).
    pub rows: u32,
    pub cell_size: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub scale_margin: f32,
    /// Fixed RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
    pub ease: RevealEase,
    pub model_path: String,
    pub palette: PaletteSettings,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            cols: GRID_SIZE,
            rows: GRID_SIZE,
            cell_size: CELL_SIZE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            scale_margin: SCALE_MARGIN,
            seed: None,
            ease: RevealEase::default(),
            model_path: BUILDING_MODEL_PATH.to_string(),
            palette: PaletteSettings::default(),
        }
    }
}

impl SceneSettings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Settings from the file named by `SKYLINE_SETTINGS`, or defaults.
    ///
    /// A file that cannot be read or parsed is reported and ignored.
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_path(&path) {
            Ok(settings) => {
                info!("Loaded scene settings from {path}");
                settings
            }
            Err(e) => {
                warn!("Failed to load scene settings from {path}, using defaults: {e}");
                Self::default()
            }
        }
    }
}
