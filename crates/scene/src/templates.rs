use bevy::prelude::*;

use crate::config::{HIDDEN_Y, TEMPLATE_SCALE};

/// One mesh of the loaded building model, used as a cloning prototype.
#[derive(Debug, Clone)]
pub struct BuildingTemplate {
    /// Label taken from the model (mesh name plus primitive index).
    pub name: String,
    pub mesh: Handle<Mesh>,
    /// Uniform scale applied to X and Z of every clone.
    pub scale: f32,
    /// Local Y of every clone before it is revealed.
    pub default_y: f32,
    pub cast_shadows: bool,
    pub receive_shadows: bool,
}

impl BuildingTemplate {
    /// A template with the normalized scale, hidden Y and both shadow flags.
    pub fn new(name: impl Into<String>, mesh: Handle<Mesh>) -> Self {
        Self {
            name: name.into(),
            mesh,
            scale: TEMPLATE_SCALE,
            default_y: HIDDEN_Y,
            cast_shadows: true,
            receive_shadows: true,
        }
    }
}

/// Templates delivered by the model loader. Inserting this resource starts
/// grid population.
#[derive(Resource, Debug, Clone, Default)]
pub struct BuildingTemplates(pub Vec<BuildingTemplate>);

impl BuildingTemplates {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&BuildingTemplate> {
        self.0.get(index)
    }

    /// One line per template, for the click diagnostic.
    pub fn describe(&self) -> String {
        if self.0.is_empty() {
            return "no building templates loaded".to_string();
        }
        let mut out = format!("{} building templates:", self.0.len());
        for (i, t) in self.0.iter().enumerate() {
            out.push_str(&format!(
                "\n  [{i}] {} mesh={:?} scale={} y={} shadows(cast={}, receive={})",
                t.name,
                t.mesh.id(),
                t.scale,
                t.default_y,
                t.cast_shadows,
                t.receive_shadows
            ));
        }
        out
    }
}

/// The one material every building clone references.
#[derive(Resource, Debug, Clone)]
pub struct SharedBuildingMaterial(pub Handle<StandardMaterial>);
