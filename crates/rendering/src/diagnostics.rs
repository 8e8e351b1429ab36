use bevy::prelude::*;

use scene::templates::BuildingTemplates;

use crate::viewport::SurfaceSize;

/// One-line summary of the drawing surface for the click log.
pub fn describe_surface(surface: &SurfaceSize) -> String {
    format!("viewport {}x{}", surface.width, surface.height)
}

/// Logs the loaded building templates on every left click.
pub fn log_templates_on_click(
    buttons: Res<ButtonInput<MouseButton>>,
    surface: Res<SurfaceSize>,
    templates: Option<Res<BuildingTemplates>>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    info!("{}", describe_surface(&surface));
    match templates {
        Some(templates) => info!("{}", templates.describe()),
        None => info!("Building templates are still loading"),
    }
}
