use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::camera::SceneCamera;

/// Current drawing surface size in logical pixels. Written on every
/// accepted resize and reported by the click diagnostic.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

/// Width over height, or `None` for a collapsed surface.
pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(width / height)
}

/// Keeps the camera projection and the surface size in step with the
/// window. Nothing is rebuilt.
pub fn handle_window_resize(
    mut resized: EventReader<WindowResized>,
    mut surface: ResMut<SurfaceSize>,
    mut cameras: Query<&mut Projection, With<SceneCamera>>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    let Some(aspect) = aspect_ratio(last.width, last.height) else {
        debug!("Ignoring resize to {}x{}", last.width, last.height);
        return;
    };

    surface.width = last.width;
    surface.height = last.height;
    for mut projection in &mut cameras {
        if let Projection::Perspective(ref mut perspective) = *projection {
            perspective.aspect_ratio = aspect;
        }
    }
    info!(
        "Viewport resized to {}x{} (aspect {:.3})",
        last.width, last.height, aspect
    );
}
