use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::pbr::ShadowFilteringMethod;
use bevy::prelude::*;

use scene::settings::SceneSettings;

use crate::fog::scene_fog;

const CAMERA_START: Vec3 = Vec3::new(3.0, 50.0, 155.0);
const FOV_DEGREES: f32 = 20.0;
const NEAR: f32 = 1.0;
const FAR: f32 = 1000.0;

const ZOOM_SPEED: f32 = 0.1;
const MIN_DISTANCE: f32 = 10.0;
const MAX_DISTANCE: f32 = 900.0;
const MIN_PITCH: f32 = -85.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 85.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Marker for the one camera rendering the skyline.
#[derive(Component, Debug, Default)]
pub struct SceneCamera;

/// Orbital camera model: camera orbits around a fixed focus point.
/// Panning is disabled, so `focus` never moves after setup.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation angle in radians (clamped between MIN_PITCH and MAX_PITCH)
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(CAMERA_START, Vec3::ZERO)
    }
}

impl OrbitCamera {
    /// The orbit that places the camera at `position` looking at `focus`.
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length();
        let pitch = if distance > 0.0 {
            (offset.y / distance).asin()
        } else {
            0.0
        };
        Self {
            focus,
            yaw: offset.x.atan2(offset.z),
            pitch,
            distance,
        }
    }

    /// Where the camera sits on its sphere around `focus`.
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.focus + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    /// Camera transform at `eye()`, aimed at the skyline focus.
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.focus, Vec3::Y)
    }

    /// Move closer (positive `lines`) or further out, within the zoom limits.
    pub fn zoom_by(&mut self, lines: f32) {
        let factor = 1.0 - lines * ZOOM_SPEED;
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands, settings: Res<SceneSettings>) {
    let orbit = OrbitCamera::default();

    commands.spawn((
        SceneCamera,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: FOV_DEGREES.to_radians(),
            near: NEAR,
            far: FAR,
            ..default()
        }),
        orbit.transform(),
        scene_fog(&settings.palette.fog),
        ShadowFilteringMethod::Gaussian,
    ));
    commands.insert_resource(orbit);
    commands.init_resource::<CameraOrbitDrag>();
}

/// Moves the skyline camera whenever the orbit changed.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<SceneCamera>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let target = orbit.transform();
    for mut transform in &mut cameras {
        *transform = target;
    }
}

/// Left-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            if delta != Vec2::ZERO {
                orbit_by(&mut orbit, delta);
            }
            drag.last_pos = pos;
        }
    }
}

fn orbit_by(orbit: &mut OrbitCamera, delta: Vec2) {
    orbit.yaw -= delta.x * ORBIT_SENSITIVITY;
    orbit.pitch = (orbit.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
}

/// Wheel lines, with pixel deltas scaled down to roughly one line each.
fn scroll_lines(event: &MouseWheel) -> f32 {
    match event.unit {
        MouseScrollUnit::Line => event.y,
        MouseScrollUnit::Pixel => event.y / 100.0,
    }
}

/// Wheel zooms towards or away from the skyline.
pub fn camera_zoom(mut wheel: EventReader<MouseWheel>, mut orbit: ResMut<OrbitCamera>) {
    for event in wheel.read() {
        orbit.zoom_by(scroll_lines(event));
    }
}
