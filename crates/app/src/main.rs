use bevy::prelude::*;
use bevy::window::PresentMode;

use scene::settings::SceneSettings;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(primary_window()),
        ..default()
    }))
    .insert_resource(SceneSettings::from_env())
    .add_plugins((scene::ScenePlugin, rendering::RenderingPlugin));

    // Screenshot mode: waits for the reveal, saves one frame and exits
    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(path) = std::env::var(screenshot::SCREENSHOT_ENV_VAR) {
        screenshot::install(&mut app, path);
    }

    app.run();
}

#[cfg(not(target_arch = "wasm32"))]
fn primary_window() -> Window {
    Window {
        title: "Skyline".to_string(),
        resolution: (1280.0, 720.0).into(),
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

#[cfg(target_arch = "wasm32")]
fn primary_window() -> Window {
    Window {
        title: "Skyline".to_string(),
        canvas: Some("#canvas".to_string()),
        fit_canvas_to_parent: true,
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod screenshot {
    use bevy::prelude::*;
    use bevy::render::view::screenshot::{save_to_disk, Screenshot};

    use scene::scene_status::SceneStatus;

    pub const SCREENSHOT_ENV_VAR: &str = "SKYLINE_SCREENSHOT";

    /// Frames to wait after the capture before exiting, so the file lands.
    const SETTLE_FRAMES: u32 = 20;

    #[derive(Resource)]
    struct ScreenshotRequest {
        path: String,
        taken_at: Option<u32>,
        frame: u32,
    }

    pub fn install(app: &mut App, path: String) {
        info!("Screenshot mode: capturing to {}", path);
        app.insert_resource(ScreenshotRequest {
            path,
            taken_at: None,
            frame: 0,
        })
        .add_systems(Update, drive_screenshot);
    }

    fn drive_screenshot(
        mut commands: Commands,
        mut request: ResMut<ScreenshotRequest>,
        status: Res<SceneStatus>,
        mut exit: EventWriter<AppExit>,
    ) {
        request.frame += 1;

        if let Some(taken_at) = request.taken_at {
            if request.frame > taken_at + SETTLE_FRAMES {
                exit.send(AppExit::Success);
            }
            return;
        }

        let ready = matches!(*status, SceneStatus::Revealed) || status.is_failed();
        if !ready {
            return;
        }

        let path = request.path.clone();
        info!("Saving screenshot to {}", path);
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(path));
        request.taken_at = Some(request.frame);
    }
}
