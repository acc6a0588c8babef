//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `shmup_stage::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed step so playhead values are exact.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

pub const DT: f32 = 0.125;

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so AssetServer and SceneSpawner exist.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(DT)));

    shmup_stage::game::configure_headless(&mut app);
    // `App::run` is never called here, so run the plugin `finish`/`cleanup` hooks
    // (Avian registers its diagnostics resources in `finish`).
    app.finish();
    app.cleanup();
    app
}

/// Tick `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
