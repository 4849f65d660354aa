//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration and system scheduling.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    window::ExitCondition,
};
use std::thread;
use std::time::Duration;

use crate::bevy::plugins::ImageCopyPlugin;
use crate::bevy::resources::*;
use crate::bevy::systems::*;
use crate::config::{PRE_ROLL_FRAMES, TARGET_FPS};
use crate::tauri_bridge::shared_state::{SharedAngleSession, SharedFrameBuffer, SharedPerfStats};

/// Create and configure the headless Bevy application
pub fn create_app(
    frame_buffer: SharedFrameBuffer,
    perf_stats: SharedPerfStats,
    session: SharedAngleSession,
) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: None,
        exit_condition: ExitCondition::DontExit,
        ..default()
    }));

    app.add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
        1.0 / TARGET_FPS,
    )));

    app.add_plugins(ImageCopyPlugin);

    app.add_systems(Startup, setup_scene);
    app.add_systems(
        Update,
        (sync_subject_texture, pose_scene_from_angles, highlight_handles),
    );
    app.add_systems(Last, extract_and_process_frame);

    app.insert_resource(FrameBufferRes(frame_buffer));
    app.insert_resource(PerfStatsRes(perf_stats));
    app.insert_resource(AngleSessionRes(session));
    app.insert_resource(SubjectTexture::default());
    app.insert_resource(FrameCount::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::default());

    log::info!("[Bevy] App configured (headless, offscreen angle widget)");
    app
}

/// Start Bevy in a background thread
pub fn start_bevy(
    buffer: SharedFrameBuffer,
    perf_stats: SharedPerfStats,
    session: SharedAngleSession,
) {
    let spawned = thread::Builder::new()
        .name("bevy-render".into())
        .spawn(move || {
            log::info!("[Bevy] Thread started");
            let mut app = create_app(buffer, perf_stats, session);
            log::info!("[Bevy] Running render loop...");
            app.run();
        });

    if let Err(err) = spawned {
        log::error!("[Bevy] Failed to spawn render thread: {}", err);
    }
}
