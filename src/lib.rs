//! Angle Prompt Studio: a camera-angle prompt widget
//!
//! Turns three camera parameters (horizontal rotation, vertical tilt, zoom)
//! into a cinematography prompt fragment for image-generation requests, and
//! lets the user set them by dragging handles in a Bevy-rendered 3D scene
//! hosted in Tauri.
//!
//! Architecture:
//! - The prompt engine and manipulator are pure Rust with no framework state
//! - Tauri commands apply pointer input to the shared `AngleSession` and
//!   answer with the recomposed prompt synchronously
//! - Bevy runs headless in a background thread, poses the scene from the
//!   session every frame and streams frames to the frontend
//!
//! # Module Structure
//!
//! - `angle`: parameters, classifiers, prompt composer, reference tables
//! - `manipulator`: interaction state machine, handle layout, picking
//! - `session`: one widget instance (host node + manipulator + subject)
//! - `config`: Configuration constants and settings
//! - `error`: Bridge error type
//! - `tauri_bridge`: Bridge layer between Tauri and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `commands`: Tauri command handlers
//!   - `protocol`: Custom protocol handlers
//! - `bevy`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: Custom plugins
//!   - `systems`: Scene systems
//!   - `app`: Application setup

pub mod angle;
mod bevy;
pub mod config;
pub mod error;
pub mod manipulator;
pub mod session;
mod tauri_bridge;

use std::{thread, time::Duration};

use session::AngleSession;
use tauri_bridge::{SharedAngleSession, SharedFrameBuffer, SharedPerfStats};

/// Main entry point for the Tauri application
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("[Tauri] Starting...");

    // Create shared state
    let buffer = SharedFrameBuffer::default();
    let perf_stats = SharedPerfStats::default();
    let session = SharedAngleSession::new(AngleSession::default());

    // Start Bevy in background thread
    bevy::start_bevy(buffer.clone(), perf_stats.clone(), session.clone());

    // Wait for Bevy to initialize
    thread::sleep(Duration::from_millis(1000));

    // Clone for the custom protocol handler
    let protocol_buffer = buffer.clone();
    let protocol_perf_stats = perf_stats.clone();
    let protocol_session = session.clone();

    // Build and run Tauri application
    let result = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(buffer)
        .manage(perf_stats)
        .manage(session)
        // Register custom protocol "frame://" for direct binary transfer
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let buffer = protocol_buffer.clone();
            let perf_stats = protocol_perf_stats.clone();
            let session = protocol_session.clone();

            // Handle the request in a separate thread to avoid blocking
            std::thread::spawn(move || {
                let uri = request.uri();
                log::trace!("[Protocol] Request URI: {}", uri);

                // For Tauri v2, URL format is: http://frame.localhost/path
                let response = tauri_bridge::protocol::handle_frame_protocol(
                    uri.path(),
                    &buffer,
                    &perf_stats,
                    &session,
                );
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::get_performance_stats,
            tauri_bridge::commands::get_angle_state,
            tauri_bridge::commands::update_angle_parameters,
            tauri_bridge::commands::set_verbose_mode,
            tauri_bridge::commands::set_locale,
            tauri_bridge::commands::reset_angles,
            tauri_bridge::commands::convert_angles,
            tauri_bridge::commands::get_angle_reference,
            tauri_bridge::commands::pointer_down,
            tauri_bridge::commands::pointer_move,
            tauri_bridge::commands::pointer_up,
            tauri_bridge::commands::pointer_leave,
            tauri_bridge::commands::wheel,
            tauri_bridge::commands::set_viewport_size,
            tauri_bridge::commands::set_subject_image,
            tauri_bridge::commands::clear_subject_image
        ])
        .run(tauri::generate_context!());

    if let Err(err) = result {
        log::error!("[Tauri] Application error: {}", err);
        std::process::exit(1);
    }
}
