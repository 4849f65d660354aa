//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript/TypeScript code. Angle commands apply their
//! change synchronously and answer with the full `AngleSnapshot`.

use base64::{engine::general_purpose::STANDARD, Engine};
use bevy::math::Vec2;
use tauri::State;

use super::shared_state::{
    FrameResponse, PerformanceStats, SharedAngleSession, SharedFrameBuffer, SharedPerfStats,
};
use crate::angle::{
    angle_reference, convert_angles as convert_batch, AngleParameters, AngleReference,
    AngleUpdate, ClassificationResult, Locale,
};
use crate::config::{RENDER_HEIGHT, RENDER_WIDTH};
use crate::error::{BridgeError, BridgeResult};
use crate::session::{AngleSnapshot, SubjectImage};

// =============================================================================
// Frames
// =============================================================================

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> BridgeResult<FrameResponse> {
    let cmd_start = std::time::Instant::now();

    let guard = state.0.lock()?;
    let rgba_data = guard.as_ref().ok_or(BridgeError::FrameNotReady)?;
    let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

    // Measure Base64 encoding time
    let encode_start = std::time::Instant::now();
    let base64_data = STANDARD.encode(rgba_data);
    let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(mut stats) = perf_state.0.lock() {
        stats.tauri_get_frame_ms = data_fetch_time;
        stats.tauri_serialize_ms = encode_time;
    }

    Ok(FrameResponse {
        data: base64_data,
        width: RENDER_WIDTH,
        height: RENDER_HEIGHT,
    })
}

/// Get the render resolution
#[tauri::command]
pub fn get_render_size() -> (u32, u32) {
    (RENDER_WIDTH, RENDER_HEIGHT)
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(state: State<SharedPerfStats>) -> BridgeResult<PerformanceStats> {
    let guard = state.0.lock()?;
    Ok(guard.clone())
}

// =============================================================================
// Angle parameters
// =============================================================================

#[tauri::command]
pub fn get_angle_state(state: State<SharedAngleSession>) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.snapshot())
}

/// Apply a partial update coming from sliders or restored node data
#[tauri::command]
pub fn update_angle_parameters(
    state: State<SharedAngleSession>,
    update: AngleUpdate,
) -> BridgeResult<AngleSnapshot> {
    log::debug!("[Tauri] update_angle_parameters {:?}", update);
    Ok(state.lock()?.update(&update))
}

#[tauri::command]
pub fn set_verbose_mode(
    state: State<SharedAngleSession>,
    verbose: bool,
) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.set_verbose_mode(verbose))
}

#[tauri::command]
pub fn set_locale(state: State<SharedAngleSession>, locale: Locale) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.set_locale(locale))
}

#[tauri::command]
pub fn reset_angles(state: State<SharedAngleSession>) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.reset())
}

/// Convert a list of parameter sets without touching the widget
#[tauri::command]
pub fn convert_angles(batch: Vec<AngleParameters>) -> Vec<ClassificationResult> {
    convert_batch(&batch)
}

#[tauri::command]
pub fn get_angle_reference() -> AngleReference {
    angle_reference()
}

// =============================================================================
// Pointer input
// =============================================================================

/// Pointer pressed over the viewport; coordinates in viewport pixels
#[tauri::command]
pub fn pointer_down(
    state: State<SharedAngleSession>,
    x: f32,
    y: f32,
) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.pointer_down(Vec2::new(x, y)))
}

#[tauri::command]
pub fn pointer_move(
    state: State<SharedAngleSession>,
    x: f32,
    y: f32,
) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.pointer_move(Vec2::new(x, y)))
}

#[tauri::command]
pub fn pointer_up(state: State<SharedAngleSession>) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.pointer_up())
}

#[tauri::command]
pub fn pointer_leave(state: State<SharedAngleSession>) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.pointer_leave())
}

#[tauri::command]
pub fn wheel(state: State<SharedAngleSession>, delta_y: f64) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.wheel(delta_y))
}

/// Size of the element the frame is displayed in, for picking
#[tauri::command]
pub fn set_viewport_size(
    state: State<SharedAngleSession>,
    width: f32,
    height: f32,
) -> BridgeResult<()> {
    state.lock()?.set_viewport_size(width, height);
    Ok(())
}

// =============================================================================
// Subject image
// =============================================================================

/// Show an uploaded image (Base64 PNG/JPEG) as the subject in the scene
///
/// A decode failure is reported but leaves the widget untouched.
#[tauri::command]
pub fn set_subject_image(
    state: State<SharedAngleSession>,
    data: String,
) -> BridgeResult<AngleSnapshot> {
    let bytes = STANDARD.decode(data.trim())?;
    let subject = SubjectImage::decode(&bytes).map_err(|err| {
        log::warn!("[Tauri] Rejected subject image: {}", err);
        err
    })?;
    log::info!(
        "[Tauri] Subject image set ({}x{})",
        subject.width,
        subject.height
    );
    Ok(state.lock()?.set_subject(Some(subject)))
}

#[tauri::command]
pub fn clear_subject_image(state: State<SharedAngleSession>) -> BridgeResult<AngleSnapshot> {
    Ok(state.lock()?.set_subject(None))
}
