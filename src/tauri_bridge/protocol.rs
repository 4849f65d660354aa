//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use image::{codecs::jpeg::JpegEncoder, ImageBuffer, ImageEncoder, Rgba};
use tauri::http::Response as HttpResponse;

use super::shared_state::{SharedAngleSession, SharedFrameBuffer, SharedPerfStats};
use crate::config::{compression::JPEG_QUALITY, RENDER_HEIGHT, RENDER_WIDTH};
use crate::error::{BridgeError, BridgeResult};

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame (~30-60KB)
/// - `frame.raw`: Raw RGBA frame (~900KB)
/// - `stats`: Performance statistics as JSON
/// - `prompt`: Current angle snapshot as JSON
pub fn handle_frame_protocol(
    uri_path: &str,
    buffer: &SharedFrameBuffer,
    perf_stats: &SharedPerfStats,
    session: &SharedAngleSession,
) -> Response {
    let resource = uri_path.trim_start_matches('/');

    log::trace!("[Protocol] Resolved resource: {}", resource);

    let result = match resource {
        "frame" | "frame.jpg" => handle_jpeg_frame(buffer),
        "frame.raw" => handle_raw_frame(buffer),
        "stats" => handle_stats(perf_stats),
        "prompt" => handle_prompt(session),
        _ => return text_response(404, "Not Found"),
    };

    result.unwrap_or_else(|err| {
        let status = match err {
            BridgeError::FrameNotReady => 503,
            _ => 500,
        };
        if status == 500 {
            log::error!("[Protocol] {} failed: {}", resource, err);
        }
        text_response(status, &err.to_string())
    })
}

/// Handle JPEG-compressed frame request
fn handle_jpeg_frame(buffer: &SharedFrameBuffer) -> BridgeResult<Response> {
    let rgba_data = current_frame(buffer)?;

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(RENDER_WIDTH, RENDER_HEIGHT, rgba_data).ok_or(
            BridgeError::FrameSizeMismatch {
                width: RENDER_WIDTH,
                height: RENDER_HEIGHT,
            },
        )?;

    // Convert RGBA to RGB for JPEG (no alpha channel)
    let rgb_img = image::DynamicImage::ImageRgba8(img).to_rgb8();

    let mut jpeg_data = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg_data, JPEG_QUALITY);
    encoder.write_image(
        rgb_img.as_raw(),
        RENDER_WIDTH,
        RENDER_HEIGHT,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|err| BridgeError::FrameEncoding(err.to_string()))?;

    Ok(frame_response("image/jpeg", jpeg_data))
}

/// Handle raw RGBA frame request
fn handle_raw_frame(buffer: &SharedFrameBuffer) -> BridgeResult<Response> {
    let rgba_data = current_frame(buffer)?;
    Ok(frame_response("application/octet-stream", rgba_data))
}

/// Handle performance stats request
fn handle_stats(perf_stats: &SharedPerfStats) -> BridgeResult<Response> {
    let json = serde_json::to_vec(&*perf_stats.0.lock()?)?;
    Ok(json_response(json))
}

/// Handle angle snapshot request
fn handle_prompt(session: &SharedAngleSession) -> BridgeResult<Response> {
    let snapshot = session.lock()?.snapshot();
    Ok(json_response(serde_json::to_vec(&snapshot)?))
}

fn current_frame(buffer: &SharedFrameBuffer) -> BridgeResult<Vec<u8>> {
    let guard = buffer.0.lock()?;
    guard.clone().ok_or(BridgeError::FrameNotReady)
}

fn frame_response(content_type: &str, body: Vec<u8>) -> Response {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("X-Frame-Width", RENDER_WIDTH.to_string())
        .header("X-Frame-Height", RENDER_HEIGHT.to_string())
        .header("Access-Control-Allow-Origin", "*")
        .header(
            "Access-Control-Expose-Headers",
            "X-Frame-Width, X-Frame-Height",
        )
        .body(body)
        .unwrap_or_else(|_| fallback_response())
}

fn json_response(body: Vec<u8>) -> Response {
    HttpResponse::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(body)
        .unwrap_or_else(|_| fallback_response())
}

fn text_response(status: u16, message: &str) -> Response {
    HttpResponse::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .header("Access-Control-Allow-Origin", "*")
        .body(message.as_bytes().to_vec())
        .unwrap_or_else(|_| fallback_response())
}

fn fallback_response() -> Response {
    let mut response = HttpResponse::new(Vec::new());
    *response.status_mut() = tauri::http::StatusCode::INTERNAL_SERVER_ERROR;
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AngleSession;

    fn fixtures() -> (SharedFrameBuffer, SharedPerfStats, SharedAngleSession) {
        (
            SharedFrameBuffer::default(),
            SharedPerfStats::default(),
            SharedAngleSession::new(AngleSession::default()),
        )
    }

    #[test]
    fn test_unknown_resource_is_404() {
        let (buffer, stats, session) = fixtures();
        let response = handle_frame_protocol("/nope", &buffer, &stats, &session);
        assert_eq!(response.status(), 404);
    }

    #[test]
    fn test_frame_not_ready_is_503() {
        let (buffer, stats, session) = fixtures();
        let response = handle_frame_protocol("/frame.raw", &buffer, &stats, &session);
        assert_eq!(response.status(), 503);
    }

    #[test]
    fn test_prompt_endpoint_returns_snapshot_json() {
        let (buffer, stats, session) = fixtures();
        let response = handle_frame_protocol("/prompt", &buffer, &stats, &session);
        assert_eq!(response.status(), 200);
        let json: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(
            json["anglePrompt"],
            "front view, eye level, medium shot (horizontal: 0, vertical: 0, zoom: 5.0)"
        );
        assert_eq!(json["cursor"], "crosshair");
    }

    #[test]
    fn test_jpeg_frame_encodes() {
        let (buffer, stats, session) = fixtures();
        *buffer.0.lock().unwrap() = Some(vec![128; (RENDER_WIDTH * RENDER_HEIGHT * 4) as usize]);
        let response = handle_frame_protocol("/frame", &buffer, &stats, &session);
        assert_eq!(response.status(), 200);
        assert_eq!(&response.body()[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_wrong_sized_frame_is_500() {
        let (buffer, stats, session) = fixtures();
        *buffer.0.lock().unwrap() = Some(vec![0; 16]);
        let response = handle_frame_protocol("/frame.jpg", &buffer, &stats, &session);
        assert_eq!(response.status(), 500);
    }
}
