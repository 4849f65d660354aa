//! Frame extraction system
//!
//! Takes the padded readback rows sent by the render world, strips the row
//! alignment and publishes the RGBA frame to the shared buffer that the
//! `frame://` protocol serves.

use bevy::{prelude::*, render::renderer::RenderDevice, time::Time};
use std::time::Instant;

use crate::bevy::resources::{
    FrameBufferRes, FrameCount, FrameRateLimiter, FrameTimings, MainWorldReceiver, PerfStatsRes,
    PreRollFrames,
};
use crate::config::{performance::*, RENDER_HEIGHT, RENDER_WIDTH};

/// Publish the newest rendered frame, rate limited to the target FPS
pub fn extract_and_process_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    perf_stats: Option<Res<PerfStatsRes>>,
    mut count: ResMut<FrameCount>,
    mut pre_roll: ResMut<PreRollFrames>,
    mut timings: ResMut<FrameTimings>,
    mut frame_limiter: ResMut<FrameRateLimiter>,
    time: Res<Time>,
) {
    let Some(buffer) = buffer else { return };

    // Let the scene settle before publishing anything
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        if pre_roll.0 == 0 {
            log::info!("[Bevy] Pre-roll complete, publishing frames");
        }
        return;
    }

    let now = Instant::now();
    if now.duration_since(frame_limiter.last_frame_time) < frame_limiter.min_frame_interval {
        while receiver.try_recv().is_ok() {}
        return;
    }
    frame_limiter.last_frame_time = now;

    // Keep only the newest frame
    let receive_start = Instant::now();
    let Some(padded) = receiver.try_iter().last() else {
        return;
    };
    let receive_ms = receive_start.elapsed().as_secs_f64() * 1000.0;

    let process_start = Instant::now();
    let Some(rgba) = remove_row_padding(&padded, RENDER_WIDTH, RENDER_HEIGHT) else {
        log::warn!("[Bevy] Dropping short frame ({} bytes)", padded.len());
        return;
    };
    let process_ms = process_start.elapsed().as_secs_f64() * 1000.0;
    let data_kb = rgba.len() as f64 / 1024.0;

    match buffer.0 .0.lock() {
        Ok(mut guard) => *guard = Some(rgba),
        Err(err) => {
            log::error!("[Bevy] Frame buffer unavailable: {}", err);
            return;
        }
    }
    count.0 += 1;

    let total_ms = now.elapsed().as_secs_f64() * 1000.0;
    timings.frame_times.push(total_ms);
    if timings.frame_times.len() > FRAME_TIMING_SAMPLES {
        timings.frame_times.remove(0);
    }
    let average_ms = average(&timings.frame_times);

    if let Some(perf) = perf_stats {
        if let Ok(mut stats) = perf.0 .0.lock() {
            stats.gpu_transfer_ms = receive_ms;
            stats.data_processing_ms = process_ms;
            stats.frame_encoding_ms = total_ms;
            stats.frame_count = count.0;
            stats.data_size_kb = data_kb;
            stats.bevy_fps = if average_ms > 0.0 { 1000.0 / average_ms } else { 0.0 };
        }
    }

    let elapsed = time.elapsed_secs_f64();
    if elapsed - timings.last_print_time >= STATS_PRINT_INTERVAL {
        log::info!(
            "[Bevy] Frame {} | Receive: {:.2}ms | Process: {:.2}ms | Avg: {:.2}ms | Size: {:.1}KB",
            count.0,
            receive_ms,
            process_ms,
            average_ms,
            data_kb
        );
        timings.last_print_time = elapsed;
    }
}

fn average(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.0
    } else {
        samples.iter().sum::<f64>() / samples.len() as f64
    }
}

/// Strip GPU row alignment, returning tightly packed RGBA rows
///
/// Returns `None` when the data holds fewer than `height` full rows.
fn remove_row_padding(data: &[u8], width: u32, height: u32) -> Option<Vec<u8>> {
    let row_bytes = width as usize * 4;
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(row_bytes);
    let height = height as usize;

    if data.len() < aligned_row_bytes * (height.saturating_sub(1)) + row_bytes || height == 0 {
        return None;
    }

    if row_bytes == aligned_row_bytes {
        return Some(data[..row_bytes * height].to_vec());
    }

    let mut rgba = Vec::with_capacity(row_bytes * height);
    for row in data.chunks(aligned_row_bytes).take(height) {
        rgba.extend_from_slice(&row[..row_bytes]);
    }
    Some(rgba)
}
