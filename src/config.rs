//! Configuration constants and settings for the angle prompt widget
//!
//! This module contains all configurable parameters such as render resolution,
//! parameter domains, drag sensitivities, scene layout and performance tuning.

/// Width of the offscreen render target in pixels
pub const RENDER_WIDTH: u32 = 560;

/// Height of the offscreen render target in pixels
pub const RENDER_HEIGHT: u32 = 400;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Parameter domains and defaults
pub mod angles {
    /// Full turn for the wrapping horizontal angle (degrees)
    pub const FULL_TURN: f64 = 360.0;

    /// Lowest camera elevation (degrees)
    pub const MIN_VERTICAL: f64 = -30.0;

    /// Highest camera elevation, directly overhead (degrees)
    pub const MAX_VERTICAL: f64 = 90.0;

    pub const MIN_ZOOM: f64 = 0.0;
    pub const MAX_ZOOM: f64 = 10.0;

    pub const DEFAULT_HORIZONTAL: f64 = 0.0;
    pub const DEFAULT_VERTICAL: f64 = 0.0;
    pub const DEFAULT_ZOOM: f64 = 5.0;
    pub const DEFAULT_VERBOSE: bool = true;
}

/// Pointer-to-parameter sensitivities (degrees or zoom units per pixel)
pub mod sensitivity {
    /// Horizontal handle, before pole compensation
    pub const HORIZONTAL_BASE: f64 = 0.5;

    /// Lower bound for the cosine divisor near the poles
    pub const POLE_COSINE_FLOOR: f64 = 0.3;

    /// Fraction of the horizontal sensitivity used while free-orbiting
    pub const FREE_ORBIT_HORIZONTAL_FACTOR: f64 = 0.8;

    pub const VERTICAL: f64 = 0.5;

    pub const ZOOM_DRAG: f64 = 0.05;

    /// Zoom units per wheel delta unit
    pub const ZOOM_WHEEL: f64 = 0.01;
}

/// Scene layout shared by picking and rendering
pub mod scene {
    /// Fixed viewing camera position
    pub const CAMERA_EYE: [f32; 3] = [0.0, 1.5, 4.0];

    /// Vertical field of view (degrees)
    pub const CAMERA_FOV_DEGREES: f32 = 50.0;

    pub const CAMERA_NEAR: f32 = 0.1;
    pub const CAMERA_FAR: f32 = 1000.0;

    /// Radius of the horizontal orbit ring
    pub const RING_RADIUS: f32 = 1.8;

    /// Height of the horizontal orbit ring
    pub const RING_HEIGHT: f32 = -0.5;

    /// Radius of the vertical arc
    pub const ARC_RADIUS: f32 = 1.5;

    /// Zoom handle distance in front of the subject at zoom 0
    pub const ZOOM_HANDLE_MIN_DISTANCE: f32 = 0.5;

    /// Extra zoom handle distance at zoom 10
    pub const ZOOM_HANDLE_TRAVEL: f32 = 1.2;

    pub const HORIZONTAL_HANDLE_RADIUS: f32 = 0.12;
    pub const VERTICAL_HANDLE_RADIUS: f32 = 0.10;
    pub const ZOOM_HANDLE_RADIUS: f32 = 0.08;

    /// Subject scale at zoom 0
    pub const SUBJECT_MIN_SCALE: f32 = 0.6;

    /// Extra subject scale at zoom 10
    pub const SUBJECT_SCALE_TRAVEL: f32 = 0.8;

    /// Edge length of the square the subject image is fitted into
    pub const SUBJECT_PLANE_SIZE: f32 = 1.6;

    /// Longest side of an uploaded subject texture (pixels)
    pub const SUBJECT_MAX_TEXTURE_SIZE: u32 = 2048;

    pub const GRID_HEIGHT: f32 = -1.2;

    /// Handle emissive intensity when idle
    pub const HANDLE_EMISSIVE_IDLE: f32 = 0.3;

    /// Handle emissive intensity when hovered or dragged
    pub const HANDLE_EMISSIVE_ACTIVE: f32 = 0.8;
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for printing performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}
