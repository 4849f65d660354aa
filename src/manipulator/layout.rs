//! Scene placement derived from the angle parameters
//!
//! Picking and rendering share these positions so that what the user clicks
//! is exactly what is drawn.

use bevy::math::{EulerRot, Quat, Vec2, Vec3};

use super::state::HandleKind;
use crate::angle::AngleParameters;
use crate::config::angles::MAX_ZOOM;
use crate::config::scene::*;

/// World-space centres of the three handles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    pub horizontal: Vec3,
    pub vertical: Vec3,
    pub zoom: Vec3,
}

impl HandleLayout {
    pub fn from_parameters(params: &AngleParameters) -> Self {
        let h = params.horizontal_angle.to_radians() as f32;
        let v = params.vertical_angle.to_radians() as f32;
        let zoom_distance = ZOOM_HANDLE_MIN_DISTANCE + zoom_fraction(params) * ZOOM_HANDLE_TRAVEL;

        Self {
            // On the horizontal ring
            horizontal: Vec3::new(h.sin() * RING_RADIUS, RING_HEIGHT, h.cos() * RING_RADIUS),
            // On the vertical arc
            vertical: Vec3::new(v.cos() * ARC_RADIUS, v.sin() * ARC_RADIUS, 0.0),
            // In front of the subject
            zoom: Vec3::new(0.0, 0.0, zoom_distance),
        }
    }

    pub fn center(&self, kind: HandleKind) -> Vec3 {
        match kind {
            HandleKind::Horizontal => self.horizontal,
            HandleKind::Vertical => self.vertical,
            HandleKind::Zoom => self.zoom,
        }
    }
}

impl HandleKind {
    /// Hit-sphere radius
    pub fn radius(self) -> f32 {
        match self {
            HandleKind::Horizontal => HORIZONTAL_HANDLE_RADIUS,
            HandleKind::Vertical => VERTICAL_HANDLE_RADIUS,
            HandleKind::Zoom => ZOOM_HANDLE_RADIUS,
        }
    }
}

/// Orientation and scale of the subject group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectPose {
    pub rotation: Quat,
    pub scale: f32,
}

impl SubjectPose {
    pub fn from_parameters(params: &AngleParameters) -> Self {
        let yaw = -params.horizontal_angle.to_radians() as f32;
        let pitch = params.vertical_angle.to_radians() as f32;
        Self {
            rotation: Quat::from_euler(EulerRot::XYZ, pitch, yaw, 0.0),
            scale: SUBJECT_MIN_SCALE + zoom_fraction(params) * SUBJECT_SCALE_TRAVEL,
        }
    }
}

/// Zoom level as a 0..=1 fraction in scene precision
fn zoom_fraction(params: &AngleParameters) -> f32 {
    (params.zoom_level / MAX_ZOOM) as f32
}

/// Fit an image of the given pixel size into the subject square
pub fn fit_subject_plane(width: u32, height: u32) -> Vec2 {
    if width == 0 || height == 0 {
        return Vec2::splat(SUBJECT_PLANE_SIZE);
    }
    let aspect = width as f32 / height as f32;
    if aspect > 1.0 {
        Vec2::new(SUBJECT_PLANE_SIZE, SUBJECT_PLANE_SIZE / aspect)
    } else {
        Vec2::new(SUBJECT_PLANE_SIZE * aspect, SUBJECT_PLANE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_layout() {
        let layout = HandleLayout::from_parameters(&AngleParameters::default());
        assert!(layout.horizontal.abs_diff_eq(Vec3::new(0.0, -0.5, 1.8), EPSILON));
        assert!(layout.vertical.abs_diff_eq(Vec3::new(1.5, 0.0, 0.0), EPSILON));
        assert!(layout.zoom.abs_diff_eq(Vec3::new(0.0, 0.0, 1.1), EPSILON));
    }

    #[test]
    fn test_horizontal_handle_follows_ring() {
        let params = AngleParameters::new(90.0, 0.0, 5.0, true);
        let layout = HandleLayout::from_parameters(&params);
        assert!(layout.horizontal.abs_diff_eq(Vec3::new(1.8, -0.5, 0.0), EPSILON));
    }

    #[test]
    fn test_vertical_handle_at_top_of_arc() {
        let params = AngleParameters::new(0.0, 90.0, 5.0, true);
        let layout = HandleLayout::from_parameters(&params);
        assert!(layout.vertical.abs_diff_eq(Vec3::new(0.0, 1.5, 0.0), EPSILON));
    }

    #[test]
    fn test_subject_scale_tracks_zoom() {
        let wide = SubjectPose::from_parameters(&AngleParameters::new(0.0, 0.0, 0.0, true));
        let close = SubjectPose::from_parameters(&AngleParameters::new(0.0, 0.0, 10.0, true));
        assert!((wide.scale - 0.6).abs() < EPSILON);
        assert!((close.scale - 1.4).abs() < EPSILON);
    }

    #[test]
    fn test_fit_subject_plane_preserves_aspect() {
        assert_eq!(fit_subject_plane(200, 100), Vec2::new(1.6, 0.8));
        assert_eq!(fit_subject_plane(100, 200), Vec2::new(0.8, 1.6));
        assert_eq!(fit_subject_plane(0, 0), Vec2::splat(1.6));
    }
}
