//! Angle parameter value object
//!
//! `AngleParameters` is immutable per update: every change produces a new,
//! normalized value. Values restored from the host's persisted node data go
//! through the same normalization, so out-of-range numbers never reach the
//! classifiers.

use serde::{Deserialize, Serialize};

use crate::config::angles::*;

/// Camera parameters driving the prompt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AngleParameters {
    /// Azimuth around the subject in degrees, [0, 360), 0 = front
    pub horizontal_angle: f64,
    /// Elevation in degrees, [-30, 90]
    pub vertical_angle: f64,
    /// Shot framing, 0 = wide to 10 = close-up
    pub zoom_level: f64,
    /// Verbose vocabulary with numeric suffix, or terse space-joined labels
    pub verbose_mode: bool,
}

impl Default for AngleParameters {
    fn default() -> Self {
        Self {
            horizontal_angle: DEFAULT_HORIZONTAL,
            vertical_angle: DEFAULT_VERTICAL,
            zoom_level: DEFAULT_ZOOM,
            verbose_mode: DEFAULT_VERBOSE,
        }
    }
}

impl AngleParameters {
    /// Create parameters, wrapping and clamping each value into its domain
    pub fn new(
        horizontal_angle: f64,
        vertical_angle: f64,
        zoom_level: f64,
        verbose_mode: bool,
    ) -> Self {
        Self {
            horizontal_angle,
            vertical_angle,
            zoom_level,
            verbose_mode,
        }
        .normalized()
    }

    /// Return a copy with every numeric field inside its domain
    pub fn normalized(self) -> Self {
        Self {
            horizontal_angle: wrap_horizontal(self.horizontal_angle),
            vertical_angle: clamp_vertical(self.vertical_angle),
            zoom_level: clamp_zoom(self.zoom_level),
            verbose_mode: self.verbose_mode,
        }
    }

    /// Apply a partial update and return the resulting parameters
    pub fn apply(self, update: &AngleUpdate) -> Self {
        Self {
            horizontal_angle: update.horizontal_angle.unwrap_or(self.horizontal_angle),
            vertical_angle: update.vertical_angle.unwrap_or(self.vertical_angle),
            zoom_level: update.zoom_level.unwrap_or(self.zoom_level),
            verbose_mode: update.verbose_mode.unwrap_or(self.verbose_mode),
        }
        .normalized()
    }

    /// Default angles, keeping the current vocabulary choice
    pub fn reset(self) -> Self {
        Self {
            verbose_mode: self.verbose_mode,
            ..Self::default()
        }
    }
}

/// Partial parameter update proposed by the manipulator or the frontend
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AngleUpdate {
    pub horizontal_angle: Option<f64>,
    pub vertical_angle: Option<f64>,
    pub zoom_level: Option<f64>,
    pub verbose_mode: Option<bool>,
}

impl AngleUpdate {
    pub fn horizontal(angle: f64) -> Self {
        Self {
            horizontal_angle: Some(angle),
            ..Self::default()
        }
    }

    pub fn vertical(angle: f64) -> Self {
        Self {
            vertical_angle: Some(angle),
            ..Self::default()
        }
    }

    pub fn zoom(level: f64) -> Self {
        Self {
            zoom_level: Some(level),
            ..Self::default()
        }
    }

    pub fn verbose(verbose_mode: bool) -> Self {
        Self {
            verbose_mode: Some(verbose_mode),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal_angle.is_none()
            && self.vertical_angle.is_none()
            && self.zoom_level.is_none()
            && self.verbose_mode.is_none()
    }
}

/// Wrap any angle into [0, 360)
pub fn wrap_horizontal(angle: f64) -> f64 {
    if !angle.is_finite() {
        return DEFAULT_HORIZONTAL;
    }
    let wrapped = angle.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN {
        0.0
    } else {
        wrapped
    }
}

pub fn clamp_vertical(angle: f64) -> f64 {
    if !angle.is_finite() {
        return DEFAULT_VERTICAL;
    }
    angle.clamp(MIN_VERTICAL, MAX_VERTICAL)
}

pub fn clamp_zoom(level: f64) -> f64 {
    if !level.is_finite() {
        return DEFAULT_ZOOM;
    }
    level.clamp(MIN_ZOOM, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = AngleParameters::default();
        assert_eq!(params.horizontal_angle, 0.0);
        assert_eq!(params.vertical_angle, 0.0);
        assert_eq!(params.zoom_level, 5.0);
        assert!(params.verbose_mode);
    }

    #[test]
    fn test_new_normalizes_out_of_range_values() {
        let params = AngleParameters::new(725.0, 120.0, -3.0, false);
        assert_eq!(params.horizontal_angle, 5.0);
        assert_eq!(params.vertical_angle, 90.0);
        assert_eq!(params.zoom_level, 0.0);
    }

    #[test]
    fn test_wrap_negative_angles() {
        assert_eq!(wrap_horizontal(-90.0), 270.0);
        assert_eq!(wrap_horizontal(-360.0), 0.0);
        assert!(wrap_horizontal(-1e-7) < 360.0);
    }

    #[test]
    fn test_non_finite_values_fall_back_to_defaults() {
        let params = AngleParameters::new(f64::NAN, f64::NAN, f64::INFINITY, true);
        assert_eq!(params.horizontal_angle, 0.0);
        assert_eq!(params.vertical_angle, 0.0);
        assert_eq!(params.zoom_level, 5.0);

        let params =
            AngleParameters::new(f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, true);
        assert_eq!(params, AngleParameters::default());
    }

    #[test]
    fn test_values_just_below_a_boundary_keep_full_precision() {
        let restored: AngleParameters = serde_json::from_str(
            r#"{"horizontalAngle": 22.4999999, "verticalAngle": 14.9999999}"#,
        )
        .unwrap();
        let params = restored.normalized();
        assert!(params.horizontal_angle < 22.5);
        assert!(params.vertical_angle < 15.0);
    }

    #[test]
    fn test_apply_partial_update_keeps_other_fields() {
        let params = AngleParameters::new(10.0, 20.0, 3.0, true);
        let next = params.apply(&AngleUpdate::zoom(7.5));
        assert_eq!(next.horizontal_angle, 10.0);
        assert_eq!(next.vertical_angle, 20.0);
        assert_eq!(next.zoom_level, 7.5);
        assert!(next.verbose_mode);
    }

    #[test]
    fn test_reset_keeps_vocabulary() {
        let params = AngleParameters::new(200.0, 60.0, 9.0, false).reset();
        assert_eq!(params, AngleParameters::new(0.0, 0.0, 5.0, false));
    }

    #[test]
    fn test_deserialize_restored_state_is_defused() {
        let restored: AngleParameters =
            serde_json::from_str(r#"{"horizontalAngle": 400, "verticalAngle": -80}"#).unwrap();
        let params = restored.normalized();
        assert_eq!(params.horizontal_angle, 40.0);
        assert_eq!(params.vertical_angle, -30.0);
        assert_eq!(params.zoom_level, 5.0);
        assert!(params.verbose_mode);
    }

    #[test]
    fn test_empty_update() {
        assert!(AngleUpdate::default().is_empty());
        assert!(!AngleUpdate::verbose(false).is_empty());
    }
}
