//! Prompt composition
//!
//! Combines the three classifications with the raw values into the prompt
//! fragment consumed by image-generation requests.

use serde::Serialize;

use super::classify::{classify_distance, classify_horizontal, classify_vertical};
use super::params::AngleParameters;

/// Labels and composed prompt for one set of parameters
///
/// This is a pure projection of `AngleParameters` and is rebuilt on every
/// change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub horizontal_label: &'static str,
    pub vertical_label: &'static str,
    pub distance_label: &'static str,
    pub composed_prompt: String,
}

/// Classify the parameters and build the prompt string
///
/// Verbose: `"<h>, <v>, <d> (horizontal: H, vertical: V, zoom: Z.Z)"`.
/// Terse: `"<h> <v> <d>"`.
pub fn compose_prompt(params: &AngleParameters) -> ClassificationResult {
    let params = params.normalized();
    let verbose = params.verbose_mode;

    let horizontal_label = classify_horizontal(params.horizontal_angle, verbose);
    let vertical_label = classify_vertical(params.vertical_angle, verbose);
    let distance_label = classify_distance(params.zoom_level, verbose);

    let composed_prompt = if verbose {
        format!(
            "{}, {}, {} (horizontal: {}, vertical: {}, zoom: {:.1})",
            horizontal_label,
            vertical_label,
            distance_label,
            display_round(params.horizontal_angle),
            display_round(params.vertical_angle),
            params.zoom_level
        )
    } else {
        format!("{} {} {}", horizontal_label, vertical_label, distance_label)
    };

    ClassificationResult {
        horizontal_label,
        vertical_label,
        distance_label,
        composed_prompt,
    }
}

/// Convert a batch of parameter sets, preserving order
pub fn convert_angles(batch: &[AngleParameters]) -> Vec<ClassificationResult> {
    batch.iter().map(compose_prompt).collect()
}

/// Nearest integer for display, halves rounding up
pub(crate) fn display_round(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
