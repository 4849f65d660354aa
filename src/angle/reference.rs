//! Reference table and status readouts
//!
//! The reference table lists the labelled points and ranges of each axis for
//! the frontend's help popover. The readouts are the two status lines shown
//! under the 3D view: numeric values and a short localized description.

use serde::{Deserialize, Serialize};

use super::classify::{
    classify_horizontal, BandTable, DISTANCE_VERBOSE, HORIZONTAL_VERBOSE, VERTICAL_VERBOSE,
};
use super::compose::display_round;
use super::params::AngleParameters;
use crate::config::angles::{MAX_VERTICAL, MAX_ZOOM, MIN_VERTICAL, MIN_ZOOM};

/// Language of the status description
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

static HORIZONTAL_CHINESE: BandTable = BandTable {
    bands: &[
        (22.5, "正面"),
        (67.5, "右前"),
        (112.5, "右侧"),
        (157.5, "右后"),
        (202.5, "背面"),
        (247.5, "左后"),
        (292.5, "左侧"),
        (337.5, "左前"),
    ],
    top: "正面",
};

static VERTICAL_CHINESE: BandTable = BandTable {
    bands: &[(-15.0, "仰视"), (15.0, "平视"), (45.0, "高角度"), (75.0, "鸟瞰")],
    top: "俯视",
};

static DISTANCE_CHINESE: BandTable = BandTable {
    bands: &[(2.0, "远景"), (4.0, "中远景"), (6.0, "中景"), (8.0, "中近景")],
    top: "特写",
};

/// One labelled point or range on an axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceEntry {
    /// Angle (`"45"`) or range (`"15 to 45"`, `"2-4"`)
    pub key: String,
    pub label: &'static str,
    pub caption: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AngleReference {
    pub horizontal: Vec<ReferenceEntry>,
    pub vertical: Vec<ReferenceEntry>,
    pub zoom: Vec<ReferenceEntry>,
}

/// Build the reference table from the verbose band tables
pub fn angle_reference() -> AngleReference {
    let horizontal = (0..8)
        .map(|sector| {
            let angle = sector as f64 * 45.0;
            ReferenceEntry {
                key: format!("{}", sector * 45),
                label: classify_horizontal(angle, true),
                caption: HORIZONTAL_CHINESE.lookup(angle),
            }
        })
        .collect();

    AngleReference {
        horizontal,
        vertical: range_entries(
            &VERTICAL_VERBOSE,
            &VERTICAL_CHINESE,
            MIN_VERTICAL,
            MAX_VERTICAL,
            " to ",
        ),
        zoom: range_entries(&DISTANCE_VERBOSE, &DISTANCE_CHINESE, MIN_ZOOM, MAX_ZOOM, "-"),
    }
}

fn range_entries(
    table: &BandTable,
    captions: &BandTable,
    min: f64,
    max: f64,
    separator: &str,
) -> Vec<ReferenceEntry> {
    let bounds: Vec<f64> = std::iter::once(min)
        .chain(table.bands.iter().map(|(upper, _)| *upper))
        .chain(std::iter::once(max))
        .collect();

    bounds
        .windows(2)
        .zip(table.labels().zip(captions.labels()))
        .map(|(range, (label, caption))| ReferenceEntry {
            key: format!("{}{}{}", range[0], separator, range[1]),
            label,
            caption,
        })
        .collect()
}

/// Numeric status row, e.g. `"0° 0° 5.0"`
pub fn numeric_readout(params: &AngleParameters) -> String {
    let params = params.normalized();
    format!(
        "{}° {}° {:.1}",
        display_round(params.horizontal_angle),
        display_round(params.vertical_angle),
        params.zoom_level
    )
}

/// Short status description, always using the five-band vocabulary
pub fn view_description(params: &AngleParameters, locale: Locale) -> String {
    let params = params.normalized();
    match locale {
        Locale::English => format!(
            "{}, {}, {}",
            HORIZONTAL_VERBOSE.lookup(params.horizontal_angle),
            VERTICAL_VERBOSE.lookup(params.vertical_angle),
            DISTANCE_VERBOSE.lookup(params.zoom_level)
        ),
        Locale::Chinese => format!(
            "{}视角，{}，{}",
            HORIZONTAL_CHINESE.lookup(params.horizontal_angle),
            VERTICAL_CHINESE.lookup(params.vertical_angle),
            DISTANCE_CHINESE.lookup(params.zoom_level)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_horizontal_points() {
        let reference = angle_reference();
        assert_eq!(reference.horizontal.len(), 8);
        assert_eq!(reference.horizontal[1].key, "45");
        assert_eq!(reference.horizontal[1].label, "front-right view");
        assert_eq!(reference.horizontal[1].caption, "右前");
        assert_eq!(reference.horizontal[6].label, "left side view");
    }

    #[test]
    fn test_reference_ranges_cover_domains() {
        let reference = angle_reference();
        let vertical: Vec<_> = reference.vertical.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            vertical,
            ["-30 to -15", "-15 to 15", "15 to 45", "45 to 75", "75 to 90"]
        );
        assert_eq!(reference.vertical[3].label, "bird's eye view");
        assert_eq!(reference.vertical[3].caption, "鸟瞰");

        let zoom: Vec<_> = reference.zoom.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(zoom, ["0-2", "2-4", "4-6", "6-8", "8-10"]);
        assert_eq!(reference.zoom[4].label, "close-up");
    }

    #[test]
    fn test_numeric_readout() {
        let params = AngleParameters::new(123.4, -12.6, 7.2, true);
        assert_eq!(numeric_readout(&params), "123° -13° 7.2");
    }

    #[test]
    fn test_view_description_locales() {
        let params = AngleParameters::default();
        assert_eq!(
            view_description(&params, Locale::English),
            "front view, eye level, medium shot"
        );
        assert_eq!(view_description(&params, Locale::Chinese), "正面视角，平视，中景");

        let params = AngleParameters::new(200.0, 80.0, 1.0, false);
        assert_eq!(view_description(&params, Locale::Chinese), "背面视角，俯视，远景");
    }
}
