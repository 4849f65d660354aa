//! Band tables and classifiers
//!
//! Each classifier looks its label up in an ordered list of
//! `(exclusive upper bound, label)` pairs, one list per vocabulary. Values at
//! or above the last bound fall into the table's `top` label. The verbose and
//! terse vocabularies are kept side by side so their differences stay visible:
//! terse elevation has four bands where verbose has five.

use super::params::{clamp_vertical, clamp_zoom, wrap_horizontal};

/// Ordered label bands over a numeric domain
#[derive(Debug)]
pub struct BandTable {
    pub bands: &'static [(f64, &'static str)],
    pub top: &'static str,
}

impl BandTable {
    pub fn lookup(&self, value: f64) -> &'static str {
        self.bands
            .iter()
            .find(|(upper, _)| value < *upper)
            .map(|(_, label)| *label)
            .unwrap_or(self.top)
    }

    /// Every label in ascending order, `top` last
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.bands.iter().map(|(_, label)| *label).chain(std::iter::once(self.top))
    }
}

// =============================================================================
// Horizontal (direction)
// =============================================================================

/// Front sector wraps around: [337.5, 360) is caught by `top`
pub static HORIZONTAL_VERBOSE: BandTable = BandTable {
    bands: &[
        (22.5, "front view"),
        (67.5, "front-right view"),
        (112.5, "right side view"),
        (157.5, "back-right view"),
        (202.5, "back view"),
        (247.5, "back-left view"),
        (292.5, "left side view"),
        (337.5, "front-left view"),
    ],
    top: "front view",
};

pub static HORIZONTAL_TERSE: BandTable = BandTable {
    bands: &[
        (22.5, "front view"),
        (67.5, "front-right quarter view"),
        (112.5, "right side view"),
        (157.5, "back-right quarter view"),
        (202.5, "back view"),
        (247.5, "back-left quarter view"),
        (292.5, "left side view"),
        (337.5, "front-left quarter view"),
    ],
    top: "front view",
};

// =============================================================================
// Vertical (elevation)
// =============================================================================

pub static VERTICAL_VERBOSE: BandTable = BandTable {
    bands: &[
        (-15.0, "low angle"),
        (15.0, "eye level"),
        (45.0, "high angle"),
        (75.0, "bird's eye view"),
    ],
    top: "top-down view",
};

pub static VERTICAL_TERSE: BandTable = BandTable {
    bands: &[
        (-15.0, "low-angle shot"),
        (15.0, "eye-level shot"),
        (75.0, "elevated shot"),
    ],
    top: "high-angle shot",
};

// =============================================================================
// Distance (shot framing)
// =============================================================================

pub static DISTANCE_VERBOSE: BandTable = BandTable {
    bands: &[
        (2.0, "wide shot"),
        (4.0, "medium-wide shot"),
        (6.0, "medium shot"),
        (8.0, "medium close-up"),
    ],
    top: "close-up",
};

pub static DISTANCE_TERSE: BandTable = BandTable {
    bands: &[(2.0, "wide shot"), (6.0, "medium shot")],
    top: "close-up",
};

/// Compass-style view label for any horizontal angle (wrapped mod 360)
pub fn classify_horizontal(angle_degrees: f64, verbose: bool) -> &'static str {
    let table = if verbose {
        &HORIZONTAL_VERBOSE
    } else {
        &HORIZONTAL_TERSE
    };
    table.lookup(wrap_horizontal(angle_degrees))
}

/// Camera elevation label
pub fn classify_vertical(angle_degrees: f64, verbose: bool) -> &'static str {
    let table = if verbose {
        &VERTICAL_VERBOSE
    } else {
        &VERTICAL_TERSE
    };
    table.lookup(clamp_vertical(angle_degrees))
}

/// Shot distance label
pub fn classify_distance(zoom: f64, verbose: bool) -> &'static str {
    let table = if verbose {
        &DISTANCE_VERBOSE
    } else {
        &DISTANCE_TERSE
    };
    table.lookup(clamp_zoom(zoom))
}
