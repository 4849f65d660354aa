//! Camera angle prompt engine
//!
//! This module converts the three camera parameters of the angle widget
//! (horizontal rotation, vertical tilt, zoom) into a cinematography prompt
//! fragment. Everything here is pure and framework-free.
//!
//! - `params`: the parameter value object and partial updates
//! - `classify`: band tables and the three classifiers
//! - `compose`: prompt composition and batch conversion
//! - `reference`: reference table and localized status readouts
//! - `node`: the hosting node that owns the authoritative parameters

pub mod classify;
pub mod compose;
pub mod node;
pub mod params;
pub mod reference;

pub use classify::{classify_distance, classify_horizontal, classify_vertical};
pub use compose::{compose_prompt, convert_angles, ClassificationResult};
pub use node::AngleNode;
pub use params::{AngleParameters, AngleUpdate};
pub use reference::{angle_reference, numeric_readout, view_description, AngleReference, Locale};
