//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

use crate::manipulator::HandleKind;

/// Marker component for the offscreen rendering camera
///
/// Entities with this component are cameras that render to an offscreen
/// texture instead of a window.
#[derive(Component)]
pub struct OffscreenCamera;

/// Marker for the group holding the subject plane and its border
///
/// The group is rotated and scaled to preview the chosen camera angle.
#[derive(Component)]
pub struct SubjectGroup;

/// Marker for the plane that shows the subject image
#[derive(Component)]
pub struct SubjectPlane;

/// A draggable handle sphere
///
/// `emissive` is the full-strength glow; the highlight system scales it
/// down when the handle is neither hovered nor dragged.
#[derive(Component)]
pub struct AngleHandle {
    pub kind: HandleKind,
    pub emissive: LinearRgba,
}
