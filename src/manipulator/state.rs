//! Manipulator interaction state machine
//!
//! ```text
//! Idle --down on handle--> Dragging(handle) --up/leave--> Idle
//! Idle --down on background--> FreeOrbit --up/leave--> Idle
//! ```
//!
//! Hover picking only runs while idle. Every move in a dragging state yields
//! a complete proposed update for the host to apply.

use bevy::math::Vec2;
use serde::Serialize;

use super::layout::HandleLayout;
use super::picking::HandlePicker;
use crate::angle::params::{clamp_vertical, clamp_zoom, wrap_horizontal};
use crate::angle::{AngleParameters, AngleUpdate};
use crate::config::sensitivity::*;

/// One of the three draggable handles, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HandleKind {
    Horizontal,
    Vertical,
    Zoom,
}

impl HandleKind {
    /// Declaration order, used for pick tie-breaking
    pub const ALL: [HandleKind; 3] = [
        HandleKind::Horizontal,
        HandleKind::Vertical,
        HandleKind::Zoom,
    ];
}

/// What the current drag gesture controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DragMode {
    Handle(HandleKind),
    FreeOrbit,
}

/// Pointer cursor the frontend should show over the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CursorHint {
    Crosshair,
    Grab,
    Grabbing,
}

/// Transient, session-scoped interaction state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManipulatorInteractionState {
    pub active: Option<DragMode>,
    pub hovered: Option<HandleKind>,
    #[serde(skip)]
    pub last_pointer: Option<Vec2>,
}

impl ManipulatorInteractionState {
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Whether a handle should be drawn highlighted
    pub fn is_highlighted(&self, kind: HandleKind) -> bool {
        self.active == Some(DragMode::Handle(kind)) || self.hovered == Some(kind)
    }

    pub fn cursor(&self) -> CursorHint {
        match (self.active, self.hovered) {
            (Some(_), _) => CursorHint::Grabbing,
            (None, Some(_)) => CursorHint::Grab,
            (None, None) => CursorHint::Crosshair,
        }
    }
}

/// Horizontal handle sensitivity, raised near the poles where the ring is
/// seen almost edge-on
pub fn horizontal_sensitivity(vertical_angle: f64) -> f64 {
    let cos_factor = vertical_angle.abs().to_radians().cos();
    HORIZONTAL_BASE / cos_factor.max(POLE_COSINE_FLOOR)
}

/// Parameter change for a pointer delta in the given drag mode
///
/// Pointer y grows downwards, so upward motion raises elevation and zoom.
pub fn drag_update(mode: DragMode, params: &AngleParameters, delta: Vec2) -> AngleUpdate {
    let dx = f64::from(delta.x);
    let dy = f64::from(delta.y);
    match mode {
        DragMode::Handle(HandleKind::Horizontal) => {
            let sensitivity = horizontal_sensitivity(params.vertical_angle);
            AngleUpdate::horizontal(wrap_horizontal(
                params.horizontal_angle + dx * sensitivity,
            ))
        }
        DragMode::Handle(HandleKind::Vertical) => {
            AngleUpdate::vertical(clamp_vertical(params.vertical_angle - dy * VERTICAL))
        }
        DragMode::Handle(HandleKind::Zoom) => {
            AngleUpdate::zoom(clamp_zoom(params.zoom_level - dy * ZOOM_DRAG))
        }
        DragMode::FreeOrbit => {
            let sensitivity =
                horizontal_sensitivity(params.vertical_angle) * FREE_ORBIT_HORIZONTAL_FACTOR;
            AngleUpdate {
                horizontal_angle: Some(wrap_horizontal(
                    params.horizontal_angle + dx * sensitivity,
                )),
                vertical_angle: Some(clamp_vertical(params.vertical_angle - dy * VERTICAL)),
                ..AngleUpdate::default()
            }
        }
    }
}

/// Zoom change for a wheel event; independent of any drag in progress
pub fn wheel_update(params: &AngleParameters, delta_y: f64) -> AngleUpdate {
    AngleUpdate::zoom(clamp_zoom(params.zoom_level - delta_y * ZOOM_WHEEL))
}

/// Pointer-driven manipulator for one widget instance
#[derive(Debug, Clone, Default)]
pub struct Manipulator {
    state: ManipulatorInteractionState,
    picker: HandlePicker,
}

impl Manipulator {
    pub fn new(picker: HandlePicker) -> Self {
        Self {
            state: ManipulatorInteractionState::default(),
            picker,
        }
    }

    pub fn state(&self) -> &ManipulatorInteractionState {
        &self.state
    }

    pub fn picker(&self) -> &HandlePicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut HandlePicker {
        &mut self.picker
    }

    /// Start a handle drag or a free orbit
    pub fn pointer_down(&mut self, params: &AngleParameters, position: Vec2) -> DragMode {
        let layout = HandleLayout::from_parameters(params);
        let mode = match self.picker.pick(&layout, position) {
            Some(kind) => DragMode::Handle(kind),
            None => DragMode::FreeOrbit,
        };
        self.state.active = Some(mode);
        self.state.hovered = None;
        self.state.last_pointer = Some(position);
        log::debug!("[Manipulator] Pointer down -> {:?}", mode);
        mode
    }

    /// Track the pointer; returns a proposed update while dragging
    ///
    /// While idle this only refreshes the hovered handle.
    pub fn pointer_move(
        &mut self,
        params: &AngleParameters,
        position: Vec2,
    ) -> Option<AngleUpdate> {
        let Some(mode) = self.state.active else {
            let layout = HandleLayout::from_parameters(params);
            self.state.hovered = self.picker.pick(&layout, position);
            return None;
        };

        let last = self.state.last_pointer.replace(position).unwrap_or(position);
        let delta = position - last;
        if delta == Vec2::ZERO {
            return None;
        }
        let update = drag_update(mode, params, delta);
        log::trace!("[Manipulator] {:?} delta {:?} -> {:?}", mode, delta, update);
        Some(update)
    }

    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    /// Pointer left the tracking area; treated like a release
    pub fn pointer_leave(&mut self) {
        self.end_gesture();
        self.state.hovered = None;
    }

    pub fn wheel(&self, params: &AngleParameters, delta_y: f64) -> AngleUpdate {
        wheel_update(params, delta_y)
    }

    fn end_gesture(&mut self) {
        if let Some(mode) = self.state.active.take() {
            log::debug!("[Manipulator] Released {:?}", mode);
        }
        self.state.last_pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-4;

    fn layout_pointer(
        manipulator: &Manipulator,
        params: &AngleParameters,
        kind: HandleKind,
    ) -> Vec2 {
        let layout = HandleLayout::from_parameters(params);
        manipulator.picker().camera.project(layout.center(kind)).unwrap()
    }

    #[test]
    fn test_down_on_handle_starts_handle_drag() {
        let params = AngleParameters::default();
        let mut manipulator = Manipulator::default();
        let pointer = layout_pointer(&manipulator, &params, HandleKind::Zoom);
        let mode = manipulator.pointer_down(&params, pointer);
        assert_eq!(mode, DragMode::Handle(HandleKind::Zoom));
        assert_eq!(manipulator.state().cursor(), CursorHint::Grabbing);
    }

    #[test]
    fn test_down_on_background_starts_free_orbit() {
        let params = AngleParameters::default();
        let mut manipulator = Manipulator::default();
        let mode = manipulator.pointer_down(&params, Vec2::new(2.0, 2.0));
        assert_eq!(mode, DragMode::FreeOrbit);
    }

    #[test]
    fn test_release_and_leave_return_to_idle() {
        let params = AngleParameters::default();
        let mut manipulator = Manipulator::default();
        manipulator.pointer_down(&params, Vec2::new(2.0, 2.0));
        manipulator.pointer_up();
        assert!(manipulator.state().is_idle());
        assert!(manipulator.state().last_pointer.is_none());

        manipulator.pointer_down(&params, Vec2::new(2.0, 2.0));
        manipulator.pointer_leave();
        assert!(manipulator.state().is_idle());
        assert!(manipulator.state().last_pointer.is_none());
    }

    #[test]
    fn test_hover_only_while_idle() {
        let params = AngleParameters::default();
        let mut manipulator = Manipulator::default();
        let over_vertical = layout_pointer(&manipulator, &params, HandleKind::Vertical);

        assert!(manipulator.pointer_move(&params, over_vertical).is_none());
        assert_eq!(manipulator.state().hovered, Some(HandleKind::Vertical));
        assert!(manipulator.state().is_highlighted(HandleKind::Vertical));
        assert_eq!(manipulator.state().cursor(), CursorHint::Grab);

        manipulator.pointer_down(&params, Vec2::new(2.0, 2.0));
        manipulator.pointer_move(&params, over_vertical);
        assert_eq!(manipulator.state().hovered, None);
    }

    #[test]
    fn test_horizontal_drag_wraps() {
        let params = AngleParameters::new(350.0, 0.0, 5.0, true);
        let update = drag_update(
            DragMode::Handle(HandleKind::Horizontal),
            &params,
            Vec2::new(40.0, 0.0),
        );
        assert!((update.horizontal_angle.unwrap() - 10.0).abs() < EPSILON);
        assert!(update.vertical_angle.is_none());
    }

    #[test]
    fn test_vertical_drag_up_raises_elevation() {
        let params = AngleParameters::default();
        let update = drag_update(
            DragMode::Handle(HandleKind::Vertical),
            &params,
            Vec2::new(0.0, -20.0),
        );
        assert_eq!(update.vertical_angle, Some(10.0));
    }

    #[test]
    fn test_zoom_drag_and_wheel_use_separate_sensitivities() {
        let params = AngleParameters::default();
        let drag = drag_update(
            DragMode::Handle(HandleKind::Zoom),
            &params,
            Vec2::new(0.0, -10.0),
        );
        let wheel = wheel_update(&params, -10.0);
        assert!((drag.zoom_level.unwrap() - 5.5).abs() < EPSILON);
        assert!((wheel.zoom_level.unwrap() - 5.1).abs() < EPSILON);
        assert_eq!(wheel_update(&params, -10_000.0).zoom_level, Some(10.0));
    }

    #[test]
    fn test_free_orbit_updates_both_angles() {
        let params = AngleParameters::default();
        let update = drag_update(DragMode::FreeOrbit, &params, Vec2::new(10.0, -10.0));
        assert!((update.horizontal_angle.unwrap() - 4.0).abs() < EPSILON);
        assert_eq!(update.vertical_angle, Some(5.0));
        assert!(update.zoom_level.is_none());
    }

    #[test]
    fn test_pole_compensation() {
        assert!(horizontal_sensitivity(85.0) > horizontal_sensitivity(0.0));
        assert!((horizontal_sensitivity(0.0) - 0.5).abs() < EPSILON);
        assert!((horizontal_sensitivity(90.0) - 0.5 / 0.3).abs() < EPSILON);
    }

    #[test]
    fn test_move_without_delta_proposes_nothing() {
        let params = AngleParameters::default();
        let mut manipulator = Manipulator::default();
        manipulator.pointer_down(&params, Vec2::new(2.0, 2.0));
        assert!(manipulator.pointer_move(&params, Vec2::new(2.0, 2.0)).is_none());
    }

    #[test]
    fn test_out_of_viewport_pointer_still_drags() {
        let params = AngleParameters::default();
        let mut manipulator = Manipulator::default();
        manipulator.pointer_down(&params, Vec2::new(2.0, 2.0));
        let update = manipulator
            .pointer_move(&params, Vec2::new(-5000.0, 2.0))
            .unwrap();
        assert!(update.horizontal_angle.is_some());
    }
}
