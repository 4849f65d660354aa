use angle_prompt_studio_lib::angle::{AngleNode, AngleParameters};
use angle_prompt_studio_lib::manipulator::state::horizontal_sensitivity;
use angle_prompt_studio_lib::manipulator::{
    CursorHint, DragMode, HandleKind, HandleLayout, Manipulator,
};
use angle_prompt_studio_lib::session::AngleSession;
use bevy::math::Vec2;

const EPSILON: f64 = 1e-3;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Screen position of a handle's centre for the given parameters
fn handle_position(manipulator: &Manipulator, params: &AngleParameters, kind: HandleKind) -> Vec2 {
    let layout = HandleLayout::from_parameters(params);
    manipulator
        .picker()
        .camera
        .project(layout.center(kind))
        .expect("handle in front of camera")
}

/// Drive the manipulator and apply each proposal to the node, like the host
fn drag(node: &mut AngleNode, manipulator: &mut Manipulator, kind: HandleKind, moves: &[Vec2]) {
    let start = handle_position(manipulator, &node.parameters(), kind);
    assert_eq!(
        manipulator.pointer_down(&node.parameters(), start),
        DragMode::Handle(kind)
    );

    let mut pointer = start;
    for delta in moves {
        pointer += *delta;
        if let Some(update) = manipulator.pointer_move(&node.parameters(), pointer) {
            node.apply(&update);
        }
    }
    manipulator.pointer_up();
}

#[test]
fn test_full_turn_returns_to_start() {
    let mut node = AngleNode::new(AngleParameters::new(10.0, 0.0, 5.0, true));
    let mut manipulator = Manipulator::default();

    // 0.5 degrees per pixel at eye level; three moves of 240 px make 360 degrees
    drag(
        &mut node,
        &mut manipulator,
        HandleKind::Horizontal,
        &[Vec2::new(240.0, 0.0); 3],
    );

    let params = node.parameters();
    assert!(approx_eq(params.horizontal_angle, 10.0), "got {}", params.horizontal_angle);
    assert!(params.horizontal_angle >= 0.0 && params.horizontal_angle < 360.0);
    assert!(manipulator.state().is_idle());
}

#[test]
fn test_vertical_drag_stays_clamped_after_every_move() {
    let mut node = AngleNode::default();
    let mut manipulator = Manipulator::default();

    let start = handle_position(&manipulator, &node.parameters(), HandleKind::Vertical);
    manipulator.pointer_down(&node.parameters(), start);

    let mut pointer = start;
    for dy in [-100.0, -100.0, -100.0, 150.0, 150.0, 150.0, 150.0] {
        pointer.y += dy;
        if let Some(update) = manipulator.pointer_move(&node.parameters(), pointer) {
            node.apply(&update);
        }
        let vertical = node.parameters().vertical_angle;
        assert!((-30.0..=90.0).contains(&vertical), "vertical {vertical} escaped");
    }

    // Net motion is well below the floor
    assert_eq!(node.parameters().vertical_angle, -30.0);
}

#[test]
fn test_horizontal_sensitivity_rises_near_poles() {
    assert!(approx_eq(horizontal_sensitivity(0.0), 0.5));
    assert!(approx_eq(horizontal_sensitivity(85.0), 0.5 / 0.3));
    assert!(horizontal_sensitivity(85.0) > horizontal_sensitivity(45.0));
    assert!(horizontal_sensitivity(45.0) > horizontal_sensitivity(0.0));
}

#[test]
fn test_same_drag_turns_further_near_pole() {
    let mut eye_level = AngleNode::new(AngleParameters::new(0.0, 0.0, 5.0, true));
    let mut overhead = AngleNode::new(AngleParameters::new(0.0, 85.0, 5.0, true));
    let moves = [Vec2::new(30.0, 0.0)];

    drag(&mut eye_level, &mut Manipulator::default(), HandleKind::Horizontal, &moves);
    drag(&mut overhead, &mut Manipulator::default(), HandleKind::Horizontal, &moves);

    assert!(approx_eq(eye_level.parameters().horizontal_angle, 15.0));
    assert!(approx_eq(overhead.parameters().horizontal_angle, 50.0));
}

#[test]
fn test_zoom_drag_up_moves_closer() {
    let mut node = AngleNode::default();
    let mut manipulator = Manipulator::default();

    drag(&mut node, &mut manipulator, HandleKind::Zoom, &[Vec2::new(0.0, -40.0)]);

    assert!(approx_eq(node.parameters().zoom_level, 7.0));
    assert!(node.angle_prompt().starts_with("front view, eye level, medium close-up"));
}

#[test]
fn test_free_orbit_through_session() {
    let mut session = AngleSession::default();

    // Top-left corner is empty background
    let snapshot = session.pointer_down(Vec2::new(5.0, 5.0));
    assert_eq!(snapshot.cursor, CursorHint::Grabbing);

    let snapshot = session.pointer_move(Vec2::new(15.0, -5.0));
    assert!(approx_eq(snapshot.parameters.horizontal_angle, 4.0));
    assert!(approx_eq(snapshot.parameters.vertical_angle, 5.0));
    assert_eq!(
        snapshot.angle_prompt,
        "front view, eye level, medium shot (horizontal: 4, vertical: 5, zoom: 5.0)"
    );

    let snapshot = session.pointer_up();
    assert_eq!(snapshot.cursor, CursorHint::Crosshair);
    assert!(snapshot.interaction.is_idle());
}

#[test]
fn test_wheel_ignores_active_drag_mode() {
    let mut session = AngleSession::default();
    session.pointer_down(Vec2::new(5.0, 5.0));

    let snapshot = session.wheel(-100.0);
    assert!(approx_eq(snapshot.parameters.zoom_level, 6.0));
    assert_eq!(snapshot.parameters.horizontal_angle, 0.0);
}

#[test]
fn test_leaving_viewport_ends_drag() {
    let mut session = AngleSession::default();
    session.pointer_down(Vec2::new(5.0, 5.0));
    session.pointer_leave();

    let before = session.parameters();
    let snapshot = session.pointer_move(Vec2::new(200.0, 200.0));
    assert_eq!(snapshot.parameters, before);
    assert!(snapshot.interaction.is_idle());
}

#[test]
fn test_viewport_resize_keeps_handles_pickable() {
    let mut session = AngleSession::default();
    session.set_viewport_size(1120.0, 800.0);

    let mut manipulator = Manipulator::default();
    manipulator.picker_mut().camera.set_viewport(Vec2::new(1120.0, 800.0));
    let target = handle_position(&manipulator, &session.parameters(), HandleKind::Zoom);

    session.pointer_down(target);
    assert_eq!(
        session.interaction().active,
        Some(DragMode::Handle(HandleKind::Zoom))
    );
}
