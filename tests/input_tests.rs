use glam::Vec2;
use rayview::camera::{Camera, MovementBounds};
use rayview::input::{CursorMode, CursorRequest, InputDispatcher};
use winit::keyboard::KeyCode;

fn dispatcher() -> InputDispatcher {
    InputDispatcher::new(16.0, 800, 600)
}

#[test]
fn full_session_state_machine_walk() {
    let mut d = dispatcher();
    let mut camera = Camera::new(20.0, MovementBounds::default());
    let start = camera.position;

    // Movement keys held while the cursor is free do nothing
    d.process_key(KeyCode::KeyW, true, false);
    d.apply_held_movement(&mut camera, 0.1);
    assert_eq!(camera.position, start);

    // Lock the camera: pointer grabbed, movement active
    assert_eq!(d.process_key(KeyCode::KeyC, true, false), Some(CursorRequest::Lock));
    d.apply_held_movement(&mut camera, 0.1);
    assert!(camera.position.z < start.z);

    // Pointer motion drives look and recenters
    let (look, request) = d.handle_pointer(Vec2::new(420.0, 310.0), 0.016).unwrap();
    assert_eq!(request, CursorRequest::Recenter);
    camera.apply_look(look);
    assert_ne!(camera.yaw, 0.0);

    // Unlock: pointer released, movement gated off again
    assert_eq!(d.process_key(KeyCode::KeyC, true, false), Some(CursorRequest::Release));
    assert_eq!(d.control.cursor_mode, CursorMode::FreeCursor);
    let held = camera.position;
    d.apply_held_movement(&mut camera, 0.1);
    assert_eq!(camera.position, held);

    // Shutdown is latched from the escape key
    d.process_key(KeyCode::Escape, true, false);
    assert!(d.control.shutdown_requested);
}

#[test]
fn rebound_counter_floor_and_growth() {
    let mut d = dispatcher();

    for _ in 0..3 {
        d.process_key(KeyCode::KeyB, true, false);
    }
    assert_eq!(d.control.rebound_depth, 1, "decrement must floor at 1");

    for _ in 0..5 {
        d.process_key(KeyCode::KeyV, true, false);
    }
    assert_eq!(d.control.rebound_depth, 6);

    d.process_key(KeyCode::KeyB, true, false);
    d.process_key(KeyCode::KeyB, true, false);
    assert_eq!(d.control.rebound_depth, 4);
}

#[test]
fn key_repeats_do_not_retrigger_edge_actions() {
    let mut d = dispatcher();

    d.process_key(KeyCode::KeyV, true, false);
    d.process_key(KeyCode::KeyV, true, true);
    d.process_key(KeyCode::KeyV, true, true);
    assert_eq!(d.control.rebound_depth, 2, "repeats must not increment again");

    d.process_key(KeyCode::KeyC, true, false);
    d.process_key(KeyCode::KeyC, true, true);
    assert_eq!(d.control.cursor_mode, CursorMode::CameraLocked);
}

#[test]
fn reload_requests_latch_until_drained() {
    let mut d = dispatcher();

    assert!(!d.control.take_reload_request());
    d.process_key(KeyCode::KeyR, true, false);
    d.process_key(KeyCode::KeyR, true, false);
    assert!(d.control.take_reload_request());
    assert!(!d.control.take_reload_request(), "request drains once per frame");
}

#[test]
fn pointer_offsets_follow_resized_center() {
    let mut d = dispatcher();
    d.process_key(KeyCode::KeyC, true, false);
    d.set_window_size(400, 400);

    let (offset, _) = d.handle_pointer(Vec2::new(200.0, 200.0), 1.0).unwrap();
    assert_eq!(offset, Vec2::ZERO, "center of the resized window is the new reference");
}
