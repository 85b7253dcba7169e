use std::collections::HashSet;

use glam::Vec2;
use log::debug;
use winit::event::KeyEvent;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::{Camera, MoveDirection};

/// Mutually exclusive pointer modes.
///
/// `CameraLocked` grabs the cursor and routes pointer motion into camera
/// look; `FreeCursor` releases it and ignores pointer motion entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    FreeCursor,
    CameraLocked,
}

/// Runtime control flags owned by the dispatcher and read by the render loop
#[derive(Debug, Clone, Copy)]
pub struct ControlState {
    pub cursor_mode: CursorMode,
    /// Secondary-ray count handed to the shader, never below 1
    pub rebound_depth: u32,
    pub shutdown_requested: bool,
    reload_requested: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self {
            cursor_mode: CursorMode::FreeCursor,
            rebound_depth: 1,
            shutdown_requested: false,
            reload_requested: false,
        }
    }

    /// Consume a pending shader reload request, if any
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new()
    }
}

/// Side effect the window layer must perform on the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorRequest {
    /// Recenter the pointer, then grab and hide it
    Lock,
    /// Release the grab and show the pointer
    Release,
    /// Move the pointer back to the window center
    Recenter,
}

/// Translates raw key/pointer events into camera deltas, mode transitions
/// and control-state changes. Owns no window handle: cursor side effects
/// are returned as `CursorRequest`s for the caller to apply.
pub struct InputDispatcher {
    pub control: ControlState,
    held: HashSet<MoveDirection>,
    sensitivity: f32,
    window_center: Vec2,
}

impl InputDispatcher {
    pub fn new(sensitivity: f32, width: u32, height: u32) -> Self {
        Self {
            control: ControlState::new(),
            held: HashSet::new(),
            sensitivity,
            window_center: Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
        }
    }

    /// Track the window size so pointer offsets stay centered after resize
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    }

    pub fn window_center(&self) -> Vec2 {
        self.window_center
    }

    /// Feed a winit keyboard event into the dispatcher
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<CursorRequest> {
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        self.process_key(code, event.state.is_pressed(), event.repeat)
    }

    /// Process one key transition. Discrete actions fire on the press edge
    /// only; movement keys are tracked as held state and polled per frame.
    pub fn process_key(
        &mut self,
        code: KeyCode,
        pressed: bool,
        repeat: bool,
    ) -> Option<CursorRequest> {
        if let Some(direction) = movement_key(code) {
            if pressed {
                self.held.insert(direction);
            } else {
                self.held.remove(&direction);
            }
            return None;
        }

        if !pressed || repeat {
            return None;
        }

        match code {
            KeyCode::KeyC => Some(self.toggle_cursor_mode()),
            KeyCode::Escape => {
                self.control.shutdown_requested = true;
                None
            }
            KeyCode::KeyR => {
                self.control.reload_requested = true;
                None
            }
            KeyCode::KeyV => {
                self.control.rebound_depth = self.control.rebound_depth.saturating_add(1);
                debug!("rebound depth raised to {}", self.control.rebound_depth);
                None
            }
            KeyCode::KeyB => {
                if self.control.rebound_depth > 1 {
                    self.control.rebound_depth -= 1;
                    debug!("rebound depth lowered to {}", self.control.rebound_depth);
                }
                None
            }
            _ => None,
        }
    }

    fn toggle_cursor_mode(&mut self) -> CursorRequest {
        match self.control.cursor_mode {
            CursorMode::FreeCursor => {
                self.control.cursor_mode = CursorMode::CameraLocked;
                debug!("camera locked, cursor grabbed");
                CursorRequest::Lock
            }
            CursorMode::CameraLocked => {
                self.control.cursor_mode = CursorMode::FreeCursor;
                debug!("camera released, cursor free");
                CursorRequest::Release
            }
        }
    }

    /// Translate an absolute pointer position into a look delta.
    ///
    /// While locked, the offset is measured from the window center, scaled
    /// by sensitivity and the frame delta, and the pointer is recentered so
    /// the next offset is measured from the same fixed reference. While
    /// free, pointer motion is ignored.
    pub fn handle_pointer(&mut self, position: Vec2, dt: f32) -> Option<(Vec2, CursorRequest)> {
        if self.control.cursor_mode != CursorMode::CameraLocked {
            return None;
        }
        let offset = (self.window_center - position) * self.sensitivity * dt;
        Some((offset, CursorRequest::Recenter))
    }

    /// Apply every held movement key to the camera. Movement is gated
    /// entirely on the camera being locked. Directions are polled in a
    /// fixed order so outcomes near the bounds do not depend on hash-set
    /// iteration order.
    pub fn apply_held_movement(&self, camera: &mut Camera, dt: f32) {
        if self.control.cursor_mode != CursorMode::CameraLocked {
            return;
        }
        for direction in POLL_ORDER {
            if self.held.contains(&direction) {
                camera.apply_move(direction, dt);
            }
        }
    }

    pub fn is_held(&self, direction: MoveDirection) -> bool {
        self.held.contains(&direction)
    }
}

/// Key-scan order for held movement keys (W, A, D, S, E, Q)
const POLL_ORDER: [MoveDirection; 6] = [
    MoveDirection::Forward,
    MoveDirection::Left,
    MoveDirection::Right,
    MoveDirection::Backward,
    MoveDirection::Up,
    MoveDirection::Down,
];

fn movement_key(code: KeyCode) -> Option<MoveDirection> {
    match code {
        KeyCode::KeyW => Some(MoveDirection::Forward),
        KeyCode::KeyS => Some(MoveDirection::Backward),
        KeyCode::KeyA => Some(MoveDirection::Left),
        KeyCode::KeyD => Some(MoveDirection::Right),
        KeyCode::KeyE => Some(MoveDirection::Up),
        KeyCode::KeyQ => Some(MoveDirection::Down),
        _ => None,
    }
}
