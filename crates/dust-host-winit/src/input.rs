use std::collections::HashSet;

use winit::event::{ElementState, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};

/// Input seen since the last frame.
///
/// "Pressed" means went down during this frame; holding a key (and the OS auto-repeat that
/// comes with it) does not produce another press until the key is released.
#[derive(Debug, Default)]
pub struct InputState {
    /// Window pixels, top-left origin.
    cursor: (f32, f32),
    keys_down: HashSet<VirtualKeyCode>,
    keys_pressed: HashSet<VirtualKeyCode>,
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    close_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one window event. Returns true if it was an input event we track.
    pub fn handle_window_event(&mut self, event: &WindowEvent<'_>) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor(position.x as f32, position.y as f32);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.on_mouse_button(*button, *state);
                true
            }
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(key),
                        ..
                    },
                ..
            } => {
                self.on_key(*key, *state);
                true
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered to unfocused windows.
                self.keys_down.clear();
                self.buttons_down.clear();
                true
            }
            _ => false,
        }
    }

    pub fn on_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    pub fn on_key(&mut self, key: VirtualKeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
                if key == VirtualKeyCode::Escape {
                    self.close_requested = true;
                }
            }
            ElementState::Released => {
                self.keys_down.remove(&key);
            }
        }
    }

    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            ElementState::Released => {
                self.buttons_down.remove(&button);
            }
        }
    }

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    pub fn key_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_down(&self, key: VirtualKeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Close button or Escape.
    pub fn wants_close(&self) -> bool {
        self.close_requested
    }

    /// Forget this frame's edges. Held state and cursor persist.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
    }
}
