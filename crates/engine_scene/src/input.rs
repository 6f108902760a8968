//! Per-frame player input.
//!
//! [`PlayerInput`] keeps the held state of each bound key plus the edges
//! (just pressed / just released) observed since the last
//! [`PlayerInput::begin_frame`]. Scroll-wheel "keys" are impulses: pressing
//! one raises the edge for the current frame without leaving it held.

use serde::{Deserialize, Serialize};

/// Keys and buttons the editor listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKey {
    LeftMouseButton,
    RightMouseButton,
    MouseScrollUp,
    MouseScrollDown,
}

impl InputKey {
    /// All keys, in slot order.
    pub const ALL: [InputKey; 4] = [
        InputKey::LeftMouseButton,
        InputKey::RightMouseButton,
        InputKey::MouseScrollUp,
        InputKey::MouseScrollDown,
    ];

    const fn slot(self) -> usize {
        match self {
            InputKey::LeftMouseButton => 0,
            InputKey::RightMouseButton => 1,
            InputKey::MouseScrollUp => 2,
            InputKey::MouseScrollDown => 3,
        }
    }

    /// Returns `true` for keys that fire once and are never held.
    #[must_use]
    pub const fn is_impulse(self) -> bool {
        matches!(self, InputKey::MouseScrollUp | InputKey::MouseScrollDown)
    }
}

/// Boolean key state for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    /// Whether the key is currently held.
    pub down: bool,
    /// Whether the key went down this frame.
    pub just_pressed: bool,
    /// Whether the key went up this frame.
    pub just_released: bool,
}

/// Key state for every [`InputKey`].
#[derive(Debug, Clone, Default)]
pub struct PlayerInput {
    keys: [KeyState; InputKey::ALL.len()],
}

impl PlayerInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: edges from the previous frame are cleared, held
    /// state carries over.
    pub fn begin_frame(&mut self) {
        for state in &mut self.keys {
            state.just_pressed = false;
            state.just_released = false;
        }
    }

    pub fn press(&mut self, key: InputKey) {
        let state = &mut self.keys[key.slot()];
        if key.is_impulse() {
            state.just_pressed = true;
            return;
        }
        if !state.down {
            state.down = true;
            state.just_pressed = true;
        }
    }

    pub fn release(&mut self, key: InputKey) {
        let state = &mut self.keys[key.slot()];
        if state.down {
            state.down = false;
            state.just_released = true;
        }
    }

    #[must_use]
    pub fn state(&self, key: InputKey) -> KeyState {
        self.keys[key.slot()]
    }

    #[must_use]
    pub fn is_down(&self, key: InputKey) -> bool {
        self.keys[key.slot()].down
    }

    #[must_use]
    pub fn was_just_pressed(&self, key: InputKey) -> bool {
        self.keys[key.slot()].just_pressed
    }

    #[must_use]
    pub fn was_just_released(&self, key: InputKey) -> bool {
        self.keys[key.slot()].just_released
    }

    /// Returns `true` if any key is held or fired this frame.
    #[must_use]
    pub fn any_pressed(&self) -> bool {
        self.keys.iter().any(|s| s.down || s.just_pressed)
    }
}
