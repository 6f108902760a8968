//! Input edge snapshot handed to the manager.

use engine_scene::{InputKey, PlayerInput};

/// The just-pressed edges the manager reacts to, for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEdges {
    pub left_click: bool,
    pub right_click: bool,
    pub scroll_up: bool,
    pub scroll_down: bool,
}

/// The single action an interaction performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionAction {
    Place,
    Rotate,
    SelectPrevious,
    SelectNext,
}

impl InputEdges {
    /// No edges: the interaction is a hover.
    pub const NONE: Self = Self {
        left_click: false,
        right_click: false,
        scroll_up: false,
        scroll_down: false,
    };

    /// Read this frame's edges from the player's input.
    #[must_use]
    pub fn from_input(input: &PlayerInput) -> Self {
        Self {
            left_click: input.was_just_pressed(InputKey::LeftMouseButton),
            right_click: input.was_just_pressed(InputKey::RightMouseButton),
            scroll_up: input.was_just_pressed(InputKey::MouseScrollUp),
            scroll_down: input.was_just_pressed(InputKey::MouseScrollDown),
        }
    }

    #[must_use]
    pub const fn left_click() -> Self {
        Self {
            left_click: true,
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn right_click() -> Self {
        Self {
            right_click: true,
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn scroll_up() -> Self {
        Self {
            scroll_up: true,
            ..Self::NONE
        }
    }

    #[must_use]
    pub const fn scroll_down() -> Self {
        Self {
            scroll_down: true,
            ..Self::NONE
        }
    }

    /// The highest-priority action among the set edges, or `None` for a hover.
    ///
    /// Priority: left click, right click, scroll up, scroll down.
    #[must_use]
    pub fn action(&self) -> Option<InteractionAction> {
        if self.left_click {
            Some(InteractionAction::Place)
        } else if self.right_click {
            Some(InteractionAction::Rotate)
        } else if self.scroll_up {
            Some(InteractionAction::SelectPrevious)
        } else if self.scroll_down {
            Some(InteractionAction::SelectNext)
        } else {
            None
        }
    }
}
