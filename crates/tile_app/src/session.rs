//! Scripted input sessions.
//!
//! A session is a list of frames. Each frame is one tick: the listed keys are
//! released, then pressed, then the cursor ray (if given) replaces the
//! previous one.

use std::path::Path;

use anyhow::{Context, Result};
use engine_scene::{InputKey, PlayerController, Ray};
use serde::{Deserialize, Serialize};

/// Input for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionFrame {
    /// New cursor ray; `None` keeps the previous one.
    pub cursor: Option<Ray>,
    pub press: Vec<InputKey>,
    pub release: Vec<InputKey>,
}

impl SessionFrame {
    /// Feed this frame into the controller's input.
    pub fn apply(&self, controller: &mut PlayerController) {
        let input = controller.input_mut();
        input.begin_frame();
        for key in &self.release {
            input.release(*key);
        }
        for key in &self.press {
            input.press(*key);
        }
        if let Some(ray) = self.cursor {
            controller.set_cursor(ray);
        }
    }
}

/// A recorded or hand-written input session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    pub frames: Vec<SessionFrame>,
}

impl SessionScript {
    /// Read a session script from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid session.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("invalid session {}", path.display()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
