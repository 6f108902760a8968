//! Player controller and interaction routing.
//!
//! The controller owns the frame's [`PlayerInput`] and the cursor ray. It
//! hit-tests the cursor against the scene and produces an
//! [`InteractionEvent`]; who receives that event is decided by its
//! [`InteractionRouter`], a table of actor ids that registered themselves.
//! The router only stores ids, so a target that disappears is simply skipped
//! by whoever resolves them.

use engine_math::Vec3;
use tracing::debug;

use crate::actor::ActorId;
use crate::error::SceneError;
use crate::input::PlayerInput;
use crate::scene::{Ray, Scene};

/// What the cursor is over this frame, as handed to interaction targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionEvent {
    /// Actor under the cursor, if any.
    pub hit_actor: Option<ActorId>,
    /// World-space hit location.
    pub location: Vec3,
    /// Whether any bound key is pressed this frame.
    pub is_pressed: bool,
}

/// Ordered set of actor ids that want interaction events.
#[derive(Debug, Clone, Default)]
pub struct InteractionRouter {
    targets: Vec<ActorId>,
}

impl InteractionRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target. Returns `false` if it was already registered.
    pub fn register(&mut self, target: ActorId) -> bool {
        if self.targets.contains(&target) {
            return false;
        }
        self.targets.push(target);
        true
    }

    #[must_use]
    pub fn contains(&self, target: ActorId) -> bool {
        self.targets.contains(&target)
    }

    /// Registered targets in registration order.
    #[must_use]
    pub fn targets(&self) -> &[ActorId] {
        &self.targets
    }
}

/// The local player's controller.
#[derive(Debug)]
pub struct PlayerController {
    id: ActorId,
    input: PlayerInput,
    cursor: Option<Ray>,
    router: InteractionRouter,
}

impl PlayerController {
    /// Spawn the controller actor into `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::DuplicateLabel`] if `label` is taken.
    pub fn spawn(scene: &mut Scene, label: &str) -> Result<Self, SceneError> {
        let id = scene.spawn_actor(label)?;
        Ok(Self {
            id,
            input: PlayerInput::new(),
            cursor: None,
            router: InteractionRouter::new(),
        })
    }

    #[must_use]
    pub fn id(&self) -> ActorId {
        self.id
    }

    #[must_use]
    pub fn input(&self) -> &PlayerInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut PlayerInput {
        &mut self.input
    }

    #[must_use]
    pub fn cursor(&self) -> Option<Ray> {
        self.cursor
    }

    pub fn set_cursor(&mut self, ray: Ray) {
        self.cursor = Some(ray);
    }

    /// Route future interaction events to `target`.
    pub fn register_interaction_target(&mut self, target: ActorId) -> bool {
        let added = self.router.register(target);
        if added {
            debug!(controller = %self.id, target = %target, "interaction target registered");
        }
        added
    }

    #[must_use]
    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    /// Hit-test the cursor against `scene`.
    ///
    /// Returns `Ok(None)` if there is no cursor yet or the trace misses.
    ///
    /// # Errors
    ///
    /// Propagates [`SceneError::InvalidRay`] from the trace.
    pub fn trace_under_cursor(&self, scene: &Scene) -> Result<Option<InteractionEvent>, SceneError> {
        let Some(ray) = self.cursor else {
            return Ok(None);
        };
        let hit = scene.line_trace(&ray)?;
        Ok(hit.map(|hit| InteractionEvent {
            hit_actor: hit.actor,
            location: hit.location,
            is_pressed: self.input.any_pressed(),
        }))
    }
}
