//! Scene-layer error types.

use crate::actor::ActorId;

/// Errors that can occur when querying or mutating the scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// No actor with this id exists.
    #[error("unknown actor: {0}")]
    UnknownActor(ActorId),

    /// The actor exists but is not a tile actor.
    #[error("{0} is not a tile actor")]
    NotATile(ActorId),

    /// A trace ray had a zero-length or non-finite direction.
    #[error("invalid trace direction: {0}")]
    InvalidRay(String),

    /// An actor label was already taken.
    #[error("duplicate actor label: {0}")]
    DuplicateLabel(String),
}
