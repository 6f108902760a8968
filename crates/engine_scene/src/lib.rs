//! # engine_scene
//!
//! The engine-side primitives the tile editor is built on. Everything here is
//! headless: rendering, collision and navigation are represented only by the
//! state a backend would consume (instance lists, collision modes, dirty
//! flags).
//!
//! This crate provides:
//!
//! - [`ActorId`] — lightweight, non-owning actor handles.
//! - [`ActorIdAllocator`] — monotonically increasing ID allocator.
//! - [`MeshAsset`] / [`MaterialAsset`] — named asset references.
//! - [`SceneComponent`] — the contract shared by components attached to an actor.
//! - [`StaticMeshComponent`] / [`InstancedMeshComponent`] — renderable components.
//! - [`Scene`] — actor storage and line tracing against the ground plane.
//! - [`PlayerInput`] — per-frame key state with just-pressed edges.
//! - [`PlayerController`] — cursor hit-testing and interaction routing.

pub mod actor;
pub mod asset;
pub mod component;
pub mod controller;
pub mod error;
pub mod input;
pub mod scene;

pub use actor::{ActorId, ActorIdAllocator};
pub use asset::{MaterialAsset, MeshAsset};
pub use component::{CollisionMode, InstancedMeshComponent, SceneComponent, StaticMeshComponent};
pub use controller::{InteractionEvent, InteractionRouter, PlayerController};
pub use error::SceneError;
pub use input::{InputKey, KeyState, PlayerInput};
pub use scene::{HitResult, Ray, Scene, TileActor};
