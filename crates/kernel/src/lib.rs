//! World kernel: the world aggregate, its camera and bodies, per-frame update,
//! draw-list generation and object management.
//!
//! # Invariants
//! - A world always owns its camera and the four built-in bodies.
//! - All state mutations flow through explicit operations and are logged.
//! - Replaying the event log from the same config reproduces the state hash.

pub mod body;
pub mod camera;
pub mod config;
pub mod draw;
pub mod error;
pub mod world;

pub use body::{Body, BodyKind, Shape};
pub use camera::Camera;
pub use config::{ConfigError, WorldConfig};
pub use draw::{DrawCall, DrawList, RenderPass};
pub use error::WorldError;
pub use world::{SPAWN_DISTANCE, World, WorldEvent};
