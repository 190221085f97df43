//! Shared types used across the worldbox crates.

pub mod types;

pub use types::{BodyId, Transform};
