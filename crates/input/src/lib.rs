//! Input: raw keys map to high-level actions, and actions drive the world.
//!
//! # Invariants
//! - The world and editor only ever see `Action`s, never raw input events.
//! - Object edits dispatched from input are undoable.

pub mod action;
pub mod bindings;
pub mod dispatch;

pub use action::Action;
pub use bindings::{BindingsError, KeyBindings};
pub use dispatch::{DispatchError, dispatch, parse_script};
