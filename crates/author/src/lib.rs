//! Object editing: add, remove and move bodies with undo/redo.
//!
//! # Invariants
//! - Every edit is reversible.
//! - Every edit is applied through world operations, so it lands in the
//!   world's event log.

pub mod editor;

pub use editor::{EditCommand, EditError, Editor};
