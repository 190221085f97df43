use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A high-level action produced by any input source (keyboard, scripts).
///
/// Serialized with an `action` tag, e.g. `{ action: add_object, kind: 1 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Fly the camera along its local axes (x right, y up, z forward).
    MoveCamera { delta: Vec3 },
    /// Turn the camera by pointer deltas.
    RotateCamera { dx: f32, dy: f32 },
    /// Cycle the selection to the next selectable object.
    ChooseNext,
    /// Select whatever lies under a point in normalized device coordinates.
    Pick { x: f32, y: f32 },
    /// Clear the selection.
    Deselect,
    /// Translate the selected object.
    MoveObject { delta: Vec3 },
    /// Add an object of the given kind in front of the camera.
    AddObject { kind: i32 },
    /// Remove the selected object.
    RemoveObject,
    /// Undo the last edit.
    Undo,
    /// Redo the last undone edit.
    Redo,
    /// Advance the simulation one fixed step.
    Step,
    /// No-op (used for input that hasn't been bound).
    Noop,
}

impl Action {
    /// Whether this action edits objects and therefore goes through the editor.
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::MoveObject { .. } | Self::AddObject { .. } | Self::RemoveObject
        )
    }
}
