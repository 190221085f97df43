use glam::Vec3;
use worldbox_common::{BodyId, Transform};
use worldbox_kernel::{Body, World, WorldError};

/// An editing command that can be applied to the world and reversed.
///
/// Each command carries enough context to undo itself.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Add a body. Undo = remove it.
    Add { id: BodyId, body: Body },
    /// Remove a body. Undo = re-insert it with its data.
    Remove { id: BodyId, body: Body },
    /// Move a body. Undo = restore old transform.
    Move {
        id: BodyId,
        old: Transform,
        new: Transform,
    },
}

impl EditCommand {
    /// Produce the inverse command (for undo).
    pub fn inverse(&self) -> Self {
        match self {
            Self::Add { id, body } => Self::Remove {
                id: *id,
                body: body.clone(),
            },
            Self::Remove { id, body } => Self::Add {
                id: *id,
                body: body.clone(),
            },
            Self::Move { id, old, new } => Self::Move {
                id: *id,
                old: *new,
                new: *old,
            },
        }
    }

    fn apply(&self, world: &mut World) -> Result<(), WorldError> {
        match self {
            Self::Add { id, body } => world.insert(*id, body.clone()),
            Self::Remove { id, .. } => world.remove(*id).map(|_| ()),
            Self::Move { id, new, .. } => world.set_transform(*id, *new),
        }
    }
}

/// Errors from edit operations.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    World(#[from] WorldError),
}

/// Editor with undo/redo support for object management.
///
/// Drives `World`'s object operations and records each one on an undo stack.
/// Every edit is reversible via `undo()` and re-applicable via `redo()`.
#[derive(Debug, Default)]
pub struct Editor {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object of the given kind and push to undo stack.
    pub fn add_object(&mut self, world: &mut World, kind: i32) -> Result<BodyId, EditError> {
        let id = world.add_object(kind)?;
        let body = world
            .body(id)
            .cloned()
            .ok_or(WorldError::BodyNotFound(id))?;
        self.record(EditCommand::Add { id, body });
        Ok(id)
    }

    /// Remove the selected object and push to undo stack.
    pub fn remove_object(&mut self, world: &mut World) -> Result<BodyId, EditError> {
        let (id, body) = world.remove_object()?;
        self.record(EditCommand::Remove { id, body });
        Ok(id)
    }

    /// Move the selected object and push to undo stack.
    pub fn move_object(&mut self, world: &mut World, delta: Vec3) -> Result<BodyId, EditError> {
        let id = world.selected().ok_or(WorldError::NothingSelected)?;
        let old = world
            .body(id)
            .ok_or(WorldError::BodyNotFound(id))?
            .transform;
        world.move_object(delta)?;
        self.record(EditCommand::Move {
            id,
            old,
            new: old.translated(delta),
        });
        Ok(id)
    }

    fn record(&mut self, cmd: EditCommand) {
        tracing::debug!(?cmd, "recorded edit");
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
    }

    /// Undo the last edit. Returns `Ok(false)` if there was nothing to undo.
    ///
    /// A command that no longer applies (for example, its body was removed
    /// outside the editor) stays on the undo stack and the error is returned.
    pub fn undo(&mut self, world: &mut World) -> Result<bool, EditError> {
        let Some(cmd) = self.undo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = cmd.inverse().apply(world) {
            self.undo_stack.push(cmd);
            return Err(e.into());
        }
        self.redo_stack.push(cmd);
        Ok(true)
    }

    /// Redo the last undone edit. Returns `Ok(false)` if there was nothing to
    /// redo.
    pub fn redo(&mut self, world: &mut World) -> Result<bool, EditError> {
        let Some(cmd) = self.redo_stack.pop() else {
            return Ok(false);
        };
        if let Err(e) = cmd.apply(world) {
            self.redo_stack.push(cmd);
            return Err(e.into());
        }
        self.undo_stack.push(cmd);
        Ok(true)
    }

    /// Number of operations on the undo stack.
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of operations on the redo stack.
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Whether there are operations that can be undone.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether there are operations that can be redone.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
