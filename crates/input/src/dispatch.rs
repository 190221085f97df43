use worldbox_author::{EditError, Editor};
use worldbox_kernel::World;

use crate::action::Action;

/// Errors from applying an action.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("edit failed: {0}")]
    Edit(#[from] EditError),
    #[error("invalid action script: {0}")]
    Script(#[from] serde_yaml::Error),
}

/// Apply one action to the world.
///
/// Camera actions scale by `dt`. Object edits go through `editor` so they
/// can be undone.
pub fn dispatch(
    action: &Action,
    world: &mut World,
    editor: &mut Editor,
    dt: f32,
) -> Result<(), DispatchError> {
    tracing::debug!(?action, "dispatch");
    match action {
        Action::MoveCamera { delta } => world.camera_mut().translate(*delta, dt),
        Action::RotateCamera { dx, dy } => world.camera_mut().rotate(*dx, *dy),
        Action::ChooseNext => {
            if world.choose_object().is_none() {
                tracing::debug!("nothing to choose");
            }
        }
        Action::Pick { x, y } => {
            if world.pick(*x, *y).is_none() {
                tracing::debug!(x, y, "pick missed");
            }
        }
        Action::Deselect => world.deselect(),
        Action::MoveObject { delta } => {
            editor.move_object(world, *delta)?;
        }
        Action::AddObject { kind } => {
            editor.add_object(world, *kind)?;
        }
        Action::RemoveObject => {
            editor.remove_object(world)?;
        }
        Action::Undo => {
            if !editor.undo(world)? {
                tracing::debug!("nothing to undo");
            }
        }
        Action::Redo => {
            if !editor.redo(world)? {
                tracing::debug!("nothing to redo");
            }
        }
        Action::Step => world.update(),
        Action::Noop => {}
    }
    if action.is_edit() {
        tracing::debug!(undo_depth = editor.undo_count(), "edit recorded");
    }
    Ok(())
}

/// Parse a YAML list of actions.
pub fn parse_script(s: &str) -> Result<Vec<Action>, DispatchError> {
    Ok(serde_yaml::from_str(s)?)
}
