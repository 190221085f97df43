use worldbox_common::BodyId;

use crate::config::ConfigError;

/// Errors from world operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("body {0} not found")]
    BodyNotFound(BodyId),
    #[error("body {0} is built in and cannot be removed or replaced")]
    BuiltinBody(BodyId),
    #[error("body {0} is static and cannot be selected")]
    NotSelectable(BodyId),
    #[error("no object is selected")]
    NothingSelected,
    #[error("unknown object kind {0}")]
    UnknownShape(i32),
    #[error("unknown render pass {0}")]
    UnknownPass(i32),
    #[error("invalid timestep {0}: must be finite and positive")]
    InvalidTimestep(f32),
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}
