//! YAML scene configuration.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::body::{Body, BodyKind, Shape};
use crate::camera::Camera;

/// Errors from loading or validating a [`WorldConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Initial state of a world: simulation parameters, camera and the four
/// built-in bodies. Every field may be omitted from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub gravity: Vec3,
    /// Seconds advanced by each `World::update`.
    pub timestep: f32,
    pub camera: Camera,
    pub object: Body,
    pub player: Body,
    pub ground: Body,
    pub shade_test: Body,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let mut ground = Body::fixed("ground", Shape::SLAB, Vec3::new(0.0, -0.1, 0.0))
            .with_color([0.35, 0.55, 0.3, 1.0]);
        ground.transform.scale = Vec3::new(10.0, 1.0, 10.0);

        Self {
            seed: 0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            timestep: 1.0 / 60.0,
            camera: Camera::default(),
            object: Body::dynamic("o", Shape::CUBE, Vec3::new(-1.5, 3.0, 0.0))
                .with_color([0.85, 0.3, 0.25, 1.0]),
            player: Body::dynamic("p", Shape::BALL, Vec3::new(1.5, 0.5, 0.0))
                .with_color([0.25, 0.45, 0.9, 1.0]),
            ground,
            shade_test: Body::fixed("test_shade", Shape::BALL, Vec3::new(4.0, 0.5, -2.0))
                .with_color([1.0, 1.0, 1.0, 1.0]),
        }
    }
}

impl WorldConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), seed = config.seed, "loaded world config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.timestep.is_finite() || self.timestep <= 0.0 {
            return Err(invalid(format!(
                "timestep must be finite and positive, got {}",
                self.timestep
            )));
        }
        if !self.gravity.is_finite() {
            return Err(invalid("gravity must be finite".into()));
        }
        let cam = &self.camera;
        if !(cam.near > 0.0) {
            return Err(invalid(format!("camera near must be positive, got {}", cam.near)));
        }
        if !(cam.far > cam.near) {
            return Err(invalid(format!(
                "camera far ({}) must exceed near ({})",
                cam.far, cam.near
            )));
        }
        if !(cam.fov > 0.0 && cam.fov < std::f32::consts::PI) {
            return Err(invalid(format!("camera fov out of range: {}", cam.fov)));
        }
        if !(cam.aspect > 0.0) {
            return Err(invalid(format!("camera aspect must be positive, got {}", cam.aspect)));
        }
        if self.ground.kind != BodyKind::Static {
            return Err(invalid("ground must be static".into()));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}
