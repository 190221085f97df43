use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use worldbox_common::Transform;

use crate::error::WorldError;

/// How a body takes part in the per-frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Integrated every step and selectable for editing.
    #[default]
    Dynamic,
    /// Never moved by the update and never selectable.
    Static,
}

/// Local-space shape of a body, before the transform scale is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

impl Shape {
    /// Unit cube, the shape for object kind 0.
    pub const CUBE: Self = Self::Box {
        half_extents: Vec3::splat(0.5),
    };
    /// Sphere of radius 0.5, the shape for object kind 1.
    pub const BALL: Self = Self::Sphere { radius: 0.5 };
    /// Flat slab, the shape for object kind 2.
    pub const SLAB: Self = Self::Box {
        half_extents: Vec3::new(1.0, 0.1, 1.0),
    };

    /// Map an object kind index onto a shape.
    pub fn from_index(kind: i32) -> Result<Self, WorldError> {
        match kind {
            0 => Ok(Self::CUBE),
            1 => Ok(Self::BALL),
            2 => Ok(Self::SLAB),
            other => Err(WorldError::UnknownShape(other)),
        }
    }

    /// Distance from the centre to the bottom face, ignoring rotation.
    pub fn half_height(&self) -> f32 {
        match self {
            Self::Box { half_extents } => half_extents.y,
            Self::Sphere { radius } => *radius,
        }
    }

    /// Radius of the smallest centred sphere containing the shape.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Box { half_extents } => half_extents.length(),
            Self::Sphere { radius } => *radius,
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::CUBE
    }
}

/// A simulated, renderable object owned by the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    pub name: String,
    pub kind: BodyKind,
    pub shape: Shape,
    pub transform: Transform,
    pub velocity: Vec3,
    /// Rotation rate as a scaled axis, radians per second.
    pub angular_velocity: Vec3,
    pub color: [f32; 4],
    pub visible: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            name: "body".into(),
            kind: BodyKind::Dynamic,
            shape: Shape::CUBE,
            transform: Transform::default(),
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            color: [0.8, 0.8, 0.8, 1.0],
            visible: true,
        }
    }
}

impl Body {
    pub fn dynamic(name: impl Into<String>, shape: Shape, position: Vec3) -> Self {
        Self {
            name: name.into(),
            shape,
            transform: Transform::from_position(position),
            ..Self::default()
        }
    }

    pub fn fixed(name: impl Into<String>, shape: Shape, position: Vec3) -> Self {
        Self {
            kind: BodyKind::Static,
            ..Self::dynamic(name, shape, position)
        }
    }

    pub fn with_color(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// World-space bounding radius, using the largest scale axis.
    pub fn bounding_radius(&self) -> f32 {
        self.shape.bounding_radius() * self.transform.scale.max_element()
    }

    /// Lowest point of the body along y.
    pub fn bottom(&self) -> f32 {
        self.transform.position.y - self.shape.half_height() * self.transform.scale.y
    }

    /// Highest point of the body along y.
    pub fn top(&self) -> f32 {
        self.transform.position.y + self.shape.half_height() * self.transform.scale.y
    }

    /// Advance the body by `dt` seconds (semi-implicit Euler).
    pub fn integrate(&mut self, dt: f32, gravity: Vec3) {
        if !self.is_dynamic() {
            return;
        }
        self.velocity += gravity * dt;
        self.transform.position += self.velocity * dt;
        if self.angular_velocity != Vec3::ZERO {
            let spin = Quat::from_scaled_axis(self.angular_velocity * dt);
            self.transform.rotation = (spin * self.transform.rotation).normalize();
        }
    }

    /// Distance along a normalized ray to this body's bounding sphere.
    ///
    /// Returns `Some(0.0)` when the ray starts inside the sphere.
    pub fn ray_distance(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let radius = self.bounding_radius();
        let m = origin - self.transform.position;
        let b = m.dot(dir);
        let c = m.length_squared() - radius * radius;
        if c > 0.0 && b > 0.0 {
            return None;
        }
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        Some((-b - disc.sqrt()).max(0.0))
    }
}
