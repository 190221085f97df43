use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a body in the world.
///
/// Built-in bodies use the reserved ids `1..=4`; everything added at runtime
/// gets a random v4 uuid, which can never collide with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub Uuid);

impl BodyId {
    /// The free-standing object `o`.
    pub const OBJECT: Self = Self(Uuid::from_u128(1));
    /// The player body `p`.
    pub const PLAYER: Self = Self(Uuid::from_u128(2));
    /// The ground slab.
    pub const GROUND: Self = Self(Uuid::from_u128(3));
    /// The shading test fixture.
    pub const SHADE_TEST: Self = Self(Uuid::from_u128(4));

    pub const BUILTIN: [Self; 4] = [Self::OBJECT, Self::PLAYER, Self::GROUND, Self::SHADE_TEST];

    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Whether this id names one of the four bodies every world owns.
    pub fn is_builtin(&self) -> bool {
        Self::BUILTIN.contains(self)
    }

    /// Last eight hex digits, for log lines and debug output.
    pub fn short(&self) -> String {
        let s = self.0.simple().to_string();
        s[s.len() - 8..].to_string()
    }
}

impl Default for BodyId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BodyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Spatial transform: position, rotation, scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Copy of this transform shifted by `delta`.
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}
