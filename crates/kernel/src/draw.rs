//! Renderer-agnostic draw lists.
//!
//! `World::draw` turns the current world state into a [`DrawList`] for one
//! render pass. Backends consume draw lists; they never see the world.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use worldbox_common::BodyId;

use crate::body::Body;
use crate::error::WorldError;
use crate::world::World;

/// Which subset of the world a draw call list covers.
///
/// The integer values are the pass indices accepted by `World::draw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPass {
    /// Every visible body except the shading test fixture.
    Shaded = 0,
    /// Only the ground and the shading test fixture.
    ShadingTest = 1,
    /// Selectable bodies tagged with pick ids.
    Picking = 2,
}

impl RenderPass {
    pub const ALL: [Self; 3] = [Self::Shaded, Self::ShadingTest, Self::Picking];

    pub fn index(self) -> i32 {
        self as i32
    }

    fn includes(self, id: BodyId, body: &Body) -> bool {
        if !body.visible {
            return false;
        }
        match self {
            Self::Shaded => id != BodyId::SHADE_TEST,
            Self::ShadingTest => id == BodyId::GROUND || id == BodyId::SHADE_TEST,
            Self::Picking => body.is_dynamic(),
        }
    }
}

impl TryFrom<i32> for RenderPass {
    type Error = WorldError;

    fn try_from(index: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|pass| pass.index() == index)
            .ok_or(WorldError::UnknownPass(index))
    }
}

impl std::fmt::Display for RenderPass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Shaded => "shaded",
            Self::ShadingTest => "shading-test",
            Self::Picking => "picking",
        };
        f.write_str(name)
    }
}

/// One body to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    pub id: BodyId,
    pub name: String,
    pub model: Mat4,
    /// Projection * view * model.
    pub mvp: Mat4,
    pub color: [f32; 4],
    pub selected: bool,
    /// Non-zero only in the picking pass; 0 is reserved for background.
    pub pick_id: u32,
}

/// Everything a backend needs to draw one pass of one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub pass: RenderPass,
    pub tick: u64,
    pub camera_position: Vec3,
    pub view_projection: Mat4,
    pub calls: Vec<DrawCall>,
}

impl DrawList {
    /// Build the draw list for `pass` from the world's current state.
    pub fn build(world: &World, pass: RenderPass) -> Self {
        let cam = world.camera();
        let view_projection = cam.view_projection();
        let forward = cam.forward();
        let selected = world.selected();

        let mut calls = Vec::new();
        let mut culled = 0usize;
        for (id, body) in world.bodies() {
            if !pass.includes(id, body) {
                continue;
            }
            // Entirely behind the camera plane.
            if (body.position() - cam.position).dot(forward) < -body.bounding_radius() {
                culled += 1;
                continue;
            }
            let model = body.transform.matrix();
            let pick_id = match pass {
                RenderPass::Picking => calls.len() as u32 + 1,
                _ => 0,
            };
            calls.push(DrawCall {
                id,
                name: body.name.clone(),
                model,
                mvp: view_projection * model,
                color: body.color,
                selected: selected == Some(id),
                pick_id,
            });
        }
        tracing::trace!(%pass, calls = calls.len(), culled, "built draw list");

        Self {
            pass,
            tick: world.tick(),
            camera_position: cam.position,
            view_projection,
            calls,
        }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Map a pick id read back from a picking target to its body.
    pub fn find_pick(&self, pick_id: u32) -> Option<BodyId> {
        if pick_id == 0 {
            return None;
        }
        self.calls
            .iter()
            .find(|call| call.pick_id == pick_id)
            .map(|call| call.id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.calls.iter().any(|call| call.id == id)
    }
}
