use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use worldbox_common::{BodyId, Transform};

use crate::body::{Body, Shape};
use crate::camera::Camera;
use crate::config::WorldConfig;
use crate::draw::{DrawList, RenderPass};
use crate::error::WorldError;

/// How far in front of the camera `add_object` places new bodies.
pub const SPAWN_DISTANCE: f32 = 5.0;

/// An event record produced by every mutation to the world.
///
/// Each event carries enough information to replay the mutation, and the
/// removal and move events carry enough to reverse it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A body was added under the given id.
    Added { id: BodyId, body: Body },
    /// A body was removed. Carries the data it had for undo support.
    Removed { id: BodyId, body: Body },
    /// A body's transform was replaced.
    Moved {
        id: BodyId,
        old: Transform,
        new: Transform,
    },
    /// The selection changed.
    Selected {
        previous: Option<BodyId>,
        current: Option<BodyId>,
    },
    /// Simulation advanced one step of `dt` seconds.
    Stepped { tick: u64, seed: u64, dt: f32 },
}

/// The world: one camera, the four built-in bodies and anything added since.
///
/// The built-in bodies `o`, `p`, `ground` and `test_shade` live for as long
/// as the world does. Added bodies are kept in a `BTreeMap` so iteration
/// order is deterministic on every platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    cam: Camera,
    o: Body,
    p: Body,
    ground: Body,
    test_shade: Body,
    added: BTreeMap<BodyId, Body>,
    selected: Option<BodyId>,
    tick: u64,
    /// Seed for deterministic RNG. Advanced each step for reproducibility.
    seed: u64,
    gravity: Vec3,
    timestep: f32,
    /// Append-only event log of all mutations.
    #[serde(skip)]
    event_log: Vec<WorldEvent>,
}

impl Default for World {
    fn default() -> Self {
        Self::build(&WorldConfig::default())
    }
}

impl World {
    /// The default scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a world from a config, validating it first.
    pub fn from_config(config: &WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &WorldConfig) -> Self {
        Self {
            cam: config.camera,
            o: config.object.clone(),
            p: config.player.clone(),
            ground: config.ground.clone(),
            test_shade: config.shade_test.clone(),
            added: BTreeMap::new(),
            selected: None,
            tick: 0,
            seed: config.seed,
            gravity: config.gravity,
            timestep: config.timestep,
            event_log: Vec::new(),
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Seconds advanced by each `update`.
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    pub fn camera(&self) -> &Camera {
        &self.cam
    }

    /// Camera motion is not logged and does not affect the state hash.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.cam
    }

    pub fn o(&self) -> &Body {
        &self.o
    }

    pub fn p(&self) -> &Body {
        &self.p
    }

    pub fn ground(&self) -> &Body {
        &self.ground
    }

    pub fn test_shade(&self) -> &Body {
        &self.test_shade
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        if id == BodyId::OBJECT {
            Some(&self.o)
        } else if id == BodyId::PLAYER {
            Some(&self.p)
        } else if id == BodyId::GROUND {
            Some(&self.ground)
        } else if id == BodyId::SHADE_TEST {
            Some(&self.test_shade)
        } else {
            self.added.get(&id)
        }
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        if id == BodyId::OBJECT {
            Some(&mut self.o)
        } else if id == BodyId::PLAYER {
            Some(&mut self.p)
        } else if id == BodyId::GROUND {
            Some(&mut self.ground)
        } else if id == BodyId::SHADE_TEST {
            Some(&mut self.test_shade)
        } else {
            self.added.get_mut(&id)
        }
    }

    /// All bodies in canonical order: `o`, `p`, `ground`, `test_shade`, then
    /// added bodies by id.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        BodyId::BUILTIN
            .into_iter()
            .zip([&self.o, &self.p, &self.ground, &self.test_shade])
            .chain(self.added.iter().map(|(id, body)| (*id, body)))
    }

    pub fn body_count(&self) -> usize {
        BodyId::BUILTIN.len() + self.added.len()
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Advance the simulation by one fixed timestep.
    pub fn update(&mut self) {
        self.advance(self.timestep);
    }

    /// Advance the simulation by an explicit `dt`.
    pub fn update_by(&mut self, dt: f32) -> Result<(), WorldError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(WorldError::InvalidTimestep(dt));
        }
        self.advance(dt);
        Ok(())
    }

    fn advance(&mut self, dt: f32) {
        let _span = tracing::trace_span!("world_update", tick = self.tick + 1).entered();
        self.tick += 1;
        // splitmix64 keeps the seed sequence identical across platforms.
        self.seed = splitmix64(self.seed);

        let ground = &self.ground;
        let gravity = self.gravity;
        let movers = [&mut self.o, &mut self.p, &mut self.test_shade]
            .into_iter()
            .chain(self.added.values_mut());
        for body in movers {
            let was_above = body.bottom() >= ground.top();
            body.integrate(dt, gravity);
            rest_on(body, ground, was_above);
        }

        self.event_log.push(WorldEvent::Stepped {
            tick: self.tick,
            seed: self.seed,
            dt,
        });
    }

    /// Build the draw list for the pass with the given index.
    pub fn draw(&self, pass: i32) -> Result<DrawList, WorldError> {
        let pass = RenderPass::try_from(pass)?;
        Ok(self.draw_pass(pass))
    }

    pub fn draw_pass(&self, pass: RenderPass) -> DrawList {
        DrawList::build(self, pass)
    }

    fn selectable(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies().filter(|(_, body)| body.is_dynamic())
    }

    fn set_selection(&mut self, current: Option<BodyId>) {
        if self.selected == current {
            return;
        }
        let previous = std::mem::replace(&mut self.selected, current);
        tracing::debug!(?previous, ?current, "selection changed");
        self.event_log
            .push(WorldEvent::Selected { previous, current });
    }

    /// Move the selection to the next selectable body, wrapping around.
    ///
    /// Returns the new selection, or `None` if no body is selectable.
    pub fn choose_object(&mut self) -> Option<BodyId> {
        let candidates: Vec<BodyId> = self.selectable().map(|(id, _)| id).collect();
        let current = self
            .selected
            .and_then(|sel| candidates.iter().position(|id| *id == sel));
        let next = match current {
            Some(i) => candidates.get((i + 1) % candidates.len()).copied(),
            None => candidates.first().copied(),
        };
        if next.is_some() {
            self.set_selection(next);
        }
        next
    }

    pub fn select(&mut self, id: BodyId) -> Result<(), WorldError> {
        let body = self.body(id).ok_or(WorldError::BodyNotFound(id))?;
        if !body.is_dynamic() {
            return Err(WorldError::NotSelectable(id));
        }
        self.set_selection(Some(id));
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.set_selection(None);
    }

    /// Select the nearest selectable body under a point in normalized device
    /// coordinates. A miss leaves the selection unchanged.
    pub fn pick(&mut self, ndc_x: f32, ndc_y: f32) -> Option<BodyId> {
        let (origin, dir) = self.cam.ray_through(ndc_x, ndc_y);
        let hit = self
            .selectable()
            .filter(|(_, body)| body.visible)
            .filter_map(|(id, body)| body.ray_distance(origin, dir).map(|t| (id, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);
        if hit.is_some() {
            self.set_selection(hit);
        }
        hit
    }

    /// Translate the selected body by `delta`.
    pub fn move_object(&mut self, delta: Vec3) -> Result<BodyId, WorldError> {
        let id = self.selected.ok_or(WorldError::NothingSelected)?;
        let moved = self
            .body(id)
            .ok_or(WorldError::BodyNotFound(id))?
            .transform
            .translated(delta);
        self.set_transform(id, moved)?;
        Ok(id)
    }

    /// Replace any body's transform and log the change.
    pub fn set_transform(&mut self, id: BodyId, new: Transform) -> Result<(), WorldError> {
        let body = self.body_mut(id).ok_or(WorldError::BodyNotFound(id))?;
        let old = std::mem::replace(&mut body.transform, new);
        tracing::debug!(id = %id.short(), position = ?new.position, "moved body");
        self.event_log.push(WorldEvent::Moved { id, old, new });
        Ok(())
    }

    /// Remove the selected body. Built-in bodies cannot be removed.
    pub fn remove_object(&mut self) -> Result<(BodyId, Body), WorldError> {
        let id = self.selected.ok_or(WorldError::NothingSelected)?;
        let body = self.remove(id)?;
        Ok((id, body))
    }

    /// Remove an added body by id.
    pub fn remove(&mut self, id: BodyId) -> Result<Body, WorldError> {
        if id.is_builtin() {
            return Err(WorldError::BuiltinBody(id));
        }
        if !self.added.contains_key(&id) {
            return Err(WorldError::BodyNotFound(id));
        }
        if self.selected == Some(id) {
            self.set_selection(None);
        }
        let body = self
            .added
            .remove(&id)
            .ok_or(WorldError::BodyNotFound(id))?;
        tracing::debug!(id = %id.short(), name = %body.name, "removed body");
        self.event_log.push(WorldEvent::Removed {
            id,
            body: body.clone(),
        });
        Ok(body)
    }

    /// Add a dynamic body of the given kind in front of the camera.
    ///
    /// Kinds are `0` cube, `1` sphere, `2` slab.
    pub fn add_object(&mut self, kind: i32) -> Result<BodyId, WorldError> {
        let shape = Shape::from_index(kind)?;
        let id = BodyId::new();
        let position = self.cam.position + self.cam.forward() * SPAWN_DISTANCE;
        let body = Body::dynamic(format!("object-{}", id.short()), shape, position)
            .with_color(palette(kind));
        self.insert(id, body)?;
        Ok(id)
    }

    /// Insert an added body under a known id, replacing any body with that id.
    pub fn insert(&mut self, id: BodyId, body: Body) -> Result<(), WorldError> {
        if id.is_builtin() {
            return Err(WorldError::BuiltinBody(id));
        }
        if self.selected == Some(id) && !body.is_dynamic() {
            self.set_selection(None);
        }
        tracing::debug!(id = %id.short(), name = %body.name, "added body");
        self.event_log.push(WorldEvent::Added {
            id,
            body: body.clone(),
        });
        self.added.insert(id, body);
        Ok(())
    }

    /// Rebuild a world by replaying an event log on top of a config.
    pub fn replay(config: &WorldConfig, events: &[WorldEvent]) -> Result<Self, WorldError> {
        let mut world = Self::from_config(config)?;
        for event in events {
            match event {
                WorldEvent::Added { id, body } => world.insert(*id, body.clone())?,
                WorldEvent::Removed { id, .. } => {
                    world.remove(*id)?;
                }
                WorldEvent::Moved { id, new, .. } => world.set_transform(*id, *new)?,
                WorldEvent::Selected { current, .. } => world.set_selection(*current),
                WorldEvent::Stepped { dt, .. } => world.advance(*dt),
            }
        }
        Ok(world)
    }

    /// Deterministic hash of the simulated state (bodies, selection, tick,
    /// seed). The camera is not included.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_floats = |h: &mut u64, floats: &[f32]| {
            for f in floats {
                mix(h, &f.to_le_bytes());
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.seed.to_le_bytes());
        if let Some(sel) = self.selected {
            mix(&mut h, sel.0.as_bytes());
        }
        for (id, body) in self.bodies() {
            let t = &body.transform;
            mix(&mut h, id.0.as_bytes());
            mix_floats(&mut h, &t.position.to_array());
            mix_floats(&mut h, &t.rotation.to_array());
            mix_floats(&mut h, &t.scale.to_array());
            mix_floats(&mut h, &body.velocity.to_array());
        }
        h
    }
}

/// Lift a dynamic body that has sunk into the ground's top face back onto it.
///
/// `was_above` is whether the body's bottom was at or above the ground's top
/// before this step, so a fast fall that crosses the whole slab still lands.
fn rest_on(body: &mut Body, ground: &Body, was_above: bool) {
    if !body.is_dynamic() || !covers(ground, body.position()) {
        return;
    }
    let top = ground.top();
    if body.bottom() < top && (was_above || body.position().y >= ground.position().y) {
        body.transform.position.y = top + body.shape.half_height() * body.transform.scale.y;
        if body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
    }
}

/// Whether `point` lies over the ground's footprint in the xz plane.
fn covers(ground: &Body, point: Vec3) -> bool {
    let offset = point - ground.position();
    let scale = ground.transform.scale;
    match ground.shape {
        Shape::Box { half_extents } => {
            offset.x.abs() <= half_extents.x * scale.x && offset.z.abs() <= half_extents.z * scale.z
        }
        Shape::Sphere { radius } => {
            let r = radius * scale.x.max(scale.z);
            offset.x * offset.x + offset.z * offset.z <= r * r
        }
    }
}

fn palette(kind: i32) -> [f32; 4] {
    match kind {
        0 => [0.9, 0.6, 0.2, 1.0],
        1 => [0.3, 0.8, 0.5, 1.0],
        _ => [0.6, 0.6, 0.7, 1.0],
    }
}

/// Splitmix64: a fast, deterministic PRNG step function.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyKind;

    #[test]
    fn default_world_owns_camera_and_four_bodies() {
        let w = World::new();
        assert_eq!(w.tick(), 0);
        assert_eq!(w.body_count(), 4);
        assert_eq!(w.o().name, "o");
        assert_eq!(w.p().name, "p");
        assert_eq!(w.ground().kind, BodyKind::Static);
        assert_eq!(w.test_shade().name, "test_shade");
        assert_eq!(*w.camera(), Camera::default());
        assert!(w.selected().is_none());
        assert!(w.events().is_empty());
    }

    #[test]
    fn bodies_iterate_in_canonical_order() {
        let mut w = World::new();
        let a = w.add_object(0).unwrap();
        let b = w.add_object(1).unwrap();
        let ids: Vec<BodyId> = w.bodies().map(|(id, _)| id).collect();
        assert_eq!(&ids[..4], &BodyId::BUILTIN);
        let mut tail = vec![a, b];
        tail.sort();
        assert_eq!(&ids[4..], &tail[..]);
    }

    #[test]
    fn update_increments_tick_and_seed() {
        let mut w = World::new();
        let seed = w.seed();
        w.update();
        w.update();
        w.update();
        assert_eq!(w.tick(), 3);
        assert_ne!(w.seed(), seed);
        assert_eq!(w.events().len(), 3);
    }

    #[test]
    fn same_seed_same_sequence() {
        let config = WorldConfig {
            seed: 42,
            ..WorldConfig::default()
        };
        let mut w1 = World::from_config(&config).unwrap();
        let mut w2 = World::from_config(&config).unwrap();
        for _ in 0..100 {
            w1.update();
            w2.update();
        }
        assert_eq!(w1.seed(), w2.seed());
        assert_eq!(w1.state_hash(), w2.state_hash());
    }

    #[test]
    fn update_by_rejects_bad_timesteps() {
        let mut w = World::new();
        for dt in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                w.update_by(dt),
                Err(WorldError::InvalidTimestep(_))
            ));
        }
        assert_eq!(w.tick(), 0);
        w.update_by(0.5).unwrap();
        assert_eq!(w.tick(), 1);
    }

    #[test]
    fn falling_object_comes_to_rest_on_ground() {
        let mut w = World::new();
        let start = w.o().position().y;
        w.update();
        assert!(w.o().position().y < start);
        for _ in 0..300 {
            w.update();
        }
        assert!((w.o().bottom() - w.ground().top()).abs() < 1e-5);
        assert_eq!(w.o().velocity.y, 0.0);
    }

    #[test]
    fn resting_player_stays_put() {
        let mut w = World::new();
        let start = w.p().position();
        for _ in 0..60 {
            w.update();
        }
        assert!((w.p().position() - start).length() < 1e-5);
    }

    #[test]
    fn fast_fall_still_lands_on_ground() {
        let mut w = World::new();
        let id = w.add_object(0).unwrap();
        let start = w.body(id).unwrap().transform;
        let high = Transform {
            position: Vec3::new(start.position.x, 200.0, start.position.z),
            ..start
        };
        w.set_transform(id, high).unwrap();
        for _ in 0..1200 {
            w.update();
        }
        let body = w.body(id).unwrap();
        assert!(
            (body.bottom() - w.ground().top()).abs() < 1e-4,
            "bottom={} ground_top={}",
            body.bottom(),
            w.ground().top()
        );
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn static_bodies_never_move() {
        let mut w = World::new();
        let ground = w.ground().position();
        let shade = w.test_shade().position();
        for _ in 0..30 {
            w.update();
        }
        assert_eq!(w.ground().position(), ground);
        assert_eq!(w.test_shade().position(), shade);
    }

    #[test]
    fn body_off_the_edge_keeps_falling() {
        let mut w = World::new();
        let id = BodyId::new();
        w.insert(id, Body::dynamic("stray", Shape::CUBE, Vec3::new(50.0, 1.0, 0.0)))
            .unwrap();
        for _ in 0..60 {
            w.update();
        }
        assert!(w.body(id).unwrap().position().y < 0.0);
    }

    #[test]
    fn draw_accepts_known_passes_only() {
        let w = World::new();
        assert_eq!(w.draw(0).unwrap().pass, RenderPass::Shaded);
        assert_eq!(w.draw(1).unwrap().pass, RenderPass::ShadingTest);
        assert_eq!(w.draw(2).unwrap().pass, RenderPass::Picking);
        assert!(matches!(w.draw(5), Err(WorldError::UnknownPass(5))));
    }

    #[test]
    fn draw_reports_current_tick() {
        let mut w = World::new();
        w.update();
        assert_eq!(w.draw(0).unwrap().tick, 1);
    }

    #[test]
    fn choose_object_cycles_dynamic_bodies() {
        let mut w = World::new();
        assert_eq!(w.choose_object(), Some(BodyId::OBJECT));
        assert_eq!(w.choose_object(), Some(BodyId::PLAYER));
        assert_eq!(w.choose_object(), Some(BodyId::OBJECT));

        let added = w.add_object(1).unwrap();
        assert_eq!(w.choose_object(), Some(BodyId::PLAYER));
        assert_eq!(w.choose_object(), Some(added));
        assert_eq!(w.choose_object(), Some(BodyId::OBJECT));
    }

    #[test]
    fn choose_object_with_nothing_selectable() {
        let mut config = WorldConfig::default();
        config.object.kind = BodyKind::Static;
        config.player.kind = BodyKind::Static;
        let mut w = World::from_config(&config).unwrap();
        assert_eq!(w.choose_object(), None);
        assert!(w.selected().is_none());
        assert!(w.events().is_empty());
    }

    #[test]
    fn select_validates_target() {
        let mut w = World::new();
        assert!(matches!(
            w.select(BodyId::GROUND),
            Err(WorldError::NotSelectable(_))
        ));
        assert!(matches!(
            w.select(BodyId::new()),
            Err(WorldError::BodyNotFound(_))
        ));
        w.select(BodyId::PLAYER).unwrap();
        assert_eq!(w.selected(), Some(BodyId::PLAYER));
        w.deselect();
        assert_eq!(w.selected(), None);
        // select + deselect
        assert_eq!(w.events().len(), 2);
    }

    #[test]
    fn reselecting_same_body_is_not_logged() {
        let mut w = World::new();
        w.select(BodyId::OBJECT).unwrap();
        w.select(BodyId::OBJECT).unwrap();
        assert_eq!(w.events().len(), 1);
    }

    #[test]
    fn pick_selects_body_under_cursor() {
        let mut w = World::new();
        let target = w.p().position();
        w.camera_mut().look_at(target);
        assert_eq!(w.pick(0.0, 0.0), Some(BodyId::PLAYER));
        assert_eq!(w.selected(), Some(BodyId::PLAYER));
    }

    #[test]
    fn pick_prefers_nearest_hit() {
        let mut w = World::new();
        let cam = *w.camera();
        let near = BodyId::new();
        let far = BodyId::new();
        w.insert(far, Body::dynamic("far", Shape::BALL, cam.position + cam.forward() * 8.0))
            .unwrap();
        w.insert(near, Body::dynamic("near", Shape::BALL, cam.position + cam.forward() * 3.0))
            .unwrap();
        assert_eq!(w.pick(0.0, 0.0), Some(near));
    }

    #[test]
    fn pick_miss_keeps_selection() {
        let mut w = World::new();
        w.select(BodyId::OBJECT).unwrap();
        let up = w.camera().position + Vec3::Y * 10.0;
        w.camera_mut().look_at(up);
        assert_eq!(w.pick(0.0, 0.0), None);
        assert_eq!(w.selected(), Some(BodyId::OBJECT));
    }

    #[test]
    fn pick_ignores_static_bodies() {
        let mut w = World::new();
        let target = w.test_shade().position();
        w.camera_mut().look_at(target);
        assert_eq!(w.pick(0.0, 0.0), None);
    }

    #[test]
    fn move_object_requires_selection() {
        let mut w = World::new();
        assert!(matches!(
            w.move_object(Vec3::X),
            Err(WorldError::NothingSelected)
        ));
    }

    #[test]
    fn move_object_translates_selection() {
        let mut w = World::new();
        w.select(BodyId::OBJECT).unwrap();
        let start = w.o().position();
        let id = w.move_object(Vec3::new(1.0, 0.0, -2.0)).unwrap();
        assert_eq!(id, BodyId::OBJECT);
        assert_eq!(w.o().position(), start + Vec3::new(1.0, 0.0, -2.0));
        assert!(matches!(
            w.events().last(),
            Some(WorldEvent::Moved { id, .. }) if *id == BodyId::OBJECT
        ));
    }

    #[test]
    fn set_transform_moves_builtin_and_rejects_unknown() {
        let mut w = World::new();
        let t = Transform::from_position(Vec3::new(0.0, -5.0, 0.0));
        w.set_transform(BodyId::GROUND, t).unwrap();
        assert_eq!(w.ground().transform, t);
        assert!(matches!(
            w.set_transform(BodyId::new(), t),
            Err(WorldError::BodyNotFound(_))
        ));
    }

    #[test]
    fn add_object_places_body_in_front_of_camera() {
        let mut w = World::new();
        let id = w.add_object(2).unwrap();
        assert_eq!(w.body_count(), 5);
        let body = w.body(id).unwrap();
        assert_eq!(body.shape, Shape::SLAB);
        assert!(body.is_dynamic());
        let cam = w.camera();
        let expected = cam.position + cam.forward() * SPAWN_DISTANCE;
        assert!((body.position() - expected).length() < 1e-5);
    }

    #[test]
    fn add_object_rejects_unknown_kind() {
        let mut w = World::new();
        assert!(matches!(
            w.add_object(42),
            Err(WorldError::UnknownShape(42))
        ));
        assert_eq!(w.body_count(), 4);
        assert!(w.events().is_empty());
    }

    #[test]
    fn remove_object_removes_selection() {
        let mut w = World::new();
        let id = w.add_object(0).unwrap();
        w.select(id).unwrap();
        let (removed, body) = w.remove_object().unwrap();
        assert_eq!(removed, id);
        assert_eq!(body.shape, Shape::CUBE);
        assert_eq!(w.body_count(), 4);
        assert!(w.selected().is_none());
        assert!(w.body(id).is_none());
    }

    #[test]
    fn builtin_bodies_cannot_be_removed() {
        let mut w = World::new();
        w.select(BodyId::OBJECT).unwrap();
        assert!(matches!(
            w.remove_object(),
            Err(WorldError::BuiltinBody(id)) if id == BodyId::OBJECT
        ));
        assert_eq!(w.selected(), Some(BodyId::OBJECT));
        for id in BodyId::BUILTIN {
            assert!(w.remove(id).is_err());
            assert!(w.body(id).is_some());
        }
    }

    #[test]
    fn remove_unknown_body_fails() {
        let mut w = World::new();
        assert!(matches!(
            w.remove(BodyId::new()),
            Err(WorldError::BodyNotFound(_))
        ));
        assert!(matches!(
            w.remove_object(),
            Err(WorldError::NothingSelected)
        ));
    }

    #[test]
    fn insert_rejects_builtin_ids() {
        let mut w = World::new();
        assert!(matches!(
            w.insert(BodyId::PLAYER, Body::default()),
            Err(WorldError::BuiltinBody(_))
        ));
    }

    #[test]
    fn inserting_static_body_over_selection_clears_it() {
        let mut w = World::new();
        let id = w.add_object(0).unwrap();
        w.select(id).unwrap();
        w.insert(id, Body::fixed("pillar", Shape::CUBE, Vec3::ZERO))
            .unwrap();
        assert_eq!(w.selected(), None);
        assert!(w.events().iter().any(|e| matches!(
            e,
            WorldEvent::Selected {
                previous: Some(prev),
                current: None,
            } if *prev == id
        )));

        let other = w.add_object(1).unwrap();
        w.select(other).unwrap();
        w.insert(other, Body::dynamic("ball", Shape::BALL, Vec3::ZERO))
            .unwrap();
        assert_eq!(w.selected(), Some(other));
    }

    #[test]
    fn drain_events_clears_log() {
        let mut w = World::new();
        w.add_object(0).unwrap();
        let events = w.drain_events();
        assert_eq!(events.len(), 1);
        assert!(w.events().is_empty());
    }

    #[test]
    fn state_hash_changes_with_state() {
        let mut w = World::new();
        let before = w.state_hash();
        w.update();
        assert_ne!(w.state_hash(), before);
        let stepped = w.state_hash();
        w.camera_mut().translate(Vec3::Z, 1.0);
        assert_eq!(w.state_hash(), stepped);
    }

    #[test]
    fn replay_reconstructs_state() {
        let config = WorldConfig {
            seed: 7,
            ..WorldConfig::default()
        };
        let mut w = World::from_config(&config).unwrap();
        let keep = w.add_object(0).unwrap();
        let drop = w.add_object(1).unwrap();
        w.select(keep).unwrap();
        w.move_object(Vec3::new(2.0, 1.0, 0.0)).unwrap();
        for _ in 0..20 {
            w.update();
        }
        w.select(drop).unwrap();
        w.remove_object().unwrap();
        w.choose_object();
        for _ in 0..20 {
            w.update();
        }

        let replayed = World::replay(&config, w.events()).unwrap();
        assert_eq!(replayed.state_hash(), w.state_hash());
        assert_eq!(replayed.tick(), w.tick());
        assert_eq!(replayed.seed(), w.seed());
        assert_eq!(replayed.selected(), w.selected());
        assert_eq!(replayed.body_count(), w.body_count());
        assert_eq!(replayed.events(), w.events());
    }

    #[test]
    fn replay_of_inconsistent_log_fails() {
        let events = vec![WorldEvent::Removed {
            id: BodyId::new(),
            body: Body::default(),
        }];
        assert!(World::replay(&WorldConfig::default(), &events).is_err());
    }
}
