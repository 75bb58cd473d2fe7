//! Entities: positioned, scaled, rotated bodies with momentum physics.
//!
//! An [`Entity`] is the simulated state shared by every object in a scene.
//! Concrete object types wrap one and implement [`Updatable`] to hook the
//! three per-frame passes; the scene drives them without knowing the
//! concrete type. An entity holds only ids for its scene and parent, never
//! owning references.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Camera, Point, Size};
use crate::consts::{DAMPENING_STRENGTH, DEFAULT_ENTITY_EXTENT};
use crate::error::SceneError;
use crate::render::Layer;

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(0);
static NEXT_SCENE_ID: AtomicU64 = AtomicU64::new(0);

/// Unique, monotonically issued entity identifier. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Identifier of the scene an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneId(u64);

impl SceneId {
    pub(crate) fn next() -> Self {
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Opaque owner tag for multiplayer hosts.
pub type PlayerId = Uuid;

/// What an entity's drawable node hangs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    Layer(Layer),
    Entity(EntityId),
}

/// Per-axis linear and angular quantities (momentum, dampening).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

impl Motion {
    #[must_use]
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self { x, y, rotation }
    }
}

/// A simulated body with transform, momentum and selection state.
///
/// Cloning yields a new entity: it gets a fresh id and starts unselected
/// and not removed, so ids stay unique across every copy.
#[derive(Debug)]
pub struct Entity {
    id: EntityId,
    scene: SceneId,
    parent: Parent,
    kind: &'static str,
    pub player: Option<PlayerId>,
    pub position: Point,
    pub scale: Point,
    /// Rotation origin, in local units.
    pub pivot: Point,
    /// Radians.
    pub rotation: f64,
    pub momentum: Motion,
    pub dampening: Motion,
    /// Approximate drawable extent used for marquee hit-testing.
    pub bounds: Size,
    previous_position: Point,
    previous_momentum: Motion,
    selected: bool,
    removed: bool,
}

impl Entity {
    /// Start building an entity. Scene and parent must be set before `build`.
    #[must_use]
    pub fn builder() -> EntityBuilder {
        EntityBuilder::default()
    }

    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[must_use]
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    #[must_use]
    pub fn parent(&self) -> Parent {
        self.parent
    }

    /// Type tag, `"object"` unless the builder set one.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// `true` once the entity has left its scene's active collection.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Position before the most recent `integrate` call.
    #[must_use]
    pub fn previous_position(&self) -> Point {
        self.previous_position
    }

    /// Momentum before the most recent `integrate` call.
    #[must_use]
    pub fn previous_momentum(&self) -> Motion {
        self.previous_momentum
    }

    /// Distance moved during the most recent `integrate` call.
    #[must_use]
    pub fn frame_delta(&self) -> Point {
        Point::new(self.position.x - self.previous_position.x, self.position.y - self.previous_position.y)
    }

    /// Advance one physics step: snapshot, integrate, then dampen.
    pub fn integrate(&mut self, dt: f64) {
        self.previous_position = self.position;
        self.previous_momentum = self.momentum;

        self.position.x += self.momentum.x * dt;
        self.position.y += self.momentum.y * dt;
        self.rotation += self.momentum.rotation * dt;

        self.momentum.x = dampen(self.momentum.x, self.dampening.x);
        self.momentum.y = dampen(self.momentum.y, self.dampening.y);
        self.momentum.rotation = dampen(self.momentum.rotation, self.dampening.rotation);
    }

    /// World-space `(min, max)` corners of the approximate bounds.
    #[must_use]
    pub fn world_bounds(&self) -> (Point, Point) {
        let hw = self.bounds.width * 0.5;
        let hh = self.bounds.height * 0.5;
        (
            Point::new(self.position.x - hw, self.position.y - hh),
            Point::new(self.position.x + hw, self.position.y + hh),
        )
    }

    /// Whether the approximate bounds touch the world-space rectangle.
    ///
    /// Edges that merely touch count as a hit. Width bounds the X test and
    /// height bounds the Y test.
    #[must_use]
    pub fn selection_hit_test(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> bool {
        let (lo, hi) = self.world_bounds();
        !(hi.x < min_x || lo.x > max_x || hi.y < min_y || lo.y > max_y)
    }

    /// Mark selected. Returns `true` if the state changed.
    pub(crate) fn select(&mut self) -> bool {
        !std::mem::replace(&mut self.selected, true)
    }

    /// Clear the selected mark. Returns `true` if the state changed.
    pub(crate) fn deselect(&mut self) -> bool {
        std::mem::replace(&mut self.selected, false)
    }

    pub(crate) fn set_removed(&mut self, removed: bool) {
        self.removed = removed;
    }
}

impl Clone for Entity {
    fn clone(&self) -> Self {
        Self {
            id: EntityId::next(),
            scene: self.scene,
            parent: self.parent,
            kind: self.kind,
            player: self.player,
            position: self.position,
            scale: self.scale,
            pivot: self.pivot,
            rotation: self.rotation,
            momentum: self.momentum,
            dampening: self.dampening,
            bounds: self.bounds,
            previous_position: self.previous_position,
            previous_momentum: self.previous_momentum,
            selected: false,
            removed: false,
        }
    }
}

/// Shrink `momentum` toward zero by `|dampening * momentum * DAMPENING_STRENGTH|`
/// without crossing it.
fn dampen(momentum: f64, dampening: f64) -> f64 {
    let reduction = (dampening * momentum * DAMPENING_STRENGTH).abs();
    if momentum > 0.0 {
        (momentum - reduction).max(0.0)
    } else {
        (momentum + reduction).min(0.0)
    }
}

/// Builder for [`Entity`]. Transform fields default to the identity.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    scene: Option<SceneId>,
    parent: Option<Parent>,
    kind: &'static str,
    player: Option<PlayerId>,
    position: Point,
    scale: Point,
    pivot: Point,
    rotation: f64,
    momentum: Motion,
    dampening: Motion,
    bounds: Size,
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self {
            scene: None,
            parent: None,
            kind: "object",
            player: None,
            position: Point::default(),
            scale: Point::new(1.0, 1.0),
            pivot: Point::default(),
            rotation: 0.0,
            momentum: Motion::default(),
            dampening: Motion::default(),
            bounds: Size::new(DEFAULT_ENTITY_EXTENT, DEFAULT_ENTITY_EXTENT),
        }
    }
}

impl EntityBuilder {
    #[must_use]
    pub fn scene(mut self, scene: SceneId) -> Self {
        self.scene = Some(scene);
        self
    }

    #[must_use]
    pub fn parent(mut self, parent: Parent) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: &'static str) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    #[must_use]
    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    #[must_use]
    pub fn scale(mut self, x: f64, y: f64) -> Self {
        self.scale = Point::new(x, y);
        self
    }

    #[must_use]
    pub fn pivot(mut self, x: f64, y: f64) -> Self {
        self.pivot = Point::new(x, y);
        self
    }

    #[must_use]
    pub fn rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    #[must_use]
    pub fn momentum(mut self, momentum: Motion) -> Self {
        self.momentum = momentum;
        self
    }

    #[must_use]
    pub fn dampening(mut self, dampening: Motion) -> Self {
        self.dampening = dampening;
        self
    }

    #[must_use]
    pub fn bounds(mut self, width: f64, height: f64) -> Self {
        self.bounds = Size::new(width, height);
        self
    }

    /// Issue an id and build the entity.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the scene or parent was never set.
    pub fn build(self) -> Result<Entity, SceneError> {
        let scene = self.scene.ok_or(SceneError::InvalidArgument("entity requires an owning scene"))?;
        let parent = self.parent.ok_or(SceneError::InvalidArgument("entity requires a parent"))?;
        Ok(Entity {
            id: EntityId::next(),
            scene,
            parent,
            kind: self.kind,
            player: self.player,
            position: self.position,
            scale: self.scale,
            pivot: self.pivot,
            rotation: self.rotation,
            momentum: self.momentum,
            dampening: self.dampening,
            bounds: self.bounds,
            previous_position: self.position,
            previous_momentum: self.momentum,
            selected: false,
            removed: false,
        })
    }
}

/// Per-frame view handed to entity hooks.
///
/// Gives read access to the camera and lets a hook queue removals, which the
/// scene applies once all three passes have finished.
#[derive(Debug)]
pub struct UpdateContext<'a> {
    camera: &'a Camera,
    removals: Vec<EntityId>,
}

impl<'a> UpdateContext<'a> {
    #[must_use]
    pub fn new(camera: &'a Camera) -> Self {
        Self { camera, removals: Vec::new() }
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.camera
    }

    /// Queue `id` for removal at the end of the frame.
    pub fn remove(&mut self, id: EntityId) {
        if !self.removals.contains(&id) {
            self.removals.push(id);
        }
    }

    #[must_use]
    pub fn pending_removals(&self) -> &[EntityId] {
        &self.removals
    }

    pub(crate) fn into_removals(self) -> Vec<EntityId> {
        self.removals
    }
}

/// Per-frame hooks the scene calls on every simulated object.
///
/// The scene runs `before_update` on all objects, then `update` on all,
/// then `after_update` on all. The default `update` integrates physics.
pub trait Updatable {
    fn body(&self) -> &Entity;

    fn body_mut(&mut self) -> &mut Entity;

    fn before_update(&mut self, _dt: f64, _ctx: &mut UpdateContext<'_>) {}

    fn update(&mut self, dt: f64, _ctx: &mut UpdateContext<'_>) {
        self.body_mut().integrate(dt);
    }

    fn after_update(&mut self, _dt: f64, _ctx: &mut UpdateContext<'_>) {}
}

impl Updatable for Entity {
    fn body(&self) -> &Entity {
        self
    }

    fn body_mut(&mut self) -> &mut Entity {
        self
    }
}
