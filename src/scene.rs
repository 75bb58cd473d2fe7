//! Scene: the entity collection, selection, preview/fx layers and frame update.
//!
//! A [`Scene`] owns its simulated objects as boxed [`Updatable`]s in
//! insertion order, the [`Camera`], an optional [`InputBinding`] and the
//! rendering backend. The host drives it by calling [`Scene::update`] once
//! per frame and feeding raw samples to [`Scene::handle_input`].
//!
//! ## Frame order
//!
//! 1. Input binding step (held keys, pinch)
//! 2. Camera zoom easing, then `ZoomChanged` if the scale moved
//! 3. Stop here while paused
//! 4. `before_update` on every object, then `update`, then `after_update`
//! 5. Removals queued through [`UpdateContext::remove`]
//! 6. Fx layer raised above content

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;

use tracing::{debug, info, trace, warn};

use crate::camera::{Camera, Point};
use crate::config::SceneConfig;
use crate::entity::{Entity, EntityBuilder, EntityId, Parent, SceneId, UpdateContext, Updatable};
use crate::error::SceneError;
use crate::events::{Observers, SceneEvent, SubscriptionId};
use crate::input::{InputBinding, InputCommand, InputEvent};
use crate::render::{HeadlessRenderer, Layer, RenderBackend};

/// Owns entities, camera and renderer for one viewport.
pub struct Scene<R: RenderBackend = HeadlessRenderer> {
    id: SceneId,
    entities: Vec<Box<dyn Updatable>>,
    selected: Vec<EntityId>,
    previews: Vec<Box<dyn Updatable>>,
    fx: Vec<Box<dyn Updatable>>,
    paused: bool,
    camera: Camera,
    input: Option<InputBinding>,
    renderer: R,
    observers: Observers,
}

impl Scene<HeadlessRenderer> {
    /// Build a scene that draws nothing.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the view options are missing or invalid.
    pub fn new(config: &SceneConfig) -> Result<Self, SceneError> {
        Self::with_renderer(config, HeadlessRenderer::new())
    }
}

impl<R: RenderBackend> Scene<R> {
    /// Build a scene around a caller-supplied rendering backend.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the view options are missing or invalid.
    pub fn with_renderer(config: &SceneConfig, mut renderer: R) -> Result<Self, SceneError> {
        let view = config.require_view()?;
        let camera = view.build_camera()?;
        let screen = camera.screen();
        renderer.resize(screen.width, screen.height);

        let id = SceneId::next();
        info!(
            scene = %id,
            zoom_min = camera.zoom_min().get(),
            zoom_max = camera.zoom_max().get(),
            width = screen.width,
            height = screen.height,
            input = config.input.is_some(),
            "scene created"
        );

        Ok(Self {
            id,
            entities: Vec::new(),
            selected: Vec::new(),
            previews: Vec::new(),
            fx: Vec::new(),
            paused: false,
            camera,
            input: config.input.as_ref().map(InputBinding::from_config),
            renderer,
            observers: Observers::new(),
        })
    }

    /// Entity builder already bound to this scene and its content layer.
    #[must_use]
    pub fn spawn(&self) -> EntityBuilder {
        Entity::builder().scene(self.id).parent(Parent::Layer(Layer::Content))
    }

    // --- Lifecycle ---

    /// Add an object to the simulated collection.
    pub fn add<T: Updatable + 'static>(&mut self, object: T) -> EntityId {
        self.add_boxed(Box::new(object))
    }

    /// Add an already boxed object, e.g. one handed back by [`Scene::remove`].
    ///
    /// The object arrives unselected. Objects built for another scene, or
    /// whose id this scene already holds, are ignored.
    pub fn add_boxed(&mut self, mut object: Box<dyn Updatable>) -> EntityId {
        let id = object.body().id();
        if !self.admits(object.body(), "entity") {
            return id;
        }
        let body = object.body_mut();
        body.set_removed(false);
        body.deselect();
        let kind = body.kind();
        self.entities.push(object);
        self.renderer.add_child(Layer::Content, id);
        debug!(scene = %self.id, entity = %id, kind, count = self.entities.len(), "entity added");
        id
    }

    /// Take an object out of the scene and hand it back.
    ///
    /// The object is deselected and detached from the renderer. Unknown ids
    /// return `None`.
    pub fn remove(&mut self, id: EntityId) -> Option<Box<dyn Updatable>> {
        let index = self.index_of(id)?;
        let mut object = self.entities.remove(index);
        let body = object.body_mut();
        body.set_removed(true);
        if body.deselect() {
            self.selected.retain(|sid| *sid != id);
        }
        self.renderer.remove_child(Layer::Content, id);
        debug!(scene = %self.id, entity = %id, count = self.entities.len(), "entity removed");
        Some(object)
    }

    /// Remove every listed object, last id first. Stale ids are skipped.
    pub fn remove_objects(&mut self, ids: &[EntityId]) -> Vec<Box<dyn Updatable>> {
        ids.iter().rev().filter_map(|id| self.remove(*id)).collect()
    }

    /// Show an object on the content layer without simulating it.
    ///
    /// Rejected like [`Scene::add_boxed`] when the owner scene or id clashes.
    pub fn preview_object<T: Updatable + 'static>(&mut self, object: T) -> EntityId {
        let id = object.body().id();
        if !self.admits(object.body(), "preview") {
            return id;
        }
        self.previews.push(Box::new(object));
        self.renderer.add_child(Layer::Content, id);
        debug!(scene = %self.id, entity = %id, "preview shown");
        id
    }

    /// Withdraw a preview and hand it back.
    pub fn cancel_preview(&mut self, id: EntityId) -> Option<Box<dyn Updatable>> {
        let index = self.previews.iter().position(|p| p.body().id() == id)?;
        let preview = self.previews.remove(index);
        self.renderer.remove_child(Layer::Content, id);
        debug!(scene = %self.id, entity = %id, "preview cancelled");
        Some(preview)
    }

    /// Attach an overlay effect. Effects are drawn above content and never simulated.
    ///
    /// Rejected like [`Scene::add_boxed`] when the owner scene or id clashes.
    pub fn add_fx<T: Updatable + 'static>(&mut self, mut object: T) -> EntityId {
        if !self.admits(object.body(), "fx") {
            return object.body().id();
        }
        let body = object.body_mut();
        body.set_removed(false);
        let id = body.id();
        self.fx.push(Box::new(object));
        self.renderer.add_child(Layer::Fx, id);
        debug!(scene = %self.id, entity = %id, "fx added");
        id
    }

    /// Detach an overlay effect and hand it back.
    pub fn remove_fx(&mut self, id: EntityId) -> Option<Box<dyn Updatable>> {
        let index = self.fx.iter().position(|f| f.body().id() == id)?;
        let mut fx = self.fx.remove(index);
        fx.body_mut().set_removed(true);
        self.renderer.remove_child(Layer::Fx, id);
        debug!(scene = %self.id, entity = %id, "fx removed");
        Some(fx)
    }

    // --- Frame ---

    /// Advance one frame by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if let Some(input) = self.input.as_mut() {
            input.tick(dt, &mut self.camera);
        }

        if self.camera.update_zoom(dt) {
            let zoom = self.camera.zoom();
            let scale = self.camera.scale();
            trace!(scene = %self.id, zoom, scale, "zoom eased");
            self.observers.emit(&SceneEvent::ZoomChanged { zoom, scale });
        }

        if self.paused {
            return;
        }

        let mut ctx = UpdateContext::new(&self.camera);
        for object in &mut self.entities {
            object.before_update(dt, &mut ctx);
        }
        for object in &mut self.entities {
            object.update(dt, &mut ctx);
        }
        for object in &mut self.entities {
            object.after_update(dt, &mut ctx);
        }

        for id in ctx.into_removals() {
            if self.remove(id).is_some() {
                debug!(scene = %self.id, entity = %id, "entity dropped after update");
            }
        }

        self.renderer.bring_to_front(Layer::Fx);
    }

    /// Track a new host surface size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.camera.resize(width, height);
        self.renderer.resize(width, height);
    }

    // --- Selection ---

    /// Select one object. Without `additive` everything else is deselected first.
    pub fn select_object(&mut self, id: EntityId, additive: bool) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if !additive {
            self.deselect_all();
        }
        self.mark_selected(index);
    }

    /// Deselect one object, leaving the rest of the selection alone.
    pub fn deselect_object(&mut self, id: EntityId) {
        if let Some(index) = self.index_of(id) {
            self.mark_deselected(index);
        }
    }

    /// Box-select between two screen-space corners, in either order.
    ///
    /// Objects whose bounds touch the rectangle are selected. Without
    /// `additive` every other object is deselected and the selection is
    /// exactly the hits, in scene order.
    pub fn select(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, additive: bool) {
        let (min, max) = self.camera.screen_rect_to_world(Point::new(x1, y1), Point::new(x2, y2));
        for index in 0..self.entities.len() {
            if self.entities[index].body().selection_hit_test(min.x, min.y, max.x, max.y) {
                self.mark_selected(index);
            } else if !additive {
                self.mark_deselected(index);
            }
        }
        if !additive {
            self.selected = self
                .entities
                .iter()
                .map(|o| o.body())
                .filter(|body| body.is_selected())
                .map(Entity::id)
                .collect();
        }
    }

    /// Select every object.
    pub fn select_all(&mut self) {
        if self.selected.len() == self.entities.len() {
            return;
        }
        for index in (0..self.entities.len()).rev() {
            self.mark_selected(index);
        }
    }

    pub fn deselect_all(&mut self) {
        while let Some(id) = self.selected.pop() {
            if let Some(index) = self.index_of(id) {
                if self.entities[index].body_mut().deselect() {
                    self.renderer.redraw(id, false);
                }
            }
        }
    }

    /// Remove every selected object and hand them back.
    pub fn remove_selected(&mut self) -> Vec<Box<dyn Updatable>> {
        let ids = self.selected.clone();
        self.remove_objects(&ids)
    }

    fn mark_selected(&mut self, index: usize) {
        let body = self.entities[index].body_mut();
        if body.select() {
            let id = body.id();
            self.selected.push(id);
            self.renderer.redraw(id, true);
        }
    }

    fn mark_deselected(&mut self, index: usize) {
        let body = self.entities[index].body_mut();
        if body.deselect() {
            let id = body.id();
            self.selected.retain(|sid| *sid != id);
            self.renderer.redraw(id, false);
        }
    }

    // --- Pause ---

    #[must_use]
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Stop or resume entity simulation. Observers hear only actual changes.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            info!(scene = %self.id, "scene paused");
            self.observers.emit(&SceneEvent::Paused);
        } else {
            info!(scene = %self.id, "scene resumed");
            self.observers.emit(&SceneEvent::Resumed);
        }
    }

    /// Flip the pause state. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }

    // --- Input ---

    /// Route raw input through `binding` from now on.
    pub fn install_input(&mut self, binding: InputBinding) {
        self.input = Some(binding);
    }

    #[must_use]
    pub fn input(&self) -> Option<&InputBinding> {
        self.input.as_ref()
    }

    /// Feed one raw sample. A completed marquee or click is applied to the
    /// selection and returned. Without an installed binding this does nothing.
    pub fn handle_input(&mut self, event: InputEvent) -> Option<InputCommand> {
        let command = self.input.as_mut()?.handle(event, &mut self.camera)?;
        match command {
            InputCommand::Marquee { from, to, additive } => self.select(from.x, from.y, to.x, to.y, additive),
            InputCommand::Click { screen, additive } => {
                self.select(screen.x, screen.y, screen.x, screen.y, additive);
            }
        }
        Some(command)
    }

    // --- Observers ---

    /// Listen for pause, resume and zoom notifications.
    pub fn subscribe(&mut self, listener: impl FnMut(&SceneEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- Queries ---

    #[must_use]
    pub fn id(&self) -> SceneId {
        self.id
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of simulated objects. Previews and fx are not counted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.object(id).map(Updatable::body)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = self.index_of(id)?;
        Some(self.entities[index].body_mut())
    }

    #[must_use]
    pub fn object(&self, id: EntityId) -> Option<&dyn Updatable> {
        let index = self.index_of(id)?;
        Some(self.entities[index].as_ref())
    }

    pub fn object_mut(&mut self, id: EntityId) -> Option<&mut dyn Updatable> {
        let index = self.index_of(id)?;
        Some(self.entities[index].as_mut())
    }

    /// Ids of the simulated objects, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().map(|o| o.body().id())
    }

    /// Selected ids, in selection order.
    #[must_use]
    pub fn selected(&self) -> &[EntityId] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, id: EntityId) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn previews(&self) -> &[Box<dyn Updatable>] {
        &self.previews
    }

    #[must_use]
    pub fn fx(&self) -> &[Box<dyn Updatable>] {
        &self.fx
    }

    /// Whether `body` may join this scene: it must name this scene as owner
    /// and its id must not already be held as an entity, preview or fx.
    fn admits(&self, body: &Entity, role: &'static str) -> bool {
        let id = body.id();
        if body.scene() != self.id {
            warn!(scene = %self.id, owner = %body.scene(), entity = %id, role, "object built for another scene; ignoring");
            return false;
        }
        if self.holds(id) {
            warn!(scene = %self.id, entity = %id, role, "id already held by scene; ignoring");
            return false;
        }
        true
    }

    fn holds(&self, id: EntityId) -> bool {
        self.contains(id)
            || self.previews.iter().any(|p| p.body().id() == id)
            || self.fx.iter().any(|f| f.body().id() == id)
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|o| o.body().id() == id)
    }
}

impl<R: RenderBackend> fmt::Debug for Scene<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("entities", &self.entities.len())
            .field("selected", &self.selected)
            .field("previews", &self.previews.len())
            .field("fx", &self.fx.len())
            .field("paused", &self.paused)
            .field("camera", &self.camera)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
