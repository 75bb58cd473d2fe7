//! Rendering collaborator boundary.
//!
//! The scene never draws. It tells a [`RenderBackend`] which drawable nodes
//! hang under which layer, when the overlay layer must be raised, and when a
//! node's selection look changed. A real backend keeps a node tree keyed by
//! [`EntityId`] and reads transforms from the scene after each update; the
//! [`HeadlessRenderer`] only tallies the calls so simulations and tests can
//! run without a graphical runtime.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::entity::EntityId;

/// Container layers under the scene root, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Simulated entities and previews.
    Content,
    /// Overlay effects, kept above everything in `Content`.
    Fx,
}

/// Operations the scene needs from a rendering backend.
pub trait RenderBackend {
    /// Parent `node` under `layer`.
    fn add_child(&mut self, layer: Layer, node: EntityId);

    /// Detach `node` from `layer`. Unknown nodes are ignored.
    fn remove_child(&mut self, layer: Layer, node: EntityId);

    /// Move `layer` above its siblings.
    fn bring_to_front(&mut self, layer: Layer);

    /// Redraw `node` after its selection state changed.
    fn redraw(&mut self, node: EntityId, selected: bool);

    /// The host surface changed size.
    fn resize(&mut self, _width: f64, _height: f64) {}
}

/// Call counters kept by [`HeadlessRenderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub attached: usize,
    pub detached: usize,
    pub raises: usize,
    pub redraws: usize,
}

/// Backend for non-interactive contexts: accepts every call and draws nothing.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    stats: RenderStats,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}

impl RenderBackend for HeadlessRenderer {
    fn add_child(&mut self, _layer: Layer, _node: EntityId) {
        self.stats.attached += 1;
    }

    fn remove_child(&mut self, _layer: Layer, _node: EntityId) {
        self.stats.detached += 1;
    }

    fn bring_to_front(&mut self, _layer: Layer) {
        self.stats.raises += 1;
    }

    fn redraw(&mut self, _node: EntityId, _selected: bool) {
        self.stats.redraws += 1;
    }
}
