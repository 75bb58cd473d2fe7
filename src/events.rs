//! Scene notifications and their observers.
//!
//! Observers run synchronously inside the call that caused the transition,
//! in subscription order. Nothing is buffered across frames.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::fmt;

/// A state transition worth telling the host about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// Simulation stopped advancing entities.
    Paused,
    /// Simulation resumed.
    Resumed,
    /// The camera's live scale moved toward its target this frame.
    ZoomChanged { zoom: f64, scale: f64 },
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SceneEvent)>;

/// Ordered list of event listeners.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Observers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It sees every event emitted after this call.
    pub fn subscribe(&mut self, listener: impl FnMut(&SceneEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener in subscription order.
    pub fn emit(&mut self, event: &SceneEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("listeners", &self.listeners.len()).finish()
    }
}
