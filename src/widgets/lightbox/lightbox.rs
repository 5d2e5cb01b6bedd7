//! Photo viewer actions.

use crate::core::event_bus::BoxedEvent;

/// Photo viewer result - all actions via events
#[derive(Default)]
pub struct LightboxActions {
    pub hovered: bool,
    pub events: Vec<BoxedEvent>,
}

impl LightboxActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push event to be dispatched
    pub fn send<E: crate::core::event_bus::Event>(&mut self, event: E) {
        self.events.push(Box::new(event));
    }
}
