//! Hero banner actions.

use crate::core::event_bus::BoxedEvent;

/// Banner never shrinks below this, whatever the window height
pub const HERO_MIN_HEIGHT: f32 = 420.0;

/// Hero banner result - all actions via events
#[derive(Default)]
pub struct HeroActions {
    pub hovered: bool,
    pub events: Vec<BoxedEvent>,
}

impl HeroActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push event to be dispatched
    pub fn send<E: crate::core::event_bus::Event>(&mut self, event: E) {
        self.events.push(Box::new(event));
    }
}
