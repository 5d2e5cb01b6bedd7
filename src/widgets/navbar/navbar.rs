//! Navigation bar actions and layout constants.

use crate::core::event_bus::BoxedEvent;

/// Bar height; the reading-progress strip sits directly below this line
pub const NAVBAR_HEIGHT: f32 = 72.0;

/// Window width under which links collapse behind the menu button
pub const COLLAPSE_BELOW: f32 = 768.0;

/// Navigation bar result - all actions via events
#[derive(Default)]
pub struct NavbarActions {
    pub hovered: bool,
    pub events: Vec<BoxedEvent>,
}

impl NavbarActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push event to be dispatched
    pub fn send<E: crate::core::event_bus::Event>(&mut self, event: E) {
        self.events.push(Box::new(event));
    }
}
