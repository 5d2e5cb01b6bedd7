//! Journal body actions and measured section extents.

use crate::core::event_bus::BoxedEvent;
use crate::core::scroll::SectionSpan;

/// Journal body result - actions via events, plus where each section
/// landed this frame for anchor navigation and active-link tracking
#[derive(Default)]
pub struct ArticleActions {
    pub hovered: bool,
    pub events: Vec<BoxedEvent>,
    pub spans: Vec<SectionSpan>,
}

impl ArticleActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push event to be dispatched
    pub fn send<E: crate::core::event_bus::Event>(&mut self, event: E) {
        self.events.push(Box::new(event));
    }
}
