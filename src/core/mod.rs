//! Core state modules - rotation clocks, viewer sessions, scroll effects
//!
//! These modules carry the page's behavior, independent of UI.

pub mod event_bus;
pub mod gallery;
pub mod gallery_events;
pub mod modal;
pub mod modal_events;
pub mod reveal;
pub mod rotator;
pub mod scroll;

// Re-exports for convenience
pub use event_bus::{downcast_event, BoxedEvent, Event, EventBus, EventEmitter};
pub use gallery::GalleryRegistry;
pub use modal::{ModalHost, ModalPhase, ModalSession};
pub use reveal::RevealTracker;
pub use rotator::Rotator;
pub use scroll::{PageScroll, SectionSpan};
