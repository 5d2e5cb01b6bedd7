//! TRAVELOGUE - Travel journal presenter library
//!
//! Re-exports all modules for use by binary targets.

// Core engine (slideshows, viewer sessions, scroll, events)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod content;
pub mod help;
pub mod main_events;
pub mod theme;
pub mod widgets;

// Re-export commonly used types from core
pub use core::event_bus::{downcast_event, BoxedEvent, EventBus, EventEmitter};
pub use core::{GalleryRegistry, ModalHost, PageScroll, RevealTracker, Rotator};

// Re-export content
pub use content::{Card, ImageRef, ImageStore, Journal, Media, Section};
