//! Photo viewer (modal) events
//!
//! Emitted by article cards and by the viewer overlay itself. Routed to the
//! ModalHost by the main event loop.

use uuid::Uuid;

// === Lifecycle Events ===

/// Open the viewer for a card (card body clicked)
#[derive(Clone, Debug)]
pub struct ModalOpenEvent(pub Uuid);

/// Dismiss the viewer. Emitted by the close button, the corner icon and
/// backdrop clicks alike; ESC is handled directly by the app.
#[derive(Clone, Debug)]
pub struct ModalCloseEvent;

// === Navigation Events ===

/// Advance the viewer one image (right arrow)
#[derive(Clone, Debug)]
pub struct ModalNextEvent;

/// Step the viewer back one image (left arrow)
#[derive(Clone, Debug)]
pub struct ModalPrevEvent;

/// Jump the viewer to a specific image (dot click)
#[derive(Clone, Debug)]
pub struct ModalShowEvent(pub i64);
