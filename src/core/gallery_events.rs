//! Gallery slideshow events
//!
//! Emitted by article cards when the reader interacts with an embedded
//! slideshow. Routed to the GalleryRegistry by the main event loop.

use uuid::Uuid;

// === Navigation Events ===

/// Advance a card's slideshow one slide (right arrow)
#[derive(Clone, Debug)]
pub struct GalleryNextEvent(pub Uuid);

/// Step a card's slideshow back one slide (left arrow)
#[derive(Clone, Debug)]
pub struct GalleryPrevEvent(pub Uuid);

/// Jump a card's slideshow to a specific slide (dot click)
#[derive(Clone, Debug)]
pub struct GalleryShowEvent(pub Uuid, pub i64);

// === Hover Events ===

/// Pointer entered (true) or left (false) a card's slideshow area
#[derive(Clone, Debug)]
pub struct GalleryHoverEvent(pub Uuid, pub bool);
