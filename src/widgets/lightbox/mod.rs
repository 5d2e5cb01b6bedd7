//! Photo viewer overlay
//!
//! Dimmed backdrop, centered detail card with image, caption and gallery
//! controls. Animates in and out; backdrop clicks and the close controls
//! dismiss it.

mod lightbox;
pub mod lightbox_ui;

pub use lightbox::LightboxActions;
pub use lightbox_ui::render;
