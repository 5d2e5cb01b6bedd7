//! Hero banner
//!
//! Full-bleed gradient opening with title, subtitle and a call-to-action
//! that jumps to the first section. Shifts against scroll for parallax.

mod hero;
pub mod hero_ui;

pub use hero::{HeroActions, HERO_MIN_HEIGHT};
pub use hero_ui::render;
