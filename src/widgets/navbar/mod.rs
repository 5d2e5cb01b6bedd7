//! Fixed top navigation bar
//!
//! Brand, section links with active highlighting, and a collapse-to-menu
//! mode for narrow windows

mod navbar;
pub mod navbar_ui;

pub use navbar::{NavbarActions, COLLAPSE_BELOW, NAVBAR_HEIGHT};
pub use navbar_ui::render;
