//! Page chrome
//!
//! The small fixed overlays that ride on top of the scroll: the read
//! progress bar under the navbar, the back-to-top button and transient
//! notices.

mod chrome;
pub mod chrome_ui;

pub use chrome::{ChromeActions, Notice};
pub use chrome_ui::render;
