//! UI Widgets - modular, reusable UI components
//!
//! Each widget is self-contained and communicates via EventBus

pub mod article;
pub mod chrome;
pub mod hero;
pub mod lightbox;
pub mod navbar;
pub mod paint;
