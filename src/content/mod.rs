//! Journal documents and the images they reference.

pub mod journal;
pub mod store;

pub use journal::{Card, ImageRef, Journal, Media, Section};
pub use store::ImageStore;
