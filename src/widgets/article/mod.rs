//! Journal body
//!
//! Section headers and photo card grids with embedded slideshows,
//! scroll-reveal entrances and click-to-view

mod article;
pub mod article_ui;

pub use article::ArticleActions;
pub use article_ui::render;
