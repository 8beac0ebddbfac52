//! rosetint - Personal Markdown blog
//!
//! Posts, categories and inline images kept in a single local JSON record,
//! with Markdown rendering and cleanup of images no post references.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::RosetintError;
