//! Domain layer - Business logic and domain models

pub mod action;
pub mod app_data;
pub mod id;
pub mod image;
pub mod markdown;
pub mod post;
pub mod query;
pub mod reconcile;
pub mod settings;

pub use action::Action;
pub use app_data::AppData;
pub use id::generate_id;
pub use image::StoredImage;
pub use post::{Category, Post};
pub use query::{PostQuery, SortDirection, SortOption};
pub use settings::{AppSettings, CustomLabels, FontTarget};
