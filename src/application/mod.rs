//! Application layer - Use cases and orchestration

pub mod categories;
pub mod images;
pub mod init;
pub mod manage_settings;
pub mod posts;
pub mod render;
pub mod session;

pub use categories::{CategoryService, CategorySummary};
pub use images::{CleanupReport, ImageEntry, ImageService};
pub use manage_settings::SettingsService;
pub use posts::{PostService, PostUpdate};
pub use session::Session;
