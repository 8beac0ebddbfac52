//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod data_store;
pub mod editor;
pub mod store;

pub use config::Config;
pub use data_store::{DataStore, LoadOrigin, Loaded};
pub use editor::EditorSession;
pub use store::{FileStore, KeyValueStore, MemoryStore};
