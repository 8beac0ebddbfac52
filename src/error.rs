//! Error types for rosetint

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rosetint application
#[derive(Debug, Error)]
pub enum RosetintError {
    #[error("Not a rosetint directory: {0}")]
    NotRosetintDirectory(PathBuf),

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl RosetintError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RosetintError::NotRosetintDirectory(_) => 2,
            RosetintError::PostNotFound(_)
            | RosetintError::CategoryNotFound(_)
            | RosetintError::ImageNotFound(_) => 3,
            RosetintError::UnknownSetting(_) | RosetintError::InvalidValue(_) => 4,
            RosetintError::Storage(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            RosetintError::NotRosetintDirectory(path) => {
                format!(
                    "Not a rosetint directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'rosetint init' to create the blog data\n\
                    • Pass --root <DIR> to point at an existing blog\n\
                    • Set ROSETINT_ROOT environment variable to your blog path",
                    path.display()
                )
            }
            RosetintError::PostNotFound(id) => {
                format!(
                    "Post not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'rosetint post list' to see post ids\n\
                    • Post ids are case-sensitive",
                    id
                )
            }
            RosetintError::CategoryNotFound(id) => {
                format!(
                    "Category not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'rosetint category list' to see category ids\n\
                    • Create it first: rosetint category add <NAME>",
                    id
                )
            }
            RosetintError::ImageNotFound(id) => {
                format!(
                    "Image not found: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'rosetint image list' to see image ids\n\
                    • Import it first: rosetint image add <FILE>",
                    id
                )
            }
            RosetintError::UnknownSetting(key) => {
                format!(
                    "Unknown setting: '{}'\n\n\
                    Valid settings: editorFontSize, previewFontSize and the labels\n\
                    Use 'rosetint settings list' to see every key",
                    key
                )
            }
            RosetintError::Storage(msg) => {
                format!(
                    "Storage error: {}\n\n\
                    Suggestions:\n\
                    • Check that the data directory is writable\n\
                    • Check the free space on the device\n\
                    • Run 'rosetint image cleanup' to drop unreferenced images",
                    msg
                )
            }
            RosetintError::Editor(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that your editor is installed and in PATH\n\
                    • Set EDITOR environment variable (e.g., export EDITOR=nano)\n\
                    • Set 'editor' in config.toml inside the data directory",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using RosetintError
pub type Result<T> = std::result::Result<T, RosetintError>;
