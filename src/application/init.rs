//! Initialize blog use case

use crate::error::{RosetintError, Result};
use crate::infrastructure::{Config, DataStore, FileStore, LoadOrigin};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a blog data directory: write config.toml and load the
/// aggregate, which seeds the initial dataset when nothing is stored yet.
pub fn init(path: &Path) -> Result<LoadOrigin> {
    if Config::exists_in(path) {
        return Err(RosetintError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }

    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let config = Config::default();
    config.save_to_dir(path)?;

    let store = DataStore::with_key(FileStore::new(path.to_path_buf()), &config.storage_key);
    let loaded = store.load()?;
    info!(path = %path.display(), origin = ?loaded.origin, "initialized blog");

    Ok(loaded.origin)
}
