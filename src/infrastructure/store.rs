//! Key-value blob storage

use crate::error::{RosetintError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A store of string blobs addressed by key.
///
/// Writes overwrite unconditionally; there is no merge and no concurrency
/// check.
pub trait KeyValueStore {
    /// Read the blob under `key`, `None` when nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<root>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        FileStore { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Write `value` to `tmp_path`, then move it over `path`
    fn replace_with(tmp_path: &Path, path: &Path, value: &str) -> Result<()> {
        fs::write(tmp_path, value).map_err(|e| Self::storage_error("write", tmp_path, e))?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(path).map_err(|e| Self::storage_error("replace", path, e))?;
        }

        fs::rename(tmp_path, path).map_err(|e| Self::storage_error("write", path, e))
    }

    fn storage_error(action: &str, path: &Path, err: std::io::Error) -> RosetintError {
        RosetintError::Storage(format!("failed to {} {}: {}", action, path.display(), err))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::storage_error("read", &path, e)),
        }
    }

    /// Best-effort atomic replace: write a temp file next to the target,
    /// then rename it into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so the
    /// destination is removed first.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);

        if !self.root.exists() {
            fs::create_dir_all(&self.root)
                .map_err(|e| Self::storage_error("create", &self.root, e))?;
        }

        let tmp_path = self
            .root
            .join(format!("{}.json.rosetint-tmp-{}", key, std::process::id()));

        let written = Self::replace_with(&tmp_path, &path, value);
        if written.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        written?;
        debug!(path = %path.display(), bytes = value.len(), "wrote record");
        Ok(())
    }
}

/// In-process store, used by tests and embedders that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
