//! Explicit state container for one running session
//!
//! The session holds the current snapshot of the aggregate. Each accepted
//! action produces a new snapshot which is persisted before it replaces the
//! old one, so a failed write leaves the session on the last saved state.

use crate::domain::{Action, AppData};
use crate::error::Result;
use crate::infrastructure::{Config, DataStore, FileStore, KeyValueStore, LoadOrigin};
use std::path::Path;
use tracing::debug;

pub struct Session<S> {
    store: DataStore<S>,
    data: AppData,
    origin: LoadOrigin,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the aggregate once and start a session on it
    pub fn open(store: DataStore<S>) -> Result<Self> {
        let loaded = store.load()?;
        Ok(Session {
            store,
            data: loaded.data,
            origin: loaded.origin,
        })
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn origin(&self) -> &LoadOrigin {
        &self.origin
    }

    /// Apply one action and persist the result
    pub fn dispatch(&mut self, action: Action) -> Result<&AppData> {
        self.dispatch_all(vec![action])
    }

    /// Apply several actions, persisting once at the end
    pub fn dispatch_all(&mut self, actions: Vec<Action>) -> Result<&AppData> {
        let count = actions.len();
        let next = actions
            .into_iter()
            .fold(self.data.clone(), |state, action| state.apply(action));

        self.store.save(&next)?;
        debug!(actions = count, "committed snapshot");
        self.data = next;
        Ok(&self.data)
    }
}

impl Session<FileStore> {
    /// Open the blog stored in an initialized data directory
    pub fn open_dir(dir: &Path) -> Result<Self> {
        let config = Config::load_from_dir(dir)?;
        let store = DataStore::with_key(FileStore::new(dir.to_path_buf()), &config.storage_key);
        Self::open(store)
    }
}
