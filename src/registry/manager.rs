//! Store Manager
//!
//! Owns a base directory and the table of stores created inside it.
//! The table has no internal locking; wrap the registry in a `Mutex` to share
//! it between threads.

use super::store::RecordStore;
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::format::IntoFormat;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Registry of named record stores within one base directory
#[derive(Debug)]
pub struct StoreRegistry {
    name: String,
    base_dir: PathBuf,
    stores: HashMap<String, RecordStore>,
}

impl StoreRegistry {
    /// Open a registry, creating `base_dir` if it does not exist yet
    pub fn new(name: &str, base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        create_dir(base_dir)?;

        info!("Opened store registry '{}' at {}", name, base_dir.display());
        Ok(Self {
            name: name.to_string(),
            base_dir: base_dir.to_path_buf(),
            stores: HashMap::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.registry_name, &config.base_dir)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create a store at `{base_dir}/{name}` and register it.
    ///
    /// Replaces any store already registered under `name`; the replaced
    /// store's file is left alone.
    pub fn create(&mut self, name: &str, format: impl IntoFormat) -> Result<RecordStore> {
        let store = RecordStore::new(name, self.base_dir.join(name), format)?;

        if self.stores.insert(name.to_string(), store.clone()).is_some() {
            debug!("Replaced store '{}' in registry '{}'", name, self.name);
        } else {
            debug!("Registered {} store '{}' in registry '{}'", store.format(), name, self.name);
        }

        Ok(store)
    }

    /// Look up a registered store
    pub fn get(&self, name: &str) -> Option<&RecordStore> {
        self.stores.get(name)
    }

    /// Evict a store from the table and hand it back.
    ///
    /// The backing file stays on disk; call [`RecordStore::remove`] on the
    /// returned store to delete it.
    pub fn remove(&mut self, name: &str) -> Option<RecordStore> {
        let store = self.stores.remove(name)?;
        debug!("Evicted store '{}' from registry '{}'", name, self.name);
        Some(store)
    }

    /// Registered store names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stores.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

/// Create `path` and its parents with owner-only permissions
fn create_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    match builder.create(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}
