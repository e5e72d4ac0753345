// For stuff like initialization and options.

//
//
// ======
// Imports
// ======
//
//

use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use log::{debug, info};

use crate::{
    error_types::store::StoreError,
    filesystem::filesystem_struct::{FilesystemOptions, FlatFS},
    store::store_struct::BlockStore,
};

//
//
// ======
// Implementations
// ======
//
//

// Filesystem option setup. Does not start filesystem.
impl FilesystemOptions {
    /// Point the filesystem at a backing file.
    ///
    /// If `create_size` is set and the file does not exist yet, a fresh one of
    /// that many bytes is formatted on start.
    pub fn new(disk_path: PathBuf, create_size: Option<u64>) -> Self {
        debug!("Configuring file system options...");
        Self { disk_path, create_size }
    }

    pub fn disk_path(&self) -> &PathBuf {
        &self.disk_path
    }
}

impl FlatFS {
    /// Open the backing file and get ready to serve operations.
    pub fn start(options: &FilesystemOptions) -> Result<Self, StoreError> {
        debug!("Starting file system...");
        let store = match options.create_size {
            Some(size) if !options.disk_path.exists() => {
                info!("No backing file at `{}`, making one.", options.disk_path.display());
                BlockStore::create(&options.disk_path, size)?
            }
            _ => BlockStore::open(&options.disk_path)?,
        };
        debug!("Done starting filesystem.");
        Ok(FlatFS {
            store: Mutex::new(store),
        })
    }

    /// Grab the store for the length of one operation.
    pub(super) fn lock_store(&self) -> MutexGuard<'_, BlockStore> {
        // Nothing in memory can be left half updated, everything lives on disk. So a
        // panic while holding the lock doesn't make the store any less usable.
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
