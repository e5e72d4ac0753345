// This is where the fun begins

use std::{path::PathBuf, sync::Mutex};

use crate::store::store_struct::BlockStore;

/// The filesystem.
///
/// Owns the backing store outright. Every operation takes the lock for as long
/// as it runs, so operations never interleave.
pub struct FlatFS {
    pub(super) store: Mutex<BlockStore>,
}

/// Options available at time of filesystem load
#[derive(Debug, Clone)]
pub struct FilesystemOptions {
    /// The backing file.
    pub(super) disk_path: PathBuf,
    /// Format a new backing file of this many bytes if there isn't one yet.
    /// `None` means the backing file must already exist.
    pub(super) create_size: Option<u64>,
}

/// Rough numbers about the filesystem, for `statfs` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilesystemStatistics {
    /// Every block in the store, root and bitmap included.
    pub total_blocks: u64,
    /// Blocks that could still be handed out.
    pub free_blocks: u64,
    pub block_size: u64,
}
