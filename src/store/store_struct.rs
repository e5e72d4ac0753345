// The backing store.

use std::fs::File;

/// The one flat file that holds the whole filesystem.
///
/// Only the filesystem owns one of these, and it hides it behind a lock.
/// Everything else gets at blocks through `read_block` and `write_block`.
#[derive(Debug)]
pub struct BlockStore {
    pub(super) file: File,
    /// How many whole blocks the file holds. Fixed at open time.
    pub(super) block_count: u64,
}
