// Directory struct!

use crate::layout::{pointer_struct::BlockPointer, slot::Slot};

/// A file, as its directory knows it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct FileEntry {
    pub(crate) name: String,
    pub(crate) extension: String,
    /// Logical length in bytes. The chain may hold more than this.
    pub(crate) size: u64,
    /// First data block, or nowhere if the file has never been written.
    pub(crate) start_block: BlockPointer,
}

/// The file table of one subdirectory.
///
/// On disk:
/// `file_count: i32`, then `MAX_FILES_IN_DIR` packed slots of
/// `name: [u8; 9]` + `extension: [u8; 4]` + `size: u64` + `start_block: i64`,
/// then padding.
///
/// This type is not clone, since you could end up with a block that is out of sync due to
/// changes made on a copy of it.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DirectoryBlock {
    pub(crate) file_count: i32,
    /// Always exactly `MAX_FILES_IN_DIR` long. Slots never move.
    pub(crate) slots: Vec<Slot<FileEntry>>,
    // Where this block came from, so it can go back there.
    // This doesn't get written to disk.
    pub(crate) block_origin: u64,
}
