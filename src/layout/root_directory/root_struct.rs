// The root directory table. Always block 0.

use crate::layout::{pointer_struct::BlockPointer, slot::Slot};

/// One subdirectory, as the root table knows it.
#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct RootEntry {
    pub(crate) name: String,
    /// Where this subdirectory's file table lives.
    pub(crate) start_block: BlockPointer,
}

/// The root of the filesystem.
///
/// On disk:
/// `directory_count: i32`, then `MAX_DIRS_IN_ROOT` packed slots of
/// `name: [u8; 9]` + `start_block: i64`, then padding.
///
/// Not clone, a copy would drift out of sync with the one on disk.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct RootDirectoryBlock {
    pub(crate) directory_count: i32,
    /// Always exactly `MAX_DIRS_IN_ROOT` long. Slots never move.
    pub(crate) slots: Vec<Slot<RootEntry>>,
}
