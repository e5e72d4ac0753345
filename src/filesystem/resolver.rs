// Finding things by name.
// Nothing in here writes to the store.

use log::{debug, error, trace};

use crate::{
    error_types::filesystem::FilesystemError,
    layout::{
        constants::ROOT_BLOCK, directory_entry::directory_struct::DirectoryBlock, pointer_struct::BlockPointer,
        root_directory::root_struct::RootDirectoryBlock,
    },
    store::store_struct::BlockStore,
};

/// A directory that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DirectoryLocation {
    /// Slot in the root table.
    pub(crate) slot: usize,
    /// Where its file table lives.
    pub(crate) table_block: u64,
}

/// A file that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FileLocation {
    /// Slot in its directory's file table.
    pub(crate) slot: usize,
    pub(crate) size: u64,
    pub(crate) start_block: BlockPointer,
}

pub(crate) fn load_root(store: &BlockStore) -> Result<RootDirectoryBlock, FilesystemError> {
    trace!("Loading the root table...");
    Ok(RootDirectoryBlock::from_block(&store.read_block(ROOT_BLOCK)?))
}

pub(crate) fn load_directory(store: &BlockStore, directory: &DirectoryLocation) -> Result<DirectoryBlock, FilesystemError> {
    trace!("Loading the file table at block `{}`...", directory.table_block);
    Ok(DirectoryBlock::from_block(&store.read_block(directory.table_block)?))
}

/// Look up a directory in the root table. Names are case sensitive.
pub(crate) fn find_directory(store: &BlockStore, name: &str) -> Result<Option<DirectoryLocation>, FilesystemError> {
    debug!("Looking for directory `{name}`...");
    let root = load_root(store)?;
    let Some(slot) = root.find(name) else {
        debug!("No such directory.");
        return Ok(None);
    };
    let Some(entry) = root.get(slot) else {
        return Ok(None);
    };

    // An occupied root slot must point at a real table.
    let Some(table_block) = entry.start_block.to_index() else {
        error!("Directory `{name}` in slot `{slot}` has no file table.");
        return Err(FilesystemError::StorageCorruption);
    };
    debug!("Found it in slot `{slot}`.");
    Ok(Some(DirectoryLocation { slot, table_block }))
}

/// Look up a file by name and extension within a directory.
pub(crate) fn find_file(
    store: &BlockStore,
    directory: &DirectoryLocation,
    name: &str,
    extension: &str,
) -> Result<Option<FileLocation>, FilesystemError> {
    debug!("Looking for file `{name}` `{extension}`...");
    let table = load_directory(store, directory)?;
    let found = table.find(name, extension).and_then(|slot| {
        table.get(slot).map(|file| FileLocation {
            slot,
            size: file.size,
            start_block: file.start_block,
        })
    });
    if found.is_none() {
        debug!("No such file.");
    }
    Ok(found)
}
