// I might blow a fuse.

// At this level of abstraction, we take the lock, find things, and hand off to
// the layers below. Every operation holds the lock from start to finish.

// Imports

use log::{debug, warn};

use crate::{
    error_types::filesystem::FilesystemError,
    filesystem::{
        chain_io::{read::read_chain, write::write_chain},
        file_attributes::attributes_struct::ItemAttributes,
        filesystem_struct::{FilesystemStatistics, FlatFS},
        item_path::ItemPath,
        resolver::{DirectoryLocation, FileLocation, find_directory, find_file, load_directory, load_root},
    },
    layout::{
        constants::{BLOCK_SIZE, MAX_EXTENSION, MAX_FILENAME},
        data::data_struct::DataBlock,
        directory_entry::directory_struct::{DirectoryBlock, FileEntry},
        fixed_name::check_length,
        pointer_struct::BlockPointer,
        root_directory::root_struct::RootEntry,
    },
    store::store_struct::BlockStore,
};

// Implementations

impl FlatFS {
    /// What kind of item lives at this path, and how big it is.
    pub fn get_attributes(&self, path: &ItemPath) -> Result<ItemAttributes, FilesystemError> {
        debug!("Getting attributes of `{path}`...");
        if path.is_root() {
            return Ok(ItemAttributes::directory());
        }
        let store = self.lock_store();
        let directory = go_resolve_directory(&store, path)?;
        if path.is_directory() {
            return Ok(ItemAttributes::directory());
        }
        let file = go_resolve_file(&store, &directory, path)?;
        Ok(ItemAttributes::file(file.size))
    }

    /// Names of everything in a directory, in slot order.
    ///
    /// The root lists directory names, a directory lists `name.ext` file names.
    pub fn list_directory(&self, path: &ItemPath) -> Result<Vec<String>, FilesystemError> {
        debug!("Listing `{path}`...");
        let store = self.lock_store();
        if path.is_root() {
            let root = load_root(&store)?;
            return Ok(root.entries().map(|(_, entry)| entry.name.clone()).collect());
        }

        let directory = go_resolve_directory(&store, path)?;
        if !path.is_directory() {
            warn!("Tried to list `{path}`, which is not a directory.");
            return Err(FilesystemError::PermissionDenied);
        }
        let table = load_directory(&store, &directory)?;
        let names: Vec<String> = table.entries().map(|(_, file)| file.display_name()).collect();
        debug!("Directory contained `{}` items.", names.len());
        Ok(names)
    }

    /// Make a new, empty directory under the root.
    pub fn make_directory(&self, path: &ItemPath) -> Result<(), FilesystemError> {
        debug!("Creating directory `{path}`...");
        // Directories only live directly under the root.
        if path.nested || !path.filename.is_empty() || !path.extension.is_empty() {
            warn!("Directories can only be made in the root.");
            return Err(FilesystemError::PermissionDenied);
        }
        let name = path.directory.as_str();
        if name.is_empty() {
            return Err(FilesystemError::NameTooLong);
        }
        check_length(name, MAX_FILENAME)?;

        let mut store = self.lock_store();
        let mut root = load_root(&store)?;
        if root.find(name).is_some() {
            debug!("Directory already exists.");
            return Err(FilesystemError::AlreadyExists);
        }
        if root.is_full() {
            warn!("Root is full, cannot make `{name}`.");
            return Err(FilesystemError::LimitExceeded);
        }

        let table_block = store.allocate_block()?;
        store.write_block(&DirectoryBlock::new(table_block).to_block())?;

        let entry = RootEntry {
            name: name.to_string(),
            start_block: BlockPointer::from_index(table_block),
        };
        let Some(slot) = root.insert(entry) else {
            return Err(FilesystemError::LimitExceeded);
        };
        store.write_block(&root.to_block())?;
        debug!("Directory created in root slot `{slot}`, table at block `{table_block}`.");
        Ok(())
    }

    /// Make a new, empty file in an existing directory.
    pub fn make_file(&self, path: &ItemPath) -> Result<(), FilesystemError> {
        debug!("Creating file `{path}`...");
        // Nothing but directories in the root, and nothing deeper than one level.
        if path.filename.is_empty() || path.nested {
            warn!("Files can only be made inside a directory.");
            return Err(FilesystemError::PermissionDenied);
        }
        check_length(&path.filename, MAX_FILENAME)?;
        check_length(&path.extension, MAX_EXTENSION)?;

        let mut store = self.lock_store();
        let Some(directory) = find_directory(&store, &path.directory)? else {
            warn!("Cannot create files in directories that do not exist.");
            return Err(FilesystemError::PermissionDenied);
        };
        let mut table = load_directory(&store, &directory)?;
        if table.find(&path.filename, &path.extension).is_some() {
            debug!("File already exists.");
            return Err(FilesystemError::AlreadyExists);
        }
        if table.is_full() {
            warn!("Directory `{}` is full.", path.directory);
            return Err(FilesystemError::LimitExceeded);
        }

        let start = store.allocate_block()?;
        store.write_block(&DataBlock::new(start).to_block())?;

        let entry = FileEntry {
            name: path.filename.clone(),
            extension: path.extension.clone(),
            size: 0,
            start_block: BlockPointer::from_index(start),
        };
        let Some(slot) = table.insert(entry) else {
            return Err(FilesystemError::LimitExceeded);
        };
        store.write_block(&table.to_block())?;
        debug!("File created in slot `{slot}`, data starts at block `{start}`.");
        Ok(())
    }

    /// Read up to `length` bytes from `offset`. Comes back short at the end of the file.
    pub fn read_file(&self, path: &ItemPath, offset: u64, length: u64) -> Result<Vec<u8>, FilesystemError> {
        debug!("Reading `{length}` bytes at `{offset}` from `{path}`...");
        let store = self.lock_store();
        let directory = go_resolve_directory(&store, path)?;
        let file = go_resolve_file(&store, &directory, path)?;
        read_chain(&store, &file, offset, length)
    }

    /// Write all of `bytes` at `offset`. The file ends wherever the write ends.
    pub fn write_file(&self, path: &ItemPath, offset: u64, bytes: &[u8]) -> Result<u32, FilesystemError> {
        debug!("Writing `{}` bytes at `{offset}` to `{path}`...", bytes.len());
        let mut store = self.lock_store();
        let directory = go_resolve_directory(&store, path)?;
        let mut file = go_resolve_file(&store, &directory, path)?;

        let written = write_chain(&mut store, &mut file, offset, bytes)?;
        if written == 0 {
            return Ok(0);
        }

        go_update_entry(&mut store, &directory, &file, offset + written)?;
        debug!("Write completed.");
        // FUSE hands over at most a few megabytes per write, so this always fits.
        Ok(u32::try_from(written).unwrap_or(u32::MAX))
    }

    /// Files are never deleted. This only pretends.
    pub fn remove_file(&self, path: &ItemPath) -> Result<(), FilesystemError> {
        debug!("Ignoring request to remove file `{path}`.");
        Ok(())
    }

    /// Directories are never deleted either.
    pub fn remove_directory(&self, path: &ItemPath) -> Result<(), FilesystemError> {
        debug!("Ignoring request to remove directory `{path}`.");
        Ok(())
    }

    /// Check that something exists at this path. There are no handles to hand out.
    pub fn open(&self, path: &ItemPath) -> Result<(), FilesystemError> {
        let _ = self.get_attributes(path)?;
        Ok(())
    }

    /// Accepted and ignored, as long as the file is there.
    pub fn truncate(&self, path: &ItemPath, size: u64) -> Result<(), FilesystemError> {
        debug!("Ignoring request to truncate `{path}` to `{size}` bytes.");
        let store = self.lock_store();
        let directory = go_resolve_directory(&store, path)?;
        let _ = go_resolve_file(&store, &directory, path)?;
        Ok(())
    }

    /// Block counts for the whole store.
    pub fn statistics(&self) -> Result<FilesystemStatistics, FilesystemError> {
        let mut store = self.lock_store();
        Ok(FilesystemStatistics {
            total_blocks: store.block_count(),
            free_blocks: store.free_block_count()?,
            block_size: BLOCK_SIZE as u64,
        })
    }
}

// The directory part of a path, which has to exist.
fn go_resolve_directory(store: &BlockStore, path: &ItemPath) -> Result<DirectoryLocation, FilesystemError> {
    if path.directory.is_empty() || path.nested {
        return Err(FilesystemError::NotFound);
    }
    find_directory(store, &path.directory)?.ok_or(FilesystemError::NotFound)
}

// The file part of a path, which has to exist.
fn go_resolve_file(
    store: &BlockStore,
    directory: &DirectoryLocation,
    path: &ItemPath,
) -> Result<FileLocation, FilesystemError> {
    if path.filename.is_empty() {
        return Err(FilesystemError::NotFound);
    }
    find_file(store, directory, &path.filename, &path.extension)?.ok_or(FilesystemError::NotFound)
}

// Record where the file ends, and where it starts in case the write gave it its first block.
fn go_update_entry(
    store: &mut BlockStore,
    directory: &DirectoryLocation,
    file: &FileLocation,
    new_size: u64,
) -> Result<(), FilesystemError> {
    let mut table = load_directory(store, directory)?;
    let Some(entry) = table.get_mut(file.slot) else {
        // We found it a moment ago, and nothing else holds the lock.
        return Err(FilesystemError::StorageCorruption);
    };
    entry.size = new_size;
    entry.start_block = file.start_block;
    debug!("File is now `{new_size}` bytes.");
    store.write_block(&table.to_block())?;
    Ok(())
}
