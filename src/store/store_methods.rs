// Reading and writing blocks.

// Imports

use std::{
    fs::{File, OpenOptions},
    os::unix::fs::FileExt,
    path::Path,
};

use log::{debug, info, trace};

use crate::{
    error_types::store::StoreError,
    layout::{
        constants::{BITMAP_BITS, BITMAP_BLOCKS, BLOCK_SIZE, MIN_STORE_BLOCKS},
        root_directory::root_struct::RootDirectoryBlock,
    },
};

use super::{block_structs::RawBlock, store_struct::BlockStore};

// Largest store worth making. Past this point the bitmap cannot describe the blocks.
// Root, every block the bitmap covers, then the bitmap itself.
const MAX_STORE_BLOCKS: u64 = 1 + BITMAP_BITS + BITMAP_BLOCKS;

// Implementations

impl BlockStore {
    /// Open an existing backing store.
    ///
    /// The file must be a whole number of blocks, and big enough to hold the
    /// root table, the bitmap, and at least one block to put things in.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        debug!("Opening backing store at `{}`...", path.display());
        let file: File = OpenOptions::new().read(true).write(true).open(path)?;
        let length: u64 = file.metadata()?.len();
        go_check_length(length)?;
        let block_count = length / BLOCK_SIZE as u64;
        debug!("Backing store holds `{block_count}` blocks.");
        Ok(BlockStore { file, block_count })
    }

    /// Make a brand new, empty filesystem.
    ///
    /// An all zero store is already a valid empty filesystem: the root table has
    /// no directories and the bitmap has nothing allocated. So all we do is size
    /// the file and lay down an empty root. Any existing file at this path is wiped.
    ///
    /// The size is rounded down to whole blocks, and clamped to what the bitmap
    /// can address.
    pub fn create(path: &Path, size_in_bytes: u64) -> Result<Self, StoreError> {
        info!("Creating a new backing store at `{}`...", path.display());
        let requested_blocks = size_in_bytes / BLOCK_SIZE as u64;
        if requested_blocks < MIN_STORE_BLOCKS {
            return Err(StoreError::BadSize);
        }
        let block_count = requested_blocks.min(MAX_STORE_BLOCKS);
        if block_count != requested_blocks {
            info!("Clamped store size to `{block_count}` blocks, the bitmap cannot address more.");
        }

        let file: File = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(block_count * BLOCK_SIZE as u64)?;

        let mut store = BlockStore { file, block_count };
        // Already zero, but spell the empty root out anyways.
        store.write_block(&RootDirectoryBlock::new().to_block())?;
        store.file.sync_all()?;
        info!("Done, `{block_count}` blocks.");
        Ok(store)
    }

    /// Read a single block.
    pub fn read_block(&self, block_index: u64) -> Result<RawBlock, StoreError> {
        trace!("Reading block `{block_index}`...");
        self.check_bounds(block_index)?;

        let mut block = RawBlock::new(block_index);
        self.file
            .read_exact_at(&mut block.data, block_index * BLOCK_SIZE as u64)?;
        Ok(block)
    }

    /// Write a block back to wherever its index says it goes.
    pub fn write_block(&mut self, block: &RawBlock) -> Result<(), StoreError> {
        trace!("Writing block `{}`...", block.block_index);
        self.check_bounds(block.block_index)?;

        self.file
            .write_all_at(&block.data, block.block_index * BLOCK_SIZE as u64)?;
        Ok(())
    }

    /// Total number of blocks, bitmap and root included.
    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    /// First block of the free space bitmap. Everything from here on is the bitmap.
    pub fn bitmap_start(&self) -> u64 {
        self.block_count - BITMAP_BLOCKS
    }

    fn check_bounds(&self, block_index: u64) -> Result<(), StoreError> {
        if block_index >= self.block_count {
            // This block is impossible to access.
            return Err(StoreError::InvalidOffset);
        }
        Ok(())
    }
}

fn go_check_length(length: u64) -> Result<(), StoreError> {
    if length % BLOCK_SIZE as u64 != 0 {
        debug!("Backing store is `{length}` bytes, which is not a whole number of blocks.");
        return Err(StoreError::BadSize);
    }
    if length / (BLOCK_SIZE as u64) < MIN_STORE_BLOCKS {
        debug!("Backing store is `{length}` bytes, which is too small.");
        return Err(StoreError::BadSize);
    }
    Ok(())
}
