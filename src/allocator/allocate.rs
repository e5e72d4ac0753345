// Handing out and taking back blocks of the store.

use std::collections::HashSet;

use log::{debug, error};

use crate::{
    error_types::filesystem::FilesystemError,
    layout::{data::data_struct::DataBlock, pointer_struct::BlockPointer},
    store::store_struct::BlockStore,
};

use super::{
    bitmap_methods::{BlockAllocation, allocatable_limit_for},
    bitmap_struct::BitmapAllocator,
};

impl BlockStore {
    /// Reserve the lowest free block.
    ///
    /// The block's contents are left as-is, callers write over all of it.
    pub(crate) fn allocate_block(&mut self) -> Result<u64, FilesystemError> {
        let mut allocator = BitmapAllocator::load(self)?;
        let block = match allocator.find_free_blocks(1) {
            Ok(found) => match found.first() {
                Some(block) => *block,
                None => return Err(FilesystemError::OutOfSpace),
            },
            Err(_) => {
                debug!("No free blocks left.");
                return Err(FilesystemError::OutOfSpace);
            }
        };
        let _ = allocator.allocate_blocks(&[block])?;
        debug!("Allocated block `{block}`.");
        Ok(block)
    }

    /// Give back every block in the chain starting at `start`.
    ///
    /// Does nothing if `start` goes nowhere. The whole chain is walked before
    /// the bitmap is touched, so a broken chain leaves the bitmap alone.
    pub(crate) fn release_chain(&mut self, start: BlockPointer) -> Result<(), FilesystemError> {
        let limit = allocatable_limit_for(self);
        let mut chain: Vec<u64> = Vec::new();
        let mut seen: HashSet<u64> = HashSet::new();

        let mut pointer = start;
        while let Some(block) = pointer.to_index() {
            if block >= limit {
                error!("Chain from {start:?} points at block `{block}`, which is outside the data area.");
                return Err(FilesystemError::StorageCorruption);
            }
            if !seen.insert(block) {
                error!("Chain from {start:?} loops back on block `{block}`.");
                return Err(FilesystemError::StorageCorruption);
            }
            chain.push(block);
            pointer = DataBlock::from_block(&self.read_block(block)?).next_block;
        }

        if chain.is_empty() {
            return Ok(());
        }
        debug!("Releasing a chain of `{}` blocks.", chain.len());
        let mut allocator = BitmapAllocator::load(self)?;
        let _ = allocator.free_blocks(&chain)?;
        Ok(())
    }

    /// How many blocks are still up for grabs.
    pub(crate) fn free_block_count(&mut self) -> Result<u64, FilesystemError> {
        Ok(BitmapAllocator::load(self)?.free_block_count())
    }

    /// Whether the bitmap says this block is taken.
    #[cfg(test)]
    pub(crate) fn is_block_allocated(&mut self, block: u64) -> Result<bool, FilesystemError> {
        Ok(BitmapAllocator::load(self)?.is_block_allocated(block))
    }
}
