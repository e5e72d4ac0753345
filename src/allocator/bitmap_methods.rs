// Find, reserve, or even free blocks!

// Unlike the table operations, we do not trust the bitmap. Double allocations and
// double frees mean the disk is not in the state we think it is, so they come back
// as corruption instead of being quietly ignored.

use log::{debug, error, trace};

use crate::{
    error_types::{filesystem::FilesystemError, store::StoreError},
    layout::constants::{BITMAP_BITS, BITMAP_BLOCKS, BITMAP_BYTES, BLOCK_SIZE},
    store::{block_structs::RawBlock, store_struct::BlockStore},
};

use super::bitmap_struct::BitmapAllocator;

// To be able to allocate blocks, we need a couple things
pub(crate) trait BlockAllocation {
    /// Get the block allocation table
    fn get_allocation_table(&self) -> &[u8];

    /// Update and flush the allocation table to disk.
    fn set_allocation_table(&mut self, new_table: &[u8]) -> Result<(), StoreError>;

    /// One past the highest block number that may be handed out.
    /// Block 0 is never in the table, so the lowest is always 1.
    fn allocatable_limit(&self) -> u64;

    /// Attempts to find free blocks, lowest first.
    /// Returns the found blocks, or the number of blocks free if there is not enough space.
    fn find_free_blocks(&self, blocks: u64) -> Result<Vec<u64>, u64> {
        go_find_free_blocks(self, blocks)
    }

    /// Marks the blocks as in use.
    fn allocate_blocks(&mut self, blocks: &[u64]) -> Result<u64, FilesystemError> {
        go_allocate_or_free_blocks(self, blocks, true)
    }

    /// Marks the blocks as free.
    fn free_blocks(&mut self, blocks: &[u64]) -> Result<u64, FilesystemError> {
        go_allocate_or_free_blocks(self, blocks, false)
    }

    /// Check if a specific block is allocated
    fn is_block_allocated(&self, block_number: u64) -> bool {
        go_check_block_allocated(self, block_number)
    }

    /// Blocks that could still be handed out.
    fn free_block_count(&self) -> u64 {
        (1..self.allocatable_limit())
            .filter(|block| !self.is_block_allocated(*block))
            .count() as u64
    }
}

// Bit `i` is block `i + 1`, counted from the low bit of each byte.
#[inline]
fn bit_position(block_number: u64) -> (usize, u8) {
    let bit = block_number - 1;
    // Integer division rounds towards zero, so this is fine.
    let byte = (bit / 8) as usize;
    let mask = 0b0000_0001 << (bit % 8);
    (byte, mask)
}

fn go_find_free_blocks<T: BlockAllocation + ?Sized>(caller: &T, blocks_requested: u64) -> Result<Vec<u64>, u64> {
    let mut free: Vec<u64> = Vec::new();
    if blocks_requested == 0 {
        return Ok(free);
    }

    let limit = caller.allocatable_limit();
    for (byte_index, byte) in caller.get_allocation_table().iter().enumerate() {
        // Whole byte in use, nothing to see here.
        if *byte == 0xFF {
            continue;
        }
        for sub_bit in 0..8 {
            let block = byte_index as u64 * 8 + sub_bit + 1;
            if block >= limit {
                // Rest of the table covers blocks that don't exist, or the bitmap itself.
                return Err(free.len() as u64);
            }
            if byte & (0b0000_0001 << sub_bit) == 0 {
                free.push(block);
                if free.len() as u64 == blocks_requested {
                    return Ok(free);
                }
            }
        }
    }
    // We've ran out of bytes. We must not have enough free room.
    Err(free.len() as u64)
}

/// allocate false frees the provided blocks.
fn go_allocate_or_free_blocks<T: BlockAllocation + ?Sized>(
    caller: &mut T,
    blocks: &[u64],
    allocate: bool,
) -> Result<u64, FilesystemError> {
    debug!(
        "Attempting to {} {} blocks...",
        if allocate { "allocate" } else { "free" },
        blocks.len()
    );

    let limit = caller.allocatable_limit();
    let mut new_table: Vec<u8> = caller.get_allocation_table().to_vec();

    trace!("Updating blocks...");
    for block in blocks {
        if *block == 0 || *block >= limit {
            error!("Block `{block}` is not allocatable, refusing to touch the bitmap.");
            return Err(FilesystemError::StorageCorruption);
        }
        let (byte, mask) = bit_position(*block);
        let is_set = new_table[byte] & mask != 0;
        match (allocate, is_set) {
            (true, false) => new_table[byte] |= mask,
            (false, true) => new_table[byte] &= !mask,
            (true, true) => {
                error!("Block `{block}` is already allocated!");
                return Err(FilesystemError::StorageCorruption);
            }
            (false, false) => {
                error!("Block `{block}` is already free!");
                return Err(FilesystemError::StorageCorruption);
            }
        }
    }
    trace!("Done updating blocks.");

    trace!("Writing back new allocation table...");
    caller.set_allocation_table(&new_table)?;
    debug!("Done.");
    Ok(blocks.len() as u64)
}

#[inline]
fn go_check_block_allocated<T: BlockAllocation + ?Sized>(caller: &T, block_number: u64) -> bool {
    if block_number == 0 {
        // The root is always in use, even though the bitmap never mentions it.
        return true;
    }
    let (byte, mask) = bit_position(block_number);
    match caller.get_allocation_table().get(byte) {
        Some(bits) => bits & mask != 0,
        // Past the end of the bitmap, nobody can hand this out.
        None => true,
    }
}

//
// The real thing
//

impl<'a> BitmapAllocator<'a> {
    /// Read the bitmap off the tail of the store.
    pub(crate) fn load(store: &'a mut BlockStore) -> Result<Self, StoreError> {
        let start = store.bitmap_start();
        let mut table: Vec<u8> = Vec::with_capacity(BITMAP_BYTES);
        for index in start..start + BITMAP_BLOCKS {
            table.extend_from_slice(&store.read_block(index)?.data);
        }
        let limit = allocatable_limit_for(store);
        Ok(Self { store, table, limit })
    }
}

impl BlockAllocation for BitmapAllocator<'_> {
    fn get_allocation_table(&self) -> &[u8] {
        &self.table
    }

    fn set_allocation_table(&mut self, new_table: &[u8]) -> Result<(), StoreError> {
        if new_table.len() != BITMAP_BYTES {
            return Err(StoreError::Invalid);
        }
        self.table.copy_from_slice(new_table);
        let start = self.store.bitmap_start();
        for (offset, chunk) in self.table.chunks(BLOCK_SIZE).enumerate() {
            let mut block = RawBlock::new(start + offset as u64);
            block.data.copy_from_slice(chunk);
            self.store.write_block(&block)?;
        }
        Ok(())
    }

    fn allocatable_limit(&self) -> u64 {
        self.limit
    }
}

/// Blocks between the root and the bitmap, as far as the bitmap can count.
pub(crate) fn allocatable_limit_for(store: &BlockStore) -> u64 {
    store.bitmap_start().min(BITMAP_BITS + 1)
}
