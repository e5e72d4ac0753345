// I allocate development time to testing.
// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]
use test_log::test; // We want to see logs while testing.

use rand::{Rng, rngs::ThreadRng};
use tempfile::TempDir;

use crate::{
    error_types::{filesystem::FilesystemError, store::StoreError},
    layout::{
        constants::{BITMAP_BYTES, BLOCK_SIZE},
        data::data_struct::DataBlock,
        pointer_struct::BlockPointer,
    },
    store::store_struct::BlockStore,
};

use super::bitmap_methods::BlockAllocation;

// Small enough to fill up in a test.
const TEST_LIMIT: u64 = 100;

#[test]
/// Allocate a single block from an empty table, make sure the allocated block is in the right spot.
fn allocate_and_free_one_block() {
    let mut table = TestTable::new();

    let open_block = table.find_free_blocks(1).unwrap();
    assert_eq!(open_block, vec![1]); // block 0 is never handed out

    assert_eq!(table.allocate_blocks(&open_block).unwrap(), 1);
    assert_eq!(table.block_usage_map[0], 0b0000_0001); // Low bit is the first block.

    assert_eq!(table.free_blocks(&[1]).unwrap(), 1);
    assert_eq!(table.block_usage_map[0], 0);
}

#[test]
/// Ask for more than there is.
fn oversized_allocation() {
    let table = TestTable::new();
    let free = table.find_free_blocks(5000).unwrap_err();
    // Blocks 1 through 99.
    assert_eq!(free, TEST_LIMIT - 1);
}

#[test]
fn lowest_free_block_wins() {
    let mut table = TestTable::new();
    let first_ten = table.find_free_blocks(10).unwrap();
    assert_eq!(first_ten, (1..=10).collect::<Vec<u64>>());
    let _ = table.allocate_blocks(&first_ten).unwrap();
    let _ = table.free_blocks(&[4, 7]).unwrap();
    assert_eq!(table.find_free_blocks(1).unwrap(), vec![4]);
}

#[test]
fn double_allocation_is_corruption() {
    let mut table = TestTable::new();
    let _ = table.allocate_blocks(&[5]).unwrap();
    assert_eq!(table.allocate_blocks(&[5]), Err(FilesystemError::StorageCorruption));
    assert_eq!(table.free_blocks(&[6]), Err(FilesystemError::StorageCorruption));
    // Out of range.
    assert_eq!(table.allocate_blocks(&[0]), Err(FilesystemError::StorageCorruption));
    assert_eq!(table.allocate_blocks(&[TEST_LIMIT]), Err(FilesystemError::StorageCorruption));
}

/// Fill a table with free gaps in it
#[test]
fn saturate_table() {
    for _ in 0..1000 {
        let mut random: ThreadRng = rand::rng();
        let mut table = TestTable::new();
        // Scatter some used blocks around.
        for block in 1..TEST_LIMIT {
            if random.random_bool(0.5) {
                let _ = table.allocate_blocks(&[block]).unwrap();
            }
        }
        let free_before = table.free_block_count();

        let free = table.find_free_blocks(5000).unwrap_err();
        assert_eq!(free, free_before);

        let blocks_to_allocate = table.find_free_blocks(free).unwrap();
        assert_eq!(table.allocate_blocks(&blocks_to_allocate).unwrap(), free);

        // Is it actually full tho?
        assert_eq!(table.free_block_count(), 0);
        assert_eq!(table.find_free_blocks(1), Err(0));
    }
}

/// Allocate random blocks and make sure they got marked
#[test]
fn marking() {
    for _ in 0..1000 {
        let mut random: ThreadRng = rand::rng();
        let mut table = TestTable::new();
        let random_block: u64 = random.random_range(1..TEST_LIMIT);
        let _ = table.allocate_blocks(&[random_block]).unwrap();
        assert!(table.is_block_allocated(random_block));
        assert_eq!(table.free_block_count(), TEST_LIMIT - 2);
    }
}

//
// Against a real store
//

fn test_store(blocks: u64) -> (TempDir, BlockStore) {
    let dir = TempDir::new().unwrap();
    let store = BlockStore::create(&dir.path().join("test.disk"), blocks * BLOCK_SIZE as u64).unwrap();
    (dir, store)
}

// Link up a chain by hand.
fn write_chain(store: &mut BlockStore, blocks: &[u64]) {
    for (position, block) in blocks.iter().enumerate() {
        let mut data = DataBlock::new(*block);
        if let Some(next) = blocks.get(position + 1) {
            data.next_block = BlockPointer::from_index(*next);
        }
        store.write_block(&data.to_block()).unwrap();
    }
}

#[test]
fn store_allocations_are_unique_and_in_range() {
    let (_dir, mut store) = test_store(64);
    let bitmap_start = store.bitmap_start();
    let mut handed_out: Vec<u64> = Vec::new();
    loop {
        match store.allocate_block() {
            Ok(block) => handed_out.push(block),
            Err(error) => {
                assert_eq!(error, FilesystemError::OutOfSpace);
                break;
            }
        }
    }
    // Everything between the root and the bitmap, once each, in order.
    assert_eq!(handed_out, (1..bitmap_start).collect::<Vec<u64>>());
    assert_eq!(store.free_block_count().unwrap(), 0);
}

#[test]
fn store_bitmap_lives_at_the_tail() {
    let (_dir, mut store) = test_store(64);
    assert_eq!(store.allocate_block().unwrap(), 1);
    assert_eq!(store.allocate_block().unwrap(), 2);
    let bitmap = store.read_block(store.bitmap_start()).unwrap();
    assert_eq!(bitmap.data[0], 0b0000_0011);
    // The rest of the store is untouched.
    assert!(store.read_block(0).unwrap().data.iter().all(|byte| *byte == 0));
}

#[test]
fn freed_blocks_come_back_lowest_first() {
    let (_dir, mut store) = test_store(64);
    for _ in 0..5 {
        let _ = store.allocate_block().unwrap();
    }
    write_chain(&mut store, &[4, 2]);
    store.release_chain(BlockPointer::from_index(4)).unwrap();
    assert_eq!(store.allocate_block().unwrap(), 2);
    assert_eq!(store.allocate_block().unwrap(), 4);
    assert_eq!(store.allocate_block().unwrap(), 6);
}

#[test]
fn releasing_a_chain_frees_all_of_it() {
    let (_dir, mut store) = test_store(64);
    let blocks: Vec<u64> = (0..10).map(|_| store.allocate_block().unwrap()).collect();
    let free_before = store.free_block_count().unwrap();
    write_chain(&mut store, &blocks);

    store.release_chain(BlockPointer::from_index(blocks[0])).unwrap();
    assert_eq!(store.free_block_count().unwrap(), free_before + 10);
    for block in blocks {
        assert!(!store.is_block_allocated(block).unwrap());
    }
}

#[test]
fn releasing_nothing_is_fine() {
    let (_dir, mut store) = test_store(64);
    let free_before = store.free_block_count().unwrap();
    store.release_chain(BlockPointer::END).unwrap();
    store.release_chain(BlockPointer::from_bytes([0u8; 8])).unwrap();
    assert_eq!(store.free_block_count().unwrap(), free_before);
}

#[test]
fn looping_chain_is_corruption() {
    let (_dir, mut store) = test_store(64);
    for _ in 0..3 {
        let _ = store.allocate_block().unwrap();
    }
    write_chain(&mut store, &[1, 2, 3]);
    let mut last = DataBlock::new(3);
    last.next_block = BlockPointer::from_index(1);
    store.write_block(&last.to_block()).unwrap();
    assert_eq!(
        store.release_chain(BlockPointer::from_index(1)),
        Err(FilesystemError::StorageCorruption)
    );
    // Bitmap left alone.
    assert!(store.is_block_allocated(1).unwrap());
    assert!(store.is_block_allocated(3).unwrap());
}

#[test]
fn chain_into_the_bitmap_is_corruption() {
    let (_dir, mut store) = test_store(64);
    let _ = store.allocate_block().unwrap();
    let mut data = DataBlock::new(1);
    data.next_block = BlockPointer::from_index(store.bitmap_start());
    store.write_block(&data.to_block()).unwrap();
    assert_eq!(
        store.release_chain(BlockPointer::from_index(1)),
        Err(FilesystemError::StorageCorruption)
    );
}

// We need a struct that implements the allocation methods for testing

struct TestTable {
    pub block_usage_map: [u8; BITMAP_BYTES],
}

impl TestTable {
    fn new() -> Self {
        Self {
            block_usage_map: [0u8; BITMAP_BYTES],
        }
    }
}

impl BlockAllocation for TestTable {
    fn get_allocation_table(&self) -> &[u8] {
        &self.block_usage_map
    }

    fn set_allocation_table(&mut self, new_table: &[u8]) -> Result<(), StoreError> {
        self.block_usage_map = new_table.try_into().map_err(|_| StoreError::Invalid)?;
        // We dont need to flush, since this table is all in memory for testing
        Ok(())
    }

    fn allocatable_limit(&self) -> u64 {
        TEST_LIMIT
    }
}
