use crate::{
    layout::{
        constants::{DATA_BYTES_PER_BLOCK, POINTER_FIELD},
        pointer_struct::BlockPointer,
    },
    store::block_structs::RawBlock,
};

use super::data_struct::DataBlock;

impl DataBlock {
    /// An empty block at the end of a chain.
    pub(crate) fn new(origin: u64) -> Self {
        Self {
            next_block: BlockPointer::END,
            data: [0u8; DATA_BYTES_PER_BLOCK],
            block_origin: origin,
        }
    }

    pub(crate) fn from_block(block: &RawBlock) -> Self {
        let mut pointer = [0u8; POINTER_FIELD];
        pointer.copy_from_slice(&block.data[..POINTER_FIELD]);
        let mut data = [0u8; DATA_BYTES_PER_BLOCK];
        data.copy_from_slice(&block.data[POINTER_FIELD..]);
        Self {
            next_block: BlockPointer::from_bytes(pointer),
            data,
            block_origin: block.block_index,
        }
    }

    pub(crate) fn to_block(&self) -> RawBlock {
        let mut block = RawBlock::new(self.block_origin);
        block.data[..POINTER_FIELD].copy_from_slice(&self.next_block.to_bytes());
        block.data[POINTER_FIELD..].copy_from_slice(&self.data);
        block
    }
}
