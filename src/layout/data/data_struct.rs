// One link in a file's chain.

use crate::layout::{constants::DATA_BYTES_PER_BLOCK, pointer_struct::BlockPointer};

/// On disk: `next_block: i64`, then `DATA_BYTES_PER_BLOCK` bytes of file content.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct DataBlock {
    /// Where the chain goes after this block.
    pub(crate) next_block: BlockPointer,
    pub(crate) data: [u8; DATA_BYTES_PER_BLOCK],
    // Not written to disk.
    pub(crate) block_origin: u64,
}
