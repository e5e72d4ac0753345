// Structs that can be deduced from a block

use crate::layout::constants::BLOCK_SIZE;

/// A raw block, straight off of (or about to go onto) the backing store.
/// Higher level types (the tables, data blocks) convert to and from this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    /// Which block in the store this is
    pub block_index: u64,
    /// The block in its entirety.
    pub data: [u8; BLOCK_SIZE],
}

impl RawBlock {
    /// A zeroed block headed for `block_index`.
    pub fn new(block_index: u64) -> Self {
        Self {
            block_index,
            data: [0u8; BLOCK_SIZE],
        }
    }
}
