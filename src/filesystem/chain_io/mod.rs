// Random access over a linked list of data blocks.

use log::error;

use crate::{
    error_types::filesystem::FilesystemError, layout::data::data_struct::DataBlock, store::store_struct::BlockStore,
};

pub(crate) mod read;
pub(crate) mod write;


/// Follow the chain `hops` blocks forward from `start`.
fn walk_forward(store: &BlockStore, start: u64, hops: u64) -> Result<u64, FilesystemError> {
    let mut current = start;
    for hop in 0..hops {
        let block = DataBlock::from_block(&store.read_block(current)?);
        current = match block.next_block.to_index() {
            Some(next) => next,
            None => {
                error!("Chain from block `{start}` ended after `{hop}` hops, needed `{hops}`.");
                return Err(FilesystemError::StorageCorruption);
            }
        };
    }
    Ok(current)
}
