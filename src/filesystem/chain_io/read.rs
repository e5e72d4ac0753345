// Reading bytes back out of a chain.

use log::{debug, error, trace};

use crate::{
    error_types::filesystem::FilesystemError,
    filesystem::resolver::FileLocation,
    layout::{constants::DATA_BYTES_PER_BLOCK, data::data_struct::DataBlock},
    store::store_struct::BlockStore,
};

use super::walk_forward;

/// Read up to `length` bytes starting at `offset`.
///
/// Stops at the end of the file, so this can come back short, or even empty.
pub(crate) fn read_chain(
    store: &BlockStore,
    file: &FileLocation,
    offset: u64,
    length: u64,
) -> Result<Vec<u8>, FilesystemError> {
    if offset > file.size {
        debug!("Tried to read at `{offset}`, but the file is only `{}` bytes.", file.size);
        return Err(FilesystemError::OffsetTooLarge);
    }

    let to_read = length.min(file.size - offset);
    if to_read != length {
        debug!("Read was too large, truncated to `{to_read}` bytes.");
    }
    if to_read == 0 {
        return Ok(Vec::new());
    }
    // Bounded by the file size, which has to fit in memory to have been written.
    let to_read = usize::try_from(to_read).map_err(|_| FilesystemError::OffsetTooLarge)?;

    let Some(start) = file.start_block.to_index() else {
        error!("File has `{}` bytes but no data blocks.", file.size);
        return Err(FilesystemError::StorageCorruption);
    };

    let skip = offset / DATA_BYTES_PER_BLOCK as u64;
    let mut current = walk_forward(store, start, skip)?;
    let mut position = (offset % DATA_BYTES_PER_BLOCK as u64) as usize;

    let mut buffer: Vec<u8> = Vec::with_capacity(to_read);
    loop {
        trace!("Reading from block `{current}`...");
        let block = DataBlock::from_block(&store.read_block(current)?);
        let take = (DATA_BYTES_PER_BLOCK - position).min(to_read - buffer.len());
        buffer.extend_from_slice(&block.data[position..position + take]);

        if buffer.len() == to_read {
            break;
        }
        // The size says there is more, so the chain has to keep going.
        current = match block.next_block.to_index() {
            Some(next) => next,
            None => {
                error!("Chain ended after block `{current}`, but the file should be longer.");
                return Err(FilesystemError::StorageCorruption);
            }
        };
        position = 0;
    }

    debug!("Read `{}` bytes.", buffer.len());
    Ok(buffer)
}
