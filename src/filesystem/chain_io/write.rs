// Putting bytes into a chain.

use log::{debug, error, trace};

use crate::{
    error_types::filesystem::FilesystemError,
    filesystem::resolver::FileLocation,
    layout::{constants::DATA_BYTES_PER_BLOCK, data::data_struct::DataBlock, pointer_struct::BlockPointer},
    store::store_struct::BlockStore,
};

use super::walk_forward;

/// Write `bytes` into the file's chain starting at `offset`.
///
/// Writes may start anywhere up to and including the end of the file. Once a
/// write runs off the end of a block, whatever used to come after that block
/// is thrown away and fresh blocks take its place.
///
/// A file that has never been written may have no chain at all. Then one is
/// started, and `file.start_block` is pointed at it.
///
/// Returns how many bytes were written, which is always all of them. Updating
/// the recorded size and start block is up to the caller.
pub(crate) fn write_chain(
    store: &mut BlockStore,
    file: &mut FileLocation,
    offset: u64,
    bytes: &[u8],
) -> Result<u64, FilesystemError> {
    if offset > file.size {
        debug!("Tried to write at `{offset}`, but the file is only `{}` bytes.", file.size);
        return Err(FilesystemError::OffsetTooLarge);
    }
    if bytes.is_empty() {
        debug!("Caller wanted to write 0 bytes. Skipping write.");
        return Ok(0);
    }

    let start = match file.start_block.to_index() {
        Some(start) => start,
        None if file.size == 0 => {
            let start = start_chain(store)?;
            // Nobody points at this chain yet, so it goes back if the write fails.
            if let Err(error) = go_write(store, start, file, offset, bytes) {
                store.release_chain(BlockPointer::from_index(start))?;
                return Err(error);
            }
            file.start_block = BlockPointer::from_index(start);
            debug!("Wrote `{}` bytes into a new chain at block `{start}`.", bytes.len());
            return Ok(bytes.len() as u64);
        }
        None => {
            error!("File has `{}` bytes but no data blocks.", file.size);
            return Err(FilesystemError::StorageCorruption);
        }
    };

    go_write(store, start, file, offset, bytes)?;
    debug!("Wrote `{}` bytes.", bytes.len());
    Ok(bytes.len() as u64)
}

fn go_write(
    store: &mut BlockStore,
    start: u64,
    file: &FileLocation,
    offset: u64,
    bytes: &[u8],
) -> Result<(), FilesystemError> {
    let skip = offset / DATA_BYTES_PER_BLOCK as u64;
    let mut position = (offset % DATA_BYTES_PER_BLOCK as u64) as usize;

    // Appending right on a block boundary needs one more block than the chain has.
    let mut current = if skip > 0 && offset == file.size && position == 0 {
        let last = walk_forward(store, start, skip - 1)?;
        extend_chain(store, last)?
    } else {
        walk_forward(store, start, skip)?
    };

    let mut written: usize = 0;
    let mut block = DataBlock::from_block(&store.read_block(current)?);
    loop {
        let take = (DATA_BYTES_PER_BLOCK - position).min(bytes.len() - written);
        block.data[position..position + take].copy_from_slice(&bytes[written..written + take]);
        written += take;

        if written == bytes.len() {
            trace!("Writing final block `{current}`...");
            store.write_block(&block.to_block())?;
            break;
        }

        // More to go, so the rest of the old chain is replaced.
        store.release_chain(block.next_block)?;
        let next = match store.allocate_block() {
            Ok(next) => next,
            Err(error) => {
                // Don't leave this block pointing at blocks we just gave back.
                block.next_block = BlockPointer::END;
                store.write_block(&block.to_block())?;
                return Err(error);
            }
        };
        block.next_block = BlockPointer::from_index(next);
        trace!("Writing block `{current}`, moving on to `{next}`...");
        store.write_block(&block.to_block())?;

        current = next;
        block = DataBlock::new(next);
        position = 0;
    }

    Ok(())
}

// First block of a file that had none.
fn start_chain(store: &mut BlockStore) -> Result<u64, FilesystemError> {
    let start = store.allocate_block()?;
    store.write_block(&DataBlock::new(start).to_block())?;
    debug!("Started a new chain at block `{start}`.");
    Ok(start)
}

// Hang a fresh block off the end of the chain.
fn extend_chain(store: &mut BlockStore, last: u64) -> Result<u64, FilesystemError> {
    let mut tail = DataBlock::from_block(&store.read_block(last)?);
    // Anything already past the end is stale, and gets replaced like everywhere else.
    let stale = tail.next_block;
    store.release_chain(stale)?;
    let next = match store.allocate_block() {
        Ok(next) => next,
        Err(error) => {
            if !stale.is_end() {
                tail.next_block = BlockPointer::END;
                store.write_block(&tail.to_block())?;
            }
            return Err(error);
        }
    };
    store.write_block(&DataBlock::new(next).to_block())?;
    tail.next_block = BlockPointer::from_index(next);
    store.write_block(&tail.to_block())?;
    debug!("Extended the chain with block `{next}`.");
    Ok(next)
}
