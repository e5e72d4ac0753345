// Root table (de)serialization and slot bookkeeping.

use log::warn;

use crate::{
    layout::{
        constants::{COUNT_FIELD, MAX_DIRS_IN_ROOT, NAME_FIELD, POINTER_FIELD, ROOT_BLOCK, ROOT_SLOT_SIZE},
        fixed_name::{decode_name, encode_name},
        pointer_struct::BlockPointer,
        slot::{Slot, first_empty, occupied},
    },
    store::block_structs::RawBlock,
};

use super::root_struct::{RootDirectoryBlock, RootEntry};

impl RootDirectoryBlock {
    /// A root table with no directories in it.
    pub(crate) fn new() -> Self {
        Self {
            directory_count: 0,
            slots: vec![Slot::Empty; MAX_DIRS_IN_ROOT],
        }
    }

    pub(crate) fn from_block(block: &RawBlock) -> Self {
        root_from_bytes(block)
    }

    /// The root table only ever goes to block 0.
    pub(crate) fn to_block(&self) -> RawBlock {
        root_to_bytes(self)
    }

    /// Slot holding the directory with this exact name.
    pub(crate) fn find(&self, name: &str) -> Option<usize> {
        occupied(&self.slots)
            .find(|(_, entry)| entry.name == name)
            .map(|(index, _)| index)
    }

    /// All directories, in slot order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (usize, &RootEntry)> {
        occupied(&self.slots)
    }

    /// Get a used slot.
    pub(crate) fn get(&self, slot: usize) -> Option<&RootEntry> {
        self.slots.get(slot).and_then(Slot::occupant)
    }

    /// No room for another directory.
    pub(crate) fn is_full(&self) -> bool {
        usize::try_from(self.directory_count).unwrap_or(0) >= MAX_DIRS_IN_ROOT
            || first_empty(&self.slots).is_none()
    }

    /// Put a directory in the lowest free slot.
    ///
    /// Returns the slot it went into, or None if the table is full.
    pub(crate) fn insert(&mut self, entry: RootEntry) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = first_empty(&self.slots)?;
        self.slots[index] = Slot::Occupied(entry);
        self.directory_count += 1;
        Some(index)
    }
}

fn root_from_bytes(block: &RawBlock) -> RootDirectoryBlock {
    if block.block_index != ROOT_BLOCK {
        warn!("Decoding block `{}` as the root table, that is not where the root lives.", block.block_index);
    }
    let data = &block.data;

    let directory_count = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);

    let slots: Vec<Slot<RootEntry>> = (0..MAX_DIRS_IN_ROOT)
        .map(|index| {
            let start = COUNT_FIELD + index * ROOT_SLOT_SIZE;
            let raw = &data[start..start + ROOT_SLOT_SIZE];

            // A null first byte is an empty slot, whatever the rest says.
            if raw[0] == 0 {
                return Slot::Empty;
            }
            let mut pointer = [0u8; POINTER_FIELD];
            pointer.copy_from_slice(&raw[NAME_FIELD..NAME_FIELD + POINTER_FIELD]);
            Slot::Occupied(RootEntry {
                name: decode_name(&raw[..NAME_FIELD]),
                start_block: BlockPointer::from_bytes(pointer),
            })
        })
        .collect();

    RootDirectoryBlock {
        directory_count,
        slots,
    }
}

fn root_to_bytes(root: &RootDirectoryBlock) -> RawBlock {
    let mut block = RawBlock::new(ROOT_BLOCK);
    let data = &mut block.data;

    data[..COUNT_FIELD].copy_from_slice(&root.directory_count.to_le_bytes());

    for (index, entry) in occupied(&root.slots) {
        let start = COUNT_FIELD + index * ROOT_SLOT_SIZE;
        let name: [u8; NAME_FIELD] = encode_name(&entry.name);
        data[start..start + NAME_FIELD].copy_from_slice(&name);
        data[start + NAME_FIELD..start + ROOT_SLOT_SIZE].copy_from_slice(&entry.start_block.to_bytes());
    }

    // Empty slots and padding stay zeroed.
    block
}
