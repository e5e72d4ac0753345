// Directory? Is that some kind of surgery?

use crate::{
    layout::{
        constants::{
            COUNT_FIELD, EXTENSION_FIELD, FILE_SLOT_SIZE, MAX_FILES_IN_DIR, NAME_FIELD, POINTER_FIELD, SIZE_FIELD,
        },
        fixed_name::{decode_name, encode_name},
        pointer_struct::BlockPointer,
        slot::{Slot, first_empty, occupied},
    },
    store::block_structs::RawBlock,
};

use super::directory_struct::{DirectoryBlock, FileEntry};

// Offsets within one file slot.
const EXTENSION_AT: usize = NAME_FIELD;
const SIZE_AT: usize = EXTENSION_AT + EXTENSION_FIELD;
const POINTER_AT: usize = SIZE_AT + SIZE_FIELD;

impl DirectoryBlock {
    /// A file table with no files, headed for `origin`.
    pub(crate) fn new(origin: u64) -> Self {
        Self {
            file_count: 0,
            slots: vec![Slot::Empty; MAX_FILES_IN_DIR],
            block_origin: origin,
        }
    }

    pub(crate) fn from_block(block: &RawBlock) -> Self {
        directory_from_bytes(block)
    }

    /// This assumes that you are writing this block back to the same
    /// location you got it from.
    pub(crate) fn to_block(&self) -> RawBlock {
        directory_to_bytes(self)
    }

    /// Slot holding this exact file.
    pub(crate) fn find(&self, name: &str, extension: &str) -> Option<usize> {
        occupied(&self.slots)
            .find(|(_, file)| file.name == name && file.extension == extension)
            .map(|(index, _)| index)
    }

    /// Every file, in slot order.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (usize, &FileEntry)> {
        occupied(&self.slots)
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&FileEntry> {
        self.slots.get(slot).and_then(Slot::occupant)
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut FileEntry> {
        self.slots.get_mut(slot).and_then(Slot::occupant_mut)
    }

    /// No room for another file.
    pub(crate) fn is_full(&self) -> bool {
        usize::try_from(self.file_count).unwrap_or(0) >= MAX_FILES_IN_DIR || first_empty(&self.slots).is_none()
    }

    /// Put a file in the lowest free slot.
    ///
    /// Returns the slot, or None if the table is full.
    pub(crate) fn insert(&mut self, file: FileEntry) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let index = first_empty(&self.slots)?;
        self.slots[index] = Slot::Occupied(file);
        self.file_count += 1;
        Some(index)
    }
}

impl FileEntry {
    /// `name.ext`, or just `name` when there is no extension.
    pub(crate) fn display_name(&self) -> String {
        if self.extension.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.extension)
        }
    }
}

fn directory_from_bytes(block: &RawBlock) -> DirectoryBlock {
    let data = &block.data;
    let file_count = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);

    let slots: Vec<Slot<FileEntry>> = (0..MAX_FILES_IN_DIR)
        .map(|index| {
            let start = COUNT_FIELD + index * FILE_SLOT_SIZE;
            let raw = &data[start..start + FILE_SLOT_SIZE];
            if raw[0] == 0 {
                return Slot::Empty;
            }

            let mut size = [0u8; SIZE_FIELD];
            size.copy_from_slice(&raw[SIZE_AT..SIZE_AT + SIZE_FIELD]);
            let mut pointer = [0u8; POINTER_FIELD];
            pointer.copy_from_slice(&raw[POINTER_AT..POINTER_AT + POINTER_FIELD]);

            Slot::Occupied(FileEntry {
                name: decode_name(&raw[..NAME_FIELD]),
                extension: decode_name(&raw[EXTENSION_AT..EXTENSION_AT + EXTENSION_FIELD]),
                size: u64::from_le_bytes(size),
                start_block: BlockPointer::from_bytes(pointer),
            })
        })
        .collect();

    DirectoryBlock {
        file_count,
        slots,
        block_origin: block.block_index,
    }
}

fn directory_to_bytes(directory: &DirectoryBlock) -> RawBlock {
    let mut block = RawBlock::new(directory.block_origin);
    let data = &mut block.data;

    data[..COUNT_FIELD].copy_from_slice(&directory.file_count.to_le_bytes());

    for (index, file) in occupied(&directory.slots) {
        let start = COUNT_FIELD + index * FILE_SLOT_SIZE;
        let slot = &mut data[start..start + FILE_SLOT_SIZE];

        let name: [u8; NAME_FIELD] = encode_name(&file.name);
        let extension: [u8; EXTENSION_FIELD] = encode_name(&file.extension);
        slot[..NAME_FIELD].copy_from_slice(&name);
        slot[EXTENSION_AT..EXTENSION_AT + EXTENSION_FIELD].copy_from_slice(&extension);
        slot[SIZE_AT..SIZE_AT + SIZE_FIELD].copy_from_slice(&file.size.to_le_bytes());
        slot[POINTER_AT..POINTER_AT + POINTER_FIELD].copy_from_slice(&file.start_block.to_bytes());
    }

    block
}
