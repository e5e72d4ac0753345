// Sizes of everything on disk.

/// Size of every block in the backing store.
pub const BLOCK_SIZE: usize = 512;

/// 8.3 filenames.
pub const MAX_FILENAME: usize = 8;
pub const MAX_EXTENSION: usize = 3;

// Name fields carry a terminator byte.
pub(crate) const NAME_FIELD: usize = MAX_FILENAME + 1;
pub(crate) const EXTENSION_FIELD: usize = MAX_EXTENSION + 1;

// The count at the front of both table types.
pub(crate) const COUNT_FIELD: usize = 4;
// Block pointers and file sizes.
pub(crate) const POINTER_FIELD: usize = 8;
pub(crate) const SIZE_FIELD: usize = 8;

pub(crate) const ROOT_SLOT_SIZE: usize = NAME_FIELD + POINTER_FIELD;
pub(crate) const FILE_SLOT_SIZE: usize = NAME_FIELD + EXTENSION_FIELD + SIZE_FIELD + POINTER_FIELD;

/// How many directories fit in the root table.
pub const MAX_DIRS_IN_ROOT: usize = (BLOCK_SIZE - COUNT_FIELD) / ROOT_SLOT_SIZE;

/// How many files fit in one directory table.
pub const MAX_FILES_IN_DIR: usize = (BLOCK_SIZE - COUNT_FIELD) / FILE_SLOT_SIZE;

/// Usable payload of a data block, after the next block pointer.
pub const DATA_BYTES_PER_BLOCK: usize = BLOCK_SIZE - POINTER_FIELD;

/// The root directory table always lives here.
pub const ROOT_BLOCK: u64 = 0;

/// The free space bitmap takes up this many blocks at the end of the store.
pub const BITMAP_BLOCKS: u64 = 3;
pub(crate) const BITMAP_BYTES: usize = BITMAP_BLOCKS as usize * BLOCK_SIZE;
/// Number of blocks the bitmap can describe. Bit `i` is block `i + 1`.
pub const BITMAP_BITS: u64 = BITMAP_BYTES as u64 * 8;

/// Root, at least one usable block, and the bitmap.
pub const MIN_STORE_BLOCKS: u64 = 2 + BITMAP_BLOCKS;

/// Size of a freshly formatted store when nobody asks for anything else.
pub const DEFAULT_STORE_SIZE: u64 = 5 * 1024 * 1024;

// Table layouts must land on one block exactly, padding included.
const _: () = assert!(COUNT_FIELD + MAX_DIRS_IN_ROOT * ROOT_SLOT_SIZE <= BLOCK_SIZE);
const _: () = assert!(COUNT_FIELD + MAX_FILES_IN_DIR * FILE_SLOT_SIZE <= BLOCK_SIZE);
const _: () = assert!(MAX_DIRS_IN_ROOT == 29);
const _: () = assert!(MAX_FILES_IN_DIR == 17);
