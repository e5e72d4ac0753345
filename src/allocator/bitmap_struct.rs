// The free space bitmap, pulled into memory for one operation.

use crate::store::store_struct::BlockStore;

/// The whole bitmap plus the store it came from.
///
/// Built fresh every time something needs allocating or freeing, and dropped
/// right after. Nothing about allocation survives between operations except
/// what is on disk.
pub(crate) struct BitmapAllocator<'a> {
    pub(super) store: &'a mut BlockStore,
    /// All three bitmap blocks back to back.
    pub(super) table: Vec<u8>,
    /// One past the highest block we are allowed to hand out.
    pub(super) limit: u64,
}
