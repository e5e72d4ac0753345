// What callers get to know about an item.

/// Directories hold files, files hold bytes. That's all there is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Directory,
    RegularFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemAttributes {
    pub kind: ItemKind,
    /// Bytes for files, always zero for directories.
    pub size: u64,
}

impl ItemAttributes {
    pub(crate) fn directory() -> Self {
        Self {
            kind: ItemKind::Directory,
            size: 0,
        }
    }

    pub(crate) fn file(size: u64) -> Self {
        Self {
            kind: ItemKind::RegularFile,
            size,
        }
    }
}
