use fuse_mt::{FileAttr, FileType};
use log::debug;
use std::time::SystemTime;

use crate::layout::constants::BLOCK_SIZE;

use super::attributes_struct::{ItemAttributes, ItemKind};

impl From<ItemKind> for FileType {
    fn from(value: ItemKind) -> Self {
        match value {
            ItemKind::Directory => FileType::Directory,
            ItemKind::RegularFile => FileType::RegularFile,
        }
    }
}

impl From<ItemAttributes> for FileAttr {
    fn from(value: ItemAttributes) -> Self {
        go_get_metadata(value)
    }
}

fn go_get_metadata(item: ItemAttributes) -> FileAttr {
    debug!("Building attributes for a {:?} of `{}` bytes...", item.kind, item.size);
    // No permissions, owners, or timestamps are stored anywhere. Everything
    // belongs to root, and every item was made at the dawn of time.
    let (perm, nlink) = match item.kind {
        ItemKind::Directory => (0o755, 2),
        ItemKind::RegularFile => (0o666, 1),
    };

    FileAttr {
        // Size of item in bytes.
        size: item.size,
        blocks: item.size.div_ceil(BLOCK_SIZE as u64),
        atime: SystemTime::UNIX_EPOCH,
        mtime: SystemTime::UNIX_EPOCH,
        ctime: SystemTime::UNIX_EPOCH,
        crtime: SystemTime::UNIX_EPOCH,
        kind: item.kind.into(),
        perm,
        nlink,
        // owner id, always root
        uid: 0,
        // owner group, always root
        gid: 0,
        rdev: 0,
        flags: 0,
    }
}
