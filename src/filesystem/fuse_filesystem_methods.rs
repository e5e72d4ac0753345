// The actual FUSE filesystem layer.

//
//
// ======
// Imports
// ======
//
//

use std::{ffi::OsStr, path::Path, time::Duration};

use fuse_mt::{CreatedEntry, DirectoryEntry, FileAttr, FileType, FilesystemMT, Statfs};
use log::{debug, info, warn};

use crate::{
    filesystem::{
        file_attributes::attributes_struct::{ItemAttributes, ItemKind},
        filesystem_struct::FlatFS,
        item_path::ItemPath,
    },
    layout::constants::{MAX_EXTENSION, MAX_FILENAME},
};

use super::error::error_types::*;

//
//
// ======
// Helper functions
// ======
//
//

// Nothing changes behind the kernel's back, apart from other writers on this
// same mount, so attributes can be cached for a little while.
const TTL: Duration = Duration::from_secs(1);

// There are no handles. Everything is looked up by path every time.
const NO_HANDLE: u64 = 0;

fn child_path(parent: &Path, name: &OsStr) -> ItemPath {
    ItemPath::parse(&parent.join(name))
}

//
//
// ======
// The actual fuse layer
// ======
//
// There's a lot of stuff in here we technically dont need. And I'm going to assume the information on this page is correct
// https://www.cs.hmc.edu/~geoff/classes/hmc.cs135.201001/homework/fuse/fuse_doc.html

impl FilesystemMT for FlatFS {
    fn init(&self, _req: fuse_mt::RequestInfo) -> fuse_mt::ResultEmpty {
        info!("Filesystem mounted.");
        Ok(())
    }

    // Every write already went straight to the backing file.
    fn destroy(&self) {
        info!("Goodbye! .o/");
    }

    // Get file attributes of an item.
    fn getattr(&self, _req: fuse_mt::RequestInfo, path: &Path, _fh: Option<u64>) -> fuse_mt::ResultEntry {
        debug!("Getting attributes of `{}`...", path.display());
        let attributes = self.get_attributes(&ItemPath::parse(path))?;
        Ok((TTL, attributes.into()))
    }

    // Truncation is accepted but does nothing.
    fn truncate(&self, _req: fuse_mt::RequestInfo, path: &Path, _fh: Option<u64>, size: u64) -> fuse_mt::ResultEmpty {
        Ok(FlatFS::truncate(self, &ItemPath::parse(path), size)?)
    }

    // Regular files only.
    fn mknod(
        &self,
        _req: fuse_mt::RequestInfo,
        parent: &Path,
        name: &OsStr,
        mode: u32,
        _rdev: u32,
    ) -> fuse_mt::ResultEntry {
        debug!("Creating node `{}` in `{}`...", name.display(), parent.display());
        if mode & libc::S_IFMT != 0 && mode & libc::S_IFMT != libc::S_IFREG {
            warn!("Only regular files can be made.");
            return Err(NOT_PERMITTED);
        }
        self.make_file(&child_path(parent, name))?;
        Ok((TTL, ItemAttributes::file(0).into()))
    }

    // Create a new directory if it does not already exist.
    // Returns file attributes about the new directory
    fn mkdir(
        &self,
        _req: fuse_mt::RequestInfo,
        parent: &Path,
        name: &OsStr,
        _mode: u32, // Permission bit related. Do not need.
    ) -> fuse_mt::ResultEntry {
        debug!("Creating new directory in `{}` named `{}`.", parent.display(), name.display());
        self.make_directory(&child_path(parent, name))?;
        Ok((TTL, ItemAttributes::directory().into()))
    }

    // Deletion is not supported, but nobody gets told that.
    fn unlink(&self, _req: fuse_mt::RequestInfo, parent: &Path, name: &OsStr) -> fuse_mt::ResultEmpty {
        Ok(self.remove_file(&child_path(parent, name))?)
    }

    fn rmdir(&self, _req: fuse_mt::RequestInfo, parent: &Path, name: &OsStr) -> fuse_mt::ResultEmpty {
        Ok(self.remove_directory(&child_path(parent, name))?)
    }

    fn open(&self, _req: fuse_mt::RequestInfo, path: &Path, flags: u32) -> fuse_mt::ResultOpen {
        debug!("Opening `{}`...", path.display());
        let item = ItemPath::parse(path);
        if self.get_attributes(&item)?.kind == ItemKind::Directory {
            // open(2) on a directory is fine for reading, nothing else.
            if flags & libc::O_ACCMODE as u32 != libc::O_RDONLY as u32 {
                return Err(IS_A_DIRECTORY);
            }
        }
        Ok((NO_HANDLE, flags))
    }

    // "Read sizebytes from the given file into the buffer buf, beginning offset bytes into the file."
    // Comes back short at the end of the file.
    fn read(
        &self,
        _req: fuse_mt::RequestInfo,
        path: &Path,
        _fh: u64,
        offset: u64,
        size: u32,
        callback: impl FnOnce(fuse_mt::ResultSlice<'_>) -> fuse_mt::CallbackResult,
    ) -> fuse_mt::CallbackResult {
        debug!("Reading `{}` bytes from file `{}`", size, path.display());
        // Cant use the `?` operator in here due to the callback, annoying!
        match self.read_file(&ItemPath::parse(path), offset, u64::from(size)) {
            Ok(buffer) => callback(Ok(&buffer)),
            Err(error) => callback(Err(error.into())),
        }
    }

    fn write(
        &self,
        _req: fuse_mt::RequestInfo,
        path: &Path,
        _fh: u64,
        offset: u64,
        data: Vec<u8>,
        _flags: u32,
    ) -> fuse_mt::ResultWrite {
        debug!("Writing `{}` bytes to file `{}`...", data.len(), path.display());
        Ok(self.write_file(&ItemPath::parse(path), offset, &data)?)
    }

    // Every write is already on disk.
    fn flush(&self, _req: fuse_mt::RequestInfo, _path: &Path, _fh: u64, _lock_owner: u64) -> fuse_mt::ResultEmpty {
        Ok(())
    }

    fn release(
        &self,
        _req: fuse_mt::RequestInfo,
        _path: &Path,
        _fh: u64,
        _flags: u32,
        _lock_owner: u64,
        _flush: bool,
    ) -> fuse_mt::ResultEmpty {
        Ok(())
    }

    // See flush()
    fn fsync(&self, _req: fuse_mt::RequestInfo, _path: &Path, _fh: u64, _datasync: bool) -> fuse_mt::ResultEmpty {
        Ok(())
    }

    fn opendir(&self, _req: fuse_mt::RequestInfo, path: &Path, flags: u32) -> fuse_mt::ResultOpen {
        debug!("Opening directory `{}`...", path.display());
        if self.get_attributes(&ItemPath::parse(path))?.kind != ItemKind::Directory {
            return Err(NOT_A_DIRECTORY);
        }
        Ok((NO_HANDLE, flags))
    }

    // List the contents of a directory.
    fn readdir(&self, _req: fuse_mt::RequestInfo, path: &Path, _fh: u64) -> fuse_mt::ResultReaddir {
        debug!("Getting contents of directory `{}`...", path.display());
        let item = ItemPath::parse(path);
        let names = self.list_directory(&item)?;

        // Whatever is in the root is a directory, whatever is in a directory is a file.
        let kind = if item.is_root() {
            FileType::Directory
        } else {
            FileType::RegularFile
        };

        let mut listed_items: Vec<DirectoryEntry> = vec![
            DirectoryEntry {
                name: ".".into(),
                kind: FileType::Directory,
            },
            DirectoryEntry {
                name: "..".into(),
                kind: FileType::Directory,
            },
        ];
        listed_items.extend(names.into_iter().map(|name| DirectoryEntry {
            name: name.into(),
            kind,
        }));

        debug!("Done. Directory contained `{}` items.", listed_items.len());
        Ok(listed_items)
    }

    fn releasedir(&self, _req: fuse_mt::RequestInfo, _path: &Path, _fh: u64, _flags: u32) -> fuse_mt::ResultEmpty {
        Ok(())
    }

    // See flush()
    fn fsyncdir(&self, _req: fuse_mt::RequestInfo, _path: &Path, _fh: u64, _datasync: bool) -> fuse_mt::ResultEmpty {
        Ok(())
    }

    fn statfs(&self, _req: fuse_mt::RequestInfo, _path: &Path) -> fuse_mt::ResultStatfs {
        let statistics = self.statistics()?;
        Ok(Statfs {
            blocks: statistics.total_blocks,
            bfree: statistics.free_blocks,
            bavail: statistics.free_blocks,
            // Items don't take blocks of their own beyond tables and data.
            files: 0,
            ffree: 0,
            bsize: statistics.block_size as u32,
            // name.ext
            namelen: (MAX_FILENAME + 1 + MAX_EXTENSION) as u32,
            frsize: statistics.block_size as u32,
        })
    }

    // Creates and opens a new file.
    fn create(
        &self,
        _req: fuse_mt::RequestInfo,
        parent: &Path,
        name: &OsStr,
        _mode: u32,
        flags: u32,
    ) -> fuse_mt::ResultCreate {
        debug!("Creating new file named `{}` in `{}`...", name.display(), parent.display());
        self.make_file(&child_path(parent, name))?;
        let attributes: FileAttr = ItemAttributes::file(0).into();
        Ok(CreatedEntry {
            ttl: TTL,
            attr: attributes,
            fh: NO_HANDLE,
            flags,
        })
    }
}
