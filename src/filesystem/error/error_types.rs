use libc::c_int;
use log::{debug, error};

use crate::error_types::filesystem::FilesystemError;

//
//
// ======
// C Error values
// ======
//
//

// Errors gleamed from
// https://man7.org/linux/man-pages/man3/errno.3.html

/// Names are 8 characters, extensions are 3. No exceptions.
pub(crate) const FILE_NAME_TOO_LONG: c_int = libc::ENAMETOOLONG;
/// This seat's taken.
pub(crate) const ITEM_ALREADY_EXISTS: c_int = libc::EEXIST;
/// Access denied / files does not exist.
pub(crate) const NO_SUCH_ITEM: c_int = libc::ENOENT;
/// Not allowed here. Also what a full table reports.
pub(crate) const NOT_PERMITTED: c_int = libc::EPERM;
/// Tried to start past the end of a file.
pub(crate) const FILE_TOO_BIG: c_int = libc::EFBIG;
/// Out of blocks.
pub(crate) const NO_SPACE: c_int = libc::ENOSPC;
// Generic IO error. The dreaded OS(5) Input/Output error.
pub(crate) const GENERIC_FAILURE: c_int = libc::EIO;
/// Tried to do directory stuff to a file.
#[cfg_attr(not(feature = "fuse"), allow(dead_code))]
pub(crate) const NOT_A_DIRECTORY: c_int = libc::ENOTDIR;
/// Tried to do file things to a directory.
#[cfg_attr(not(feature = "fuse"), allow(dead_code))]
pub(crate) const IS_A_DIRECTORY: c_int = libc::EISDIR;

// Mapping between FilesystemErrors and errno
impl From<FilesystemError> for c_int {
    fn from(value: FilesystemError) -> Self {
        debug!("Casting `{value:?}` into a c_int.");
        match value {
            FilesystemError::NotFound => NO_SUCH_ITEM,
            FilesystemError::AlreadyExists => ITEM_ALREADY_EXISTS,
            FilesystemError::NameTooLong => FILE_NAME_TOO_LONG,
            FilesystemError::LimitExceeded => NOT_PERMITTED,
            FilesystemError::OffsetTooLarge => FILE_TOO_BIG,
            FilesystemError::OutOfSpace => NO_SPACE,
            FilesystemError::PermissionDenied => NOT_PERMITTED,
            FilesystemError::StorageCorruption => {
                error!("Storage corruption made it all the way up, reporting an IO error.");
                GENERIC_FAILURE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use libc::c_int;
    use test_log::test; // We want to see logs while testing.

    use crate::error_types::filesystem::FilesystemError;

    #[test]
    fn errno_mapping() {
        let cases = [
            (FilesystemError::NotFound, libc::ENOENT),
            (FilesystemError::AlreadyExists, libc::EEXIST),
            (FilesystemError::NameTooLong, libc::ENAMETOOLONG),
            (FilesystemError::LimitExceeded, libc::EPERM),
            (FilesystemError::OffsetTooLarge, libc::EFBIG),
            (FilesystemError::OutOfSpace, libc::ENOSPC),
            (FilesystemError::PermissionDenied, libc::EPERM),
            (FilesystemError::StorageCorruption, libc::EIO),
        ];
        for (error, expected) in cases {
            assert_eq!(c_int::from(error), expected);
        }
    }
}
