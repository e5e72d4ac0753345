// Errors that the filesystem operations hand back to callers.
// Every failure inside the core ends up as one of these, nothing else escapes.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
/// Why a filesystem operation failed.
pub enum FilesystemError {
    #[error("A component of the path does not exist.")]
    NotFound,
    #[error("An item with that name already exists.")]
    AlreadyExists,
    #[error("Directory and file names are limited to 8 characters, extensions to 3.")]
    NameTooLong,
    #[error("The directory table (or root table) has no free slots left.")]
    LimitExceeded,
    #[error("The requested offset is past the end of the file.")]
    OffsetTooLarge,
    #[error("Every allocatable block in the backing store is in use.")]
    OutOfSpace,
    #[error("This operation is not allowed at this location.")]
    PermissionDenied,
    #[error("The backing store is inconsistent or could not be accessed.")]
    StorageCorruption,
}
