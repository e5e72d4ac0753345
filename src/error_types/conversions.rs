// Conversions between the error layers.
//
// Block level errors are never handed to callers of the filesystem as-is. Once
// they cross into the filesystem layer, they are storage corruption as far as the
// caller is concerned, and we log what actually happened.

use std::io::ErrorKind;

use log::{error, warn};

use crate::error_types::{filesystem::FilesystemError, store::StoreError};

//
// std::io::Error into StoreError
//

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        extract_io_error(value)
    }
}

fn extract_io_error(error: std::io::Error) -> StoreError {
    warn!("Got an error when doing io on the backing store:");
    warn!("{error:#?}");
    match error.kind() {
        ErrorKind::NotFound => StoreError::NotFound,
        ErrorKind::PermissionDenied => StoreError::PermissionDenied,
        ErrorKind::InvalidInput | ErrorKind::InvalidData => StoreError::Invalid,
        // read_exact_at ran off the end of the file.
        ErrorKind::UnexpectedEof => StoreError::InvalidOffset,
        ErrorKind::WriteZero => StoreError::WriteFailure,
        ErrorKind::Interrupted => StoreError::Interrupted,
        _ => StoreError::Unknown(error.to_string()),
    }
}

//
// StoreError into FilesystemError
//

impl From<StoreError> for FilesystemError {
    fn from(value: StoreError) -> Self {
        error!("Block level operation failed, reporting storage corruption.");
        error!("Error: {value}");
        FilesystemError::StorageCorruption
    }
}
