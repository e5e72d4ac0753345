// Errors from the block level. These are about the backing file itself,
// not about what is stored inside of it.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum StoreError {
    #[error("Attempted to access a block outside of the backing store.")]
    InvalidOffset,
    #[error("The backing store is not a whole number of blocks, or is too small to hold a filesystem.")]
    BadSize,
    #[error("The host OS denied access to the backing store.")]
    PermissionDenied,
    #[error("A write did not put all of the requested data into the backing store.")]
    WriteFailure,
    #[error("Operation was interrupted. Can typically be retried.")]
    Interrupted,
    #[error("Operation was deemed invalid by the OS.")]
    Invalid,
    #[error("The backing store file does not exist.")]
    NotFound,
    // Catch all, we keep the OS description around for the logs.
    #[error("The OS returned an unknown error when accessing the backing store: {0}")]
    Unknown(String),
}
