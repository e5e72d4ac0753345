// The filesystem proper, and its FUSE face.

pub(crate) mod chain_io;
pub(crate) mod error;
pub mod file_attributes;
pub mod filesystem_methods;
pub mod filesystem_struct;
#[cfg(feature = "fuse")]
pub mod fuse_filesystem_methods;
pub mod internal_filesystem_methods;
pub mod item_path;
pub(crate) mod resolver;
