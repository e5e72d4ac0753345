pub mod attributes_struct;
#[cfg(feature = "fuse")]
pub mod conversion;
