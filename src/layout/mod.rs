// How everything is laid out on disk.

pub mod constants;
pub(crate) mod data;
pub(crate) mod directory_entry;
pub(crate) mod fixed_name;
pub(crate) mod pointer_struct;
pub(crate) mod root_directory;
pub(crate) mod slot;
