pub mod conversions;
pub mod filesystem;
pub mod store;
