// The library/filesystem cannot use unwraps.
#![deny(clippy::unwrap_used)]
// Gotta use all the results.
#![deny(unused_results)]

pub mod error_types;
pub mod filesystem;
pub mod helpers;
pub mod layout;
pub mod store;

// Within the crate, we can use:
mod allocator;
