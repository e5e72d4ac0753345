pub(crate) mod error_types;
