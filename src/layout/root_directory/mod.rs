pub mod root_methods;
pub mod root_struct;
