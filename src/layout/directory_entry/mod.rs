pub mod directory_methods;
pub mod directory_struct;
