pub mod data_methods;
pub mod data_struct;
