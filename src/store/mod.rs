pub mod block_structs;
pub mod store_methods;
pub mod store_struct;
