// Free space management.

pub(crate) mod allocate;
pub(crate) mod bitmap_methods;
pub(crate) mod bitmap_struct;

#[cfg(test)]
mod tests;
