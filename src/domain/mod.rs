pub mod batch;
pub mod digest;
pub mod error;
pub mod hash;
pub mod pair;
pub mod proof;

#[cfg(test)]
pub(crate) mod tree;
