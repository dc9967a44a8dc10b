pub mod preset;
pub mod summary;
