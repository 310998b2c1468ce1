// src/extractors/mod.rs
pub mod fields;

// Re-export key extraction types for convenience
pub use fields::{FieldExtractor, MemoRecord};
