//! Utility functions shared across the codebase

pub mod math;

// Re-export the vector kernel
pub use math::{cosine_similarity, dot_product};
