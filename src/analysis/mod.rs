//! Sample ingestion, pattern extraction and adjacency derivation

/// Adjacency rule table derived from overlap or co-occurrence
pub mod adjacency;
/// Deduplicated pattern catalog
pub mod catalog;
/// Text and image samples as integer-labeled grids
pub mod sample;
