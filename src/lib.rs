//! Overlapping wave function collapse over toroidal grids
//!
//! The system extracts every N×N pattern of a sample, derives which patterns
//! may sit next to each other, and fills an output grid by repeatedly
//! collapsing the lowest-entropy cell and propagating the consequences.

#![forbid(unsafe_code)]

/// Core algorithm: multisets, selection, propagation, the run loop and validation
pub mod algorithm;
/// Sample ingestion, pattern catalog and adjacency rules
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy and the seeded random source
pub mod math;
/// Directions, pattern windows and the wave grid
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
