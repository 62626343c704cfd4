//! Mathematical utilities for the algorithm

/// Entropy and the seeded random source
pub mod probability;
