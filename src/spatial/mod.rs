//! Spatial data structures and grid manipulation
//!
//! This module contains spatial-related functionality including:
//! - Cardinal directions and toroidal stepping
//! - Pattern windows and their dihedral transforms
//! - The wave grid and its cells

/// Cardinal directions on a toroidal grid
pub mod direction;
/// Wave grid state management
pub mod grid;
/// Pattern windows, rotation, mirroring and overlap tests
pub mod pattern;

pub use grid::WaveGrid;
