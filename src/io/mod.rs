//! Input/output: errors, configuration, rendering and the command line

/// Command-line parsing and batch processing
pub mod cli;
/// Compile-time defaults and rendering constants
pub mod configuration;
/// Error types and the crate result alias
pub mod error;
/// PNG rendering
pub mod image;
/// Progress bars for batch runs
pub mod progress;
/// Text rendering
pub mod text;
/// GIF capture of the collapse order
pub mod visualization;
