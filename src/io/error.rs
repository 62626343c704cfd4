//! Error types for sample ingestion, configuration and generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all algorithm operations
///
/// Contradictions are not errors: a cell that runs out of candidates is
/// recorded on the grid and reported through the run outcome. Errors here are
/// either rejected configurations, I/O failures, misuse of the API, or broken
/// internal invariants.
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load a sample image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Sample data doesn't meet algorithm requirements
    InvalidSourceData {
        /// Description of what's wrong with the sample
        reason: String,
    },

    /// Sample rows have different lengths
    RaggedSample {
        /// Index of the first offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },

    /// Pattern size exceeds the sample extent
    PatternTooLarge {
        /// Requested pattern side length
        size: usize,
        /// Sample dimensions (rows, cols)
        sample_dimensions: (usize, usize),
    },

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pattern identity exceeds the catalog
    InvalidPatternIndex {
        /// The invalid identity
        index: usize,
        /// Number of patterns in the catalog
        pattern_count: usize,
    },

    /// Attempted to collapse a cell that is already collapsed
    CellAlreadyCollapsed {
        /// Grid position (row, col)
        position: [usize; 2],
    },

    /// Attempted to collapse a cell that has no candidates left
    CellInContradiction {
        /// Grid position (row, col)
        position: [usize; 2],
    },

    /// An internal invariant was broken; indicates a logic defect
    InvariantViolation {
        /// Operation that detected the violation
        operation: &'static str,
        /// Grid position involved, if any
        position: Option<[usize; 2]>,
        /// Description of the violation
        reason: String,
    },

    /// Failed to save generated output to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::RaggedSample {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Sample row {row} has {found} values, expected {expected} like the first row"
                )
            }
            Self::PatternTooLarge {
                size,
                sample_dimensions,
            } => {
                write!(
                    f,
                    "Pattern size {size} exceeds the {}x{} sample",
                    sample_dimensions.0, sample_dimensions.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPatternIndex {
                index,
                pattern_count,
            } => {
                write!(
                    f,
                    "Pattern index {index} is out of bounds ({pattern_count} patterns)"
                )
            }
            Self::CellAlreadyCollapsed { position } => {
                write!(
                    f,
                    "Cell ({}, {}) is already collapsed",
                    position[0], position[1]
                )
            }
            Self::CellInContradiction { position } => {
                write!(
                    f,
                    "Cell ({}, {}) has no candidates left",
                    position[0], position[1]
                )
            }
            Self::InvariantViolation {
                operation,
                position,
                reason,
            } => match position {
                Some([row, col]) => write!(
                    f,
                    "Invariant violated during {operation} at ({row}, {col}): {reason}"
                ),
                None => write!(f, "Invariant violated during {operation}: {reason}"),
            },
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(
    operation: &'static str,
    position: Option<[usize; 2]>,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvariantViolation {
        operation,
        position,
        reason: reason.to_string(),
    }
}

impl AlgorithmError {
    /// Whether this error signals a defect rather than bad input or I/O
    pub const fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}
