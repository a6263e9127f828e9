//! Error types for training and generation operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all catalog, training, and solver operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save generated image to disk
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

    /// Configuration or parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A grid referenced a unit id outside the trained catalog
    InvalidUnitId {
        /// The invalid unit id
        id: usize,
        /// Number of units the distribution was sized for
        unit_count: usize,
    },

    /// Backtracking unwound past the first choice point
    ///
    /// The learned adjacency statistics admit no complete assignment for the
    /// requested output size and seed.
    Unsatisfiable {
        /// Requested output rows
        rows: usize,
        /// Requested output columns
        cols: usize,
        /// Seed of the failed run
        seed: u64,
    },

    /// A safety cap on backtracking work was exceeded
    IterationLimit {
        /// The configured step limit
        limit: usize,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidUnitId { id, unit_count } => {
                write!(
                    f,
                    "Unit id {id} is out of bounds for a catalog of {unit_count} units"
                )
            }
            Self::Unsatisfiable { rows, cols, seed } => {
                write!(
                    f,
                    "No assignment satisfies the learned constraints for a {rows}x{cols} grid (seed {seed})"
                )
            }
            Self::IterationLimit { limit } => {
                write!(f, "Backtracking exceeded the step limit of {limit}")
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

/// Create a path-validation error for CLI targets
pub fn path_error(msg: &str) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}
