//! Input/output operations, configuration, and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Algorithm constants and configuration defaults
pub mod configuration;
/// Error types for training and generation
pub mod error;
/// Image loading and grid rendering
pub mod image;
/// Progress display for batch runs
pub mod progress;
