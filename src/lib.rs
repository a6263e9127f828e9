//! Wave function collapse for tile-based image synthesis
//!
//! The system splits a source image into a catalog of units, learns their
//! frequencies and directional adjacencies, and collapses a grid of
//! superposed unit domains into a new image consistent with the learned
//! statistics.

/// The collapse engine: domains, selection, propagation, and backtracking
pub mod algorithm;
/// Unit generation from source images and adjacency training
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Probability and entropy utilities
pub mod math;
/// Units, catalogs, and tiled grids
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
