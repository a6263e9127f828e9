//! Mathematical utilities shared by the solver heuristics

/// Entropy and weight normalization helpers
pub mod probability;
