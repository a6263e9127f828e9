//! The wave function collapse engine and its supporting structures

/// Chronological backtracking trail
pub mod backtrack;
/// Domain and compatibility bitsets
pub mod bitset;
/// Heuristic configuration enums
pub mod options;
/// Constraint propagation policies
pub mod propagation;
/// Cell selection and weighted picks
pub mod selection;
/// The generation state machine
pub mod solver;
/// Per-run domain state
pub mod wave;

pub use options::{EntropyMode, SolverOptions, UpdateMode, WeightingMode};
pub use solver::Solver;
