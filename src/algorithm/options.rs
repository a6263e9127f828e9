//! Heuristic configuration for the solver
//!
//! The entropy metric, selection weighting, propagation update policy, and
//! backtracking switch are orthogonal axes passed into the solver as plain
//! data; the solver stays a single state machine parameterized by this
//! configuration rather than a type hierarchy.

use clap::ValueEnum;

/// How the next cell to collapse is ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntropyMode {
    /// Positional proxy: the first undetermined cell in row-major order
    ///
    /// Cheap but introduces a known directional bias toward the upper left.
    UpLeft,
    /// Shannon entropy of the remaining domain under frequency weights,
    /// ties broken by the smallest row-major index
    Shannon,
}

/// How the collapse value is picked from the chosen cell's domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WeightingMode {
    /// Uniform random choice over the domain
    Uniform,
    /// Random choice weighted by each candidate's global training frequency
    Frequency,
    /// Random choice weighted by co-occurrence counts with already-collapsed
    /// neighbors, falling back to global frequency when nothing constrains
    Context,
}

/// How far a collapse's consequences are pushed into neighboring domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UpdateMode {
    /// Cascade to a fixed point: re-check neighbors of every shrunk domain
    Chain,
    /// Single step: prune only the collapsed cell's immediate neighbors
    Adjacent,
}

/// Complete heuristic configuration for one generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    /// Entropy metric for cell selection
    pub entropy: EntropyMode,
    /// Weighting policy for the collapse pick
    pub weighting: WeightingMode,
    /// Propagation update policy
    pub updating: UpdateMode,
    /// Whether contradictions roll back to the last open choice point
    pub backtrack: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            entropy: EntropyMode::UpLeft,
            weighting: WeightingMode::Frequency,
            updating: UpdateMode::Chain,
            backtrack: false,
        }
    }
}
