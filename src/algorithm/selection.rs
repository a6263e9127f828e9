//! Cell selection and the weighted collapse pick
//!
//! Selection restricts candidates to undetermined cells with minimal entropy
//! under the configured metric; the pick then draws one id from the chosen
//! cell's domain under the configured weighting policy. All randomness comes
//! from the run's seeded generator, and exactly one draw is consumed per
//! collapse, so runs are reproducible for a fixed seed and configuration.

use crate::algorithm::bitset::UnitBitset;
use crate::algorithm::options::{EntropyMode, WeightingMode};
use crate::algorithm::wave::Wave;
use crate::analysis::Distribution;
use crate::math::probability::shannon_entropy;
use crate::spatial::Direction;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Choose the next cell to collapse, or `None` when the run is solved
///
/// `UpLeft` scans in row-major order, so the entropy proxy is simply grid
/// position. `Shannon` computes the weighted entropy of each remaining
/// domain and breaks ties deterministically by the smallest row-major index.
pub fn select_cell(
    wave: &Wave,
    distribution: &Distribution,
    mode: EntropyMode,
) -> Option<usize> {
    match mode {
        EntropyMode::UpLeft => (0..wave.cell_count()).find(|&cell| wave.is_undetermined(cell)),
        EntropyMode::Shannon => {
            let mut best: Option<(usize, f64)> = None;
            for cell in 0..wave.cell_count() {
                if !wave.is_undetermined(cell) {
                    continue;
                }
                let entropy = domain_entropy(wave, cell, distribution);
                let better = best.is_none_or(|(_, best_entropy)| entropy < best_entropy);
                if better {
                    best = Some((cell, entropy));
                }
            }
            best.map(|(cell, _)| cell)
        }
    }
}

/// Shannon entropy of a cell's domain under global frequency weights
pub fn domain_entropy(wave: &Wave, cell: usize, distribution: &Distribution) -> f64 {
    let ids = wave.domain(cell).map_or_else(Vec::new, UnitBitset::to_vec);
    shannon_entropy(&distribution.frequency_weights(&ids))
}

/// Candidate ids of a cell's domain with their selection weights
///
/// Returns ids in ascending order alongside one weight per id. The context
/// policy scores each candidate by its co-occurrence counts with
/// already-collapsed neighbors (virtual blanks beyond the grid edge count as
/// collapsed); when nothing constrains yet, or all counts are zero, it falls
/// back to global frequency. A weight vector summing to zero falls back to
/// uniform so the pick stays well defined on untrained statistics.
pub fn candidate_weights(
    wave: &Wave,
    cell: usize,
    distribution: &Distribution,
    blank: usize,
    mode: WeightingMode,
) -> (Vec<usize>, Vec<f64>) {
    let ids = wave.domain(cell).map_or_else(Vec::new, UnitBitset::to_vec);
    let weights = match mode {
        WeightingMode::Uniform => vec![1.0; ids.len()],
        WeightingMode::Frequency => distribution.frequency_weights(&ids),
        WeightingMode::Context => context_weights(wave, cell, &ids, distribution, blank),
    };
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return (ids.clone(), vec![1.0; ids.len()]);
    }
    (ids, weights)
}

/// Co-occurrence weights against the cell's collapsed surroundings
fn context_weights(
    wave: &Wave,
    cell: usize,
    ids: &[usize],
    distribution: &Distribution,
    blank: usize,
) -> Vec<f64> {
    let mut constrained = false;
    let mut weights = vec![0.0; ids.len()];

    for direction in Direction::ALL {
        let collapsed_neighbor = match wave.neighbor(cell, direction) {
            Some(neighbor) => wave.collapsed_id(neighbor),
            // Beyond the edge the neighborhood is blank by definition
            None => Some(blank),
        };
        let Some(neighbor_id) = collapsed_neighbor else {
            continue;
        };
        constrained = true;
        for (index, &id) in ids.iter().enumerate() {
            let count = distribution.adjacency_count(id, direction, neighbor_id) as f64;
            if let Some(weight) = weights.get_mut(index) {
                *weight += count;
            }
        }
    }

    let total: f64 = weights.iter().sum();
    if !constrained || total <= 0.0 {
        return distribution.frequency_weights(ids);
    }
    weights
}

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Weighted random selection over an index range
    ///
    /// Returns an index into the weights array using the cumulative
    /// distribution; a non-positive total degrades to index 0.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len().saturating_sub(1)
    }
}
