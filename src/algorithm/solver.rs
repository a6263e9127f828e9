//! The wave function collapse engine
//!
//! Drives the collapse loop over a fresh [`Wave`] per run: select a cell,
//! pick an id under the weighting policy, propagate, and either roll back on
//! contradiction (backtracking on) or mark the cell and carry on
//! (backtracking off). The distribution is read-only throughout, so one
//! trained distribution can serve many concurrent runs with different seeds.

use crate::algorithm::backtrack::Trail;
use crate::algorithm::bitset::UnitBitset;
use crate::algorithm::options::SolverOptions;
use crate::algorithm::propagation::propagate;
use crate::algorithm::selection::{RandomSelector, candidate_weights, select_cell};
use crate::algorithm::wave::Wave;
use crate::analysis::Distribution;
use crate::io::configuration::{BACKTRACK_STEP_LIMIT, MAX_GRID_DIMENSION};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::TiledGrid;
use ndarray::Array2;

/// Wave function collapse solver over a trained distribution
#[derive(Debug, Clone, Copy)]
pub struct Solver<'a> {
    distribution: &'a Distribution,
    options: SolverOptions,
    blank: usize,
}

impl<'a> Solver<'a> {
    /// Create a solver for a trained distribution
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::InvalidParameter`] if the distribution has
    /// not been trained on any grid.
    pub fn new(distribution: &'a Distribution, options: SolverOptions) -> Result<Self> {
        let blank = distribution.blank_id().ok_or_else(|| {
            invalid_parameter(
                "distribution",
                &"untrained",
                &"the distribution must be trained before solving",
            )
        })?;
        if distribution.unit_count() < 2 {
            return Err(invalid_parameter(
                "distribution",
                &distribution.unit_count(),
                &"at least one non-blank unit is required",
            ));
        }
        Ok(Self {
            distribution,
            options,
            blank,
        })
    }

    /// The heuristic configuration this solver runs with
    pub const fn options(&self) -> SolverOptions {
        self.options
    }

    /// Generate a grid of the requested size from the learned statistics
    ///
    /// Deterministic for a fixed (seed, size, options, distribution) tuple.
    /// With backtracking enabled the result contains no adjacency violation;
    /// without it, unresolved cells carry the blank id as a contradiction
    /// marker.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::InvalidParameter`] for a non-positive or
    /// oversized target, [`AlgorithmError::Unsatisfiable`] when backtracking
    /// exhausts every choice point, and [`AlgorithmError::IterationLimit`]
    /// when backtracking exceeds its safety cap.
    pub fn generate(&self, rows: usize, cols: usize, seed: u64) -> Result<TiledGrid> {
        if rows == 0 || cols == 0 {
            return Err(invalid_parameter(
                "output size",
                &format!("{rows}x{cols}"),
                &"output dimensions must be positive",
            ));
        }
        if rows > MAX_GRID_DIMENSION || cols > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "output size",
                &format!("{rows}x{cols}"),
                &format!("output dimensions are capped at {MAX_GRID_DIMENSION}"),
            ));
        }

        let mut wave = Wave::new(rows, cols, self.distribution, self.blank);
        let mut selector = RandomSelector::new(seed);
        let mut trail = self.options.backtrack.then(Trail::new);
        let mut backtrack_steps = 0usize;

        while let Some(cell) = select_cell(&wave, self.distribution, self.options.entropy) {
            let (ids, weights) = candidate_weights(
                &wave,
                cell,
                self.distribution,
                self.blank,
                self.options.weighting,
            );
            let pick = selector.weighted_choice(&weights);
            let Some(chosen) = ids.get(pick).copied() else {
                continue;
            };

            let contradiction = self.collapse_and_propagate(&mut wave, trail.as_mut(), cell, chosen);
            if contradiction.is_none() {
                continue;
            }

            match trail.as_mut() {
                // Without backtracking the emptied domain stays empty; the
                // cell is skipped by selection and rendered as blank.
                None => {}
                Some(active_trail) => {
                    self.recover(
                        &mut wave,
                        active_trail,
                        &mut backtrack_steps,
                        rows,
                        cols,
                        seed,
                    )?;
                }
            }
        }

        self.assemble_grid(&wave, rows, cols)
    }

    /// Collapse a cell to an id, log the removals, and push consequences
    ///
    /// Returns the first contradicted cell, if propagation emptied one.
    fn collapse_and_propagate(
        &self,
        wave: &mut Wave,
        mut trail: Option<&mut Trail>,
        cell: usize,
        chosen: usize,
    ) -> Option<usize> {
        let others: Vec<usize> = wave
            .domain(cell)
            .map_or_else(Vec::new, UnitBitset::to_vec)
            .into_iter()
            .filter(|&id| id != chosen)
            .collect();

        if let Some(t) = trail.as_deref_mut() {
            t.open_choice(cell, others.clone());
        }
        for id in &others {
            if wave.remove(cell, *id) {
                if let Some(t) = trail.as_deref_mut() {
                    t.record(cell, *id);
                }
            }
        }

        propagate(
            wave,
            self.distribution,
            cell,
            self.options.updating,
            trail.as_deref_mut(),
        )
    }

    /// Roll back to the most recent open choice point and retry from there
    ///
    /// Keeps rewinding while retried alternatives also contradict. A retried
    /// alternative consumes no randomness, so recovery is deterministic.
    fn recover(
        &self,
        wave: &mut Wave,
        trail: &mut Trail,
        backtrack_steps: &mut usize,
        rows: usize,
        cols: usize,
        seed: u64,
    ) -> Result<()> {
        loop {
            *backtrack_steps += 1;
            if *backtrack_steps > BACKTRACK_STEP_LIMIT {
                return Err(AlgorithmError::IterationLimit {
                    limit: BACKTRACK_STEP_LIMIT,
                });
            }

            let Some((cell, next, remaining)) = trail.rewind(wave) else {
                return Err(AlgorithmError::Unsatisfiable { rows, cols, seed });
            };

            // Re-collapse the restored cell to the next alternative; the
            // remaining alternatives stay available at the reopened choice
            // point.
            trail.open_choice(cell, remaining);
            let others: Vec<usize> = wave
                .domain(cell)
                .map_or_else(Vec::new, UnitBitset::to_vec)
                .into_iter()
                .filter(|&id| id != next)
                .collect();
            for id in others {
                if wave.remove(cell, id) {
                    trail.record(cell, id);
                }
            }

            let contradiction = propagate(
                wave,
                self.distribution,
                cell,
                self.options.updating,
                Some(trail),
            );
            if contradiction.is_none() {
                return Ok(());
            }
        }
    }

    /// Read the final assignment out of the wave
    ///
    /// Contradicted cells (empty domains) map to the blank id.
    fn assemble_grid(&self, wave: &Wave, rows: usize, cols: usize) -> Result<TiledGrid> {
        let mut ids = Array2::zeros((rows, cols));
        for cell in 0..wave.cell_count() {
            let (row, col) = wave.position(cell);
            let id = wave.collapsed_id(cell).unwrap_or(self.blank);
            if let Some(slot) = ids.get_mut([row, col]) {
                *slot = id;
            }
        }
        TiledGrid::new(ids, self.blank)
    }
}
