//! Frequency and adjacency statistics learned from tiled grids

use crate::algorithm::bitset::UnitBitset;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::{Direction, TiledGrid};
use std::collections::HashMap;

/// Learned unit statistics: frequencies and directional adjacency
///
/// Built by one or more [`train`](Distribution::train) calls, which
/// accumulate rather than reset, so a distribution can be trained on several
/// source grids. Two views of adjacency are kept in sync: compatibility
/// bitsets (what the solver prunes against) and co-occurrence counts (what
/// the context-weighted heuristic scores with). No entry means "never
/// observed adjacent", which the solver treats as forbidden.
#[derive(Debug, Clone)]
pub struct Distribution {
    frequencies: Vec<u64>,
    adjacency_counts: Vec<[HashMap<usize, u64>; 4]>,
    compatible: Vec<[UnitBitset; 4]>,
    empty: UnitBitset,
    unit_count: usize,
    blank: Option<usize>,
}

impl Distribution {
    /// Create an untrained distribution sized for a catalog of `unit_count` ids
    pub fn new(unit_count: usize) -> Self {
        Self {
            frequencies: vec![0; unit_count],
            adjacency_counts: (0..unit_count)
                .map(|_| std::array::from_fn(|_| HashMap::new()))
                .collect(),
            compatible: (0..unit_count)
                .map(|_| std::array::from_fn(|_| UnitBitset::new(unit_count)))
                .collect(),
            empty: UnitBitset::new(unit_count),
            unit_count,
            blank: None,
        }
    }

    /// Accumulate frequency and adjacency statistics from a training grid
    ///
    /// Every cell increments its id's frequency; for each direction the
    /// neighbor's id (or the blank id at the boundary, together with the
    /// symmetric blank-side entry) is recorded into the adjacency tables.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::InvalidUnitId`] if the grid references an id
    /// the distribution was not sized for, and
    /// [`AlgorithmError::InvalidParameter`] if grids trained together
    /// disagree on the blank id.
    pub fn train(&mut self, grid: &TiledGrid) -> Result<()> {
        let blank = grid.blank();
        if blank >= self.unit_count {
            return Err(AlgorithmError::InvalidUnitId {
                id: blank,
                unit_count: self.unit_count,
            });
        }
        match self.blank {
            None => self.blank = Some(blank),
            Some(existing) if existing != blank => {
                return Err(invalid_parameter(
                    "blank id",
                    &blank,
                    &format!("training grids disagree on the blank id (expected {existing})"),
                ));
            }
            Some(_) => {}
        }

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let id = grid.id_at(row, col).ok_or(AlgorithmError::InvalidUnitId {
                    id: 0,
                    unit_count: self.unit_count,
                })?;
                if id >= self.unit_count {
                    return Err(AlgorithmError::InvalidUnitId {
                        id,
                        unit_count: self.unit_count,
                    });
                }
                if let Some(frequency) = self.frequencies.get_mut(id) {
                    *frequency += 1;
                }
                for direction in Direction::ALL {
                    let (dr, dc) = direction.offset();
                    let nr = row as i64 + dr;
                    let nc = col as i64 + dc;
                    let in_bounds = nr >= 0 && nc >= 0;
                    let neighbor = if in_bounds {
                        grid.id_at(nr as usize, nc as usize)
                    } else {
                        None
                    };
                    match neighbor {
                        Some(other) => {
                            if other >= self.unit_count {
                                return Err(AlgorithmError::InvalidUnitId {
                                    id: other,
                                    unit_count: self.unit_count,
                                });
                            }
                            self.record(id, direction, other);
                        }
                        None => {
                            // Training-grid edge: the missing side is blank,
                            // in both directions so edge rules and context
                            // weighting see the same statistics.
                            self.record(id, direction, blank);
                            self.record(blank, direction.opposite(), id);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn record(&mut self, id: usize, direction: Direction, neighbor: usize) {
        if let Some(counts) = self
            .adjacency_counts
            .get_mut(id)
            .and_then(|dirs| dirs.get_mut(direction.index()))
        {
            *counts.entry(neighbor).or_insert(0) += 1;
        }
        if let Some(set) = self
            .compatible
            .get_mut(id)
            .and_then(|dirs| dirs.get_mut(direction.index()))
        {
            set.insert(neighbor);
        }
    }

    /// Observation count for a unit id (zero for unknown ids)
    pub fn frequency(&self, id: usize) -> u64 {
        self.frequencies.get(id).copied().unwrap_or(0)
    }

    /// Frequency weights for a list of candidate ids
    pub fn frequency_weights(&self, ids: &[usize]) -> Vec<f64> {
        ids.iter().map(|&id| self.frequency(id) as f64).collect()
    }

    /// Ids observed adjacent to `id` in the given direction
    ///
    /// Unknown ids yield the empty set, which forbids every neighbor.
    pub fn compatible(&self, id: usize, direction: Direction) -> &UnitBitset {
        self.compatible
            .get(id)
            .map_or(&self.empty, |dirs| {
                dirs.get(direction.index()).unwrap_or(&self.empty)
            })
    }

    /// How often `neighbor` was observed adjacent to `id` in a direction
    pub fn adjacency_count(&self, id: usize, direction: Direction, neighbor: usize) -> u64 {
        self.adjacency_counts
            .get(id)
            .and_then(|dirs| dirs.get(direction.index()))
            .and_then(|counts| counts.get(&neighbor))
            .copied()
            .unwrap_or(0)
    }

    /// The full id set this distribution covers
    pub fn all_ids(&self) -> UnitBitset {
        UnitBitset::all(self.unit_count)
    }

    /// Number of ids the distribution was sized for
    pub const fn unit_count(&self) -> usize {
        self.unit_count
    }

    /// The blank id observed during training, if any grid has been trained
    pub const fn blank_id(&self) -> Option<usize> {
        self.blank
    }
}
