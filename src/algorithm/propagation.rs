//! Constraint propagation after a collapse
//!
//! Prunes, from each neighboring domain, every id the training data never
//! observed next to the source cell's remaining ids. The CHAIN policy runs a
//! worklist to the arc-consistency fixed point; ADJACENT stops after the
//! collapsed cell's immediate neighbors, trading correctness strength for
//! speed. Every removal is recorded on the trail when one is supplied so
//! backtracking can undo it.

use crate::algorithm::backtrack::Trail;
use crate::algorithm::bitset::UnitBitset;
use crate::algorithm::options::UpdateMode;
use crate::algorithm::wave::Wave;
use crate::analysis::Distribution;
use crate::spatial::Direction;
use std::collections::VecDeque;

/// Propagate the consequences of a domain change starting at `start`
///
/// Returns the first cell whose domain became empty, or `None` when the
/// update completed without contradiction. Propagation consumes no
/// randomness and visits cells in deterministic worklist order.
pub fn propagate(
    wave: &mut Wave,
    distribution: &Distribution,
    start: usize,
    mode: UpdateMode,
    mut trail: Option<&mut Trail>,
) -> Option<usize> {
    let mut worklist = VecDeque::new();
    worklist.push_back(start);

    while let Some(cell) = worklist.pop_front() {
        for direction in Direction::ALL {
            let Some(neighbor) = wave.neighbor(cell, direction) else {
                continue;
            };
            let allowed = allowed_neighbor_ids(wave, distribution, cell, direction);
            let removed = prune_domain(wave, neighbor, &allowed, trail.as_deref_mut());
            if removed == 0 {
                continue;
            }
            match wave.domain(neighbor).map(UnitBitset::count) {
                Some(0) | None => return Some(neighbor),
                _ => {
                    // ADJACENT stops at the immediate neighbors; CHAIN
                    // re-checks every shrunk domain until a fixed point.
                    if mode == UpdateMode::Chain {
                        worklist.push_back(neighbor);
                    }
                }
            }
        }
    }
    None
}

/// Union of compatibility sets over a cell's remaining domain
fn allowed_neighbor_ids(
    wave: &Wave,
    distribution: &Distribution,
    cell: usize,
    direction: Direction,
) -> UnitBitset {
    let mut allowed = UnitBitset::new(distribution.unit_count());
    let ids = wave.domain(cell).map_or_else(Vec::new, UnitBitset::to_vec);
    for id in ids {
        allowed.union_with(distribution.compatible(id, direction));
    }
    allowed
}

/// Remove every id of a domain outside the allowed set
///
/// Returns the number of ids removed; removals land on the trail when given.
fn prune_domain(
    wave: &mut Wave,
    cell: usize,
    allowed: &UnitBitset,
    trail: Option<&mut Trail>,
) -> usize {
    let ids = wave.domain(cell).map_or_else(Vec::new, UnitBitset::to_vec);
    let mut removed = 0;
    let mut trail = trail;
    for id in ids {
        if allowed.contains(id) {
            continue;
        }
        if wave.remove(cell, id) {
            removed += 1;
            if let Some(t) = trail.as_deref_mut() {
                t.record(cell, id);
            }
        }
    }
    removed
}
