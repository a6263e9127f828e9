//! Per-run solver state: one domain of still-possible unit ids per cell

use crate::algorithm::bitset::UnitBitset;
use crate::analysis::Distribution;
use crate::spatial::Direction;

/// The working grid of domains for a single generation run
///
/// Cells are addressed by a dense row-major index. A cell is undetermined
/// while its domain holds more than one id, collapsed at exactly one, and a
/// contradiction at zero. The wave is created fresh per `generate` call and
/// never shared.
#[derive(Debug, Clone)]
pub struct Wave {
    domains: Vec<UnitBitset>,
    rows: usize,
    cols: usize,
}

impl Wave {
    /// Initialize domains for a target grid
    ///
    /// Every domain starts as the full catalog id set minus the blank id,
    /// then boundary cells are reduced to ids observed next to blank on the
    /// missing side. Training always records blank adjacency at source
    /// edges, so these reductions cannot spuriously empty a domain for ids
    /// that ever appeared on a source edge.
    pub fn new(rows: usize, cols: usize, distribution: &Distribution, blank: usize) -> Self {
        let mut full = distribution.all_ids();
        full.remove(blank);

        let mut domains = vec![full; rows * cols];
        for cell in 0..rows * cols {
            let row = cell / cols;
            let col = cell % cols;
            for direction in Direction::ALL {
                let (dr, dc) = direction.offset();
                let nr = row as i64 + dr;
                let nc = col as i64 + dc;
                let missing = nr < 0 || nc < 0 || nr >= rows as i64 || nc >= cols as i64;
                if missing {
                    // A virtual blank sits outside; keep only ids it was
                    // observed next to, looking back toward this cell.
                    if let Some(domain) = domains.get_mut(cell) {
                        domain.intersect_with(
                            distribution.compatible(blank, direction.opposite()),
                        );
                    }
                }
            }
        }

        Self {
            domains,
            rows,
            cols,
        }
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major position of a cell index
    pub const fn position(&self, cell: usize) -> (usize, usize) {
        (cell / self.cols, cell % self.cols)
    }

    /// Cell index of the neighbor in a direction, if it exists
    pub fn neighbor(&self, cell: usize, direction: Direction) -> Option<usize> {
        let (row, col) = self.position(cell);
        let (dr, dc) = direction.offset();
        let nr = row as i64 + dr;
        let nc = col as i64 + dc;
        (nr >= 0 && nc >= 0 && nr < self.rows as i64 && nc < self.cols as i64)
            .then(|| nr as usize * self.cols + nc as usize)
    }

    /// The domain of a cell
    pub fn domain(&self, cell: usize) -> Option<&UnitBitset> {
        self.domains.get(cell)
    }

    /// Remove an id from a cell's domain, reporting whether it was present
    pub fn remove(&mut self, cell: usize, id: usize) -> bool {
        self.domains
            .get_mut(cell)
            .is_some_and(|domain| domain.remove(id))
    }

    /// Reinsert an id into a cell's domain (backtracking undo)
    pub fn restore(&mut self, cell: usize, id: usize) {
        if let Some(domain) = self.domains.get_mut(cell) {
            domain.insert(id);
        }
    }

    /// Whether a cell still has more than one possible id
    pub fn is_undetermined(&self, cell: usize) -> bool {
        self.domains
            .get(cell)
            .is_some_and(|domain| domain.count() > 1)
    }

    /// The collapsed id of a cell, if its domain holds exactly one
    pub fn collapsed_id(&self, cell: usize) -> Option<usize> {
        self.domains.get(cell).and_then(UnitBitset::sole_member)
    }
}
