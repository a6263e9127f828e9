//! Tiled grids of unit ids and the axis-aligned neighborhood they live in

use crate::io::error::{AlgorithmError, Result};
use ndarray::Array2;

/// The four axis-aligned neighbor directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller row indices
    Up,
    /// Toward larger row indices
    Down,
    /// Toward smaller column indices
    Left,
    /// Toward larger column indices
    Right,
}

impl Direction {
    /// All four directions in a fixed iteration order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row/column offset of the neighbor in this direction
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// The direction pointing back at this one
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Dense index in [0, 4), matching the order of [`Direction::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}

/// A 2D grid of unit ids plus the blank id used for out-of-bounds queries
///
/// Built either by a generator scanning source pixels or by the solver from
/// a completed run. Every id in the grid must be valid in the catalog the
/// grid was built against.
#[derive(Debug, Clone)]
pub struct TiledGrid {
    ids: Array2<usize>,
    blank: usize,
}

impl TiledGrid {
    /// Create a grid from an id array and the catalog's blank id
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::InvalidParameter`] if the grid has a zero
    /// dimension.
    pub fn new(ids: Array2<usize>, blank: usize) -> Result<Self> {
        let (rows, cols) = ids.dim();
        if rows == 0 || cols == 0 {
            return Err(AlgorithmError::InvalidParameter {
                parameter: "grid dimensions",
                value: format!("{rows}x{cols}"),
                reason: "grids must have at least one row and one column".to_string(),
            });
        }
        Ok(Self { ids, blank })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.ids.dim().0
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.ids.dim().1
    }

    /// Id of the blank unit this grid pads with
    pub const fn blank(&self) -> usize {
        self.blank
    }

    /// The raw id array
    pub const fn ids(&self) -> &Array2<usize> {
        &self.ids
    }

    /// Unit id at a position, if in bounds
    pub fn id_at(&self, row: usize, col: usize) -> Option<usize> {
        self.ids.get([row, col]).copied()
    }

    /// Unit id of the neighbor in a direction, or the blank id off the edge
    pub fn neighbor_or_blank(&self, row: usize, col: usize, direction: Direction) -> usize {
        let (dr, dc) = direction.offset();
        let nr = row as i64 + dr;
        let nc = col as i64 + dc;
        if nr < 0 || nc < 0 {
            return self.blank;
        }
        self.ids
            .get([nr as usize, nc as usize])
            .copied()
            .unwrap_or(self.blank)
    }
}
