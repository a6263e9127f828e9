//! Unit generators: strategies for splitting source pixels into catalog units
//!
//! Each generator scans a normalized pixel array, registers the blocks it
//! finds in a shared [`UnitCatalog`], and returns a [`TiledGrid`] of the ids
//! it emitted. Tiling produces disjoint blocks; the pattern generators slide
//! an n×m window of tiles with a stride of one tile, which yields far more
//! distinct units because every window is a joint pattern.

use crate::io::configuration::BLANK_INTENSITY;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{TiledGrid, UnitCatalog, units::Unit};
use ndarray::{Array2, Array3, s};

/// A strategy that emits unit instances at grid positions
///
/// Generators mutate the shared catalog (registering new units, reusing ids
/// for bit-identical blocks) and return the grid of emitted ids. The blank
/// unit for the generator's block shape is registered after the source
/// units, so source ids always come first in the catalog.
pub trait UnitGenerator {
    /// Scan the source and populate the catalog
    ///
    /// # Errors
    ///
    /// Returns [`crate::AlgorithmError::InvalidParameter`] when the unit
    /// shape is degenerate or the source is too small to produce any unit.
    fn generate(&self, catalog: &mut UnitCatalog) -> Result<TiledGrid>;
}

/// Logical tile dimensions of a source array under a unit shape
///
/// Truncates to the divisible prefix, warning when source data is dropped.
fn tile_grid_dims(
    image: &Array3<f64>,
    unit_shape: (usize, usize),
) -> Result<(usize, usize, usize)> {
    let (height, width, channels) = image.dim();
    let (unit_rows, unit_cols) = unit_shape;
    if unit_rows == 0 || unit_cols == 0 {
        return Err(invalid_parameter(
            "unit shape",
            &format!("{unit_rows}x{unit_cols}"),
            &"unit dimensions must be positive",
        ));
    }
    if height % unit_rows != 0 || width % unit_cols != 0 {
        log::warn!(
            "source {height}x{width} is not divisible by the {unit_rows}x{unit_cols} unit shape; \
             the remainder is dropped"
        );
    }
    let rows = height / unit_rows;
    let cols = width / unit_cols;
    if rows == 0 || cols == 0 {
        return Err(invalid_parameter(
            "unit shape",
            &format!("{unit_rows}x{unit_cols}"),
            &format!("no full unit fits in a {height}x{width} source"),
        ));
    }
    Ok((rows, cols, channels))
}

/// Disjoint tiling: partitions the source into shape-sized blocks
#[derive(Debug)]
pub struct TileGenerator<'a> {
    image: &'a Array3<f64>,
    unit_shape: (usize, usize),
}

impl<'a> TileGenerator<'a> {
    /// Create a tiling generator over a normalized pixel array
    pub const fn new(image: &'a Array3<f64>, unit_shape: (usize, usize)) -> Self {
        Self { image, unit_shape }
    }
}

impl UnitGenerator for TileGenerator<'_> {
    fn generate(&self, catalog: &mut UnitCatalog) -> Result<TiledGrid> {
        let (rows, cols, channels) = tile_grid_dims(self.image, self.unit_shape)?;
        let (unit_rows, unit_cols) = self.unit_shape;

        let mut ids = Array2::zeros((rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                let r0 = row * unit_rows;
                let c0 = col * unit_cols;
                let block = self
                    .image
                    .slice(s![r0..r0 + unit_rows, c0..c0 + unit_cols, ..])
                    .to_owned();
                let id = catalog.register(Unit::new(block));
                if let Some(cell) = ids.get_mut([row, col]) {
                    *cell = id;
                }
            }
        }

        let blank = catalog.ensure_blank((unit_rows, unit_cols, channels), BLANK_INTENSITY);
        TiledGrid::new(ids, blank)
    }
}

/// Overlapping n×m patterns: windows of n×m tiles with a stride of one tile
#[derive(Debug)]
pub struct PatternGenerator<'a> {
    image: &'a Array3<f64>,
    unit_shape: (usize, usize),
    pattern_shape: (usize, usize),
}

impl<'a> PatternGenerator<'a> {
    /// Create an n×m pattern generator; the pattern shape is counted in tiles
    pub const fn new(
        image: &'a Array3<f64>,
        unit_shape: (usize, usize),
        pattern_shape: (usize, usize),
    ) -> Self {
        Self {
            image,
            unit_shape,
            pattern_shape,
        }
    }

    /// Number of window positions along each axis of the tile grid
    fn window_dims(&self, tile_rows: usize, tile_cols: usize) -> Result<(usize, usize)> {
        let (n, m) = self.pattern_shape;
        if n == 0 || m == 0 {
            return Err(invalid_parameter(
                "pattern shape",
                &format!("{n}x{m}"),
                &"pattern dimensions must be positive",
            ));
        }
        if tile_rows < n || tile_cols < m {
            return Err(invalid_parameter(
                "pattern shape",
                &format!("{n}x{m}"),
                &format!("no full window fits in a {tile_rows}x{tile_cols} tile grid"),
            ));
        }
        Ok((tile_rows - n + 1, tile_cols - m + 1))
    }
}

impl UnitGenerator for PatternGenerator<'_> {
    fn generate(&self, catalog: &mut UnitCatalog) -> Result<TiledGrid> {
        let (tile_rows, tile_cols, channels) = tile_grid_dims(self.image, self.unit_shape)?;
        let (rows, cols) = self.window_dims(tile_rows, tile_cols)?;
        let (unit_rows, unit_cols) = self.unit_shape;
        let (n, m) = self.pattern_shape;

        let mut ids = Array2::zeros((rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                let r0 = row * unit_rows;
                let c0 = col * unit_cols;
                let block = self
                    .image
                    .slice(s![r0..r0 + n * unit_rows, c0..c0 + m * unit_cols, ..])
                    .to_owned();
                let id = catalog.register(Unit::new(block));
                if let Some(cell) = ids.get_mut([row, col]) {
                    *cell = id;
                }
            }
        }

        let blank = catalog.ensure_blank((n * unit_rows, m * unit_cols, channels), BLANK_INTENSITY);
        TiledGrid::new(ids, blank)
    }
}

/// Upper-left L-patterns: the top tile row plus the left tile column of an
/// n×m window, with the remaining tiles filled with the background value
///
/// The restriction biases adjacency learning toward a causal neighborhood
/// and produces fewer distinct units than the full n×m window.
#[derive(Debug)]
pub struct UpLeftPatternGenerator<'a> {
    image: &'a Array3<f64>,
    unit_shape: (usize, usize),
    pattern_shape: (usize, usize),
}

impl<'a> UpLeftPatternGenerator<'a> {
    /// Create an L-pattern generator; the pattern shape is counted in tiles
    pub const fn new(
        image: &'a Array3<f64>,
        unit_shape: (usize, usize),
        pattern_shape: (usize, usize),
    ) -> Self {
        Self {
            image,
            unit_shape,
            pattern_shape,
        }
    }
}

impl UnitGenerator for UpLeftPatternGenerator<'_> {
    fn generate(&self, catalog: &mut UnitCatalog) -> Result<TiledGrid> {
        let (tile_rows, tile_cols, channels) = tile_grid_dims(self.image, self.unit_shape)?;
        let full = PatternGenerator::new(self.image, self.unit_shape, self.pattern_shape);
        let (rows, cols) = full.window_dims(tile_rows, tile_cols)?;
        let (unit_rows, unit_cols) = self.unit_shape;
        let (n, m) = self.pattern_shape;

        let mut ids = Array2::zeros((rows, cols));
        for row in 0..rows {
            for col in 0..cols {
                let r0 = row * unit_rows;
                let c0 = col * unit_cols;
                let mut block = Array3::from_elem(
                    (n * unit_rows, m * unit_cols, channels),
                    BLANK_INTENSITY,
                );
                // Top tile row of the window
                block
                    .slice_mut(s![..unit_rows, .., ..])
                    .assign(&self.image.slice(s![r0..r0 + unit_rows, c0..c0 + m * unit_cols, ..]));
                // Left tile column of the window
                block
                    .slice_mut(s![.., ..unit_cols, ..])
                    .assign(&self.image.slice(s![r0..r0 + n * unit_rows, c0..c0 + unit_cols, ..]));
                let id = catalog.register(Unit::new(block));
                if let Some(cell) = ids.get_mut([row, col]) {
                    *cell = id;
                }
            }
        }

        let blank = catalog.ensure_blank((n * unit_rows, m * unit_cols, channels), BLANK_INTENSITY);
        TiledGrid::new(ids, blank)
    }
}
