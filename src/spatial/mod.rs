//! Spatial data structures: canonical units, the catalog, and tiled grids

/// Tiled grids of unit ids and direction handling
pub mod grid;
/// Unit blocks and the deduplicating catalog
pub mod units;

pub use grid::{Direction, TiledGrid};
pub use units::{Unit, UnitCatalog};
