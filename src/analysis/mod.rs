//! Source analysis: unit generation strategies and learned statistics

/// Frequency and adjacency statistics over a unit catalog
pub mod distribution;
/// Tiling and pattern generators that populate the catalog
pub mod generators;

pub use distribution::Distribution;
pub use generators::{PatternGenerator, TileGenerator, UnitGenerator, UpLeftPatternGenerator};
