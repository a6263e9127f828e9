//! Validates unit generation strategies and the statistics learned from training grids

use ndarray::{Array3, arr2, s};
use wavetile::analysis::{
    Distribution, PatternGenerator, TileGenerator, UnitGenerator, UpLeftPatternGenerator,
};
use wavetile::spatial::{Direction, TiledGrid, Unit, UnitCatalog};

/// Build an image whose 2x2 pixel tiles are uniform blocks of the given values
fn tiled_image(tile_values: &[[f64; 2]; 2]) -> Array3<f64> {
    let mut image = Array3::zeros((4, 4, 4));
    for (tile_row, row_values) in tile_values.iter().enumerate() {
        for (tile_col, &value) in row_values.iter().enumerate() {
            image
                .slice_mut(s![
                    tile_row * 2..tile_row * 2 + 2,
                    tile_col * 2..tile_col * 2 + 2,
                    ..
                ])
                .fill(value);
        }
    }
    image
}

#[test]
fn test_tiling_registers_distinct_units_and_blank() -> wavetile::Result<()> {
    let image = tiled_image(&[[0.0, 0.25], [0.5, 0.75]]);
    let mut catalog = UnitCatalog::new();
    let grid = TileGenerator::new(&image, (2, 2)).generate(&mut catalog)?;

    assert_eq!((grid.rows(), grid.cols()), (2, 2));
    // Four distinct source tiles plus the blank unit
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.blank_id(), Some(4));
    assert_eq!(grid.blank(), 4);
    Ok(())
}

#[test]
fn test_tiling_reconstructs_source_blocks() -> wavetile::Result<()> {
    let image = tiled_image(&[[0.0, 0.25], [0.5, 0.75]]);
    let mut catalog = UnitCatalog::new();
    let grid = TileGenerator::new(&image, (2, 2)).generate(&mut catalog)?;

    for row in 0..2 {
        for col in 0..2 {
            let id = grid.id_at(row, col).ok_or_else(|| {
                wavetile::AlgorithmError::InvalidUnitId {
                    id: 0,
                    unit_count: catalog.len(),
                }
            })?;
            let expected = Unit::new(
                image
                    .slice(s![row * 2..row * 2 + 2, col * 2..col * 2 + 2, ..])
                    .to_owned(),
            );
            assert_eq!(catalog.get(id), Some(&expected));
        }
    }
    Ok(())
}

#[test]
fn test_tiling_reuses_ids_for_repeated_tiles() -> wavetile::Result<()> {
    let image = tiled_image(&[[0.5, 0.5], [0.5, 0.25]]);
    let mut catalog = UnitCatalog::new();
    let grid = TileGenerator::new(&image, (2, 2)).generate(&mut catalog)?;

    assert_eq!(grid.id_at(0, 0), grid.id_at(0, 1));
    assert_eq!(grid.id_at(0, 0), grid.id_at(1, 0));
    assert_ne!(grid.id_at(0, 0), grid.id_at(1, 1));
    // Three distinct units: the repeated tile, the odd one, and blank
    assert_eq!(catalog.len(), 3);
    Ok(())
}

#[test]
fn test_tiling_truncates_indivisible_sources() -> wavetile::Result<()> {
    let image = Array3::zeros((5, 5, 4));
    let mut catalog = UnitCatalog::new();
    let grid = TileGenerator::new(&image, (2, 2)).generate(&mut catalog)?;
    assert_eq!((grid.rows(), grid.cols()), (2, 2));
    Ok(())
}

#[test]
fn test_tiling_rejects_degenerate_unit_shapes() {
    let image = Array3::zeros((4, 4, 4));
    let mut catalog = UnitCatalog::new();
    assert!(TileGenerator::new(&image, (0, 2)).generate(&mut catalog).is_err());
    assert!(TileGenerator::new(&image, (8, 8)).generate(&mut catalog).is_err());
}

#[test]
fn test_pattern_windows_slide_with_unit_stride() -> wavetile::Result<()> {
    // 6x6 pixels with 2x2 units gives a 3x3 tile grid; 2x2 windows of
    // tiles leave a 2x2 grid of window positions.
    let image = Array3::zeros((6, 6, 4));
    let mut catalog = UnitCatalog::new();
    let grid = PatternGenerator::new(&image, (2, 2), (2, 2)).generate(&mut catalog)?;

    assert_eq!((grid.rows(), grid.cols()), (2, 2));
    let blank = catalog
        .blank_id()
        .and_then(|id| catalog.get(id))
        .map(Unit::shape);
    assert_eq!(blank, Some((4, 4, 4)));
    Ok(())
}

#[test]
fn test_pattern_rejects_windows_larger_than_the_tile_grid() {
    let image = Array3::zeros((6, 6, 4));
    let mut catalog = UnitCatalog::new();
    let result = PatternGenerator::new(&image, (2, 2), (4, 4)).generate(&mut catalog);
    assert!(result.is_err());
}

#[test]
fn test_up_left_patterns_blank_the_window_interior() -> wavetile::Result<()> {
    let image = Array3::from_elem((6, 6, 4), 0.25);
    let mut catalog = UnitCatalog::new();
    let grid = UpLeftPatternGenerator::new(&image, (2, 2), (2, 2)).generate(&mut catalog)?;

    let id = grid.id_at(0, 0).unwrap_or_default();
    let unit = catalog.get(id).ok_or(wavetile::AlgorithmError::InvalidUnitId {
        id,
        unit_count: catalog.len(),
    })?;
    // Top row and left column carry source samples, the rest is background
    let top = unit.samples().get((0, 3, 0)).copied().unwrap_or_default();
    let left = unit.samples().get((3, 0, 0)).copied().unwrap_or_default();
    let interior = unit.samples().get((3, 3, 0)).copied().unwrap_or_default();
    assert!((top - 0.25).abs() < f64::EPSILON);
    assert!((left - 0.25).abs() < f64::EPSILON);
    assert!((interior - 1.0).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn test_up_left_patterns_merge_more_windows_than_full_patterns() -> wavetile::Result<()> {
    // A source with variation only in the window interiors collapses to
    // fewer distinct L-shaped units than full-window patterns.
    let image = tiled_image(&[[0.0, 0.25], [0.5, 0.75]]);
    let mut full_catalog = UnitCatalog::new();
    PatternGenerator::new(&image, (1, 1), (2, 2)).generate(&mut full_catalog)?;
    let mut l_catalog = UnitCatalog::new();
    UpLeftPatternGenerator::new(&image, (1, 1), (2, 2)).generate(&mut l_catalog)?;

    assert!(l_catalog.len() <= full_catalog.len());
    Ok(())
}

#[test]
fn test_training_counts_frequencies_and_adjacency() -> wavetile::Result<()> {
    // Ids 0..3 laid out [[0, 1], [2, 3]] with blank id 4
    let grid = TiledGrid::new(arr2(&[[0, 1], [2, 3]]), 4)?;
    let mut distribution = Distribution::new(5);
    distribution.train(&grid)?;

    for id in 0..4 {
        assert_eq!(distribution.frequency(id), 1);
    }
    assert_eq!(distribution.frequency(4), 0);

    assert!(distribution.compatible(0, Direction::Right).contains(1));
    assert!(distribution.compatible(0, Direction::Down).contains(2));
    assert!(distribution.compatible(3, Direction::Up).contains(1));
    assert!(distribution.compatible(3, Direction::Left).contains(2));
    assert!(!distribution.compatible(0, Direction::Right).contains(2));

    assert_eq!(distribution.adjacency_count(0, Direction::Right, 1), 1);
    assert_eq!(distribution.adjacency_count(1, Direction::Left, 0), 1);
    Ok(())
}

#[test]
fn test_training_records_blank_adjacency_at_source_edges() -> wavetile::Result<()> {
    let grid = TiledGrid::new(arr2(&[[0, 1], [2, 3]]), 4)?;
    let mut distribution = Distribution::new(5);
    distribution.train(&grid)?;

    // Top-row units see blank above, and blank sees them below
    assert!(distribution.compatible(0, Direction::Up).contains(4));
    assert!(distribution.compatible(1, Direction::Up).contains(4));
    assert!(distribution.compatible(4, Direction::Down).contains(0));
    assert!(distribution.compatible(4, Direction::Down).contains(1));
    assert!(!distribution.compatible(4, Direction::Down).contains(2));

    // Left-column units see blank to their left
    assert!(distribution.compatible(4, Direction::Right).contains(0));
    assert!(distribution.compatible(4, Direction::Right).contains(2));
    assert_eq!(distribution.adjacency_count(4, Direction::Down, 0), 1);
    Ok(())
}

#[test]
fn test_training_accumulates_across_grids() -> wavetile::Result<()> {
    let grid = TiledGrid::new(arr2(&[[0, 1]]), 2)?;
    let mut distribution = Distribution::new(3);
    distribution.train(&grid)?;
    distribution.train(&grid)?;

    assert_eq!(distribution.frequency(0), 2);
    assert_eq!(distribution.adjacency_count(0, Direction::Right, 1), 2);
    assert!(distribution.compatible(0, Direction::Right).contains(1));
    Ok(())
}

#[test]
fn test_training_order_does_not_matter() -> wavetile::Result<()> {
    let first = TiledGrid::new(arr2(&[[0, 1], [1, 0]]), 3)?;
    let second = TiledGrid::new(arr2(&[[2, 0]]), 3)?;

    let mut forward = Distribution::new(4);
    forward.train(&first)?;
    forward.train(&second)?;
    let mut reversed = Distribution::new(4);
    reversed.train(&second)?;
    reversed.train(&first)?;

    for id in 0..4 {
        assert_eq!(forward.frequency(id), reversed.frequency(id));
        for direction in Direction::ALL {
            assert_eq!(
                forward.compatible(id, direction),
                reversed.compatible(id, direction)
            );
            for neighbor in 0..4 {
                assert_eq!(
                    forward.adjacency_count(id, direction, neighbor),
                    reversed.adjacency_count(id, direction, neighbor)
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_training_rejects_out_of_range_ids() -> wavetile::Result<()> {
    let grid = TiledGrid::new(arr2(&[[0, 7]]), 2)?;
    let mut distribution = Distribution::new(3);
    assert!(distribution.train(&grid).is_err());
    Ok(())
}

#[test]
fn test_training_rejects_conflicting_blank_ids() -> wavetile::Result<()> {
    let mut distribution = Distribution::new(4);
    distribution.train(&TiledGrid::new(arr2(&[[0, 1]]), 3)?)?;
    let conflicting = TiledGrid::new(arr2(&[[0, 1]]), 2)?;
    assert!(distribution.train(&conflicting).is_err());
    Ok(())
}
