//! Validates domain bitsets, deterministic generation, propagation, and backtracking

use ndarray::{Array3, arr2, s};
use wavetile::algorithm::bitset::UnitBitset;
use wavetile::algorithm::{
    EntropyMode, Solver, SolverOptions, UpdateMode, WeightingMode,
};
use wavetile::analysis::{Distribution, TileGenerator, UnitGenerator};
use wavetile::io::error::AlgorithmError;
use wavetile::math::probability::{normalize, shannon_entropy};
use wavetile::spatial::{Direction, TiledGrid, UnitCatalog};

#[test]
fn test_bitset_operations() {
    let mut set1 = UnitBitset::new(10);
    set1.insert(1);
    set1.insert(3);
    set1.insert(5);

    let mut set2 = UnitBitset::new(10);
    set2.insert(3);
    set2.insert(5);
    set2.insert(7);

    let intersection = set1.intersection(&set2);
    assert_eq!(intersection.to_vec(), vec![3, 5]);
    assert!(!intersection.is_empty());
    assert_eq!(intersection.count(), 2);
}

#[test]
fn test_bitset_remove_reports_presence() {
    let mut set = UnitBitset::new(4);
    set.insert(2);
    assert!(set.remove(2));
    assert!(!set.remove(2));
    assert!(!set.remove(99));
    assert!(set.is_empty());
}

#[test]
fn test_bitset_sole_member() {
    let mut set = UnitBitset::new(8);
    assert_eq!(set.sole_member(), None);
    set.insert(5);
    assert_eq!(set.sole_member(), Some(5));
    set.insert(6);
    assert_eq!(set.sole_member(), None);
}

/// Distribution trained on a horizontal A B A B strip (ids 0 and 1, blank 2)
fn alternating_distribution() -> wavetile::Result<Distribution> {
    let grid = TiledGrid::new(arr2(&[[0, 1, 0, 1]]), 2)?;
    let mut distribution = Distribution::new(3);
    distribution.train(&grid)?;
    Ok(distribution)
}

/// Distribution trained on a 2x2 checkerboard of ids 0 and 1 (blank 2)
fn checkerboard_distribution() -> wavetile::Result<Distribution> {
    let grid = TiledGrid::new(arr2(&[[0, 1], [1, 0]]), 2)?;
    let mut distribution = Distribution::new(3);
    distribution.train(&grid)?;
    Ok(distribution)
}

#[test]
fn test_generation_is_deterministic_for_a_seed() -> wavetile::Result<()> {
    let distribution = checkerboard_distribution()?;
    let solver = Solver::new(&distribution, SolverOptions::default())?;

    let first = solver.generate(4, 4, 42)?;
    let second = solver.generate(4, 4, 42)?;
    assert_eq!(first.ids(), second.ids());
    Ok(())
}

#[test]
fn test_backtracking_reproduces_the_alternating_strip() -> wavetile::Result<()> {
    let distribution = alternating_distribution()?;
    let options = SolverOptions {
        backtrack: true,
        ..SolverOptions::default()
    };
    let solver = Solver::new(&distribution, options)?;

    // The learned statistics admit exactly one 1x4 assignment; every seed
    // must find it once contradictory picks are rolled back.
    for seed in 0..10 {
        let grid = solver.generate(1, 4, seed)?;
        let ids: Vec<usize> = grid.ids().iter().copied().collect();
        assert_eq!(ids, vec![0, 1, 0, 1], "seed {seed}");
    }
    Ok(())
}

#[test]
fn test_backtracking_output_has_no_adjacency_violations() -> wavetile::Result<()> {
    let distribution = checkerboard_distribution()?;
    for entropy in [EntropyMode::UpLeft, EntropyMode::Shannon] {
        for weighting in [
            WeightingMode::Uniform,
            WeightingMode::Frequency,
            WeightingMode::Context,
        ] {
            for updating in [UpdateMode::Chain, UpdateMode::Adjacent] {
                let options = SolverOptions {
                    entropy,
                    weighting,
                    updating,
                    backtrack: true,
                };
                let solver = Solver::new(&distribution, options)?;
                for seed in 0..25 {
                    let grid = solver.generate(5, 5, seed)?;
                    assert_no_adjacency_violations(&grid, &distribution, seed);
                }
            }
        }
    }
    Ok(())
}

fn assert_no_adjacency_violations(grid: &TiledGrid, distribution: &Distribution, seed: u64) {
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let id = grid.id_at(row, col).unwrap_or_default();
            assert_ne!(id, grid.blank(), "seed {seed}");
            if col + 1 < grid.cols() {
                let right = grid.id_at(row, col + 1).unwrap_or_default();
                assert!(
                    distribution.compatible(id, Direction::Right).contains(right),
                    "seed {seed}"
                );
            }
            if row + 1 < grid.rows() {
                let down = grid.id_at(row + 1, col).unwrap_or_default();
                assert!(
                    distribution.compatible(id, Direction::Down).contains(down),
                    "seed {seed}"
                );
            }
        }
    }
}

#[test]
fn test_single_unit_source_saturates_the_output() -> wavetile::Result<()> {
    let grid = TiledGrid::new(arr2(&[[0, 0], [0, 0]]), 1)?;
    let mut distribution = Distribution::new(2);
    distribution.train(&grid)?;
    let solver = Solver::new(&distribution, SolverOptions::default())?;

    let generated = solver.generate(3, 3, 0)?;
    assert!(generated.ids().iter().all(|&id| id == 0));
    Ok(())
}

#[test]
fn test_unsatisfiable_statistics_exhaust_backtracking() -> wavetile::Result<()> {
    // Training on a single [A, B] strip admits no 1x3 assignment: the left
    // edge forces A, the right edge forces B, and the middle cell has no
    // id compatible with both.
    let grid = TiledGrid::new(arr2(&[[0, 1]]), 2)?;
    let mut distribution = Distribution::new(3);
    distribution.train(&grid)?;
    let options = SolverOptions {
        backtrack: true,
        ..SolverOptions::default()
    };
    let solver = Solver::new(&distribution, options)?;

    let result = solver.generate(1, 3, 42);
    assert!(matches!(
        result,
        Err(AlgorithmError::Unsatisfiable {
            rows: 1,
            cols: 3,
            seed: 42
        })
    ));
    Ok(())
}

#[test]
fn test_contradictions_render_blank_without_backtracking() -> wavetile::Result<()> {
    let grid = TiledGrid::new(arr2(&[[0, 1]]), 2)?;
    let mut distribution = Distribution::new(3);
    distribution.train(&grid)?;
    let solver = Solver::new(&distribution, SolverOptions::default())?;

    let generated = solver.generate(1, 3, 42)?;
    let blanks = generated
        .ids()
        .iter()
        .filter(|&&id| id == generated.blank())
        .count();
    assert!(blanks >= 1);
    Ok(())
}

#[test]
fn test_adjacent_updates_also_complete_on_easy_sources() -> wavetile::Result<()> {
    let distribution = checkerboard_distribution()?;
    let options = SolverOptions {
        updating: UpdateMode::Adjacent,
        backtrack: true,
        ..SolverOptions::default()
    };
    let solver = Solver::new(&distribution, options)?;

    let generated = solver.generate(2, 2, 3)?;
    assert!(generated.ids().iter().all(|&id| id != generated.blank()));
    Ok(())
}

#[test]
fn test_heuristic_combinations_all_solve_the_strip() -> wavetile::Result<()> {
    let distribution = alternating_distribution()?;
    for entropy in [EntropyMode::UpLeft, EntropyMode::Shannon] {
        for weighting in [
            WeightingMode::Uniform,
            WeightingMode::Frequency,
            WeightingMode::Context,
        ] {
            let options = SolverOptions {
                entropy,
                weighting,
                updating: UpdateMode::Chain,
                backtrack: true,
            };
            let solver = Solver::new(&distribution, options)?;
            let grid = solver.generate(1, 4, 5)?;
            let ids: Vec<usize> = grid.ids().iter().copied().collect();
            assert_eq!(ids, vec![0, 1, 0, 1]);
        }
    }
    Ok(())
}

#[test]
fn test_vertical_bar_source_generates_full_bar_columns() -> wavetile::Result<()> {
    // Dark background with one bright 2px-wide vertical bar: the learned
    // statistics only ever stack bar tiles on bar tiles, so generated bars
    // must span whole columns and never touch horizontally.
    let mut image = Array3::zeros((8, 8, 4));
    image.slice_mut(s![.., 4..6, ..]).fill(0.9);

    let mut catalog = UnitCatalog::new();
    let training = TileGenerator::new(&image, (2, 2)).generate(&mut catalog)?;
    let mut distribution = Distribution::new(catalog.len());
    distribution.train(&training)?;

    let background = training.id_at(0, 0).unwrap_or_default();
    let bar = training.id_at(0, 2).unwrap_or_default();
    assert_ne!(background, bar);

    let options = SolverOptions {
        backtrack: true,
        ..SolverOptions::default()
    };
    let solver = Solver::new(&distribution, options)?;
    for seed in [0, 11, 42] {
        let grid = solver.generate(4, 6, seed)?;
        for col in 0..grid.cols() {
            let top = grid.id_at(0, col).unwrap_or_default();
            for row in 0..grid.rows() {
                assert_eq!(grid.id_at(row, col), Some(top), "seed {seed}");
            }
            if top == bar && col + 1 < grid.cols() {
                assert_eq!(grid.id_at(0, col + 1), Some(background));
            }
        }
        // Source edges were always background, so output edges are too
        assert_eq!(grid.id_at(0, 0), Some(background));
        assert_eq!(grid.id_at(0, grid.cols() - 1), Some(background));
    }
    Ok(())
}

#[test]
fn test_shannon_entropy_increases_with_uniformity() {
    let uniform = shannon_entropy(&[1.0, 1.0, 1.0, 1.0]);
    let skewed = shannon_entropy(&[10.0, 1.0, 1.0, 1.0]);
    let certain = shannon_entropy(&[5.0]);
    assert!(uniform > skewed);
    assert!(skewed > certain);
    assert!(certain.abs() < f64::EPSILON);
}

#[test]
fn test_zero_weights_normalize_to_nothing() {
    assert!(normalize(&[0.0, 0.0]).is_empty());
    assert!(normalize(&[]).is_empty());
    let probabilities = normalize(&[1.0, 3.0]);
    let total: f64 = probabilities.iter().sum();
    assert!((total - 1.0).abs() < 1e-12);
}

#[test]
fn test_solver_rejects_untrained_distributions() {
    let distribution = Distribution::new(3);
    assert!(Solver::new(&distribution, SolverOptions::default()).is_err());
}

#[test]
fn test_solver_rejects_degenerate_output_sizes() -> wavetile::Result<()> {
    let distribution = checkerboard_distribution()?;
    let solver = Solver::new(&distribution, SolverOptions::default())?;
    assert!(solver.generate(0, 4, 0).is_err());
    assert!(solver.generate(4, 0, 0).is_err());
    assert!(solver.generate(100_000, 4, 0).is_err());
    Ok(())
}
