//! Algorithm constants and runtime configuration defaults

/// Background sample value of the blank unit
///
/// Contradiction markers and out-of-bounds padding render with this value,
/// so unresolved cells show up as uniform white blocks.
pub const BLANK_INTENSITY: f64 = 1.0;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Guards against pathological backtracking blowup
/// Maximum number of backtrack rewinds per generation run
pub const BACKTRACK_STEP_LIMIT: usize = 1_000_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default output grid rows
pub const DEFAULT_OUTPUT_ROWS: usize = 20;

/// Default output grid columns
pub const DEFAULT_OUTPUT_COLS: usize = 20;

/// Default unit height and width in pixels
pub const DEFAULT_UNIT_SIZE: usize = 16;

/// Default pattern window height and width in tiles
pub const DEFAULT_PATTERN_SIZE: usize = 3;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
