//! Command-line interface for batch synthesis of PNG files

use crate::algorithm::{EntropyMode, Solver, SolverOptions, UpdateMode, WeightingMode};
use crate::analysis::{
    Distribution, PatternGenerator, TileGenerator, UnitGenerator, UpLeftPatternGenerator,
};
use crate::io::configuration::{
    DEFAULT_OUTPUT_COLS, DEFAULT_OUTPUT_ROWS, DEFAULT_PATTERN_SIZE, DEFAULT_SEED,
    DEFAULT_UNIT_SIZE, OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{export_grid_as_png, load_image_array};
use crate::io::progress::ProgressManager;
use crate::spatial::UnitCatalog;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Which unit generation strategy splits the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GeneratorKind {
    /// Disjoint shape-sized tiles
    Tiling,
    /// Overlapping n×m windows of tiles
    Pattern,
    /// Overlapping upper-left L-shaped windows
    UpLeft,
}

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Synthesize grid images with wave function collapse"
)]
/// Command-line arguments for the synthesis tool
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Output grid rows, counted in units
    #[arg(long, default_value_t = DEFAULT_OUTPUT_ROWS)]
    pub rows: usize,

    /// Output grid columns, counted in units
    #[arg(long, default_value_t = DEFAULT_OUTPUT_COLS)]
    pub cols: usize,

    /// Unit height in pixels
    #[arg(long, default_value_t = DEFAULT_UNIT_SIZE)]
    pub unit_height: usize,

    /// Unit width in pixels
    #[arg(long, default_value_t = DEFAULT_UNIT_SIZE)]
    pub unit_width: usize,

    /// Unit generation strategy
    #[arg(short, long, value_enum, default_value_t = GeneratorKind::Tiling)]
    pub generator: GeneratorKind,

    /// Pattern window height in tiles (pattern and up-left generators)
    #[arg(long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_rows: usize,

    /// Pattern window width in tiles (pattern and up-left generators)
    #[arg(long, default_value_t = DEFAULT_PATTERN_SIZE)]
    pub pattern_cols: usize,

    /// Entropy metric for cell selection
    #[arg(short, long, value_enum, default_value_t = EntropyMode::UpLeft)]
    pub entropy: EntropyMode,

    /// Weighting policy for the collapse pick
    #[arg(short, long, value_enum, default_value_t = WeightingMode::Frequency)]
    pub weighting: WeightingMode,

    /// Propagation update policy
    #[arg(short, long, value_enum, default_value_t = UpdateMode::Chain)]
    pub propagation: UpdateMode,

    /// Roll back on contradictions instead of marking them blank
    #[arg(short, long)]
    pub backtrack: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// The solver configuration selected by the flags
    pub const fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            entropy: self.entropy,
            weighting: self.weighting,
            updating: self.propagation,
            backtrack: self.backtrack,
        }
    }
}

/// Orchestrates batch processing of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(std::ffi::OsStr::to_str) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(crate::io::error::path_error(
                    "Target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let read_error = |e| crate::io::error::AlgorithmError::FileSystem {
                path: self.cli.target.clone(),
                operation: "read directory",
                source: e,
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target).map_err(read_error)? {
                let path = entry.map_err(read_error)?.path();
                if path.extension().and_then(std::ffi::OsStr::to_str) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(crate::io::error::path_error(
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        if let Some(ref pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        self.set_phase(input_path, "loading");
        let image = load_image_array(input_path)?;

        self.set_phase(input_path, "splitting");
        let unit_shape = (self.cli.unit_height, self.cli.unit_width);
        let pattern_shape = (self.cli.pattern_rows, self.cli.pattern_cols);
        let mut catalog = UnitCatalog::new();
        let training_grid = match self.cli.generator {
            GeneratorKind::Tiling => TileGenerator::new(&image, unit_shape).generate(&mut catalog),
            GeneratorKind::Pattern => {
                PatternGenerator::new(&image, unit_shape, pattern_shape).generate(&mut catalog)
            }
            GeneratorKind::UpLeft => {
                UpLeftPatternGenerator::new(&image, unit_shape, pattern_shape)
                    .generate(&mut catalog)
            }
        }?;
        log::info!(
            "{}: {} distinct units from a {}x{} training grid",
            input_path.display(),
            catalog.len(),
            training_grid.rows(),
            training_grid.cols()
        );

        self.set_phase(input_path, "training");
        let mut distribution = Distribution::new(catalog.len());
        distribution.train(&training_grid)?;

        self.set_phase(input_path, "solving");
        let solver = Solver::new(&distribution, self.cli.solver_options())?;
        let generated = solver.generate(self.cli.rows, self.cli.cols, self.cli.seed)?;

        if !self.cli.backtrack {
            let contradictions = generated
                .ids()
                .iter()
                .filter(|&&id| id == generated.blank())
                .count();
            if contradictions > 0 {
                log::warn!(
                    "{}: {contradictions} contradiction cells rendered blank (enable --backtrack \
                     to resolve them)",
                    input_path.display()
                );
            }
        }

        self.set_phase(input_path, "exporting");
        let output_path = Self::get_output_path(input_path);
        export_grid_as_png(
            &generated,
            &catalog,
            output_path
                .to_str()
                .ok_or_else(|| crate::io::error::path_error("Invalid output path"))?,
        )?;

        if let Some(ref pm) = self.progress_manager {
            pm.complete_file();
        }

        Ok(())
    }

    fn set_phase(&self, input_path: &Path, phase: &str) {
        if let Some(ref pm) = self.progress_manager {
            pm.set_phase(input_path, phase);
        }
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
