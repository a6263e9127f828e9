//! CLI entry point for wave function collapse image synthesis

use clap::Parser;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use wavetile::io::cli::{Cli, FileProcessor};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    let level = if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
