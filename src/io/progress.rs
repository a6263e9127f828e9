//! Progress display for batch generation runs

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display across a batch of source files
///
/// One bar tracks files; per-file phase messages (splitting, training,
/// solving, exporting) are surfaced through the bar's message slot.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub const fn new() -> Self {
        Self { bar: None }
    }

    /// Initialize the batch bar for a known file count
    pub fn initialize(&mut self, file_count: usize) {
        let bar = ProgressBar::new(file_count as u64);
        bar.set_style(BATCH_STYLE.clone());
        self.bar = Some(bar);
    }

    /// Show the file currently being processed
    pub fn start_file(&self, path: &Path) {
        if let Some(bar) = &self.bar {
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            bar.set_message(name);
        }
    }

    /// Report the current pipeline phase for the active file
    pub fn set_phase(&self, path: &Path, phase: &str) {
        if let Some(bar) = &self.bar {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            bar.set_message(format!("{name}: {phase}"));
        }
    }

    /// Mark the active file as completed
    pub fn complete_file(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message("All files processed");
        }
    }
}
