//! Batch progress display for multi-file runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the files of one run, plus result output that does
/// not tear the bar
///
/// Single-file and quiet runs get no bar; lines go straight to stdout.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter for `file_count` files
    pub fn new(file_count: usize, show_progress: bool) -> Self {
        let bar = (show_progress && file_count > 1).then(|| {
            let bar = ProgressBar::new(file_count as u64);
            bar.set_style(BATCH_STYLE.clone());
            bar
        });
        Self { bar }
    }

    /// Show which file is being processed
    pub fn start_file(&self, path: &Path) {
        if let Some(ref bar) = self.bar {
            let name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            bar.set_message(name);
        }
    }

    /// Advance the bar by one file
    pub fn complete_file(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Print a result line above the bar
    // Allow print for the per-file result lines, which are the program's output
    #[allow(clippy::print_stdout)]
    pub fn report(&self, line: &str) {
        match self.bar {
            Some(ref bar) => bar.println(line),
            _ => println!("{line}"),
        }
    }

    /// Clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
