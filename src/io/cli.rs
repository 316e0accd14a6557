//! Command-line interface for detecting sprite grids in PNG files

use crate::detection::cancellation::CancellationToken;
use crate::detection::dispatch::detect_grid;
use crate::detection::request::{DetectionParams, DetectionRequest};
use crate::detection::result::{DetectionResult, GridAlgorithm};
use crate::io::configuration::DEFAULT_ALPHA_THRESHOLD;
use crate::io::error::{Result, SpriteGridError, invalid_parameter, invalid_target};
use crate::io::image::load_texture;
use crate::io::progress::ProgressReporter;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "spritegrid")]
#[command(
    author,
    version,
    about = "Detect the sprite grid of sprite-sheet PNGs"
)]
/// Command-line arguments for the grid detection tool
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Detection algorithm
    #[arg(short, long, value_enum, default_value_t = GridAlgorithm::AutoBest)]
    pub algorithm: GridAlgorithm,

    /// Alpha threshold in [0, 1); pixels at or below it are transparent
    #[arg(long, default_value_t = DEFAULT_ALPHA_THRESHOLD)]
    pub alpha: f32,

    /// Number of sprites on the sheet, if known
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Keep cell sizes that do not divide the texture
    #[arg(long)]
    pub no_snap: bool,

    /// Cancel a detection that runs longer than this many milliseconds
    #[arg(short, long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level selected by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Detection parameters taken from the flags
    pub const fn params(&self) -> DetectionParams {
        DetectionParams {
            alpha_threshold: self.alpha,
            expected_sprite_count: self.count,
            snap_to_texture_divisor: !self.no_snap,
        }
    }

    /// Reject flag values detection would silently turn into invalid results
    ///
    /// # Errors
    ///
    /// Returns [`SpriteGridError::InvalidParameter`] for an alpha threshold
    /// outside `[0, 1)` or a zero timeout
    pub fn validate(&self) -> Result<()> {
        if !self.params().has_valid_threshold() {
            return Err(invalid_parameter("alpha", &self.alpha, &"must lie in [0, 1)"));
        }
        if self.timeout_ms == Some(0) {
            return Err(invalid_parameter("timeout-ms", &0, &"must be positive"));
        }
        Ok(())
    }
}

/// Orchestrates detection over every PNG the target names
pub struct FileProcessor {
    cli: Cli,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Detect every target file and print one line per file
    ///
    /// # Errors
    ///
    /// Returns an error if the flags are invalid, the target cannot be read,
    /// or an image fails to decode
    pub fn process(&self) -> Result<()> {
        self.cli.validate()?;
        let files = self.collect_files()?;
        let progress = ProgressReporter::new(files.len(), self.cli.should_show_progress());

        for file in &files {
            progress.start_file(file);
            let line = self.describe_file(file)?;
            progress.report(&line);
            progress.complete_file();
        }

        progress.finish();
        Ok(())
    }

    /// PNG files named by the target, sorted
    ///
    /// # Errors
    ///
    /// Returns an error if the target is not a PNG file or a readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_png(target) {
                Ok(vec![target.clone()])
            } else {
                Err(invalid_target(target, "file must be a PNG image"))
            }
        } else if target.is_dir() {
            let read_error = |source| SpriteGridError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source,
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).map_err(read_error)? {
                let path = entry.map_err(read_error)?.path();
                if path.is_file() && is_png(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_target(target, "must be a PNG file or directory"))
        }
    }

    /// Run detection on one file under the configured timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be loaded
    pub fn detect_file(&self, path: &Path) -> Result<(DetectionResult, (u32, u32))> {
        let texture = load_texture(path)?;
        let request = DetectionRequest {
            pixels: &texture.pixels,
            width: texture.width,
            height: texture.height,
            algorithm: self.cli.algorithm,
            params: self.cli.params(),
        };

        let cancel = CancellationToken::new();
        let started = Instant::now();
        let result = match self.cli.timeout_ms {
            Some(timeout) => with_watchdog(&cancel, Duration::from_millis(timeout), || {
                detect_grid(&request, &cancel)
            }),
            None => detect_grid(&request, &cancel),
        };
        log::debug!("{} took {:?}", path.display(), started.elapsed());
        if cancel.is_cancelled() {
            log::warn!("{} hit the timeout; result may be partial", path.display());
        }

        Ok((result, (texture.width, texture.height)))
    }

    fn describe_file(&self, path: &Path) -> Result<String> {
        let (result, (width, height)) = self.detect_file(path)?;
        let name = path.file_name().unwrap_or_default().to_string_lossy();
        Ok(describe_result(&name, &result, width, height))
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("png"))
}

/// Cancel `cancel` if `work` outlives `timeout`
///
/// The watchdog thread exits as soon as `work` returns.
pub fn with_watchdog<T>(
    cancel: &CancellationToken,
    timeout: Duration,
    work: impl FnOnce() -> T,
) -> T {
    let (done, finished) = mpsc::channel::<()>();
    let token = cancel.clone();
    let watchdog = thread::spawn(move || {
        if matches!(finished.recv_timeout(timeout), Err(RecvTimeoutError::Timeout)) {
            log::debug!("timeout of {timeout:?} reached, cancelling detection");
            token.cancel();
        }
    });

    let output = work();
    drop(done);
    if watchdog.join().is_err() {
        log::warn!("timeout watchdog thread panicked");
    }
    output
}

/// One output line for a detection
pub fn describe_result(name: &str, result: &DetectionResult, width: u32, height: u32) -> String {
    match result.grid_dimensions(width, height) {
        Some((cols, rows)) => format!(
            "{name}: {}x{} cells ({cols}x{rows}) via {}, confidence {:.2}",
            result.cell_width(),
            result.cell_height(),
            result.algorithm(),
            result.confidence()
        ),
        None => format!("{name}: no grid detected"),
    }
}
