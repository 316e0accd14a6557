//! Input/output: images on disk, the command line and shared configuration

/// Command-line parsing and batch processing
pub mod cli;
/// Detection tuning constants and defaults
pub mod configuration;
/// Error types for file and image operations
pub mod error;
/// Synthetic sprite sheets
pub mod fixtures;
/// PNG loading and saving
pub mod image;
/// Progress display for multi-file runs
pub mod progress;
