//! Sprite sheet grid detection from raw RGBA pixel data
//!
//! Given a texture and optional hints (alpha threshold, expected sprite
//! count), infer the cell width and height of the grid the sprites were
//! packed on. Several independent detectors are available, each with its
//! own confidence score, plus an orchestrator that races them and keeps
//! the most confident answer.
//!
//! ```no_run
//! use spritegrid::{CancellationToken, DetectionRequest, GridAlgorithm, detect_grid};
//!
//! let pixels = vec![[0_u8; 4]; 64 * 64];
//! let request = DetectionRequest::new(&pixels, 64, 64)
//!     .with_algorithm(GridAlgorithm::AutoBest)
//!     .with_expected_sprite_count(Some(16));
//! let result = detect_grid(&request, &CancellationToken::new());
//! if result.is_valid() {
//!     println!("{}x{}", result.cell_width(), result.cell_height());
//! }
//! ```

#![forbid(unsafe_code)]

/// Pixel analysis helpers shared by the detectors
pub mod analysis;
/// Grid detectors, the AutoBest orchestrator and the detection entry point
pub mod detection;
/// Image files, command line, fixtures and configuration
pub mod io;
/// Descriptive statistics
pub mod math;
/// Sheet views, rectangles and visited masks
pub mod spatial;

pub use detection::{
    CancellationToken, DetectionParams, DetectionRequest, DetectionResult, GridAlgorithm,
    GridDetector, detect_grid, detect_grid_rgba,
};
pub use io::error::{Result, SpriteGridError};
