//! Detection inputs: the pixel buffer, its shape and the scalar parameters

use crate::detection::result::GridAlgorithm;
use crate::io::configuration::DEFAULT_ALPHA_THRESHOLD;
use crate::spatial::sheet::alpha_threshold_byte;

/// Scalar parameters every detector receives
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionParams {
    /// Fraction of full alpha at or below which a pixel counts as transparent
    pub alpha_threshold: f32,
    /// Number of sprites the caller expects, if known
    pub expected_sprite_count: Option<u32>,
    /// Whether non-divisor cell sizes may be snapped to texture divisors
    pub snap_to_texture_divisor: bool,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            expected_sprite_count: None,
            snap_to_texture_divisor: true,
        }
    }
}

impl DetectionParams {
    /// Alpha threshold as the byte compared against pixel alpha
    pub fn threshold_byte(&self) -> u8 {
        alpha_threshold_byte(self.alpha_threshold)
    }

    /// Expected sprite count, with zero treated as unknown
    pub fn expected_count(&self) -> Option<u32> {
        self.expected_sprite_count.filter(|&count| count > 0)
    }

    /// Whether the alpha threshold lies in `[0, 1)`
    pub fn has_valid_threshold(&self) -> bool {
        (0.0..1.0).contains(&self.alpha_threshold)
    }
}

/// Everything one `detect_grid` call consumes
#[derive(Clone, Copy, Debug)]
pub struct DetectionRequest<'a> {
    /// Row-major RGBA8 pixels, `width * height` entries
    pub pixels: &'a [[u8; 4]],
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
    /// Algorithm to run
    pub algorithm: GridAlgorithm,
    /// Scalar parameters shared by the detectors
    pub params: DetectionParams,
}

impl<'a> DetectionRequest<'a> {
    /// Request AutoBest detection with default parameters
    pub fn new(pixels: &'a [[u8; 4]], width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
            algorithm: GridAlgorithm::AutoBest,
            params: DetectionParams::default(),
        }
    }

    /// Select the algorithm
    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: GridAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the alpha threshold
    #[must_use]
    pub const fn with_alpha_threshold(mut self, alpha_threshold: f32) -> Self {
        self.params.alpha_threshold = alpha_threshold;
        self
    }

    /// Set (or clear) the expected sprite count
    #[must_use]
    pub const fn with_expected_sprite_count(mut self, count: Option<u32>) -> Self {
        self.params.expected_sprite_count = count;
        self
    }

    /// Enable or disable snapping to texture divisors
    #[must_use]
    pub const fn with_snap_to_texture_divisor(mut self, snap: bool) -> Self {
        self.params.snap_to_texture_divisor = snap;
        self
    }
}
