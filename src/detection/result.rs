//! Detection outcome value type and the algorithm tag it carries

use crate::io::configuration::MINIMUM_CELL_SIZE;
use std::fmt;

/// Grid inference strategy selectable by callers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum GridAlgorithm {
    /// Race the other detectors cheapest-first and keep the most confident
    #[default]
    AutoBest,
    /// Divide the texture evenly by a caller-supplied sprite count
    UniformGrid,
    /// Score candidate grid lines by how much transparency they cross
    BoundaryScoring,
    /// Cluster connected-component centroids into rows and columns
    ClusterCentroid,
    /// Locate sprite centres as peaks of a chamfer distance field
    DistanceTransform,
    /// Grow regions from intensity seeds and cluster their centroids
    RegionGrowing,
}

impl GridAlgorithm {
    /// Stable human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            Self::AutoBest => "AutoBest",
            Self::UniformGrid => "UniformGrid",
            Self::BoundaryScoring => "BoundaryScoring",
            Self::ClusterCentroid => "ClusterCentroid",
            Self::DistanceTransform => "DistanceTransform",
            Self::RegionGrowing => "RegionGrowing",
        }
    }
}

impl fmt::Display for GridAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inferred cell size with a confidence, produced by every detector
///
/// A result is valid exactly when both cell edges reach
/// [`MINIMUM_CELL_SIZE`]; the constructor collapses anything smaller to the
/// invalid shape (zero size, zero confidence) so the two can never disagree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionResult {
    cell_width: u32,
    cell_height: u32,
    confidence: f64,
    algorithm: GridAlgorithm,
}

impl DetectionResult {
    /// Build a result, clamping confidence into `[0, 1]`
    pub fn new(cell_width: u32, cell_height: u32, confidence: f64, algorithm: GridAlgorithm) -> Self {
        if cell_width < MINIMUM_CELL_SIZE || cell_height < MINIMUM_CELL_SIZE {
            return Self::invalid(algorithm);
        }
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            cell_width,
            cell_height,
            confidence,
            algorithm,
        }
    }

    /// The "no grid" outcome, tagged with the algorithm that produced it
    pub const fn invalid(algorithm: GridAlgorithm) -> Self {
        Self {
            cell_width: 0,
            cell_height: 0,
            confidence: 0.0,
            algorithm,
        }
    }

    /// Cell width in pixels (zero when invalid)
    pub const fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Cell height in pixels (zero when invalid)
    pub const fn cell_height(&self) -> u32 {
        self.cell_height
    }

    /// Confidence in `[0, 1]`
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Algorithm tag
    pub const fn algorithm(&self) -> GridAlgorithm {
        self.algorithm
    }

    /// Whether both cell edges reach the minimum cell size
    pub const fn is_valid(&self) -> bool {
        self.cell_width >= MINIMUM_CELL_SIZE && self.cell_height >= MINIMUM_CELL_SIZE
    }

    /// Same grid and confidence under a different algorithm tag
    #[must_use]
    pub const fn retagged(self, algorithm: GridAlgorithm) -> Self {
        Self { algorithm, ..self }
    }

    /// Columns and rows this grid produces on a texture (whole cells only)
    pub const fn grid_dimensions(&self, texture_width: u32, texture_height: u32) -> Option<(u32, u32)> {
        if self.is_valid() {
            Some((
                texture_width / self.cell_width,
                texture_height / self.cell_height,
            ))
        } else {
            None
        }
    }
}

impl fmt::Display for DetectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(
                f,
                "{}x{} via {} (confidence {:.2})",
                self.cell_width, self.cell_height, self.algorithm, self.confidence
            )
        } else {
            write!(f, "no grid detected ({})", self.algorithm)
        }
    }
}
