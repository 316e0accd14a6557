//! Request validation and routing to the selected detector

use crate::detection::GridDetector;
use crate::detection::auto::AutoBestDetector;
use crate::detection::boundary::BoundaryScoringDetector;
use crate::detection::cancellation::CancellationToken;
use crate::detection::cluster::ClusterCentroidDetector;
use crate::detection::distance::DistanceTransformDetector;
use crate::detection::region::RegionGrowingDetector;
use crate::detection::request::{DetectionParams, DetectionRequest};
use crate::detection::result::{DetectionResult, GridAlgorithm};
use crate::detection::uniform::UniformGridDetector;
use crate::io::configuration::MINIMUM_CELL_SIZE;
use crate::spatial::SpriteSheet;
use image::RgbaImage;

impl GridAlgorithm {
    /// The detector implementing this algorithm
    pub fn detector(self) -> &'static dyn GridDetector {
        match self {
            Self::AutoBest => &AutoBestDetector,
            Self::UniformGrid => &UniformGridDetector,
            Self::BoundaryScoring => &BoundaryScoringDetector,
            Self::ClusterCentroid => &ClusterCentroidDetector,
            Self::DistanceTransform => &DistanceTransformDetector,
            Self::RegionGrowing => &RegionGrowingDetector,
        }
    }
}

/// Why a request was turned away before any detector ran
pub fn validate_request(request: &DetectionRequest<'_>) -> Option<&'static str> {
    let expected = u64::from(request.width) * u64::from(request.height);
    if request.pixels.is_empty() {
        Some("empty pixel buffer")
    } else if request.pixels.len() as u64 != expected {
        Some("pixel count does not match width * height")
    } else if request.width < MINIMUM_CELL_SIZE || request.height < MINIMUM_CELL_SIZE {
        Some("texture smaller than the minimum cell size")
    } else if !request.params.has_valid_threshold() {
        Some("alpha threshold outside [0, 1)")
    } else {
        None
    }
}

/// Infer the sprite grid of a texture
///
/// Malformed requests and textures without a detectable grid both come back
/// as the invalid result tagged with the requested algorithm; this never
/// panics and never errors.
pub fn detect_grid(request: &DetectionRequest<'_>, cancel: &CancellationToken) -> DetectionResult {
    let invalid = DetectionResult::invalid(request.algorithm);
    if let Some(reason) = validate_request(request) {
        log::debug!("rejected {}x{} request: {reason}", request.width, request.height);
        return invalid;
    }
    let Some(sheet) = SpriteSheet::new(request.pixels, request.width, request.height) else {
        return invalid;
    };

    log::debug!(
        "detecting {}x{} sheet with {} (alpha {}, count {:?})",
        request.width,
        request.height,
        request.algorithm,
        request.params.alpha_threshold,
        request.params.expected_count()
    );
    request
        .algorithm
        .detector()
        .detect(&sheet, &request.params, cancel)
}

/// [`detect_grid`] over a decoded `image` buffer
pub fn detect_grid_rgba(
    image: &RgbaImage,
    algorithm: GridAlgorithm,
    params: DetectionParams,
    cancel: &CancellationToken,
) -> DetectionResult {
    let pixels: Vec<[u8; 4]> = image.pixels().map(|pixel| pixel.0).collect();
    let request = DetectionRequest {
        pixels: &pixels,
        width: image.width(),
        height: image.height(),
        algorithm,
        params,
    };
    detect_grid(&request, cancel)
}
