//! Grid detection from connected-component centroids

use crate::analysis::bounds::detect_sprite_bounds;
use crate::analysis::clustering::{CenterEvidence, ClusterSettings, ClusteredGrid, cluster_grid};
use crate::analysis::transparency::TransparencyProfile;
use crate::detection::GridDetector;
use crate::detection::cancellation::CancellationToken;
use crate::detection::request::DetectionParams;
use crate::detection::result::{DetectionResult, GridAlgorithm};
use crate::io::configuration::{CLUSTER_CONFIDENCE_WEIGHTS, MINIMUM_CELL_SIZE};
use crate::spatial::{SpriteRect, SpriteSheet};

/// Weighted blend of centre consistency, count agreement and sprite fit
pub fn cluster_confidence(grid: &ClusteredGrid) -> f64 {
    let (consistency, ratio, fit) = CLUSTER_CONFIDENCE_WEIGHTS;
    consistency.mul_add(grid.consistency, ratio.mul_add(grid.count_ratio, fit * grid.fit))
}

/// Groups sprite bounding-box centres into rows and columns
#[derive(Clone, Copy, Debug, Default)]
pub struct ClusterCentroidDetector;

impl GridDetector for ClusterCentroidDetector {
    fn algorithm(&self) -> GridAlgorithm {
        GridAlgorithm::ClusterCentroid
    }

    fn detect(
        &self,
        sheet: &SpriteSheet<'_>,
        params: &DetectionParams,
        cancel: &CancellationToken,
    ) -> DetectionResult {
        let threshold = params.threshold_byte();
        let bounds = detect_sprite_bounds(sheet, threshold, cancel);
        if cancel.is_cancelled() || bounds.is_empty() {
            return DetectionResult::invalid(self.algorithm());
        }

        let profile = params
            .snap_to_texture_divisor
            .then(|| TransparencyProfile::from_sheet(sheet, threshold));
        let evidence = CenterEvidence {
            centers: bounds.iter().map(SpriteRect::center).collect(),
            bounds,
        };
        let settings = ClusterSettings {
            gap_floor: f64::from(MINIMUM_CELL_SIZE),
            expected_count: params.expected_count(),
            snap_profile: profile.as_ref(),
        };

        cluster_grid(&evidence, sheet.width(), sheet.height(), &settings).map_or_else(
            || DetectionResult::invalid(self.algorithm()),
            |grid| {
                DetectionResult::new(
                    grid.cell_width,
                    grid.cell_height,
                    cluster_confidence(&grid),
                    self.algorithm(),
                )
            },
        )
    }
}
