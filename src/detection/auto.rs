//! Cheapest-first race over the individual detectors

use crate::detection::GridDetector;
use crate::detection::cancellation::CancellationToken;
use crate::detection::request::DetectionParams;
use crate::detection::result::{DetectionResult, GridAlgorithm};
use crate::io::configuration::AUTO_BEST_EARLY_STOP_CONFIDENCE;
use crate::spatial::SpriteSheet;

/// Order in which AutoBest tries the detectors
pub const RACE_ORDER: [GridAlgorithm; 4] = [
    GridAlgorithm::BoundaryScoring,
    GridAlgorithm::ClusterCentroid,
    GridAlgorithm::DistanceTransform,
    GridAlgorithm::RegionGrowing,
];

/// Runs each detector in [`RACE_ORDER`] and keeps the most confident result
///
/// The first valid result at or above
/// [`AUTO_BEST_EARLY_STOP_CONFIDENCE`] ends the race. Otherwise the
/// uniform division is tried last when a sprite count is known. Ties keep
/// the earlier detector, and whatever wins is retagged as AutoBest.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoBestDetector;

impl GridDetector for AutoBestDetector {
    fn algorithm(&self) -> GridAlgorithm {
        GridAlgorithm::AutoBest
    }

    fn detect(
        &self,
        sheet: &SpriteSheet<'_>,
        params: &DetectionParams,
        cancel: &CancellationToken,
    ) -> DetectionResult {
        let mut best: Option<DetectionResult> = None;
        let mut consider = |result: DetectionResult| {
            let improves = best.is_none_or(|current| result.confidence() > current.confidence());
            if result.is_valid() && improves {
                best = Some(result);
            }
        };

        for algorithm in RACE_ORDER {
            if cancel.is_cancelled() {
                log::debug!("AutoBest cancelled before {algorithm}");
                break;
            }
            let result = algorithm.detector().detect(sheet, params, cancel);
            log::debug!("{algorithm}: {result}");
            if result.is_valid() && result.confidence() >= AUTO_BEST_EARLY_STOP_CONFIDENCE {
                return result.retagged(self.algorithm());
            }
            consider(result);
        }

        if params.expected_count().is_some() && !cancel.is_cancelled() {
            let result = GridAlgorithm::UniformGrid.detector().detect(sheet, params, cancel);
            log::debug!("{}: {result}", GridAlgorithm::UniformGrid);
            consider(result);
        }

        best.map_or_else(
            || DetectionResult::invalid(self.algorithm()),
            |result| result.retagged(self.algorithm()),
        )
    }
}
