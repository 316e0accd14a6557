//! Grid detectors and the dispatch that selects between them
//!
//! Every detector reads the same borrowed [`SpriteSheet`] and returns a
//! [`DetectionResult`]. None of them fail: "no grid found" is the invalid
//! result, tagged with the detector that gave up.

/// Cheapest-first race over the other detectors
pub mod auto;
/// Transparent grid-line scoring with count inference
pub mod boundary;
/// Cooperative cancellation token
pub mod cancellation;
/// Connected-component centroid clustering
pub mod cluster;
/// Request validation and algorithm dispatch
pub mod dispatch;
/// Chamfer distance field peaks
pub mod distance;
/// Seeded region growing
pub mod region;
/// Request and parameter types
pub mod request;
/// Result and algorithm tag types
pub mod result;
/// Even division by a known sprite count
pub mod uniform;

use crate::spatial::SpriteSheet;

pub use cancellation::CancellationToken;
pub use dispatch::{detect_grid, detect_grid_rgba};
pub use request::{DetectionParams, DetectionRequest};
pub use result::{DetectionResult, GridAlgorithm};

/// A single grid inference strategy
///
/// Implementations are stateless; everything they need arrives through
/// `detect`, which must return rather than panic on any input the sheet
/// constructor accepts.
pub trait GridDetector: Sync {
    /// Tag carried by every result this detector produces
    fn algorithm(&self) -> GridAlgorithm;

    /// Infer a cell size, polling `cancel` between expensive steps
    fn detect(
        &self,
        sheet: &SpriteSheet<'_>,
        params: &DetectionParams,
        cancel: &CancellationToken,
    ) -> DetectionResult;
}
