//! Grid detection by transparent boundaries
//!
//! The workhorse detector. A caller-supplied count is trusted outright.
//! Otherwise the connected components are counted and, when that count
//! produces a grid the sprites fit into, that grid is used. The count goes
//! through approximate inference too, so sheets whose gutters leave the
//! texture one pixel off a clean division still resolve. Only when both
//! shortcuts fail does the full search over candidate cell sizes run,
//! scoring each pair by how transparent its grid lines are.

use crate::analysis::bounds::detect_sprite_bounds;
use crate::analysis::candidates::candidate_cell_sizes;
use crate::analysis::fit::score_sprite_fit;
use crate::analysis::inference::{infer_grid_with_fallback, user_count_confidence};
use crate::analysis::transparency::{TransparencyProfile, score_with_profile, snap_cell_to_divisors};
use crate::detection::GridDetector;
use crate::detection::cancellation::CancellationToken;
use crate::detection::request::DetectionParams;
use crate::detection::result::{DetectionResult, GridAlgorithm};
use crate::io::configuration::{
    BOUNDARY_SCORE_FLOOR, CELL_COUNT_RANGE, CELL_SIZE_BONUS_PER_OCTAVE, EXCESSIVE_CELL_PENALTIES,
    MINIMUM_CELL_SIZE, MULTI_CELL_BONUS, POWER_OF_TWO_BONUS, SPRITE_FIT_ACCEPT,
    SPRITE_FIT_HARD_FLOOR, SQUARE_CELL_BONUS,
};
use crate::spatial::{SpriteRect, SpriteSheet};

/// Weight of sprite fit against line transparency for count-derived grids
const DETECTED_COUNT_FIT_WEIGHT: f64 = 0.6;
/// Ceiling on confidence for grids inferred from the detected sprite count
const DETECTED_COUNT_MAX_CONFIDENCE: f64 = 0.95;

/// Everything a candidate score depends on besides the cell size itself
pub struct CandidateContext<'s, 'p> {
    /// Sheet being searched
    pub sheet: &'s SpriteSheet<'p>,
    /// Per-line transparency of the sheet
    pub profile: &'s TransparencyProfile,
    /// Detected sprite bounds
    pub sprites: &'s [SpriteRect],
    /// Alpha threshold byte
    pub threshold: u8,
}

/// Score one candidate cell size, or `None` when it is rejected outright
///
/// Rejected candidates are those whose grid cuts through sprites badly or
/// whose cell count is far from the number of sprites found. The rest
/// start from boundary transparency times sprite fit and pick up the
/// multiplicative bonuses and penalties of the candidate search.
pub fn score_candidate(
    context: &CandidateContext<'_, '_>,
    cell_width: u32,
    cell_height: u32,
) -> Option<f64> {
    let (width, height) = (context.sheet.width(), context.sheet.height());
    if cell_width < MINIMUM_CELL_SIZE || cell_height < MINIMUM_CELL_SIZE {
        return None;
    }

    let fit = score_sprite_fit(context.sprites, cell_width, cell_height, width, height);
    if fit < SPRITE_FIT_HARD_FLOOR {
        return None;
    }

    let cols = width / cell_width;
    let rows = height / cell_height;
    let cells = cols * rows;
    let sprites = context.sprites.len() as f64;
    let cell_count = f64::from(cells);
    if cell_count < CELL_COUNT_RANGE.0 * sprites || cell_count > CELL_COUNT_RANGE.1 * sprites {
        return None;
    }

    let transparency = score_with_profile(
        context.sheet,
        context.profile,
        cell_width,
        cell_height,
        context.threshold,
    );
    let mut score = transparency * fit;
    let closeness = cell_count.min(sprites) / cell_count.max(sprites);
    score *= 0.5f64.mul_add(closeness, 0.5);

    if cols >= 2 {
        score *= MULTI_CELL_BONUS;
    }
    if rows >= 2 {
        score *= MULTI_CELL_BONUS;
    }
    if cell_width.is_power_of_two() && cell_height.is_power_of_two() {
        score *= POWER_OF_TWO_BONUS;
    }
    if cell_width == cell_height {
        score *= SQUARE_CELL_BONUS;
    }
    if let Some(&(_, penalty)) = EXCESSIVE_CELL_PENALTIES
        .iter()
        .find(|(limit, _)| cells > *limit)
    {
        score *= penalty;
    }

    let octaves = (f64::from(cell_width.min(cell_height)) / f64::from(MINIMUM_CELL_SIZE)).log2();
    score *= CELL_SIZE_BONUS_PER_OCTAVE.mul_add(octaves, 1.0);
    Some(score)
}

/// Confidence for a grid derived from the number of detected sprites
pub fn detected_count_confidence(fit: f64, transparency: f64) -> f64 {
    DETECTED_COUNT_FIT_WEIGHT
        .mul_add(fit, (1.0 - DETECTED_COUNT_FIT_WEIGHT) * transparency)
        .min(DETECTED_COUNT_MAX_CONFIDENCE)
}

/// Scores grid lines by the transparency they cross
#[derive(Clone, Copy, Debug, Default)]
pub struct BoundaryScoringDetector;

impl BoundaryScoringDetector {
    // Grid from the number of components, if the sprites sit well inside it
    fn from_detected_count(
        &self,
        context: &CandidateContext<'_, '_>,
        params: &DetectionParams,
    ) -> Option<DetectionResult> {
        let sheet = context.sheet;
        let texture = (sheet.width(), sheet.height());
        let count = u32::try_from(context.sprites.len()).ok()?;
        let mut cell = infer_grid_with_fallback(count, texture.0, texture.1)?;
        if params.snap_to_texture_divisor {
            cell = snap_cell_to_divisors(cell, context.profile, context.sprites, texture);
        }

        let fit = score_sprite_fit(context.sprites, cell.0, cell.1, texture.0, texture.1);
        if fit < SPRITE_FIT_ACCEPT {
            log::debug!("{count} detected sprites gave {}x{} with poor fit {fit:.2}", cell.0, cell.1);
            return None;
        }
        let transparency = score_with_profile(sheet, context.profile, cell.0, cell.1, context.threshold);
        Some(DetectionResult::new(
            cell.0,
            cell.1,
            detected_count_confidence(fit, transparency),
            self.algorithm(),
        ))
    }

    // Exhaustive search over candidate width × height pairs
    fn search_candidates(
        &self,
        context: &CandidateContext<'_, '_>,
        cancel: &CancellationToken,
    ) -> DetectionResult {
        let (width, height) = (context.sheet.width(), context.sheet.height());
        let heights = candidate_cell_sizes(height);
        let mut best: Option<((u32, u32), f64)> = None;

        for cell_width in candidate_cell_sizes(width) {
            if cancel.is_cancelled() {
                log::debug!("candidate search cancelled");
                return DetectionResult::invalid(self.algorithm());
            }
            for &cell_height in &heights {
                if cell_width == width && cell_height == height {
                    continue;
                }
                let Some(score) = score_candidate(context, cell_width, cell_height) else {
                    continue;
                };
                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some(((cell_width, cell_height), score));
                }
            }
        }

        match best {
            Some(((cell_width, cell_height), score)) if score >= BOUNDARY_SCORE_FLOOR => {
                log::trace!("best candidate {cell_width}x{cell_height} scored {score:.3}");
                DetectionResult::new(cell_width, cell_height, score, self.algorithm())
            }
            _ => DetectionResult::invalid(self.algorithm()),
        }
    }
}

impl GridDetector for BoundaryScoringDetector {
    fn algorithm(&self) -> GridAlgorithm {
        GridAlgorithm::BoundaryScoring
    }

    fn detect(
        &self,
        sheet: &SpriteSheet<'_>,
        params: &DetectionParams,
        cancel: &CancellationToken,
    ) -> DetectionResult {
        let (width, height) = (sheet.width(), sheet.height());

        if let Some(count) = params.expected_count() {
            if let Some((cell_width, cell_height)) = infer_grid_with_fallback(count, width, height) {
                let confidence = user_count_confidence(cell_width, cell_height, width, height);
                return DetectionResult::new(cell_width, cell_height, confidence, self.algorithm());
            }
            log::debug!("no layout holds {count} sprites on {width}x{height}, detecting instead");
        }

        let threshold = params.threshold_byte();
        let sprites = detect_sprite_bounds(sheet, threshold, cancel);
        if cancel.is_cancelled() || sprites.is_empty() {
            return DetectionResult::invalid(self.algorithm());
        }
        let profile = TransparencyProfile::from_sheet(sheet, threshold);
        let context = CandidateContext {
            sheet,
            profile: &profile,
            sprites: &sprites,
            threshold,
        };

        if sprites.len() >= 2
            && let Some(result) = self.from_detected_count(&context, params)
        {
            return result;
        }
        self.search_candidates(&context, cancel)
    }
}
