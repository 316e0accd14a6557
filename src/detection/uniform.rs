//! Even division of the texture by a caller-supplied sprite count

use crate::analysis::inference::max_columns;
use crate::detection::GridDetector;
use crate::detection::cancellation::CancellationToken;
use crate::detection::request::DetectionParams;
use crate::detection::result::{DetectionResult, GridAlgorithm};
use crate::io::configuration::{MINIMUM_CELL_SIZE, UNIFORM_ASPECT_RANGE, UNIFORM_LAYOUT_WEIGHT};
use crate::spatial::SpriteSheet;

/// One `cols × rows` factorisation of the sprite count
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformLayout {
    /// Columns in the layout
    pub cols: u32,
    /// Rows in the layout
    pub rows: u32,
    /// Cell width (texture width / cols, floored)
    pub cell_width: u32,
    /// Cell height (texture height / rows, floored)
    pub cell_height: u32,
    /// Whether both divisions are exact
    pub exact: bool,
    /// Lower is better: cell squareness plus texture-aspect misalignment
    pub score: f64,
}

/// Best layout for `count` cells, exact divisions preferred over inexact ones
pub fn best_uniform_layout(count: u32, texture_width: u32, texture_height: u32) -> Option<UniformLayout> {
    let mut best: Option<UniformLayout> = None;
    let texture_aspect = f64::from(texture_width) / f64::from(texture_height.max(1));
    for cols in (1..=max_columns(count, texture_width)).filter(|cols| count % cols == 0) {
        let rows = count / cols;
        let (cell_width, cell_height) = (texture_width / cols, texture_height / rows);
        if cell_width < MINIMUM_CELL_SIZE || cell_height < MINIMUM_CELL_SIZE {
            continue;
        }
        let cell_squareness = (f64::from(cell_width) / f64::from(cell_height)).ln().abs();
        let layout_aspect = f64::from(cols) / f64::from(rows);
        let misalignment = (layout_aspect / texture_aspect).ln().abs();
        let candidate = UniformLayout {
            cols,
            rows,
            cell_width,
            cell_height,
            exact: texture_width % cols == 0 && texture_height % rows == 0,
            score: UNIFORM_LAYOUT_WEIGHT.mul_add(misalignment, cell_squareness),
        };
        let better = best.is_none_or(|current| {
            (candidate.exact && !current.exact)
                || (candidate.exact == current.exact && candidate.score < current.score)
        });
        if better {
            best = Some(candidate);
        }
    }
    best
}

/// Divides the texture evenly by the expected sprite count
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformGridDetector;

impl GridDetector for UniformGridDetector {
    fn algorithm(&self) -> GridAlgorithm {
        GridAlgorithm::UniformGrid
    }

    fn detect(
        &self,
        sheet: &SpriteSheet<'_>,
        params: &DetectionParams,
        cancel: &CancellationToken,
    ) -> DetectionResult {
        let invalid = DetectionResult::invalid(self.algorithm());
        let Some(count) = params.expected_count() else {
            return invalid;
        };
        if cancel.is_cancelled() {
            return invalid;
        }
        let Some(layout) = best_uniform_layout(count, sheet.width(), sheet.height()) else {
            log::debug!("no uniform layout for {count} sprites on {}x{}", sheet.width(), sheet.height());
            return invalid;
        };

        let mut confidence = if layout.exact { 1.0 } else { 0.5 };
        let aspect = f64::from(layout.cell_width) / f64::from(layout.cell_height);
        if !(UNIFORM_ASPECT_RANGE.0..=UNIFORM_ASPECT_RANGE.1).contains(&aspect) {
            confidence *= 0.5;
        }
        DetectionResult::new(layout.cell_width, layout.cell_height, confidence, self.algorithm())
    }
}
