//! Grid layout inference from a sprite or cell count
//!
//! Given how many cells a texture holds, pick the columns × rows
//! factorisation whose cells best match the texture's shape.

use crate::io::configuration::{
    APPROX_COUNT_MISMATCH_WEIGHT, APPROX_OVERCOUNT_WEIGHT, EXTREME_ASPECT_RATIO, MINIMUM_CELL_SIZE,
    STRIP_CELL_ASPECT_LIMIT, STRIP_EXTRA_LINE_PENALTY, STRIP_TEXTURE_ASPECT,
    USER_COUNT_ASPECT_STEPS, USER_COUNT_BASE_CONFIDENCE, USER_COUNT_STRIP_CONFIDENCE,
};

/// Shape class of a texture, by width/height ratio
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureShape {
    /// Neither dimension dominates
    Square,
    /// Noticeably wider than tall
    WideStrip,
    /// Noticeably taller than wide
    TallStrip,
}

impl TextureShape {
    /// Classify a texture against an aspect threshold
    pub fn classify(width: u32, height: u32, threshold: f64) -> Self {
        let aspect = f64::from(width) / f64::from(height.max(1));
        if aspect > threshold {
            Self::WideStrip
        } else if aspect < 1.0 / threshold {
            Self::TallStrip
        } else {
            Self::Square
        }
    }
}

fn cell_aspect(cell_width: u32, cell_height: u32) -> f64 {
    f64::from(cell_width) / f64::from(cell_height.max(1))
}

// Distance from square cells, plus a per-line penalty on strips for every
// row (wide) or column (tall) beyond the first
fn aspect_error(cols: u32, rows: u32, cell_width: u32, cell_height: u32, shape: TextureShape) -> f64 {
    let square_error = (cell_aspect(cell_width, cell_height) - 1.0).abs();
    match shape {
        TextureShape::Square => square_error,
        TextureShape::WideStrip => {
            STRIP_EXTRA_LINE_PENALTY.mul_add(f64::from(rows - 1), square_error)
        }
        TextureShape::TallStrip => {
            STRIP_EXTRA_LINE_PENALTY.mul_add(f64::from(cols - 1), square_error)
        }
    }
}

// Single row (wide) or single column (tall) with rounded cell extents
fn strip_layout(count: u32, texture_width: u32, texture_height: u32) -> Option<(u32, u32)> {
    let layout = match TextureShape::classify(texture_width, texture_height, EXTREME_ASPECT_RATIO) {
        TextureShape::Square => return None,
        TextureShape::WideStrip => (
            (f64::from(texture_width) / f64::from(count)).round() as u32,
            texture_height,
        ),
        TextureShape::TallStrip => (
            texture_width,
            (f64::from(texture_height) / f64::from(count)).round() as u32,
        ),
    };
    let aspect = cell_aspect(layout.0, layout.1);
    let within_limits = (1.0 / STRIP_CELL_ASPECT_LIMIT..=STRIP_CELL_ASPECT_LIMIT).contains(&aspect);
    (within_limits && layout.0 >= MINIMUM_CELL_SIZE && layout.1 >= MINIMUM_CELL_SIZE)
        .then_some(layout)
}

/// Largest column count worth trying for `count` cells across `texture_width`
///
/// More columns than this leave cells narrower than [`MINIMUM_CELL_SIZE`],
/// so huge counts cost no more than the texture allows.
pub fn max_columns(count: u32, texture_width: u32) -> u32 {
    count.min(texture_width / MINIMUM_CELL_SIZE)
}

/// Infer the cell size of a texture holding exactly `count` cells
///
/// Extreme strips (beyond 4:1 either way) first try a single row or column
/// with cell extents rounded to the nearest pixel. Otherwise every factor
/// pair `cols × rows = count` that divides both texture dimensions into
/// cells of at least the minimum size is scored by its aspect error, lowest
/// wins. Returns `None` when no factor pair qualifies.
pub fn infer_grid_from_count(count: u32, texture_width: u32, texture_height: u32) -> Option<(u32, u32)> {
    if count == 0 || texture_width == 0 || texture_height == 0 {
        return None;
    }
    if let Some(layout) = strip_layout(count, texture_width, texture_height) {
        return Some(layout);
    }

    let shape = TextureShape::classify(texture_width, texture_height, STRIP_TEXTURE_ASPECT);
    let mut best: Option<((u32, u32), f64)> = None;
    for cols in (1..=max_columns(count, texture_width)).filter(|cols| count % cols == 0) {
        let rows = count / cols;
        if texture_width % cols != 0 || texture_height % rows != 0 {
            continue;
        }
        let (cell_width, cell_height) = (texture_width / cols, texture_height / rows);
        if cell_width < MINIMUM_CELL_SIZE || cell_height < MINIMUM_CELL_SIZE {
            continue;
        }
        let error = aspect_error(cols, rows, cell_width, cell_height, shape);
        if best.is_none_or(|(_, best_error)| error < best_error) {
            best = Some(((cell_width, cell_height), error));
        }
    }

    best.map(|(layout, _)| layout)
}

/// Infer a cell size for roughly `count` cells when no exact division exists
///
/// Rows are the ceiling of `count / cols`, cells are the floor of the
/// texture divided by the layout. Candidates score
/// `10·|actual − expected| + 15·max(0, actual − expected) + aspect error`,
/// so empty trailing cells cost more than missing ones.
pub fn try_infer_approximate_grid(
    count: u32,
    texture_width: u32,
    texture_height: u32,
) -> Option<(u32, u32)> {
    if count == 0 || texture_width == 0 || texture_height == 0 {
        return None;
    }

    let shape = TextureShape::classify(texture_width, texture_height, STRIP_TEXTURE_ASPECT);
    let mut best: Option<((u32, u32), f64)> = None;
    for cols in 1..=max_columns(count, texture_width) {
        let rows = count.div_ceil(cols);
        let (cell_width, cell_height) = (texture_width / cols, texture_height / rows);
        if cell_width < MINIMUM_CELL_SIZE || cell_height < MINIMUM_CELL_SIZE {
            continue;
        }
        let actual = i64::from(cols) * i64::from(rows);
        let difference = actual - i64::from(count);
        let score = APPROX_OVERCOUNT_WEIGHT.mul_add(
            difference.max(0) as f64,
            APPROX_COUNT_MISMATCH_WEIGHT * difference.abs() as f64,
        ) + aspect_error(cols, rows, cell_width, cell_height, shape);
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some(((cell_width, cell_height), score));
        }
    }

    best.map(|(layout, _)| layout)
}

/// Exact inference first, approximate as the fallback
pub fn infer_grid_with_fallback(
    count: u32,
    texture_width: u32,
    texture_height: u32,
) -> Option<(u32, u32)> {
    infer_grid_from_count(count, texture_width, texture_height)
        .or_else(|| try_infer_approximate_grid(count, texture_width, texture_height))
}

/// Confidence for a grid derived from a caller-supplied sprite count
///
/// Starts at 0.9 and steps down as the cells drift from square (by
/// `|ln(aspect)|`), bottoming out at 0.5. Strip textures whose cells run
/// along the strip earn a small bonus, capped at 0.95.
pub fn user_count_confidence(
    cell_width: u32,
    cell_height: u32,
    texture_width: u32,
    texture_height: u32,
) -> f64 {
    let deviation = cell_aspect(cell_width, cell_height).ln().abs();
    let mut confidence = USER_COUNT_ASPECT_STEPS
        .iter()
        .find(|(threshold, _)| deviation > *threshold)
        .map_or(USER_COUNT_BASE_CONFIDENCE, |&(_, stepped)| stepped);

    let cols = texture_width / cell_width.max(1);
    let rows = texture_height / cell_height.max(1);
    let follows_strip = match TextureShape::classify(texture_width, texture_height, STRIP_TEXTURE_ASPECT) {
        TextureShape::Square => false,
        TextureShape::WideStrip => cols > rows,
        TextureShape::TallStrip => rows > cols,
    };
    if follows_strip {
        confidence = (confidence + 0.05).min(USER_COUNT_STRIP_CONFIDENCE);
    }
    confidence
}
