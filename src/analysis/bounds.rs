//! Connected-component extraction of opaque sprite regions
//!
//! Regions are 8-connected and filled with an explicit stack so very large
//! sprites cannot overflow the call stack.

use crate::detection::cancellation::CancellationToken;
use crate::io::configuration::{
    MAX_COMPONENT_MIN_AREA, MAX_COMPONENT_MIN_DIMENSION, MIN_COMPONENT_MIN_AREA,
    MIN_COMPONENT_MIN_DIMENSION,
};
use crate::spatial::{SpriteRect, SpriteSheet, VisitedMask};

const NEIGHBOURS_8: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Size floor separating real sprites from anti-aliasing speckle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComponentFilter {
    /// Minimum width and height of a kept region
    pub min_dimension: u32,
    /// Minimum bounding-box area of a kept region
    pub min_area: u32,
}

impl ComponentFilter {
    /// Derive the filter from the texture size
    ///
    /// Larger textures tolerate larger speckle; both floors are capped so
    /// genuinely small sprites on big sheets survive.
    pub fn for_texture(width: u32, height: u32) -> Self {
        let min_dimension = (width.min(height) / 64)
            .clamp(MIN_COMPONENT_MIN_DIMENSION, MAX_COMPONENT_MIN_DIMENSION);
        let area = u64::from(width) * u64::from(height) / 4096;
        let min_area = u32::try_from(area)
            .unwrap_or(u32::MAX)
            .clamp(MIN_COMPONENT_MIN_AREA, MAX_COMPONENT_MIN_AREA);
        Self {
            min_dimension,
            min_area,
        }
    }

    /// Whether a region's bounds pass the filter
    pub fn accepts(&self, rect: &SpriteRect) -> bool {
        rect.width >= self.min_dimension
            && rect.height >= self.min_dimension
            && rect.area() >= u64::from(self.min_area)
    }
}

/// Find the bounding rectangles of all opaque 8-connected regions
///
/// A pixel is opaque when its alpha exceeds `threshold`. The scan polls the
/// cancellation token once per row; a cancelled scan returns the regions
/// collected so far. Rectangles come out in scan order (top-to-bottom by
/// first pixel, then left-to-right).
pub fn detect_sprite_bounds(
    sheet: &SpriteSheet<'_>,
    threshold: u8,
    cancel: &CancellationToken,
) -> Vec<SpriteRect> {
    let (width, height) = (sheet.width(), sheet.height());
    let filter = ComponentFilter::for_texture(width, height);
    let mut visited = VisitedMask::new(width, height);
    let mut stack: Vec<(u32, u32)> = Vec::new();
    let mut bounds = Vec::new();

    for y in 0..height {
        if cancel.is_cancelled() {
            log::debug!("sprite bound extraction cancelled at row {y}");
            break;
        }
        for x in 0..width {
            if !sheet.is_opaque(x, y, threshold) || !visited.visit(x, y) {
                continue;
            }
            let rect = flood_fill(sheet, threshold, (x, y), &mut visited, &mut stack);
            if filter.accepts(&rect) {
                bounds.push(rect);
            }
        }
    }

    bounds
}

// The seed must already be marked visited
fn flood_fill(
    sheet: &SpriteSheet<'_>,
    threshold: u8,
    seed: (u32, u32),
    visited: &mut VisitedMask,
    stack: &mut Vec<(u32, u32)>,
) -> SpriteRect {
    let (mut min_x, mut min_y) = seed;
    let (mut max_x, mut max_y) = seed;
    stack.clear();
    stack.push(seed);

    while let Some((x, y)) = stack.pop() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);

        for (dx, dy) in NEIGHBOURS_8 {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if sheet.is_opaque(nx, ny, threshold) && visited.visit(nx, ny) {
                stack.push((nx, ny));
            }
        }
    }

    SpriteRect::from_extents(min_x, min_y, max_x, max_y)
}
