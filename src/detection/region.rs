//! Grid detection by seeded region growing
//!
//! The texture is tiled into seed windows. The brightest opaque pixel of
//! each window seeds a 4-connected fill over opaque pixels; the grown
//! regions' centroids are then clustered like component centroids.

use crate::analysis::clustering::{CenterEvidence, ClusterSettings, cluster_grid};
use crate::analysis::transparency::TransparencyProfile;
use crate::detection::GridDetector;
use crate::detection::cancellation::CancellationToken;
use crate::detection::request::DetectionParams;
use crate::detection::result::{DetectionResult, GridAlgorithm};
use crate::io::configuration::{
    MAX_REGIONS, MIN_REGION_AREA, MIN_SEED_WINDOW, MINIMUM_CELL_SIZE, SEED_WINDOW_DIVISOR,
};
use crate::math::statistics::coefficient_of_variation;
use crate::spatial::{SpriteRect, SpriteSheet, VisitedMask};

const NEIGHBOURS_4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// One grown region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrownRegion {
    /// Bounding rectangle of the region's pixels
    pub bounds: SpriteRect,
    /// Mean pixel centre
    pub centroid: (f64, f64),
    /// Number of pixels in the region
    pub area: usize,
}

/// Side of the square seed windows for a texture
pub fn seed_window(texture_width: u32, texture_height: u32) -> u32 {
    (texture_width.min(texture_height) / SEED_WINDOW_DIVISOR).max(MIN_SEED_WINDOW)
}

// Brightest opaque, unvisited pixel of a window; first in scan order on ties
fn window_seed(
    sheet: &SpriteSheet<'_>,
    threshold: u8,
    visited: &VisitedMask,
    origin: (u32, u32),
    window: u32,
) -> Option<(u32, u32)> {
    let x_end = (origin.0 + window).min(sheet.width());
    let y_end = (origin.1 + window).min(sheet.height());
    let mut best: Option<((u32, u32), u32)> = None;
    for y in origin.1..y_end {
        for x in origin.0..x_end {
            if !sheet.is_opaque(x, y, threshold) || visited.is_visited(x, y) {
                continue;
            }
            let intensity = sheet.intensity(x, y, threshold);
            if best.is_none_or(|(_, brightest)| intensity > brightest) {
                best = Some(((x, y), intensity));
            }
        }
    }
    best.map(|(seed, _)| seed)
}

fn grow(
    sheet: &SpriteSheet<'_>,
    threshold: u8,
    seed: (u32, u32),
    visited: &mut VisitedMask,
    stack: &mut Vec<(u32, u32)>,
) -> Option<GrownRegion> {
    if !visited.visit(seed.0, seed.1) {
        return None;
    }
    stack.clear();
    stack.push(seed);
    let (mut min_x, mut min_y) = seed;
    let (mut max_x, mut max_y) = seed;
    let (mut sum_x, mut sum_y) = (0.0, 0.0);
    let mut area = 0_usize;

    while let Some((x, y)) = stack.pop() {
        area += 1;
        sum_x += f64::from(x);
        sum_y += f64::from(y);
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);

        for (dx, dy) in NEIGHBOURS_4 {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            if sheet.is_opaque(nx, ny, threshold) && visited.visit(nx, ny) {
                stack.push((nx, ny));
            }
        }
    }

    (area >= MIN_REGION_AREA).then(|| GrownRegion {
        bounds: SpriteRect::from_extents(min_x, min_y, max_x, max_y),
        centroid: (sum_x / area as f64 + 0.5, sum_y / area as f64 + 0.5),
        area,
    })
}

/// Grow regions from the brightest pixel of every seed window
///
/// At most [`MAX_REGIONS`] regions are kept; regions smaller than
/// [`MIN_REGION_AREA`] pixels are discarded. Returns `None` if cancelled.
pub fn grow_regions(
    sheet: &SpriteSheet<'_>,
    threshold: u8,
    cancel: &CancellationToken,
) -> Option<Vec<GrownRegion>> {
    let window = seed_window(sheet.width(), sheet.height());
    let mut visited = VisitedMask::new(sheet.width(), sheet.height());
    let mut stack = Vec::new();
    let mut regions = Vec::new();

    for origin_y in (0..sheet.height()).step_by(window as usize) {
        if cancel.is_cancelled() {
            return None;
        }
        for origin_x in (0..sheet.width()).step_by(window as usize) {
            if regions.len() >= MAX_REGIONS {
                log::debug!("region cap of {MAX_REGIONS} reached");
                return Some(regions);
            }
            let Some(seed) = window_seed(sheet, threshold, &visited, (origin_x, origin_y), window)
            else {
                continue;
            };
            if let Some(region) = grow(sheet, threshold, seed, &mut visited, &mut stack) {
                regions.push(region);
            }
        }
    }

    Some(regions)
}

/// How alike the regions' sizes are, in `[0, 1]`
///
/// One minus the mean coefficient of variation of widths and heights,
/// floored at zero.
pub fn size_uniformity(regions: &[GrownRegion]) -> f64 {
    let widths: Vec<u32> = regions.iter().map(|region| region.bounds.width).collect();
    let heights: Vec<u32> = regions.iter().map(|region| region.bounds.height).collect();
    let (Some(cv_width), Some(cv_height)) = (
        coefficient_of_variation(&widths),
        coefficient_of_variation(&heights),
    ) else {
        return 0.0;
    };
    1.0 - f64::midpoint(cv_width, cv_height).min(1.0)
}

/// Clusters centroids of regions grown from intensity seeds
#[derive(Clone, Copy, Debug, Default)]
pub struct RegionGrowingDetector;

impl GridDetector for RegionGrowingDetector {
    fn algorithm(&self) -> GridAlgorithm {
        GridAlgorithm::RegionGrowing
    }

    fn detect(
        &self,
        sheet: &SpriteSheet<'_>,
        params: &DetectionParams,
        cancel: &CancellationToken,
    ) -> DetectionResult {
        let invalid = DetectionResult::invalid(self.algorithm());
        let threshold = params.threshold_byte();
        let Some(regions) = grow_regions(sheet, threshold, cancel) else {
            log::debug!("region growing cancelled");
            return invalid;
        };
        if regions.is_empty() {
            return invalid;
        }

        let uniformity = size_uniformity(&regions);
        let profile = params
            .snap_to_texture_divisor
            .then(|| TransparencyProfile::from_sheet(sheet, threshold));
        let evidence = CenterEvidence {
            centers: regions.iter().map(|region| region.centroid).collect(),
            bounds: regions.iter().map(|region| region.bounds).collect(),
        };
        let settings = ClusterSettings {
            gap_floor: f64::from(MINIMUM_CELL_SIZE),
            expected_count: params.expected_count(),
            snap_profile: profile.as_ref(),
        };

        cluster_grid(&evidence, sheet.width(), sheet.height(), &settings).map_or(invalid, |grid| {
            DetectionResult::new(
                grid.cell_width,
                grid.cell_height,
                0.5f64.mul_add(uniformity, 0.5 * grid.fit),
                self.algorithm(),
            )
        })
    }
}
