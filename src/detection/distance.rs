//! Grid detection from peaks of a chamfer distance field
//!
//! Every opaque pixel gets its approximate distance to the nearest
//! transparent pixel. Sprite centres sit on the local maxima of that field,
//! so the peaks can stand in for centroids even when sprites touch
//! diagonally and merge into one component.

use crate::analysis::bounds::detect_sprite_bounds;
use crate::analysis::clustering::{CenterEvidence, ClusterSettings, cluster_grid};
use crate::analysis::transparency::TransparencyProfile;
use crate::detection::GridDetector;
use crate::detection::cancellation::CancellationToken;
use crate::detection::request::DetectionParams;
use crate::detection::result::{DetectionResult, GridAlgorithm};
use crate::io::configuration::{
    CHAMFER_CARDINAL, CHAMFER_DIAGONAL, MIN_PEAK_SEPARATION, PEAK_SEPARATION_FACTOR,
};
use crate::spatial::SpriteSheet;
use ndarray::Array2;

/// Distance assigned to opaque pixels before propagation
pub const UNREACHED: u32 = u32::MAX / 2;

/// Peaks are grouped into lines with at least this tolerance, in pixels
const PEAK_GAP_FLOOR: f64 = 8.0;

const FORWARD_MASK: [(i64, i64, u32); 4] = [
    (-1, -1, CHAMFER_DIAGONAL),
    (0, -1, CHAMFER_CARDINAL),
    (1, -1, CHAMFER_DIAGONAL),
    (-1, 0, CHAMFER_CARDINAL),
];

const BACKWARD_MASK: [(i64, i64, u32); 4] = [
    (1, 1, CHAMFER_DIAGONAL),
    (0, 1, CHAMFER_CARDINAL),
    (-1, 1, CHAMFER_DIAGONAL),
    (1, 0, CHAMFER_CARDINAL),
];

/// A local maximum of the distance field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistancePeak {
    /// Pixel column
    pub x: u32,
    /// Pixel row
    pub y: u32,
    /// Chamfer distance at the pixel
    pub distance: u32,
}

impl DistancePeak {
    /// Centre of the peak pixel in continuous coordinates
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.x) + 0.5, f64::from(self.y) + 0.5)
    }
}

// Anything outside the field is background
fn field_value(field: &Array2<u32>, x: i64, y: i64) -> u32 {
    if x < 0 || y < 0 {
        return 0;
    }
    field.get([y as usize, x as usize]).copied().unwrap_or(0)
}

fn relax(field: &mut Array2<u32>, x: usize, y: usize, mask: &[(i64, i64, u32); 4]) {
    let Some(&current) = field.get([y, x]) else {
        return;
    };
    if current == 0 {
        return;
    }
    let best = mask
        .iter()
        .map(|&(dx, dy, weight)| {
            field_value(field, x as i64 + dx, y as i64 + dy).saturating_add(weight)
        })
        .fold(current, u32::min);
    if let Some(cell) = field.get_mut([y, x]) {
        *cell = best;
    }
}

/// Two-pass 3-4 chamfer distance from every opaque pixel to the background
///
/// The field is indexed `[row, column]`. Transparent pixels hold zero.
/// Returns `None` if cancelled between rows.
pub fn chamfer_distance(
    sheet: &SpriteSheet<'_>,
    threshold: u8,
    cancel: &CancellationToken,
) -> Option<Array2<u32>> {
    let (width, height) = (sheet.width() as usize, sheet.height() as usize);
    let mut field = Array2::from_shape_fn((height, width), |(y, x)| {
        if sheet.is_opaque(x as u32, y as u32, threshold) {
            UNREACHED
        } else {
            0
        }
    });

    for y in 0..height {
        if cancel.is_cancelled() {
            return None;
        }
        for x in 0..width {
            relax(&mut field, x, y, &FORWARD_MASK);
        }
    }
    for y in (0..height).rev() {
        if cancel.is_cancelled() {
            return None;
        }
        for x in (0..width).rev() {
            relax(&mut field, x, y, &BACKWARD_MASK);
        }
    }

    Some(field)
}

/// Pixels whose distance is positive and no smaller than any of their eight neighbours
pub fn local_maxima(field: &Array2<u32>) -> Vec<DistancePeak> {
    let mut peaks = Vec::new();
    for ((y, x), &distance) in field.indexed_iter() {
        if distance == 0 {
            continue;
        }
        let (xi, yi) = (x as i64, y as i64);
        let is_peak = (-1..=1_i64)
            .flat_map(|dy| (-1..=1_i64).map(move |dx| (dx, dy)))
            .filter(|&offset| offset != (0, 0))
            .all(|(dx, dy)| field_value(field, xi + dx, yi + dy) <= distance);
        if is_peak {
            peaks.push(DistancePeak {
                x: x as u32,
                y: y as u32,
                distance,
            });
        }
    }
    peaks
}

/// Keep the strongest peaks, dropping any within `radius` of one already kept
///
/// Peaks are visited strongest first, ties in scan order.
pub fn suppress_nearby_peaks(mut peaks: Vec<DistancePeak>, radius: f64) -> Vec<DistancePeak> {
    peaks.sort_by(|a, b| b.distance.cmp(&a.distance));
    let mut kept: Vec<DistancePeak> = Vec::new();
    for peak in peaks {
        let (px, py) = peak.center();
        let isolated = kept.iter().all(|other| {
            let (ox, oy) = other.center();
            (px - ox).hypot(py - oy) >= radius
        });
        if isolated {
            kept.push(peak);
        }
    }
    kept
}

/// Suppression radius for a texture with `peak_count` raw maxima
pub fn peak_separation(texture_width: u32, texture_height: u32, peak_count: usize) -> f64 {
    if peak_count == 0 {
        return MIN_PEAK_SEPARATION;
    }
    let area_per_peak = f64::from(texture_width) * f64::from(texture_height) / peak_count as f64;
    (PEAK_SEPARATION_FACTOR * area_per_peak.sqrt()).max(MIN_PEAK_SEPARATION)
}

/// Locates sprite centres as distance-field peaks
#[derive(Clone, Copy, Debug, Default)]
pub struct DistanceTransformDetector;

impl GridDetector for DistanceTransformDetector {
    fn algorithm(&self) -> GridAlgorithm {
        GridAlgorithm::DistanceTransform
    }

    fn detect(
        &self,
        sheet: &SpriteSheet<'_>,
        params: &DetectionParams,
        cancel: &CancellationToken,
    ) -> DetectionResult {
        let invalid = DetectionResult::invalid(self.algorithm());
        let threshold = params.threshold_byte();
        let Some(field) = chamfer_distance(sheet, threshold, cancel) else {
            log::debug!("distance transform cancelled");
            return invalid;
        };

        let raw = local_maxima(&field);
        if raw.is_empty() {
            return invalid;
        }
        let radius = peak_separation(sheet.width(), sheet.height(), raw.len());
        let peaks = suppress_nearby_peaks(raw, radius);
        log::trace!("{} distance peaks after suppression at radius {radius:.2}", peaks.len());

        let bounds = detect_sprite_bounds(sheet, threshold, cancel);
        if cancel.is_cancelled() {
            return invalid;
        }
        let profile = params
            .snap_to_texture_divisor
            .then(|| TransparencyProfile::from_sheet(sheet, threshold));
        let evidence = CenterEvidence {
            centers: peaks.iter().map(DistancePeak::center).collect(),
            bounds,
        };
        let settings = ClusterSettings {
            gap_floor: PEAK_GAP_FLOOR,
            expected_count: params.expected_count(),
            snap_profile: profile.as_ref(),
        };

        cluster_grid(&evidence, sheet.width(), sheet.height(), &settings).map_or(invalid, |grid| {
            DetectionResult::new(
                grid.cell_width,
                grid.cell_height,
                grid.consistency,
                self.algorithm(),
            )
        })
    }
}
