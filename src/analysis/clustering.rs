//! Grid inference from sprite centre positions
//!
//! Shared by every detector that first locates sprite centres (component
//! centroids, distance-field peaks, grown regions) and then needs a cell
//! size from them.

use crate::analysis::fit::score_sprite_fit;
use crate::analysis::inference::infer_grid_with_fallback;
use crate::analysis::transparency::{TransparencyProfile, snap_cell_to_divisors};
use crate::io::configuration::{
    GAP_TOLERANCE_FACTOR, LARGEST_SPRITE_RETRY_SCALE, MINIMUM_CELL_SIZE, SPRITE_FIT_ACCEPT,
};
use crate::math::statistics::mean;
use crate::spatial::SpriteRect;

// Gaps smaller than this are sub-pixel jitter, never a column boundary
const JITTER_GAP: f64 = 1.0;

/// Sprite locations a detector hands to the clustering pipeline
#[derive(Clone, Debug, Default)]
pub struct CenterEvidence {
    /// Sprite centres in continuous pixel coordinates
    pub centers: Vec<(f64, f64)>,
    /// Sprite bounds used to validate candidate grids
    pub bounds: Vec<SpriteRect>,
}

/// How the pipeline turns evidence into a grid
#[derive(Clone, Copy, Debug)]
pub struct ClusterSettings<'a> {
    /// Smallest grouping tolerance, in pixels
    pub gap_floor: f64,
    /// Caller-supplied sprite count, tried before grouping
    pub expected_count: Option<u32>,
    /// Transparency profile for divisor snapping, when snapping is enabled
    pub snap_profile: Option<&'a TransparencyProfile>,
}

/// Cell size chosen from sprite centres, with the signals used to rate it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusteredGrid {
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels
    pub cell_height: u32,
    /// How closely centres sit on cell centres, in `[0, 1]`
    pub consistency: f64,
    /// Ratio of the smaller to the larger of cell count and sprite count
    pub count_ratio: f64,
    /// Sprite-fit score of the chosen grid
    pub fit: f64,
}

/// Group sorted positions into lines, returning each group's mean
///
/// The tolerance is a quarter of the smallest significant gap, floored at
/// `gap_floor`. Every position is compared with its immediate predecessor
/// only, so a long run of closely spaced positions cannot drift into one
/// group through a fixed anchor.
pub fn group_positions(positions: &[f64], gap_floor: f64) -> Vec<f64> {
    let mut sorted = positions.to_vec();
    sorted.sort_by(f64::total_cmp);

    let smallest_gap = sorted
        .windows(2)
        .filter_map(|pair| match pair {
            [a, b] => Some(b - a),
            _ => None,
        })
        .filter(|&gap| gap > JITTER_GAP)
        .reduce(f64::min);
    let tolerance = smallest_gap.map_or(f64::INFINITY, |gap| {
        (gap * GAP_TOLERANCE_FACTOR).max(gap_floor)
    });

    let mut groups: Vec<Vec<f64>> = Vec::new();
    let mut previous: Option<f64> = None;
    for position in sorted {
        match (previous, groups.last_mut()) {
            (Some(prev), Some(group)) if position - prev < tolerance => group.push(position),
            _ => groups.push(vec![position]),
        }
        previous = Some(position);
    }

    groups.iter().filter_map(|group| mean(group)).collect()
}

/// Cell pitch along one axis from the group centres
///
/// Mean spacing between consecutive groups; a single group spans the whole
/// texture dimension.
pub fn estimate_pitch(group_centers: &[f64], texture: u32) -> u32 {
    let spacings: Vec<f64> = group_centers
        .windows(2)
        .filter_map(|pair| match pair {
            [a, b] => Some(b - a),
            _ => None,
        })
        .collect();
    mean(&spacings).map_or(texture, |spacing| spacing.round() as u32)
}

/// How well centres align with the centres of their cells
///
/// Per axis, one minus the distance to the nearest cell centre over half a
/// cell; averaged over both axes and all centres.
pub fn grid_consistency(centers: &[(f64, f64)], cell_width: u32, cell_height: u32) -> f64 {
    if cell_width == 0 || cell_height == 0 {
        return 0.0;
    }
    let alignment = |position: f64, cell: u32| {
        let cell = f64::from(cell);
        let nearest = ((position / cell).floor() + 0.5) * cell;
        1.0 - ((position - nearest).abs() / (cell / 2.0)).min(1.0)
    };
    let scores: Vec<f64> = centers
        .iter()
        .map(|&(x, y)| (alignment(x, cell_width) + alignment(y, cell_height)) / 2.0)
        .collect();
    mean(&scores).unwrap_or(0.0)
}

/// Smaller over larger of the whole-cell count and the sprite count
pub fn cell_count_ratio(
    sprite_count: usize,
    cell_width: u32,
    cell_height: u32,
    texture_width: u32,
    texture_height: u32,
) -> f64 {
    if sprite_count == 0 || cell_width == 0 || cell_height == 0 {
        return 0.0;
    }
    let cells = (u64::from(texture_width / cell_width) * u64::from(texture_height / cell_height)).max(1);
    let sprites = sprite_count as u64;
    cells.min(sprites) as f64 / cells.max(sprites) as f64
}

/// Cell size enclosing the largest sprite with some breathing room
pub fn largest_sprite_cell(bounds: &[SpriteRect]) -> Option<(u32, u32)> {
    let largest = bounds.iter().max_by_key(|rect| (rect.area(), rect.width, rect.height))?;
    Some((
        (f64::from(largest.width) * LARGEST_SPRITE_RETRY_SCALE).ceil() as u32,
        (f64::from(largest.height) * LARGEST_SPRITE_RETRY_SCALE).ceil() as u32,
    ))
}

/// Run the shared centre-clustering pipeline
///
/// 1. A caller-supplied count goes through count-based inference first.
/// 2. Otherwise (or if that fails) centres are grouped into columns and
///    rows and the mean group spacing becomes the cell size.
/// 3. The size is optionally snapped to texture divisors.
/// 4. A poor sprite fit triggers one retry sized from the largest sprite.
///
/// Returns `None` when there is no evidence or no usable cell size.
pub fn cluster_grid(
    evidence: &CenterEvidence,
    texture_width: u32,
    texture_height: u32,
    settings: &ClusterSettings<'_>,
) -> Option<ClusteredGrid> {
    if evidence.centers.is_empty() {
        return None;
    }
    let texture = (texture_width, texture_height);

    let counted = settings
        .expected_count
        .and_then(|count| infer_grid_with_fallback(count, texture_width, texture_height));
    let mut cell = counted.unwrap_or_else(|| {
        let xs: Vec<f64> = evidence.centers.iter().map(|&(x, _)| x).collect();
        let ys: Vec<f64> = evidence.centers.iter().map(|&(_, y)| y).collect();
        let columns = group_positions(&xs, settings.gap_floor);
        let rows = group_positions(&ys, settings.gap_floor);
        log::trace!("grouped centres into {} columns and {} rows", columns.len(), rows.len());
        (
            estimate_pitch(&columns, texture_width),
            estimate_pitch(&rows, texture_height),
        )
    });

    if let Some(profile) = settings.snap_profile {
        cell = snap_cell_to_divisors(cell, profile, &evidence.bounds, texture);
    }
    cell = (cell.0.min(texture_width), cell.1.min(texture_height));

    let mut fit = score_sprite_fit(&evidence.bounds, cell.0, cell.1, texture_width, texture_height);
    if fit < SPRITE_FIT_ACCEPT
        && let Some(retry) = largest_sprite_cell(&evidence.bounds)
    {
        let retry = (retry.0.min(texture_width), retry.1.min(texture_height));
        let retry_fit =
            score_sprite_fit(&evidence.bounds, retry.0, retry.1, texture_width, texture_height);
        if retry_fit > fit {
            log::debug!("largest-sprite retry {retry:?} improved fit {fit:.2} -> {retry_fit:.2}");
            cell = retry;
            fit = retry_fit;
        }
    }

    if cell.0 < MINIMUM_CELL_SIZE || cell.1 < MINIMUM_CELL_SIZE {
        return None;
    }

    Some(ClusteredGrid {
        cell_width: cell.0,
        cell_height: cell.1,
        consistency: grid_consistency(&evidence.centers, cell.0, cell.1),
        count_ratio: cell_count_ratio(
            evidence.centers.len(),
            cell.0,
            cell.1,
            texture_width,
            texture_height,
        ),
        fit,
    })
}
