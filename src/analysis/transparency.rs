//! Transparency-based scoring of grid lines and divisor snapping
//!
//! Grid lines are sampled on their exact pixel column or row. Letting a line
//! borrow transparency from its neighbours makes small cell sizes look as
//! good as the real grid, so there is no fuzzing here.

use crate::analysis::candidates::texture_divisors;
use crate::analysis::fit::score_sprite_fit;
use crate::io::configuration::{INTERIOR_OPACITY_WEIGHT, SNAP_REMAINDER_TRANSPARENCY};
use crate::math::statistics::mean;
use crate::spatial::{SpriteRect, SpriteSheet};

/// Texture axis a grid line runs across
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Vertical lines at x positions, spaced by cell width
    Columns,
    /// Horizontal lines at y positions, spaced by cell height
    Rows,
}

/// Fraction of transparent pixels in every column and every row of a sheet
///
/// Computed once per detection so candidate searches can score any cell
/// size per axis without rescanning pixels.
#[derive(Clone, Debug)]
pub struct TransparencyProfile {
    columns: Vec<f64>,
    rows: Vec<f64>,
}

impl TransparencyProfile {
    /// Count transparent pixels per column and per row
    pub fn from_sheet(sheet: &SpriteSheet<'_>, threshold: u8) -> Self {
        let (width, height) = (sheet.width() as usize, sheet.height() as usize);
        let mut column_counts = vec![0_u32; width];
        let mut row_counts = vec![0_u32; height];

        for (index, pixel) in sheet.pixels().iter().enumerate() {
            if pixel[3] <= threshold {
                if let Some(count) = column_counts.get_mut(index % width) {
                    *count += 1;
                }
                if let Some(count) = row_counts.get_mut(index / width) {
                    *count += 1;
                }
            }
        }

        Self {
            columns: column_counts
                .into_iter()
                .map(|count| f64::from(count) / height as f64)
                .collect(),
            rows: row_counts
                .into_iter()
                .map(|count| f64::from(count) / width as f64)
                .collect(),
        }
    }

    /// Per-line transparency fractions along an axis
    pub fn lines(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Columns => &self.columns,
            Axis::Rows => &self.rows,
        }
    }

    /// Mean transparency of the internal grid lines for a cell size, if any exist
    pub fn axis_score(&self, axis: Axis, cell: u32) -> Option<f64> {
        let lines = self.lines(axis);
        if cell == 0 {
            return None;
        }
        let values: Vec<f64> = (1..)
            .map(|k| k * cell as usize)
            .take_while(|&position| position < lines.len())
            .filter_map(|position| lines.get(position).copied())
            .collect();
        mean(&values)
    }

    /// Mean transparency of the trailing lines a cell size leaves uncovered
    pub fn remainder_transparency(&self, axis: Axis, cell: u32) -> Option<f64> {
        let lines = self.lines(axis);
        if cell == 0 {
            return None;
        }
        let remainder = lines.len() % cell as usize;
        lines.get(lines.len() - remainder..).and_then(mean)
    }
}

/// Mean opacity sampled in a small window at the centre of every whole cell
pub fn interior_opacity(sheet: &SpriteSheet<'_>, cell_width: u32, cell_height: u32, threshold: u8) -> f64 {
    if cell_width == 0 || cell_height == 0 {
        return 0.0;
    }
    let cols = sheet.width() / cell_width;
    let rows = sheet.height() / cell_height;
    let radius = (cell_width.min(cell_height) / 4).max(1);

    let mut cell_opacity = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let cx = col * cell_width + cell_width / 2;
            let cy = row * cell_height + cell_height / 2;
            let mut opaque = 0_u32;
            let mut sampled = 0_u32;
            for y in cy.saturating_sub(radius)..(cy + radius).min(sheet.height()) {
                for x in cx.saturating_sub(radius)..(cx + radius).min(sheet.width()) {
                    sampled += 1;
                    if sheet.is_opaque(x, y, threshold) {
                        opaque += 1;
                    }
                }
            }
            if sampled > 0 {
                cell_opacity.push(f64::from(opaque) / f64::from(sampled));
            }
        }
    }

    mean(&cell_opacity).unwrap_or(0.0)
}

/// Score a cell size by transparent boundaries and opaque interiors
///
/// `avg_boundary_transparency * (1 + 0.5 * avg_interior_opacity)`, clamped
/// to `[0, 1]`. A grid with no internal lines in either direction scores
/// zero, since it says nothing about boundaries.
pub fn score_divisor_by_transparency(
    sheet: &SpriteSheet<'_>,
    cell_width: u32,
    cell_height: u32,
    threshold: u8,
) -> f64 {
    let profile = TransparencyProfile::from_sheet(sheet, threshold);
    score_with_profile(sheet, &profile, cell_width, cell_height, threshold)
}

/// Same as [`score_divisor_by_transparency`] with a precomputed profile
pub fn score_with_profile(
    sheet: &SpriteSheet<'_>,
    profile: &TransparencyProfile,
    cell_width: u32,
    cell_height: u32,
    threshold: u8,
) -> f64 {
    let Some(boundary) = boundary_transparency(profile, cell_width, cell_height) else {
        return 0.0;
    };
    let interior = interior_opacity(sheet, cell_width, cell_height, threshold);
    (boundary * INTERIOR_OPACITY_WEIGHT.mul_add(interior, 1.0)).clamp(0.0, 1.0)
}

/// Mean of the per-axis boundary transparencies that exist for a cell size
pub fn boundary_transparency(
    profile: &TransparencyProfile,
    cell_width: u32,
    cell_height: u32,
) -> Option<f64> {
    let present: Vec<f64> = [
        profile.axis_score(Axis::Columns, cell_width),
        profile.axis_score(Axis::Rows, cell_height),
    ]
    .into_iter()
    .flatten()
    .collect();
    mean(&present)
}

/// Nearest divisors of `dimension` below and above `cell`
///
/// Only divisors of at least the minimum cell size count; either side is
/// `None` when no such divisor exists there.
pub fn bracketing_divisors(cell: u32, dimension: u32) -> (Option<u32>, Option<u32>) {
    let divisors = texture_divisors(dimension);
    let below = divisors.iter().rev().find(|&&divisor| divisor < cell).copied();
    let above = divisors.iter().find(|&&divisor| divisor > cell).copied();
    (below, above)
}

/// Move a cell size onto a texture divisor when it does not tile the texture
///
/// Sizes that already divide the dimension are kept. So are sizes whose
/// leftover strip is almost entirely transparent, since that strip is
/// padding rather than a partial cell. Otherwise the nearest divisor on
/// each side is scored by the transparency its grid lines cross; the
/// higher score wins, ties going to the nearer divisor.
pub fn snap_to_divisor(cell: u32, profile: &TransparencyProfile, axis: Axis) -> u32 {
    let dimension = profile.lines(axis).len() as u32;
    if cell == 0 || dimension == 0 || dimension % cell == 0 {
        return cell;
    }
    if profile
        .remainder_transparency(axis, cell)
        .is_some_and(|transparency| transparency >= SNAP_REMAINDER_TRANSPARENCY)
    {
        return cell;
    }

    let (below, above) = bracketing_divisors(cell, dimension);
    let mut best: Option<(u32, f64, u32)> = None;
    for divisor in [below, above].into_iter().flatten() {
        let distance = divisor.abs_diff(cell);
        // A single cell spanning the axis has no lines to judge; treat it as neutral
        let score = profile.axis_score(axis, divisor).unwrap_or(0.0);
        let better = best.is_none_or(|(_, best_score, best_distance)| {
            score > best_score
                || ((score - best_score).abs() < f64::EPSILON && distance < best_distance)
        });
        if better {
            best = Some((divisor, score, distance));
        }
    }

    best.map_or(cell, |(divisor, score, _)| {
        log::debug!("snapped {axis:?} cell size {cell} to divisor {divisor} (line transparency {score:.2})");
        divisor
    })
}

/// Snap both cell edges to texture divisors, undoing it if sprites fit worse
///
/// `texture` is `(width, height)`. Without sprite bounds there is nothing
/// to compare against and the snapped size is kept.
pub fn snap_cell_to_divisors(
    cell: (u32, u32),
    profile: &TransparencyProfile,
    sprites: &[SpriteRect],
    texture: (u32, u32),
) -> (u32, u32) {
    let snapped = (
        snap_to_divisor(cell.0, profile, Axis::Columns),
        snap_to_divisor(cell.1, profile, Axis::Rows),
    );
    if snapped == cell || sprites.is_empty() {
        return snapped;
    }
    let before = score_sprite_fit(sprites, cell.0, cell.1, texture.0, texture.1);
    let after = score_sprite_fit(sprites, snapped.0, snapped.1, texture.0, texture.1);
    if after < before {
        log::debug!("rolled back divisor snap {cell:?} -> {snapped:?} (fit {before:.2} -> {after:.2})");
        cell
    } else {
        snapped
    }
}
