//! Sprite-fit scoring: how badly a candidate grid cuts through sprites
//!
//! Only the central core of each sprite counts. Lines clipping the outer
//! margin are free, which tolerates anti-aliased fringes spilling over a
//! cell edge, and the penalty ramps up linearly towards the sprite centre.

use crate::io::configuration::{COMPOUND_SEVERITY_FACTOR, CORE_ZONE_MARGIN};
use crate::spatial::SpriteRect;

/// Severity of a grid line at `line` crossing the core span `[start, start + length)`
///
/// Zero outside the core zone or on its edge, rising linearly to one at
/// the exact centre of the span.
pub fn split_severity(start: f64, length: f64, line: f64) -> f64 {
    if length <= 0.0 {
        return 0.0;
    }
    let core_start = CORE_ZONE_MARGIN.mul_add(length, start);
    let core_end = (1.0 - CORE_ZONE_MARGIN).mul_add(length, start);
    if line <= core_start || line >= core_end {
        return 0.0;
    }
    let half = (core_end - core_start) / 2.0;
    let center = core_start + half;
    (1.0 - (line - center).abs() / half).clamp(0.0, 1.0)
}

// Worst severity over every grid line at multiples of `cell` inside the texture
fn worst_axis_severity(start: u32, length: u32, cell: u32, texture: u32) -> f64 {
    let first = start / cell + 1;
    let last = (start + length) / cell;
    (first..=last)
        .map(|k| k * cell)
        .filter(|&line| line < texture)
        .map(|line| split_severity(f64::from(start), f64::from(length), f64::from(line)))
        .fold(0.0, f64::max)
}

/// Score in `[0, 1]` of how cleanly a grid avoids splitting sprites
///
/// Each sprite scores one minus its combined split severity: the worst
/// vertical and worst horizontal severity, compounded when both are
/// non-zero. The result is the mean over sprites, or zero when there are
/// no sprites or the cell size is zero.
pub fn score_sprite_fit(
    sprites: &[SpriteRect],
    cell_width: u32,
    cell_height: u32,
    texture_width: u32,
    texture_height: u32,
) -> f64 {
    if sprites.is_empty() || cell_width == 0 || cell_height == 0 {
        return 0.0;
    }

    let total: f64 = sprites
        .iter()
        .map(|sprite| {
            let vertical = worst_axis_severity(sprite.x, sprite.width, cell_width, texture_width);
            let horizontal =
                worst_axis_severity(sprite.y, sprite.height, cell_height, texture_height);
            let mut combined = vertical.max(horizontal);
            if vertical > 0.0 && horizontal > 0.0 {
                combined = (vertical * horizontal).mul_add(COMPOUND_SEVERITY_FACTOR, combined);
            }
            1.0 - combined.min(1.0)
        })
        .sum();

    total / sprites.len() as f64
}
