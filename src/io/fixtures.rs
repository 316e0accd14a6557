//! Synthetic sprite sheets for tests, benches and manual experiments
//!
//! Colours follow the fixture convention of one distinct hue per cell
//! (hue = index / cells, saturation 0.8, value 0.9) so neighbouring sprites
//! never share a colour.

use crate::io::configuration::{FIXTURE_SATURATION, FIXTURE_VALUE};
use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Convert HSV in `[0, 1]` to opaque RGBA, truncating channels
pub fn hsv_to_rgba(hue: f64, saturation: f64, value: f64) -> [u8; 4] {
    let hue = hue.rem_euclid(1.0) * 6.0;
    let sector = hue.floor();
    let fraction = hue - sector;
    let p = value * (1.0 - saturation);
    let q = value * saturation.mul_add(-fraction, 1.0);
    let t = value * saturation.mul_add(-(1.0 - fraction), 1.0);
    let (r, g, b) = match sector as u8 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    let channel = |c: f64| (c * 255.0) as u8;
    [channel(r), channel(g), channel(b), u8::MAX]
}

/// Fixture colour of cell `index` out of `total`
pub fn cell_color(index: u32, total: u32) -> [u8; 4] {
    hsv_to_rgba(
        f64::from(index) / f64::from(total.max(1)),
        FIXTURE_SATURATION,
        FIXTURE_VALUE,
    )
}

fn fill(image: &mut RgbaImage, origin: (u32, u32), size: (u32, u32), color: [u8; 4]) {
    let x_end = (origin.0 + size.0).min(image.width());
    let y_end = (origin.1 + size.1).min(image.height());
    for y in origin.1..y_end {
        for x in origin.0..x_end {
            image.put_pixel(x, y, Rgba(color));
        }
    }
}

/// Fully opaque sheet where every cell is one solid colour
///
/// Cells are `width / cols` by `height / rows`; leftover pixels on the
/// right and bottom stay opaque black.
pub fn grid_sheet(width: u32, height: u32, cols: u32, rows: u32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, u8::MAX]));
    let (cell_width, cell_height) = (width / cols.max(1), height / rows.max(1));
    let total = cols * rows;
    for row in 0..rows {
        for col in 0..cols {
            fill(
                &mut image,
                (col * cell_width, row * cell_height),
                (cell_width, cell_height),
                cell_color(row * cols + col, total),
            );
        }
    }
    image
}

/// Transparent sheet with one opaque sprite per cell, inset by `gutter` on every side
pub fn gutter_sheet(cols: u32, rows: u32, cell_width: u32, cell_height: u32, gutter: u32) -> RgbaImage {
    let mut image = RgbaImage::new(cols * cell_width, rows * cell_height);
    let sprite = (
        cell_width.saturating_sub(2 * gutter),
        cell_height.saturating_sub(2 * gutter),
    );
    let total = cols * rows;
    for row in 0..rows {
        for col in 0..cols {
            fill(
                &mut image,
                (col * cell_width + gutter, row * cell_height + gutter),
                sprite,
                cell_color(row * cols + col, total),
            );
        }
    }
    image
}

// Random sprite extent and offset within one cell axis, keeping a one pixel margin
fn jitter_axis(rng: &mut StdRng, cell: u32) -> (u32, u32) {
    let largest = cell.saturating_sub(2).max(1);
    let smallest = (cell / 2).clamp(1, largest);
    let size = rng.random_range(smallest..=largest);
    let slack = cell.saturating_sub(size);
    let offset = if slack >= 2 {
        rng.random_range(1..slack)
    } else {
        0
    };
    (size, offset)
}

/// Like [`gutter_sheet`], but every sprite has a random size and offset
///
/// Sprites span between half the cell and the cell minus two pixels on
/// each axis and never touch the cell edge. The same seed always yields
/// the same sheet.
pub fn jittered_sheet(cols: u32, rows: u32, cell_width: u32, cell_height: u32, seed: u64) -> RgbaImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut image = RgbaImage::new(cols * cell_width, rows * cell_height);
    let total = cols * rows;
    for row in 0..rows {
        for col in 0..cols {
            let (width, x_offset) = jitter_axis(&mut rng, cell_width);
            let (height, y_offset) = jitter_axis(&mut rng, cell_height);
            fill(
                &mut image,
                (col * cell_width + x_offset, row * cell_height + y_offset),
                (width, height),
                cell_color(row * cols + col, total),
            );
        }
    }
    image
}
