//! Performance measurement for the shared analysis helpers

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use spritegrid::CancellationToken;
use spritegrid::analysis::bounds::detect_sprite_bounds;
use spritegrid::analysis::fit::score_sprite_fit;
use spritegrid::analysis::transparency::{TransparencyProfile, score_with_profile};
use spritegrid::detection::distance::chamfer_distance;
use spritegrid::io::fixtures::gutter_sheet;
use spritegrid::io::image::LoadedTexture;
use spritegrid::spatial::SpriteSheet;
use std::hint::black_box;

const THRESHOLD: u8 = 26;

/// Measures connected-component extraction on a 512x512 sheet of 256 sprites
fn bench_sprite_bounds(c: &mut Criterion) {
    let texture = LoadedTexture::from_rgba(&gutter_sheet(16, 16, 32, 32, 2));
    let Some(sheet) = SpriteSheet::new(&texture.pixels, texture.width, texture.height) else {
        return;
    };

    c.bench_function("detect_sprite_bounds_512", |b| {
        b.iter(|| {
            let bounds = detect_sprite_bounds(black_box(&sheet), THRESHOLD, &CancellationToken::new());
            black_box(bounds);
        });
    });
}

/// Measures scoring one candidate grid with a precomputed profile
fn bench_candidate_scoring(c: &mut Criterion) {
    let texture = LoadedTexture::from_rgba(&gutter_sheet(16, 16, 32, 32, 2));
    let Some(sheet) = SpriteSheet::new(&texture.pixels, texture.width, texture.height) else {
        return;
    };
    let profile = TransparencyProfile::from_sheet(&sheet, THRESHOLD);
    let sprites = detect_sprite_bounds(&sheet, THRESHOLD, &CancellationToken::new());

    c.bench_function("score_candidate_32x32", |b| {
        b.iter(|| {
            let transparency = score_with_profile(&sheet, &profile, black_box(32), 32, THRESHOLD);
            let fit = score_sprite_fit(&sprites, black_box(32), 32, 512, 512);
            black_box(transparency * fit);
        });
    });
}

/// Measures the two-pass chamfer transform on a 512x512 sheet
fn bench_chamfer_distance(c: &mut Criterion) {
    let texture = LoadedTexture::from_rgba(&gutter_sheet(16, 16, 32, 32, 2));
    let Some(sheet) = SpriteSheet::new(&texture.pixels, texture.width, texture.height) else {
        return;
    };

    c.bench_function("chamfer_distance_512", |b| {
        b.iter(|| {
            let field = chamfer_distance(black_box(&sheet), THRESHOLD, &CancellationToken::new());
            black_box(field);
        });
    });
}

criterion_group!(
    benches,
    bench_sprite_bounds,
    bench_candidate_scoring,
    bench_chamfer_distance
);
criterion_main!(benches);
