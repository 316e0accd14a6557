//! Tests for even division by a known sprite count

#[cfg(test)]
mod tests {
    use spritegrid::detection::GridDetector;
    use spritegrid::detection::uniform::{UniformGridDetector, best_uniform_layout};
    use spritegrid::io::fixtures::grid_sheet;
    use spritegrid::io::image::LoadedTexture;
    use spritegrid::spatial::SpriteSheet;
    use spritegrid::{CancellationToken, DetectionParams, GridAlgorithm};

    fn detect(texture: &LoadedTexture, count: Option<u32>) -> spritegrid::DetectionResult {
        let sheet = SpriteSheet::new(&texture.pixels, texture.width, texture.height)
            .expect("fixture sheet should construct");
        let params = DetectionParams {
            expected_sprite_count: count,
            ..DetectionParams::default()
        };
        UniformGridDetector.detect(&sheet, &params, &CancellationToken::new())
    }

    // Tests a square count on a square texture gives square cells
    #[test]
    fn test_square_layout() {
        let layout = best_uniform_layout(16, 256, 256).expect("layout should exist");

        assert_eq!((layout.cols, layout.rows), (4, 4));
        assert_eq!((layout.cell_width, layout.cell_height), (64, 64));
        assert!(layout.exact);
        assert!(layout.score.abs() < 1e-12);
    }

    // Tests exact divisions beat squarer inexact ones
    // Verified by ranking on score alone
    #[test]
    fn test_exact_preferred() {
        let layout = best_uniform_layout(6, 96, 64).expect("layout should exist");

        assert!(layout.exact);
        assert_eq!((layout.cols, layout.rows), (3, 2));
        assert_eq!((layout.cell_width, layout.cell_height), (32, 32));
    }

    // Tests a layout matching the texture aspect with square cells scores zero
    // Verified by scoring layout squareness instead of texture alignment
    #[test]
    fn test_layout_follows_texture_aspect() {
        let layout = best_uniform_layout(6, 96, 64).expect("layout should exist");

        assert!(layout.score.abs() < 1e-12);
    }

    // Tests a huge count is rejected without walking every factor
    // Verified by looping over the full count
    #[test]
    fn test_huge_count_is_bounded() {
        assert!(best_uniform_layout(u32::MAX, 64, 64).is_none());

        let texture = LoadedTexture::from_rgba(&grid_sheet(64, 64, 4, 4));
        assert!(!detect(&texture, Some(u32::MAX)).is_valid());
    }

    // Tests layouts with cells below the minimum are skipped
    #[test]
    fn test_no_layout_for_tiny_cells() {
        assert!(best_uniform_layout(100, 16, 16).is_none());
    }

    // Tests a perfect division on an opaque sheet is fully confident
    #[test]
    fn test_detect_exact() {
        let texture = LoadedTexture::from_rgba(&grid_sheet(256, 256, 4, 4));
        let result = detect(&texture, Some(16));

        assert_eq!(result.algorithm(), GridAlgorithm::UniformGrid);
        assert_eq!((result.cell_width(), result.cell_height()), (64, 64));
        assert!((result.confidence() - 1.0).abs() < f64::EPSILON);
    }

    // Tests inexact divisions halve the confidence
    #[test]
    fn test_detect_inexact() {
        let texture = LoadedTexture::from_rgba(&grid_sheet(64, 64, 1, 1));
        let result = detect(&texture, Some(3));

        assert_eq!((result.cell_width(), result.cell_height()), (64, 21));
        assert!((result.confidence() - 0.5).abs() < f64::EPSILON);
    }

    // Tests extreme cell aspect halves the confidence
    #[test]
    fn test_detect_extreme_aspect() {
        let texture = LoadedTexture::from_rgba(&grid_sheet(64, 8, 1, 1));
        let result = detect(&texture, Some(1));

        assert_eq!((result.cell_width(), result.cell_height()), (64, 8));
        assert!((result.confidence() - 0.5).abs() < f64::EPSILON);
    }

    // Tests no count or an impossible count gives nothing
    #[test]
    fn test_detect_without_usable_count() {
        let texture = LoadedTexture::from_rgba(&grid_sheet(16, 16, 1, 1));

        assert!(!detect(&texture, None).is_valid());
        assert!(!detect(&texture, Some(0)).is_valid());
        assert!(!detect(&texture, Some(100)).is_valid());
    }
}
