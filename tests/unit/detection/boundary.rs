//! Tests for transparent-boundary grid detection

#[cfg(test)]
mod tests {
    use spritegrid::analysis::bounds::detect_sprite_bounds;
    use spritegrid::analysis::transparency::TransparencyProfile;
    use spritegrid::detection::GridDetector;
    use spritegrid::detection::boundary::{
        BoundaryScoringDetector, CandidateContext, detected_count_confidence, score_candidate,
    };
    use spritegrid::io::fixtures::gutter_sheet;
    use spritegrid::io::image::LoadedTexture;
    use spritegrid::spatial::SpriteSheet;
    use spritegrid::{CancellationToken, DetectionParams, DetectionResult, GridAlgorithm};

    const THRESHOLD: u8 = 26;

    fn sheet(texture: &LoadedTexture) -> SpriteSheet<'_> {
        SpriteSheet::new(&texture.pixels, texture.width, texture.height)
            .expect("fixture sheet should construct")
    }

    fn detect(texture: &LoadedTexture, count: Option<u32>) -> DetectionResult {
        let params = DetectionParams {
            expected_sprite_count: count,
            ..DetectionParams::default()
        };
        BoundaryScoringDetector.detect(&sheet(texture), &params, &CancellationToken::new())
    }

    // Tests candidate scoring on a clean 4x4 sheet
    // Verified by dropping the cell count gate
    #[test]
    fn test_score_candidate() {
        let texture = LoadedTexture::from_rgba(&gutter_sheet(4, 4, 16, 16, 2));
        let sheet = sheet(&texture);
        let sprites = detect_sprite_bounds(&sheet, THRESHOLD, &CancellationToken::new());
        let profile = TransparencyProfile::from_sheet(&sheet, THRESHOLD);
        let context = CandidateContext {
            sheet: &sheet,
            profile: &profile,
            sprites: &sprites,
            threshold: THRESHOLD,
        };

        let matching = score_candidate(&context, 16, 16).expect("true cell should score");
        assert!(matching > 1.0);
        // Four cells for sixteen sprites
        assert_eq!(score_candidate(&context, 32, 32), None);
        // Lines through every sprite centre
        assert_eq!(score_candidate(&context, 8, 8), None);
        assert_eq!(score_candidate(&context, 2, 16), None);
    }

    // Tests the count-derived confidence blend and its ceiling
    #[test]
    fn test_detected_count_confidence() {
        assert!((detected_count_confidence(1.0, 1.0) - 0.95).abs() < 1e-12);
        assert!((detected_count_confidence(0.5, 0.5) - 0.5).abs() < 1e-12);
        assert!((detected_count_confidence(1.0, 0.0) - 0.6).abs() < 1e-12);
    }

    // Tests the detected sprite count drives the grid
    #[test]
    fn test_detect_from_sprite_count() {
        let texture = LoadedTexture::from_rgba(&gutter_sheet(4, 4, 16, 16, 2));
        let result = detect(&texture, None);

        assert_eq!(result.algorithm(), GridAlgorithm::BoundaryScoring);
        assert_eq!((result.cell_width(), result.cell_height()), (16, 16));
        assert!((result.confidence() - 0.95).abs() < 1e-9);
    }

    // Tests a caller-supplied count is trusted over the sprites
    #[test]
    fn test_detect_with_expected_count() {
        let texture = LoadedTexture::from_rgba(&gutter_sheet(4, 4, 16, 16, 2));
        let result = detect(&texture, Some(4));

        assert_eq!((result.cell_width(), result.cell_height()), (32, 32));
        assert!((result.confidence() - 0.9).abs() < 1e-9);
    }

    // Tests an impossible count falls back to detection promptly
    // Verified by looping over every factor of the count
    #[test]
    fn test_detect_with_huge_count() {
        let texture = LoadedTexture::from_rgba(&gutter_sheet(4, 4, 16, 16, 2));
        let result = detect(&texture, Some(u32::MAX));

        assert_eq!((result.cell_width(), result.cell_height()), (16, 16));
        assert!((result.confidence() - 0.95).abs() < 1e-9);
    }

    // Tests quadrants split by single-pixel gutters resolve to a 2x2 grid
    #[test]
    fn test_detect_quadrants() {
        let texture = LoadedTexture::from_rgba(&gutter_sheet(2, 2, 64, 64, 1));
        let result = detect(&texture, None);

        assert_eq!((result.cell_width(), result.cell_height()), (64, 64));
    }

    // Tests a lone sprite filling the sheet has no grid
    #[test]
    fn test_single_sprite_invalid() {
        let texture = LoadedTexture::from_rgba(&gutter_sheet(1, 1, 32, 32, 4));
        assert!(!detect(&texture, None).is_valid());
    }

    // Tests a fully transparent sheet has no grid
    #[test]
    fn test_empty_sheet_invalid() {
        let texture = LoadedTexture::from_rgba(&image::RgbaImage::new(32, 32));
        assert!(!detect(&texture, None).is_valid());
    }

    // Tests cancellation before detection yields the invalid result
    #[test]
    fn test_cancelled() {
        let texture = LoadedTexture::from_rgba(&gutter_sheet(4, 4, 16, 16, 2));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result =
            BoundaryScoringDetector.detect(&sheet(&texture), &DetectionParams::default(), &cancel);

        assert_eq!(result, DetectionResult::invalid(GridAlgorithm::BoundaryScoring));
    }
}
