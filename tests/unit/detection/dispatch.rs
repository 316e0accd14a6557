//! Tests for request validation and algorithm dispatch

#[cfg(test)]
mod tests {
    use spritegrid::detection::dispatch::validate_request;
    use spritegrid::io::fixtures::gutter_sheet;
    use spritegrid::io::image::LoadedTexture;
    use spritegrid::{
        CancellationToken, DetectionParams, DetectionRequest, DetectionResult, GridAlgorithm,
        detect_grid, detect_grid_rgba,
    };

    const ALL: [GridAlgorithm; 6] = [
        GridAlgorithm::AutoBest,
        GridAlgorithm::UniformGrid,
        GridAlgorithm::BoundaryScoring,
        GridAlgorithm::ClusterCentroid,
        GridAlgorithm::DistanceTransform,
        GridAlgorithm::RegionGrowing,
    ];

    // Tests every algorithm maps to a detector carrying its tag
    #[test]
    fn test_detector_tags() {
        for algorithm in ALL {
            assert_eq!(algorithm.detector().algorithm(), algorithm);
        }
    }

    // Tests each rejection reason
    #[test]
    fn test_validate_request() {
        let pixels = vec![[0, 0, 0, 255]; 64];

        assert_eq!(validate_request(&DetectionRequest::new(&pixels, 8, 8)), None);
        assert_eq!(
            validate_request(&DetectionRequest::new(&[], 0, 0)),
            Some("empty pixel buffer")
        );
        assert_eq!(
            validate_request(&DetectionRequest::new(&pixels, 8, 9)),
            Some("pixel count does not match width * height")
        );
        assert_eq!(
            validate_request(&DetectionRequest::new(&pixels, 2, 32)),
            Some("texture smaller than the minimum cell size")
        );
        assert_eq!(
            validate_request(&DetectionRequest::new(&pixels, 8, 8).with_alpha_threshold(1.0)),
            Some("alpha threshold outside [0, 1)")
        );
    }

    // Tests malformed requests come back invalid under the requested tag
    #[test]
    fn test_malformed_requests_invalid() {
        let pixels = vec![[255, 255, 255, 255]; 64];
        let cancel = CancellationToken::new();

        for algorithm in ALL {
            let short = DetectionRequest::new(&pixels, 8, 7).with_algorithm(algorithm);
            let opaque_threshold = DetectionRequest::new(&pixels, 8, 8)
                .with_algorithm(algorithm)
                .with_alpha_threshold(1.5);

            assert_eq!(detect_grid(&short, &cancel), DetectionResult::invalid(algorithm));
            assert_eq!(
                detect_grid(&opaque_threshold, &cancel),
                DetectionResult::invalid(algorithm)
            );
        }
    }

    // Tests dispatch reaches the selected detector
    #[test]
    fn test_dispatch_selected_algorithm() {
        let texture = LoadedTexture::from_rgba(&gutter_sheet(4, 4, 16, 16, 2));
        let request = DetectionRequest::new(&texture.pixels, texture.width, texture.height)
            .with_algorithm(GridAlgorithm::ClusterCentroid);

        let result = detect_grid(&request, &CancellationToken::new());

        assert_eq!(result.algorithm(), GridAlgorithm::ClusterCentroid);
        assert_eq!((result.cell_width(), result.cell_height()), (16, 16));
    }

    // Tests the image-buffer entry point matches the slice one
    #[test]
    fn test_detect_grid_rgba() {
        let image = gutter_sheet(4, 2, 16, 16, 2);
        let texture = LoadedTexture::from_rgba(&image);
        let cancel = CancellationToken::new();

        let from_image = detect_grid_rgba(
            &image,
            GridAlgorithm::BoundaryScoring,
            DetectionParams::default(),
            &cancel,
        );
        let from_slice = detect_grid(
            &DetectionRequest::new(&texture.pixels, texture.width, texture.height)
                .with_algorithm(GridAlgorithm::BoundaryScoring),
            &cancel,
        );

        assert_eq!(from_image, from_slice);
        assert!(from_image.is_valid());
    }
}
