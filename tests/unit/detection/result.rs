//! Tests for detection results and algorithm tags

#[cfg(test)]
mod tests {
    use spritegrid::{DetectionResult, GridAlgorithm};

    // Tests sub-minimum cells collapse to the invalid shape
    #[test]
    fn test_small_cells_are_invalid() {
        let result = DetectionResult::new(3, 16, 0.8, GridAlgorithm::BoundaryScoring);

        assert!(!result.is_valid());
        assert_eq!(result, DetectionResult::invalid(GridAlgorithm::BoundaryScoring));
        assert_eq!(result.cell_width(), 0);
        assert!(result.confidence().abs() < f64::EPSILON);
    }

    // Tests confidence is clamped and NaN becomes zero
    #[test]
    fn test_confidence_clamped() {
        let high = DetectionResult::new(8, 8, 1.7, GridAlgorithm::ClusterCentroid);
        let low = DetectionResult::new(8, 8, -0.2, GridAlgorithm::ClusterCentroid);
        let nan = DetectionResult::new(8, 8, f64::NAN, GridAlgorithm::ClusterCentroid);

        assert!((high.confidence() - 1.0).abs() < f64::EPSILON);
        assert!(low.confidence().abs() < f64::EPSILON);
        assert!(nan.confidence().abs() < f64::EPSILON);
        assert!(nan.is_valid());
    }

    // Tests the minimum cell size itself is valid
    #[test]
    fn test_minimum_cell_is_valid() {
        let result = DetectionResult::new(4, 4, 0.5, GridAlgorithm::UniformGrid);
        assert!(result.is_valid());
        assert_eq!((result.cell_width(), result.cell_height()), (4, 4));
    }

    // Tests retagging keeps the grid and confidence
    #[test]
    fn test_retagged() {
        let result = DetectionResult::new(16, 32, 0.75, GridAlgorithm::RegionGrowing)
            .retagged(GridAlgorithm::AutoBest);

        assert_eq!(result.algorithm(), GridAlgorithm::AutoBest);
        assert_eq!((result.cell_width(), result.cell_height()), (16, 32));
        assert!((result.confidence() - 0.75).abs() < f64::EPSILON);
    }

    // Tests whole-cell grid dimensions
    #[test]
    fn test_grid_dimensions() {
        let result = DetectionResult::new(16, 32, 0.9, GridAlgorithm::BoundaryScoring);

        assert_eq!(result.grid_dimensions(64, 64), Some((4, 2)));
        assert_eq!(result.grid_dimensions(70, 70), Some((4, 2)));
        assert_eq!(
            DetectionResult::invalid(GridAlgorithm::AutoBest).grid_dimensions(64, 64),
            None
        );
    }

    // Tests display text for valid and invalid results
    #[test]
    fn test_display() {
        let valid = DetectionResult::new(16, 16, 0.95, GridAlgorithm::BoundaryScoring);
        let invalid = DetectionResult::invalid(GridAlgorithm::DistanceTransform);

        assert_eq!(valid.to_string(), "16x16 via BoundaryScoring (confidence 0.95)");
        assert_eq!(invalid.to_string(), "no grid detected (DistanceTransform)");
    }

    // Tests algorithm names and the default
    #[test]
    fn test_algorithm_names() {
        assert_eq!(GridAlgorithm::default(), GridAlgorithm::AutoBest);
        assert_eq!(GridAlgorithm::UniformGrid.name(), "UniformGrid");
        assert_eq!(GridAlgorithm::RegionGrowing.to_string(), "RegionGrowing");
    }
}
