//! Tests for the borrowed sprite sheet view and alpha thresholding

#[cfg(test)]
mod tests {
    use spritegrid::spatial::{SpriteSheet, alpha_threshold_byte};

    // Tests construction rejects buffers whose length disagrees with the shape
    // Verified by dropping the length check
    #[test]
    fn test_new_validates_length() {
        let pixels = vec![[0_u8; 4]; 6];
        assert!(SpriteSheet::new(&pixels, 2, 3).is_some());
        assert!(SpriteSheet::new(&pixels, 2, 2).is_none());
        assert!(SpriteSheet::new(&pixels, 3, 3).is_none());
        assert!(SpriteSheet::new(&[], 0, 0).is_none());
    }

    // Tests coordinates outside the sheet read as transparent
    #[test]
    fn test_out_of_bounds_is_transparent() {
        let pixels = vec![[255_u8; 4]; 4];
        let sheet = SpriteSheet::new(&pixels, 2, 2).expect("2x2 sheet should construct");

        assert_eq!(sheet.alpha(1, 1), 255);
        assert_eq!(sheet.alpha(2, 0), 0);
        assert_eq!(sheet.alpha(0, 2), 0);
        assert_eq!(sheet.pixel(5, 5), None);
        assert_eq!(sheet.index(1, 1), Some(3));
        assert_eq!(sheet.index(2, 1), None);
    }

    // Tests the opacity test is strictly greater than the threshold byte
    // Verified by changing > to >=
    #[test]
    fn test_opacity_is_strict() {
        let threshold = alpha_threshold_byte(0.1);
        let pixels = vec![[9, 9, 9, threshold], [9, 9, 9, threshold + 1]];
        let sheet = SpriteSheet::new(&pixels, 2, 1).expect("2x1 sheet should construct");

        assert!(!sheet.is_opaque(0, 0, threshold));
        assert!(sheet.is_opaque(1, 0, threshold));
    }

    // Tests intensity sums colour channels of opaque pixels only
    #[test]
    fn test_intensity() {
        let pixels = vec![[10, 20, 30, 255], [200, 200, 200, 0]];
        let sheet = SpriteSheet::new(&pixels, 2, 1).expect("2x1 sheet should construct");

        assert_eq!(sheet.intensity(0, 0, 26), 60);
        assert_eq!(sheet.intensity(1, 0, 26), 0);
        assert_eq!(sheet.intensity(9, 9, 26), 0);
    }

    // Tests the fractional threshold maps to the rounded byte
    #[test]
    fn test_alpha_threshold_byte() {
        assert_eq!(alpha_threshold_byte(0.0), 0);
        assert_eq!(alpha_threshold_byte(0.1), 26);
        assert_eq!(alpha_threshold_byte(0.5), 128);
        assert_eq!(alpha_threshold_byte(2.0), 255);
    }
}
