//! Tests for synthetic sprite sheet fixtures

#[cfg(test)]
mod tests {
    use spritegrid::io::fixtures::{
        cell_color, grid_sheet, gutter_sheet, hsv_to_rgba, jittered_sheet,
    };

    // Tests HSV conversion truncates channels
    #[test]
    fn test_hsv_to_rgba() {
        assert_eq!(hsv_to_rgba(0.0, 0.8, 0.9), [229, 45, 45, 255]);
        assert_eq!(hsv_to_rgba(0.5, 1.0, 1.0), [0, 255, 255, 255]);
        assert_eq!(hsv_to_rgba(1.0, 0.0, 0.0), [0, 0, 0, 255]);
    }

    // Tests neighbouring cells get distinct colours
    #[test]
    fn test_cell_colors_distinct() {
        assert_ne!(cell_color(0, 4), cell_color(1, 4));
        assert_eq!(cell_color(0, 4), hsv_to_rgba(0.0, 0.8, 0.9));
        assert_eq!(cell_color(0, 0), cell_color(0, 1));
    }

    // Tests opaque sheets fill every cell and leave leftovers black
    #[test]
    fn test_grid_sheet() {
        let image = grid_sheet(10, 8, 3, 2);

        assert_eq!(image.dimensions(), (10, 8));
        assert!(image.pixels().all(|pixel| pixel.0[3] == 255));
        assert_eq!(image.get_pixel(0, 0).0, cell_color(0, 6));
        assert_eq!(image.get_pixel(3, 4).0, cell_color(4, 6));
        assert_eq!(image.get_pixel(9, 0).0, [0, 0, 0, 255]);
    }

    // Tests gutters stay transparent around each sprite
    #[test]
    fn test_gutter_sheet() {
        let image = gutter_sheet(2, 1, 8, 8, 1);

        assert_eq!(image.dimensions(), (16, 8));
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
        assert_eq!(image.get_pixel(1, 1).0, cell_color(0, 2));
        assert_eq!(image.get_pixel(6, 6).0, cell_color(0, 2));
        assert_eq!(image.get_pixel(7, 3).0[3], 0);
        assert_eq!(image.get_pixel(8, 3).0[3], 0);
        assert_eq!(image.get_pixel(9, 3).0, cell_color(1, 2));
        let opaque = image.pixels().filter(|pixel| pixel.0[3] > 0).count();
        assert_eq!(opaque, 2 * 36);
    }

    // Tests jittered sheets are reproducible and never touch cell edges
    // Verified by allowing a zero offset
    #[test]
    fn test_jittered_sheet() {
        let first = jittered_sheet(3, 3, 16, 16, 42);
        let second = jittered_sheet(3, 3, 16, 16, 42);
        assert_eq!(first, second);

        for (x, y, pixel) in first.enumerate_pixels() {
            let on_edge = x % 16 == 0 || y % 16 == 0 || x % 16 == 15 || y % 16 == 15;
            if on_edge {
                assert_eq!(pixel.0[3], 0, "edge pixel ({x}, {y}) is opaque");
            }
        }
        assert!(first.pixels().any(|pixel| pixel.0[3] == 255));
    }
}
