//! Tests for PNG loading and export

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use spritegrid::SpriteGridError;
    use spritegrid::io::image::{LoadedTexture, load_texture, save_png};
    use std::fs;
    use tempfile::TempDir;

    // Tests pixels flatten row-major
    #[test]
    fn test_from_rgba_row_major() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(2, 0, Rgba([1, 2, 3, 4]));
        image.put_pixel(0, 1, Rgba([5, 6, 7, 8]));

        let texture = LoadedTexture::from_rgba(&image);

        assert_eq!((texture.width, texture.height), (3, 2));
        assert_eq!(texture.pixels.len(), 6);
        assert_eq!(texture.pixels.get(2), Some(&[1, 2, 3, 4]));
        assert_eq!(texture.pixels.get(3), Some(&[5, 6, 7, 8]));
    }

    // Tests a saved image loads back unchanged, creating directories on the way
    // Verified by disabling parent directory creation
    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("sheet.png");
        let mut image = RgbaImage::new(4, 4);
        image.put_pixel(1, 1, Rgba([200, 100, 50, 255]));

        save_png(&image, &path).expect("save");
        let texture = load_texture(&path).expect("load");

        assert_eq!(texture, LoadedTexture::from_rgba(&image));
    }

    // Tests a missing file fails to load
    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().expect("temp dir");
        let result = load_texture(&dir.path().join("missing.png"));

        assert!(matches!(result, Err(SpriteGridError::ImageLoad { .. })));
    }

    // Tests a corrupt file fails to decode
    #[test]
    fn test_load_corrupt() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("corrupt.png");
        fs::write(&path, b"definitely not a png").expect("write");

        assert!(matches!(load_texture(&path), Err(SpriteGridError::ImageLoad { .. })));
    }

    // Tests saving where a file blocks the parent directory
    #[test]
    fn test_save_blocked_parent() {
        let dir = TempDir::new().expect("temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file").expect("write");

        let result = save_png(&RgbaImage::new(4, 4), &blocker.join("sheet.png"));

        assert!(matches!(
            result,
            Err(SpriteGridError::FileSystem {
                operation: "create directory",
                ..
            })
        ));
    }
}
