//! PNG decoding into detection-ready pixel buffers and PNG export

use crate::io::error::{Result, SpriteGridError};
use image::RgbaImage;
use std::path::Path;

/// A decoded texture: row-major RGBA8 pixels plus dimensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedTexture {
    /// One RGBA element per pixel
    pub pixels: Vec<[u8; 4]>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl LoadedTexture {
    /// Flatten an RGBA image into per-pixel arrays
    pub fn from_rgba(image: &RgbaImage) -> Self {
        Self {
            pixels: image.pixels().map(|pixel| pixel.0).collect(),
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Decode any image the `image` crate understands into RGBA8
///
/// # Errors
///
/// Returns [`SpriteGridError::ImageLoad`] if the file cannot be opened or
/// decoded.
pub fn load_texture(path: &Path) -> Result<LoadedTexture> {
    let image = image::open(path)
        .map_err(|source| SpriteGridError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgba8();
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(LoadedTexture::from_rgba(&image))
}

/// Save an RGBA image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| SpriteGridError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }

    image
        .save(path)
        .map_err(|source| SpriteGridError::ImageExport {
            path: path.to_path_buf(),
            source,
        })
}
