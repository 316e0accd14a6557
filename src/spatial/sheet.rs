//! Borrowed, read-only view over a caller-owned RGBA8 pixel buffer

/// Row-major RGBA8 sprite sheet borrowed for the duration of one detection
///
/// Detectors never mutate the buffer; every accessor is bounds-checked and
/// treats coordinates outside the sheet as fully transparent.
#[derive(Clone, Copy, Debug)]
pub struct SpriteSheet<'a> {
    pixels: &'a [[u8; 4]],
    width: u32,
    height: u32,
}

impl<'a> SpriteSheet<'a> {
    /// Wrap a pixel buffer, returning `None` when its length is not `width * height`
    pub fn new(pixels: &'a [[u8; 4]], width: u32, height: u32) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize)?;
        (expected == pixels.len() && expected > 0).then_some(Self {
            pixels,
            width,
            height,
        })
    }

    /// Sheet width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Sheet height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Underlying pixel slice
    pub const fn pixels(&self) -> &'a [[u8; 4]] {
        self.pixels
    }

    /// Total pixel count
    pub const fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True when the sheet holds no pixels (never the case for a constructed sheet)
    pub const fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Flat buffer index for a coordinate, if it lies inside the sheet
    pub const fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// RGBA value at a coordinate
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y)
            .and_then(|index| self.pixels.get(index).copied())
    }

    /// Alpha channel at a coordinate, zero outside the sheet
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |rgba| rgba[3])
    }

    /// Whether a pixel's alpha exceeds the threshold byte
    pub fn is_opaque(&self, x: u32, y: u32, threshold: u8) -> bool {
        self.alpha(x, y) > threshold
    }

    /// Summed R+G+B of an opaque pixel, zero for transparent pixels
    pub fn intensity(&self, x: u32, y: u32, threshold: u8) -> u32 {
        match self.pixel(x, y) {
            Some([r, g, b, a]) if a > threshold => u32::from(r) + u32::from(g) + u32::from(b),
            _ => 0,
        }
    }
}

/// Convert a fractional alpha threshold in `[0, 1)` to the byte compared against alpha
pub fn alpha_threshold_byte(threshold: f32) -> u8 {
    (threshold.clamp(0.0, 1.0) * 255.0).round() as u8
}
