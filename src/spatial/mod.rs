//! Pixel-space data structures shared by every detector
//!
//! This module contains spatial-related functionality including:
//! - The borrowed sprite sheet view over caller pixels
//! - Sprite bounding rectangles
//! - Visited masks for flood fills

/// Bit-packed visited masks for flood fills
pub mod mask;
/// Axis-aligned sprite bounding rectangles
pub mod rect;
/// Read-only RGBA8 sheet view
pub mod sheet;

pub use mask::VisitedMask;
pub use rect::SpriteRect;
pub use sheet::{SpriteSheet, alpha_threshold_byte};
