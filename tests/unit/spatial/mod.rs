//! Tests for pixel-space data structures

pub mod sheet;
