//! Pixel analysis shared by the grid detectors
//!
//! Component extraction, candidate cell sizes, scoring of candidate grids
//! and the layout inference every detector falls back on.

/// Connected-component sprite bounds
pub mod bounds;
/// Candidate cell sizes for one texture dimension
pub mod candidates;
/// Cell size estimation from clustered sprite centres
pub mod clustering;
/// Penalty for grid lines cutting through sprites
pub mod fit;
/// Grid layout inference from a cell count
pub mod inference;
/// Transparency of grid lines and divisor snapping
pub mod transparency;
