//! Mathematical utilities for the detectors

/// Descriptive statistics used for confidence calibration
pub mod statistics;
