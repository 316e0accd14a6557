//! Tests for the detectors, dispatch and request/result types

pub mod boundary;
pub mod dispatch;
pub mod result;
pub mod uniform;
