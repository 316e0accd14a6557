//! Unit tests, one file per source file under `src/`

pub mod detection;
pub mod spatial;
