//! Cell-size candidate enumeration for one texture dimension

use crate::io::configuration::{COMMON_CELL_SIZES, MINIMUM_CELL_SIZE};

/// Candidate cell sizes for a texture dimension
///
/// Common artist sizes that divide the dimension come first, then every
/// remaining divisor of at least [`MINIMUM_CELL_SIZE`] in the order the
/// divisor pairs are found, then the dimension itself. No value repeats.
pub fn candidate_cell_sizes(dimension: u32) -> Vec<u32> {
    let mut candidates = Vec::new();
    if dimension == 0 {
        return candidates;
    }

    let mut push = |value: u32| {
        if value >= MINIMUM_CELL_SIZE && !candidates.contains(&value) {
            candidates.push(value);
        }
    };

    for size in COMMON_CELL_SIZES {
        if dimension % size == 0 {
            push(size);
        }
    }

    let mut divisor: u32 = 1;
    while u64::from(divisor) * u64::from(divisor) <= u64::from(dimension) {
        if dimension % divisor == 0 {
            push(divisor);
            push(dimension / divisor);
        }
        divisor += 1;
    }

    push(dimension);
    candidates
}

/// Every divisor of `dimension` that is at least [`MINIMUM_CELL_SIZE`], ascending
pub fn texture_divisors(dimension: u32) -> Vec<u32> {
    let mut divisors: Vec<u32> = candidate_cell_sizes(dimension);
    divisors.sort_unstable();
    divisors
}
