//! Small descriptive statistics over numeric samples

use num_traits::ToPrimitive;

/// Arithmetic mean, or `None` for an empty sample
pub fn mean<T: ToPrimitive>(values: &[T]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().filter_map(ToPrimitive::to_f64).sum();
    Some(sum / values.len() as f64)
}

/// Population standard deviation, or `None` for an empty sample
pub fn standard_deviation<T: ToPrimitive>(values: &[T]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values
        .iter()
        .filter_map(ToPrimitive::to_f64)
        .map(|v| (v - mu).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

/// Standard deviation relative to the mean
///
/// Returns `None` for an empty sample or a zero mean.
pub fn coefficient_of_variation<T: ToPrimitive>(values: &[T]) -> Option<f64> {
    let mu = mean(values)?;
    if mu.abs() < f64::EPSILON {
        return None;
    }
    standard_deviation(values).map(|sigma| sigma / mu.abs())
}
