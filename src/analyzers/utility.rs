/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Largest value, or 0.0 for empty input.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_mean_and_max() {
        assert_eq!(mean(&[4.5, 5.5, 6.5]), 5.5);
        assert_eq!(max(&[4.5, 6.5, 5.5]), 6.5);
        assert_eq!(max(&[]), 0.0);
    }
}
