/// Fraction of predictions matching the actual labels.
///
/// The two slices are compared position by position and must have the same
/// non-zero length.
pub fn accuracy<T: PartialEq>(actual: &[T], predicted: &[T]) -> f64 {
    let correct = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();
    correct as f64 / actual.len() as f64
}

/// Arithmetic mean of the values.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Needs at least two values.
pub fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::precision_round;

    #[test]
    fn test_accuracy() {
        let actual = vec!["A", "B", "A", "C"];
        let predicted = vec!["A", "B", "C", "C"];
        assert_eq!(accuracy(&actual, &predicted), 0.75);
        assert_eq!(accuracy(&actual, &actual), 1.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[0.5, 0.7, 0.9]), 0.7);
    }

    #[test]
    fn test_std_dev() {
        // statistics.stdev([2, 4, 4, 4, 5, 5, 7, 9]) = 2.138...
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(precision_round(std_dev(&values), 3), 2.138);
    }

    #[test]
    fn test_std_dev_of_constant_values() {
        assert_eq!(std_dev(&[0.8, 0.8, 0.8]), 0.0);
    }
}
