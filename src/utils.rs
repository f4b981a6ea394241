use crate::data::Dataset;
use hashbrown::HashMap;

/// Count how many rows of the partition carry each class label.
pub fn class_counts(data: &Dataset, index: &[usize]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for &i in index {
        *counts.entry_ref(data.label(i)).or_insert(0) += 1;
    }
    counts
}

/// Gini uncertainty of a row-index partition, `1 - sum(p_c^2)` over the
/// per-class relative frequencies.
///
/// Zero means the partition is pure, higher means more mixed. Only defined
/// for non-empty partitions; callers guarantee `index` is non-empty.
pub fn gini(data: &Dataset, index: &[usize]) -> f64 {
    let counts = class_counts(data, index);
    let n = index.len() as f64;
    let mut uncertainty = 1.0;
    for count in counts.values() {
        let p = *count as f64 / n;
        uncertainty -= p * p;
    }
    uncertainty
}

/// Round to a given number of decimal places.
pub fn precision_round(n: f64, precision: i32) -> f64 {
    let scale = 10_f64.powi(precision);
    (n * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(labels: &[&str]) -> Dataset {
        let text: String = labels.iter().map(|l| format!("0,{}\n", l)).collect();
        Dataset::from_delimited(&text, ',').unwrap()
    }

    #[test]
    fn test_gini_pure_partition() {
        let data = labeled(&["A", "A", "A", "A"]);
        let index: Vec<usize> = (0..data.len()).collect();
        assert_eq!(gini(&data, &index), 0.0);
    }

    #[test]
    fn test_gini_balanced_two_classes() {
        let data = labeled(&["A", "B", "A", "B"]);
        let index: Vec<usize> = (0..data.len()).collect();
        assert_eq!(gini(&data, &index), 0.5);
    }

    #[test]
    fn test_gini_unbalanced_two_classes() {
        // 3/4 vs 1/4 -> 1 - (0.5625 + 0.0625) = 0.375
        let data = labeled(&["A", "A", "A", "B"]);
        let index: Vec<usize> = (0..data.len()).collect();
        assert_eq!(gini(&data, &index), 0.375);
    }

    #[test]
    fn test_gini_three_uniform_classes() {
        let data = labeled(&["A", "B", "C", "A", "B", "C"]);
        let index: Vec<usize> = (0..data.len()).collect();
        let expected = 1.0 - 3.0 * (1.0_f64 / 3.0) * (1.0 / 3.0);
        assert!((gini(&data, &index) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_gini_subset_of_rows() {
        let data = labeled(&["A", "B", "A", "B"]);
        assert_eq!(gini(&data, &[0, 2]), 0.0);
        assert_eq!(gini(&data, &[0, 1]), 0.5);
    }

    #[test]
    fn test_class_counts() {
        let data = labeled(&["A", "B", "A"]);
        let counts = class_counts(&data, &[0, 1, 2]);
        assert_eq!(counts.get("A"), Some(&2));
        assert_eq!(counts.get("B"), Some(&1));
    }

    #[test]
    fn test_precision_round() {
        assert_eq!(0.3, precision_round(0.3333, 1));
        assert_eq!(0.33, precision_round(0.3333, 2));
    }
}
