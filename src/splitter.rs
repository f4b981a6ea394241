use crate::data::{AttributeValue, Dataset};
use crate::utils::gini;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display};

/// A single attribute test used to partition a dataset.
///
/// The comparison mode follows from the comparison value itself: a numeric
/// value tests `attribute >= value`, a categorical value tests
/// `attribute == value`. The mode is therefore fixed for the lifetime of the
/// question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub attribute: usize,
    pub value: AttributeValue,
}

impl Question {
    pub fn new(attribute: usize, value: AttributeValue) -> Self {
        Question { attribute, value }
    }

    /// Answer the question for one attribute vector.
    #[inline]
    pub fn answer(&self, attributes: &[AttributeValue]) -> bool {
        match (&attributes[self.attribute], &self.value) {
            (AttributeValue::Numeric(observed), AttributeValue::Numeric(threshold)) => observed >= threshold,
            (AttributeValue::Categorical(observed), AttributeValue::Categorical(expected)) => observed == expected,
            // Mixed-type comparisons do not occur in width-validated columns.
            _ => false,
        }
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.value {
            AttributeValue::Numeric(v) => write!(f, "[x{} >= {}]", self.attribute, v),
            AttributeValue::Categorical(s) => write!(f, "[x{} == {}]", self.attribute, s),
        }
    }
}

/// The winning question of a split search, with its information gain.
#[derive(Debug, Clone)]
pub struct SplitInfo {
    pub gain: f64,
    pub question: Question,
}

/// Partition a row-index set into the rows answering the question true and
/// the rows answering false. Row order is preserved on both sides.
pub fn partition(data: &Dataset, index: &[usize], question: &Question) -> (Vec<usize>, Vec<usize>) {
    let mut true_rows = Vec::new();
    let mut false_rows = Vec::new();
    for &i in index {
        if question.answer(&data.get(i).attributes) {
            true_rows.push(i);
        } else {
            false_rows.push(i);
        }
    }
    (true_rows, false_rows)
}

/// Distinct values observed at one attribute across the partition.
///
/// Numeric values are enumerated in ascending order and categorical values in
/// first-seen order, so candidate enumeration (and with it, tie-breaking) is
/// identical on every build.
fn distinct_values(data: &Dataset, index: &[usize], attribute: usize) -> Vec<AttributeValue> {
    let mut values: Vec<AttributeValue> = Vec::new();
    for &i in index {
        let v = data.value(i, attribute);
        if !values.contains(v) {
            values.push(v.clone());
        }
    }
    values.sort_by(|a, b| match (a, b) {
        (AttributeValue::Numeric(x), AttributeValue::Numeric(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => Ordering::Equal,
    });
    values
}

/// Search every attribute/value pair for the question with the highest
/// information gain over the partition.
///
/// Candidates that route every row to one side are skipped. The best
/// candidate is tracked with a strict `>` comparison, so the earliest
/// enumerated question wins ties. Returns `None` when no candidate achieves
/// strictly positive gain.
pub fn best_split(data: &Dataset, index: &[usize]) -> Option<SplitInfo> {
    let current = gini(data, index);
    let n = index.len() as f64;

    let mut best: Option<SplitInfo> = None;
    let mut best_gain = 0.0;

    for attribute in 0..data.n_attributes() {
        for value in distinct_values(data, index, attribute) {
            let question = Question::new(attribute, value);
            let (true_rows, false_rows) = partition(data, index, &question);
            if true_rows.is_empty() || false_rows.is_empty() {
                // The question did not separate any rows.
                continue;
            }

            let weighted = (false_rows.len() as f64 / n) * gini(data, &false_rows)
                + (true_rows.len() as f64 / n) * gini(data, &true_rows);
            let gain = current - weighted;

            if gain > best_gain {
                best_gain = gain;
                best = Some(SplitInfo { gain, question });
            }
        }
    }
    best
}
