use crate::data::{AttributeValue, Dataset};
use crate::node::TreeNode;
use crate::splitter::{best_split, partition};
use crate::utils::class_counts;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A fitted CART decision tree, with its shape statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub root: TreeNode,
    pub depth: usize,
    pub n_leaves: usize,
}

impl Tree {
    /// Grow a tree over the full dataset by recursive partitioning.
    ///
    /// Each node takes the highest-information-gain question over its
    /// partition; when no question achieves strictly positive gain the
    /// partition becomes a leaf holding its class-frequency distribution.
    /// Every accepted split strictly shrinks both sides, so the recursion is
    /// bounded by the dataset size.
    pub fn fit(data: &Dataset) -> Self {
        let index: Vec<usize> = (0..data.len()).collect();
        let root = grow(data, index);
        let depth = root.depth();
        let n_leaves = root.n_leaves();
        Tree { root, depth, n_leaves }
    }

    /// Class-frequency distribution of the leaf reached by the attribute
    /// vector. Pure traversal, no sampling involved.
    pub fn classify_distribution(&self, attributes: &[AttributeValue]) -> &HashMap<String, usize> {
        self.root.classify(attributes)
    }
}

fn grow(data: &Dataset, index: Vec<usize>) -> TreeNode {
    match best_split(data, &index) {
        // No question separates this partition any further.
        None => TreeNode::Leaf {
            counts: class_counts(data, &index),
        },
        Some(split) => {
            let (true_rows, false_rows) = partition(data, &index, &split.question);
            TreeNode::Split {
                question: split.question,
                true_branch: Box::new(grow(data, true_rows)),
                false_branch: Box::new(grow(data, false_rows)),
            }
        }
    }
}

impl Display for Tree {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::Question;
    use crate::utils::gini;
    use std::fs;

    fn scenario() -> Dataset {
        Dataset::from_delimited("1.0,X\n2.0,X\n5.0,Y\n6.0,Y\n", ',').unwrap()
    }

    fn owls() -> Dataset {
        let text = fs::read_to_string("resources/owls_sample.csv").expect("Something went wrong reading the file");
        Dataset::from_delimited(&text, ',').unwrap()
    }

    // Re-derive the partition of every node and check the structural
    // invariants: two non-empty children per split, leaf counts matching the
    // rows routed to the leaf, and strictly decreasing weighted impurity.
    fn check_node(data: &Dataset, node: &TreeNode, index: &[usize]) {
        assert!(!index.is_empty());
        match node {
            TreeNode::Leaf { counts } => {
                let expected = class_counts(data, index);
                assert_eq!(counts.len(), expected.len());
                for (label, count) in expected.iter() {
                    assert_eq!(counts.get(label), Some(count));
                }
            }
            TreeNode::Split {
                question,
                true_branch,
                false_branch,
            } => {
                let (true_rows, false_rows) = partition(data, index, question);
                assert!(!true_rows.is_empty());
                assert!(!false_rows.is_empty());
                let n = index.len() as f64;
                let weighted = (false_rows.len() as f64 / n) * gini(data, &false_rows)
                    + (true_rows.len() as f64 / n) * gini(data, &true_rows);
                assert!(gini(data, index) > weighted);
                check_node(data, true_branch, &true_rows);
                check_node(data, false_branch, &false_rows);
            }
        }
    }

    #[test]
    fn test_fit_concrete_scenario() {
        let tree = Tree::fit(&scenario());
        assert_eq!(tree.depth, 1);
        assert_eq!(tree.n_leaves, 2);

        match &tree.root {
            TreeNode::Split { question, .. } => {
                let Question { attribute, value } = question;
                assert_eq!(*attribute, 0);
                assert_eq!(*value, AttributeValue::Numeric(5.0));
            }
            TreeNode::Leaf { .. } => panic!("expected a split at the root"),
        }

        let counts = tree.classify_distribution(&[AttributeValue::Numeric(5.5)]);
        assert_eq!(counts.get("Y"), Some(&2));
        assert_eq!(counts.len(), 1);
        let counts = tree.classify_distribution(&[AttributeValue::Numeric(1.5)]);
        assert_eq!(counts.get("X"), Some(&2));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_fit_single_class_returns_single_leaf() {
        let data = Dataset::from_delimited("1.0,A\n2.0,A\n3.0,A\n", ',').unwrap();
        let tree = Tree::fit(&data);
        assert_eq!(tree.depth, 0);
        assert_eq!(tree.n_leaves, 1);
        match &tree.root {
            TreeNode::Leaf { counts } => {
                assert_eq!(counts.get("A"), Some(&3));
                assert_eq!(counts.len(), 1);
            }
            TreeNode::Split { .. } => panic!("expected a single leaf"),
        }
    }

    #[test]
    fn test_fit_identical_instances_returns_single_leaf() {
        let data = Dataset::from_delimited("1.0,A\n1.0,B\n1.0,A\n", ',').unwrap();
        let tree = Tree::fit(&data);
        assert_eq!(tree.n_leaves, 1);
        match &tree.root {
            TreeNode::Leaf { counts } => {
                assert_eq!(counts.get("A"), Some(&2));
                assert_eq!(counts.get("B"), Some(&1));
            }
            TreeNode::Split { .. } => panic!("expected a single leaf"),
        }
    }

    #[test]
    fn test_structural_invariants_on_owls() {
        let data = owls();
        let tree = Tree::fit(&data);
        let index: Vec<usize> = (0..data.len()).collect();
        check_node(&data, &tree.root, &index);
        assert_eq!(tree.depth, tree.root.depth());
        assert_eq!(tree.n_leaves, tree.root.n_leaves());
    }

    #[test]
    fn test_leaf_count_conservation_on_owls() {
        let data = owls();
        let tree = Tree::fit(&data);

        fn total_counts(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { counts } => counts.values().sum(),
                TreeNode::Split {
                    true_branch,
                    false_branch,
                    ..
                } => total_counts(true_branch) + total_counts(false_branch),
            }
        }
        assert_eq!(total_counts(&tree.root), data.len());
    }

    #[test]
    fn test_fit_is_deterministic() {
        let data = owls();
        let a = serde_json::to_string(&Tree::fit(&data)).unwrap();
        let b = serde_json::to_string(&Tree::fit(&data)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_renders_every_leaf() {
        let tree = Tree::fit(&scenario());
        let rendered = format!("{}", tree);
        assert_eq!(rendered, "[x0 >= 5]\n      Y: {Y: 100.0%}\n      N: {X: 100.0%}\n");
    }
}
