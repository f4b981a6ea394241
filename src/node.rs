use crate::data::AttributeValue;
use crate::splitter::Question;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::fmt::{self, Display};

/// A node of a fitted decision tree.
///
/// The tree is a strict binary tree: every split owns exactly two subtrees,
/// and every path ends in a leaf holding the class-frequency distribution of
/// the training rows that reached it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Split {
        question: Question,
        true_branch: Box<TreeNode>,
        false_branch: Box<TreeNode>,
    },
    Leaf {
        counts: HashMap<String, usize>,
    },
}

impl TreeNode {
    /// Walk down to the leaf selected by the attribute vector and return its
    /// class-frequency distribution.
    pub fn classify(&self, attributes: &[AttributeValue]) -> &HashMap<String, usize> {
        match self {
            TreeNode::Leaf { counts } => counts,
            TreeNode::Split {
                question,
                true_branch,
                false_branch,
            } => {
                if question.answer(attributes) {
                    true_branch.classify(attributes)
                } else {
                    false_branch.classify(attributes)
                }
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Length of the longest path below this node. A leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split {
                true_branch,
                false_branch,
                ..
            } => 1 + max(true_branch.depth(), false_branch.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split {
                true_branch,
                false_branch,
                ..
            } => true_branch.n_leaves() + false_branch.n_leaves(),
        }
    }

    fn fmt_depth(&self, f: &mut fmt::Formatter, depth: usize, branch: Option<bool>) -> fmt::Result {
        let pad = "      ".repeat(depth);
        let tag = match branch {
            Some(true) => "Y: ",
            Some(false) => "N: ",
            None => "",
        };
        match self {
            TreeNode::Leaf { counts } => {
                let total: usize = counts.values().sum();
                // To make the rendering deterministic, sort the labels.
                let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let shares: Vec<String> = entries
                    .iter()
                    .map(|(label, count)| format!("{}: {:.1}%", label, **count as f64 * 100.0 / total as f64))
                    .collect();
                writeln!(f, "{}{}{{{}}}", pad, tag, shares.join(", "))
            }
            TreeNode::Split {
                question,
                true_branch,
                false_branch,
            } => {
                writeln!(f, "{}{}{}", pad, tag, question)?;
                true_branch.fmt_depth(f, depth + 1, Some(true))?;
                false_branch.fmt_depth(f, depth + 1, Some(false))
            }
        }
    }
}

impl Display for TreeNode {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_depth(f, 0, None)
    }
}
