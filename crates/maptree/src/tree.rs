use std::fmt;

use serde::{Deserialize, Serialize};

/// A binary decision tree over feature indices.
///
/// Internal nodes test one feature: samples with value 0 descend left,
/// samples with value 1 descend right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionTree {
    Leaf,
    Node {
        feature: usize,
        left: Box<DecisionTree>,
        right: Box<DecisionTree>,
    },
}

impl DecisionTree {
    pub fn node(feature: usize, left: DecisionTree, right: DecisionTree) -> Self {
        Self::Node {
            feature,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }
}

impl fmt::Display for DecisionTree {
    /// Leaves render as the empty string; an internal node with feature `f`
    /// and subtrees `L`, `R` renders as `(<L><f><R>)`. For example:
    ///
    /// ```text
    ///         1
    ///       /   \
    ///      5     9   ------>  "((5)1(9))"
    ///     / \   / \
    ///    .   . .   .
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf => Ok(()),
            Self::Node {
                feature,
                left,
                right,
            } => write!(f, "({left}{feature}{right})"),
        }
    }
}

/// Result of a search: bounds on the optimal negative log posterior and the
/// best tree found. The bounds coincide iff the search proved optimality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub tree: String,
}
