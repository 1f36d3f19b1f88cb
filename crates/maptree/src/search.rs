use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use tracing::{debug, trace};

use crate::bounds::BoundCalculator;
use crate::cache::ApproxBitsetCache;
use crate::conf::num_blocks;
use crate::data_manager::DataManager;
use crate::likelihood::TreeLikelihood;
use crate::prior::TreePrior;
use crate::subproblem::Subproblem;
use crate::tree::{DecisionTree, Solution};

/// Handle to an OR node in the search's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrId(usize);

/// Handle to an AND node in the search's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AndId(usize);

/// An OR node: a subproblem in the explicit AND/OR search graph.
///
/// Carries lower and upper bounds on the subproblem's optimal negative log
/// posterior and, once expanded, one AND-node child per valid split. The
/// marked children (`child_with_best_lb`, `child_with_best_ub`) identify the
/// next tree to refine and the best tree found so far; `parents` holds
/// back-references used to backpropagate bound updates. The node is solved
/// when its bounds meet.
struct OrNode {
    depth: usize,
    lower_bound: f64,
    upper_bound: f64,
    expanded: bool,
    child_with_best_lb: Option<AndId>,
    child_with_best_ub: Option<AndId>,
    children: Vec<AndId>,
    parents: Vec<AndId>,
}

impl OrNode {
    fn is_solved(&self) -> bool {
        self.lower_bound == self.upper_bound
    }
}

/// An AND node: a commitment to split its parent subproblem on one feature.
/// The left child is the value-0 sub-subproblem, the right child value-1.
struct AndNode {
    feature: usize,
    left_child: OrId,
    right_child: OrId,
    parent: OrId,
}

/// Best-first search for the MAP tree, adapted from AO*.
///
/// The search grows an explicit AND/OR graph rooted at the full subproblem:
///
/// 1. Descend along marked best-lower-bound children to an unexpanded leaf.
/// 2. Expand it, creating one AND node per valid split; child OR nodes are
///    shared through the fingerprint cache, so subproblems reached along
///    different paths become one node.
/// 3. Backpropagate lower and upper bounds towards the root.
///
/// The loop runs until the root is solved or an expansion/time limit trips,
/// then reconstructs the best tree found from the marked upper-bound
/// children.
pub struct BestFirstSearch<'a> {
    dm: &'a DataManager,
    bounds: BoundCalculator,
    cache: ApproxBitsetCache<OrId>,
    or_nodes: Vec<OrNode>,
    and_nodes: Vec<AndNode>,
    expansion_limit: Option<usize>,
    time_limit: Option<u64>,
    subproblem: Subproblem<'a>,
    root: OrId,
}

impl<'a> BestFirstSearch<'a> {
    pub fn new(dm: &'a DataManager, likelihood: TreeLikelihood, prior: TreePrior) -> Self {
        let mut subproblem = Subproblem::new(dm);
        let root_label_counts = subproblem.label_counts();
        let mut search = Self {
            dm,
            bounds: BoundCalculator::new(likelihood, prior, dm.num_features()),
            cache: ApproxBitsetCache::new(num_blocks(dm.num_samples())),
            or_nodes: Vec::new(),
            and_nodes: Vec::new(),
            expansion_limit: None,
            time_limit: None,
            subproblem,
            root: OrId(0),
        };
        search.root = search.build_node(root_label_counts, 0);
        search
    }

    /// Caps the search at `expansion_limit` node expansions and
    /// `time_limit_secs` seconds of wall time. `None` means unbounded. Both
    /// limits are checked once per expansion cycle.
    pub fn with_limits(
        mut self,
        expansion_limit: Option<usize>,
        time_limit_secs: Option<u64>,
    ) -> Self {
        self.expansion_limit = expansion_limit;
        self.time_limit = time_limit_secs;
        self
    }

    /// Runs the search and returns the root bounds together with the best
    /// tree reconstructible from the marked upper-bound children.
    pub fn search(&mut self) -> Solution {
        let start = Instant::now();
        let mut expansions_remaining = self.expansion_limit;
        let mut expansions = 0usize;

        while !self.or_nodes[self.root.0].is_solved() {
            if expansions_remaining == Some(0) {
                break;
            }
            self.subproblem.reset();
            let leaf = self.find_expandable_leaf();
            trace!(
                depth = self.or_nodes[leaf.0].depth,
                lower = self.or_nodes[leaf.0].lower_bound,
                upper = self.or_nodes[leaf.0].upper_bound,
                "expanding leaf"
            );
            self.expand(leaf);
            self.backpropagate_lower_bound(leaf);
            self.backpropagate_upper_bound(leaf);

            expansions += 1;
            if let Some(remaining) = expansions_remaining.as_mut() {
                *remaining -= 1;
            }
            if let Some(limit) = self.time_limit {
                if start.elapsed().as_secs() >= limit {
                    break;
                }
            }
        }

        let root = &self.or_nodes[self.root.0];
        debug!(
            expansions,
            or_nodes = self.or_nodes.len(),
            and_nodes = self.and_nodes.len(),
            cache_entries = self.cache.len(),
            lower_bound = root.lower_bound,
            upper_bound = root.upper_bound,
            "search finished"
        );

        Solution {
            lower_bound: root.lower_bound,
            upper_bound: root.upper_bound,
            tree: self.build_decision_tree(self.root).to_string(),
        }
    }

    fn build_node(&mut self, label_counts: [u32; 2], depth: usize) -> OrId {
        let lower_bound = self.bounds.lower_bound(label_counts, depth, None);
        let upper_bound = self.bounds.upper_bound(label_counts, depth, None);
        debug_assert!(lower_bound > 0.0);
        self.or_nodes.push(OrNode {
            depth,
            lower_bound,
            upper_bound,
            expanded: false,
            child_with_best_lb: None,
            child_with_best_ub: None,
            children: Vec::new(),
            parents: Vec::new(),
        });
        OrId(self.or_nodes.len() - 1)
    }

    /// Descends from the root along marked best-lower-bound children to the
    /// first unexpanded OR node, applying the traversed splits to the
    /// subproblem cursor. Within a marked AND node, the child with the wider
    /// bound spread is taken; ties go left.
    fn find_expandable_leaf(&mut self) -> OrId {
        debug_assert_eq!(self.subproblem.depth(), 0);
        debug_assert!(!self.or_nodes[self.root.0].is_solved());

        let mut node = self.root;
        while self.or_nodes[node.0].expanded {
            let marked = self.or_nodes[node.0]
                .child_with_best_lb
                .expect("expanded unsolved node has a marked child");
            let and = &self.and_nodes[marked.0];
            let left = &self.or_nodes[and.left_child.0];
            let right = &self.or_nodes[and.right_child.0];
            let left_spread = left.upper_bound - left.lower_bound;
            let right_spread = right.upper_bound - right.lower_bound;
            let value = left_spread < right_spread;
            node = if value { and.right_child } else { and.left_child };
            let feature = and.feature;
            self.subproblem.apply_split(feature, value);
        }

        debug_assert!(!self.or_nodes[node.0].is_solved());
        node
    }

    /// Expands an OR node: creates one AND-node child per valid split, with
    /// sub-subproblem OR nodes fetched from the cache or freshly built, and
    /// tightens the node's upper bound with the cheapest split found.
    ///
    /// A node with no valid split is a forced leaf; both bounds collapse to
    /// its stopping cost.
    fn expand(&mut self, node: OrId) {
        debug_assert!(!self.or_nodes[node.0].expanded);
        self.or_nodes[node.0].expanded = true;

        let valid_splits = self.subproblem.valid_splits().to_vec();
        let depth = self.or_nodes[node.0].depth;
        if valid_splits.is_empty() {
            let label_counts = self.subproblem.label_counts();
            let bound = self.bounds.upper_bound(label_counts, depth, Some(0));
            let forced_leaf = &mut self.or_nodes[node.0];
            forced_leaf.upper_bound = bound;
            forced_leaf.lower_bound = bound;
            return;
        }

        let split_penalty = self.bounds.split_penalty(depth, valid_splits.len());
        let outer_label_counts = self.subproblem.label_counts();

        for feature in valid_splits {
            self.subproblem.apply_split(feature, true);
            let right_label_counts = self.subproblem.label_counts();
            let right_child = self.lookup_or_build(right_label_counts, depth + 1);
            self.subproblem.revert_split();

            // the complement of the true branch, saving a popcount pass
            let left_label_counts = [
                outer_label_counts[0] - right_label_counts[0],
                outer_label_counts[1] - right_label_counts[1],
            ];
            self.subproblem.apply_split(feature, false);
            let left_child = self.lookup_or_build(left_label_counts, depth + 1);
            self.subproblem.revert_split();

            let child = AndId(self.and_nodes.len());
            self.and_nodes.push(AndNode {
                feature,
                left_child,
                right_child,
                parent: node,
            });
            self.or_nodes[right_child.0].parents.push(child);
            self.or_nodes[left_child.0].parents.push(child);

            let split_value = self.or_nodes[left_child.0].upper_bound
                + self.or_nodes[right_child.0].upper_bound
                + split_penalty;
            let parent = &mut self.or_nodes[node.0];
            if split_value < parent.upper_bound {
                parent.upper_bound = split_value;
                parent.child_with_best_ub = Some(child);
            }
            parent.children.push(child);
        }
    }

    /// Returns the cached OR node for the cursor's current subproblem, or
    /// builds and caches a fresh one.
    fn lookup_or_build(&mut self, label_counts: [u32; 2], depth: usize) -> OrId {
        match self.cache.get(&self.subproblem) {
            Some(id) => id,
            None => {
                let id = self.build_node(label_counts, depth);
                self.cache.put(&self.subproblem, id);
                id
            }
        }
    }

    /// Recomputes an expanded node's lower bound as the best of its upper
    /// bound and every child's split value, re-marking `child_with_best_lb`.
    /// Returns whether the bound strictly improved.
    fn update_lower_bound(&mut self, node: OrId) -> bool {
        debug_assert!(self.or_nodes[node.0].expanded);

        let depth = self.or_nodes[node.0].depth;
        let num_children = self.or_nodes[node.0].children.len();
        let split_penalty = self.bounds.split_penalty(depth, num_children);

        let mut best_lower_bound = self.or_nodes[node.0].upper_bound;
        let mut child_with_best_lb = None;
        for &child in &self.or_nodes[node.0].children {
            let and = &self.and_nodes[child.0];
            let split_value_lower_bound = self.or_nodes[and.left_child.0].lower_bound
                + self.or_nodes[and.right_child.0].lower_bound
                + split_penalty;
            if split_value_lower_bound < best_lower_bound {
                best_lower_bound = split_value_lower_bound;
                child_with_best_lb = Some(child);
            }
        }

        let updated = &mut self.or_nodes[node.0];
        updated.child_with_best_lb = child_with_best_lb;

        // perfect split heuristic admissibility
        debug_assert!(best_lower_bound >= updated.lower_bound);

        let improved = best_lower_bound > updated.lower_bound;
        updated.lower_bound = best_lower_bound;
        improved
    }

    /// Breadth-first lower-bound backpropagation from a freshly expanded
    /// node. A parent is enqueued only when it is unvisited, unsolved, and
    /// currently depends on the improved child through its marked
    /// best-lower-bound AND node.
    fn backpropagate_lower_bound(&mut self, source: OrId) {
        let mut visited = HashSet::new();
        let mut to_visit = VecDeque::new();
        to_visit.push_back(source);
        visited.insert(source);
        while let Some(front) = to_visit.pop_front() {
            if !self.update_lower_bound(front) {
                continue;
            }
            let parents = self.or_nodes[front.0].parents.clone();
            for parent in parents {
                let owner = self.and_nodes[parent.0].parent;
                if !visited.contains(&owner)
                    && !self.or_nodes[owner.0].is_solved()
                    && self.or_nodes[owner.0].child_with_best_lb == Some(parent)
                {
                    to_visit.push_back(owner);
                    visited.insert(owner);
                }
            }
        }
    }

    /// Breadth-first upper-bound backpropagation: every parent whose split
    /// value beats its owner's upper bound tightens the owner and re-marks
    /// its best-upper-bound child.
    fn backpropagate_upper_bound(&mut self, source: OrId) {
        let mut visited = HashSet::new();
        let mut to_visit = VecDeque::new();
        to_visit.push_back(source);
        visited.insert(source);
        while let Some(front) = to_visit.pop_front() {
            let parents = self.or_nodes[front.0].parents.clone();
            for parent in parents {
                let and = &self.and_nodes[parent.0];
                let owner = and.parent;
                let split_penalty = self.bounds.split_penalty(
                    self.or_nodes[owner.0].depth,
                    self.or_nodes[owner.0].children.len(),
                );
                let split_value = self.or_nodes[and.left_child.0].upper_bound
                    + self.or_nodes[and.right_child.0].upper_bound
                    + split_penalty;
                if split_value < self.or_nodes[owner.0].upper_bound {
                    let owner_node = &mut self.or_nodes[owner.0];
                    owner_node.upper_bound = split_value;
                    owner_node.child_with_best_ub = Some(parent);
                    if !visited.contains(&owner) {
                        to_visit.push_back(owner);
                        visited.insert(owner);
                    }
                }
            }
        }
    }

    /// Reads the best tree found so far out of the marked upper-bound
    /// children. Unexpanded or childless nodes are leaves.
    fn build_decision_tree(&self, node: OrId) -> DecisionTree {
        let or = &self.or_nodes[node.0];
        let marked = match or.child_with_best_ub {
            Some(child) if or.expanded && !or.children.is_empty() => child,
            _ => return DecisionTree::Leaf,
        };
        let and = &self.and_nodes[marked.0];
        DecisionTree::node(
            and.feature,
            self.build_decision_tree(and.left_child),
            self.build_decision_tree(and.right_child),
        )
    }
}
