//! # MAPTree
//!
//! A Rust library for finding the maximum a posteriori (MAP) decision tree of
//! a binary-feature, binary-label dataset under the BCART posterior.
//!
//! ## Key Features
//!
//! - **Provably bounded**: the search returns admissible lower and upper
//!   bounds on the optimal negative log posterior, which coincide when the
//!   search runs to completion
//! - **Reversible sparse bitsets**: descending into and backing out of
//!   subproblems costs time proportional to the currently non-empty blocks,
//!   with no state copying
//! - **Graph search**: equivalent subproblems reached along different split
//!   paths are shared through a fingerprint cache, so the search explores an
//!   AND/OR graph rather than a tree
//!
//! ## Example
//!
//! ```rust,ignore
//! use maptree::data_manager::DataManager;
//! use maptree::likelihood::TreeLikelihood;
//! use maptree::prior::TreePrior;
//! use maptree::search::BestFirstSearch;
//!
//! let features = vec![vec![false, true], vec![true, false], vec![true, true]];
//! let labels = vec![false, true, true];
//!
//! let dm = DataManager::new(&features, &labels)?;
//! let likelihood = TreeLikelihood::new([1.0, 1.0])?;
//! let prior = TreePrior::bcart(0.95, 0.5)?;
//!
//! let solution = BestFirstSearch::new(&dm, likelihood, prior).search();
//! println!("{} in [{}, {}]", solution.tree, solution.lower_bound, solution.upper_bound);
//! ```

// Module declarations
pub mod bitset;
pub mod bounds;
pub mod cache;
pub mod conf;
pub mod data_manager;
pub mod error;
pub mod fixed_bitset;
pub mod likelihood;
pub mod loader;
pub mod prior;
pub mod rnumber;
pub mod search;
pub mod subproblem;
pub mod tree;
