use crate::likelihood::TreeLikelihood;
use crate::prior::TreePrior;

/// Admissible bounds on the negative log posterior of a subproblem.
///
/// Bounds are values to minimize: smaller is better, and both are
/// non-negative. The upper bound is the cost of stopping at the subproblem
/// right now; the lower bound is the cheaper of stopping and an oracle
/// "perfect split" into two pure leaves, which no real tree can beat.
///
/// `num_valid_splits` is `None` for subproblems that have not been expanded
/// yet. The substitutes (1 for the split and stopping-upper terms, 0 for the
/// stopping-lower term) keep the bounds admissible without knowing the true
/// count.
pub struct BoundCalculator {
    likelihood: TreeLikelihood,
    prior: TreePrior,
    num_features: usize,
}

impl BoundCalculator {
    pub fn new(likelihood: TreeLikelihood, prior: TreePrior, num_features: usize) -> Self {
        Self {
            likelihood,
            prior,
            num_features,
        }
    }

    pub fn upper_bound(
        &self,
        label_counts: [u32; 2],
        depth: usize,
        num_valid_splits: Option<usize>,
    ) -> f64 {
        -(self
            .prior
            .log_stop_prob(depth, num_valid_splits.unwrap_or(1), self.num_features)
            + self.likelihood.log_likelihood(label_counts))
    }

    pub fn lower_bound(
        &self,
        label_counts: [u32; 2],
        depth: usize,
        num_valid_splits: Option<usize>,
    ) -> f64 {
        let perfect_split_value = -(self.prior.log_split_prob(
            depth,
            num_valid_splits.unwrap_or(1),
            self.num_features,
        ) + 2.0 * self.prior.log_stop_prob(depth + 1, 0, self.num_features)
            + self.likelihood.log_likelihood_perfect_split(label_counts));
        let stop_value = -(self.prior.log_stop_prob(
            depth,
            num_valid_splits.unwrap_or(0),
            self.num_features,
        ) + self.likelihood.log_likelihood(label_counts));

        perfect_split_value.min(stop_value)
    }

    /// Cost contribution of committing to a split at `depth` when
    /// `num_valid_splits` features are available.
    pub fn split_penalty(&self, depth: usize, num_valid_splits: usize) -> f64 {
        -self
            .prior
            .log_split_prob(depth, num_valid_splits, self.num_features)
    }
}
