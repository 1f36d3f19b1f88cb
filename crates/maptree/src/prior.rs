use crate::error::MapTreeError;

/// Tree-structure priors for MAP tree search.
///
/// - `Bcart`: constructive prior whose split probability decays as
///   `alpha / (1 + depth)^beta`, spread over the valid splits. Does not
///   support degenerate trees (trees with empty leaves).
/// - `BcartDegen`: same decay, but spread over all features and with a
///   stopping term charged even where no valid split remains, so degenerate
///   trees carry mass.
/// - `Uniform`: uniform over all trees.
///
/// See <https://www.jstor.org/stable/2669832>.
#[derive(Debug, Clone, Copy)]
pub enum TreePrior {
    Bcart { alpha: f64, beta: f64 },
    BcartDegen { alpha: f64, beta: f64 },
    Uniform,
}

impl TreePrior {
    pub fn bcart(alpha: f64, beta: f64) -> Result<Self, MapTreeError> {
        Self::validate(alpha, beta)?;
        Ok(Self::Bcart { alpha, beta })
    }

    pub fn bcart_degen(alpha: f64, beta: f64) -> Result<Self, MapTreeError> {
        Self::validate(alpha, beta)?;
        Ok(Self::BcartDegen { alpha, beta })
    }

    fn validate(alpha: f64, beta: f64) -> Result<(), MapTreeError> {
        if alpha <= 0.0 {
            return Err(MapTreeError::InvalidInput(format!(
                "alpha must be positive, got {alpha}"
            )));
        }
        if beta < 0.0 {
            return Err(MapTreeError::InvalidInput(format!(
                "beta must be non-negative, got {beta}"
            )));
        }
        Ok(())
    }

    /// Log probability of splitting at `depth` on one particular feature.
    pub fn log_split_prob(
        &self,
        depth: usize,
        num_valid_splits: usize,
        num_features: usize,
    ) -> f64 {
        match *self {
            Self::Bcart { alpha, beta } => {
                Self::log_split_decay(alpha, beta, depth) - (num_valid_splits as f64).ln()
            }
            Self::BcartDegen { alpha, beta } => {
                Self::log_split_decay(alpha, beta, depth) - (num_features as f64).ln()
            }
            Self::Uniform => 0.0,
        }
    }

    /// Log probability of stopping at `depth`.
    pub fn log_stop_prob(
        &self,
        depth: usize,
        num_valid_splits: usize,
        _num_features: usize,
    ) -> f64 {
        match *self {
            Self::Bcart { alpha, beta } => {
                if num_valid_splits == 0 {
                    return 0.0;
                }
                (1.0 - Self::log_split_decay(alpha, beta, depth).exp()).ln()
            }
            Self::BcartDegen { alpha, beta } => {
                (1.0 - Self::log_split_decay(alpha, beta, depth).exp()).ln()
            }
            Self::Uniform => 0.0,
        }
    }

    fn log_split_decay(alpha: f64, beta: f64, depth: usize) -> f64 {
        alpha.ln() - beta * ((depth + 1) as f64).ln()
    }
}
