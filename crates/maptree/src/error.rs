use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced while validating or loading input data.
///
/// Internal search invariants (bound admissibility, bitset level bounds,
/// arena handle validity) are debug assertions, not error values: violating
/// them is a programming bug, not a recoverable condition. Hitting an
/// expansion or time limit is likewise not an error; the search returns a
/// normal [`crate::tree::Solution`] whose bounds straddle the optimum.
#[derive(Error, Debug)]
pub enum MapTreeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("could not read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
