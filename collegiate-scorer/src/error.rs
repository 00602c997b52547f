//! Error types raised while matching institutions.
#![forbid(unsafe_code)]

use collegiate_core::InvalidArgument;
use thiserror::Error;

/// Errors raised while comparing two vectors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    /// The vectors have different lengths.
    #[error("cannot compare vectors of length {left} and {right}")]
    DimensionMismatch {
        /// Length of the preference vector.
        left: usize,
        /// Length of the candidate vector.
        right: usize,
    },
    /// Cosine similarity is undefined for a zero-length vector.
    #[error("cosine similarity is undefined for a zero-norm vector")]
    ZeroNormVector,
    /// The Gaussian kernel bandwidth was zero, negative or not finite.
    #[error("kernel bandwidth must be positive and finite, got {bandwidth}")]
    InvalidBandwidth {
        /// Configured bandwidth.
        bandwidth: f64,
    },
}

/// Errors raised by [`MatchEngine::run`](crate::MatchEngine::run).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// The request was rejected before any scoring took place.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
    /// A candidate could not be scored.
    #[error("failed to score candidate: {0}")]
    Similarity(#[from] SimilarityError),
}
