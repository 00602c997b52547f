//! Similarity between a preference vector and a candidate vector.

#![forbid(unsafe_code)]

use crate::SimilarityError;

/// Default Gaussian kernel bandwidth.
pub const DEFAULT_BANDWIDTH: f64 = 0.75;

/// How a preference vector is compared with a candidate vector.
///
/// The Gaussian kernel is the default. Scores lie in `(0, 1]` and an exact
/// match scores `1.0`. Cosine similarity ignores vector magnitude, lies in
/// `[-1, 1]` and is undefined for zero vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimilarityStrategy {
    /// `exp(-d² / (2·bandwidth²))` where `d` is the Euclidean distance.
    GaussianKernel {
        /// Distance at which the score falls to `exp(-0.5)`.
        bandwidth: f64,
    },
    /// Dot product divided by the product of the vector norms.
    Cosine,
}

impl Default for SimilarityStrategy {
    fn default() -> Self {
        Self::GaussianKernel {
            bandwidth: DEFAULT_BANDWIDTH,
        }
    }
}

impl SimilarityStrategy {
    /// Score `candidate` against `preference`.
    ///
    /// # Errors
    /// Returns [`SimilarityError::DimensionMismatch`] for vectors of
    /// different lengths, [`SimilarityError::InvalidBandwidth`] for a
    /// non-positive or non-finite kernel bandwidth and
    /// [`SimilarityError::ZeroNormVector`] when cosine similarity meets a
    /// zero vector.
    ///
    /// # Examples
    /// ```
    /// use collegiate_scorer::SimilarityStrategy;
    ///
    /// let strategy = SimilarityStrategy::default();
    /// assert_eq!(strategy.score(&[0.0, 1.0], &[0.0, 1.0])?, 1.0);
    /// assert!(strategy.score(&[0.0, 1.0], &[0.0, 0.0])? < 1.0);
    /// # Ok::<(), collegiate_scorer::SimilarityError>(())
    /// ```
    pub fn score(self, preference: &[f64], candidate: &[f64]) -> Result<f64, SimilarityError> {
        if preference.len() != candidate.len() {
            return Err(SimilarityError::DimensionMismatch {
                left: preference.len(),
                right: candidate.len(),
            });
        }
        match self {
            Self::GaussianKernel { bandwidth } => gaussian(bandwidth, preference, candidate),
            Self::Cosine => cosine(preference, candidate),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "kernel evaluation is floating-point maths"
)]
fn gaussian(bandwidth: f64, preference: &[f64], candidate: &[f64]) -> Result<f64, SimilarityError> {
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Err(SimilarityError::InvalidBandwidth { bandwidth });
    }
    let squared: f64 = preference
        .iter()
        .zip(candidate)
        .map(|(wanted, actual)| (wanted - actual).powi(2))
        .sum();
    let score = (-squared / (2.0 * bandwidth.powi(2))).exp();
    // Distant candidates must still score above zero.
    Ok(score.max(f64::MIN_POSITIVE))
}

#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity is floating-point maths"
)]
fn cosine(preference: &[f64], candidate: &[f64]) -> Result<f64, SimilarityError> {
    let dot: f64 = preference
        .iter()
        .zip(candidate)
        .map(|(wanted, actual)| wanted * actual)
        .sum();
    let norm = |values: &[f64]| values.iter().map(|value| value.powi(2)).sum::<f64>().sqrt();
    let denominator = norm(preference) * norm(candidate);
    if denominator == 0.0 {
        return Err(SimilarityError::ZeroNormVector);
    }
    Ok((dot / denominator).clamp(-1.0, 1.0))
}
