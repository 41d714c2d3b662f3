//! Score normalization for hybrid fusion.
//!
//! Lexical and semantic scores live on unrelated scales, so each vector is
//! rescaled to [0, 1] independently before the two are blended. Every strategy
//! keeps length and order, maps an empty input to an empty output, and maps a
//! vector whose elements are all equal to all `1.0`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Score normalization strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreNormalization {
    /// Min-max normalization to [0, 1] range.
    #[default]
    MinMax,
    /// Z-score normalization, mapped from [-3, 3] onto [0, 1] and clamped.
    ZScore,
    /// Rank-based normalization over distinct values.
    Rank,
}

/// Min-max normalize a score vector.
///
/// Shorthand for `ScoreNormalizer::new(ScoreNormalization::MinMax).normalize(scores)`.
///
/// # Examples
///
/// ```
/// use hybrid_rank::fusion::normalizer::normalize;
///
/// assert_eq!(normalize(&[5.0, 3.0, 1.0]), vec![1.0, 0.5, 0.0]);
/// assert_eq!(normalize(&[3.0, 3.0, 3.0]), vec![1.0, 1.0, 1.0]);
/// assert!(normalize(&[]).is_empty());
/// ```
pub fn normalize(scores: &[f64]) -> Vec<f64> {
    ScoreNormalizer::default().normalize(scores)
}

/// Score normalizer for a single score vector.
///
/// Callers are expected to pass finite values; the fusion engine rejects
/// non-finite input before it gets here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreNormalizer {
    /// The normalization strategy to use.
    strategy: ScoreNormalization,
}

impl ScoreNormalizer {
    /// Create a new score normalizer.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_rank::fusion::normalizer::{ScoreNormalization, ScoreNormalizer};
    ///
    /// let normalizer = ScoreNormalizer::new(ScoreNormalization::Rank);
    /// assert_eq!(normalizer.strategy(), ScoreNormalization::Rank);
    /// ```
    pub fn new(strategy: ScoreNormalization) -> Self {
        Self { strategy }
    }

    /// The configured strategy.
    pub fn strategy(&self) -> ScoreNormalization {
        self.strategy
    }

    /// Normalize a score vector into [0, 1].
    ///
    /// The input is left untouched; the result has the same length and order.
    pub fn normalize(&self, scores: &[f64]) -> Vec<f64> {
        if scores.is_empty() {
            return Vec::new();
        }

        let (min, max) = min_max(scores);
        if max == min {
            return vec![1.0; scores.len()];
        }

        match self.strategy {
            ScoreNormalization::MinMax => self.normalize_min_max(scores, min, max),
            ScoreNormalization::ZScore => self.normalize_z_score(scores, min, max),
            ScoreNormalization::Rank => self.normalize_rank(scores),
        }
    }

    /// Min-max normalization: `(score - min) / (max - min)`.
    fn normalize_min_max(&self, scores: &[f64], min: f64, max: f64) -> Vec<f64> {
        let range = max - min;
        if range.is_finite() {
            return scores.iter().map(|&score| (score - min) / range).collect();
        }

        // The range overflows for scores spanning most of the f64 domain.
        let half_range = max / 2.0 - min / 2.0;
        scores
            .iter()
            .map(|&score| ((score / 2.0 - min / 2.0) / half_range).clamp(0.0, 1.0))
            .collect()
    }

    /// Z-score normalization.
    ///
    /// Scores are first divided by their largest magnitude. The z-score does
    /// not change under scaling, and the squared deviations can then neither
    /// overflow nor underflow to zero.
    fn normalize_z_score(&self, scores: &[f64], min: f64, max: f64) -> Vec<f64> {
        let scale = min.abs().max(max.abs());
        let scores: Vec<f64> = scores.iter().map(|&score| score / scale).collect();

        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores
            .iter()
            .map(|&score| (score - mean).powi(2))
            .sum::<f64>()
            / n;
        let std = variance.sqrt();

        scores
            .iter()
            .map(|&score| {
                let z_score = (score - mean) / std;
                if z_score.is_nan() {
                    0.5
                } else {
                    ((z_score + 3.0) / 6.0).clamp(0.0, 1.0)
                }
            })
            .collect()
    }

    /// Rank-based normalization.
    ///
    /// The i-th distinct value in descending order maps to `1 - i / distinct`.
    fn normalize_rank(&self, scores: &[f64]) -> Vec<f64> {
        let mut unique_scores: Vec<f64> = scores.to_vec();
        unique_scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        unique_scores.dedup();

        let distinct = unique_scores.len() as f64;
        scores
            .iter()
            .map(|&score| {
                let rank = unique_scores.partition_point(|&unique| unique > score);
                1.0 - (rank as f64 / distinct)
            })
            .collect()
    }
}

fn min_max(scores: &[f64]) -> (f64, f64) {
    scores.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), &score| (min.min(score), max.max(score)),
    )
}
