//! Weighted fusion of lexical and semantic scores.
//!
//! The fused score of candidate `i` is
//! `alpha * norm_lexical[i] + (1 - alpha) * norm_semantic[i]`, where both
//! vectors are normalized independently. Results are sorted by descending
//! fused score with a stable sort, so ties keep candidate-source order.

use std::cmp::Ordering;

use log::{debug, warn};

use super::normalizer::{ScoreNormalization, ScoreNormalizer};
use super::types::{Candidate, FusionOutcome, ScoredCandidate};
use crate::error::{HybridRankError, Result};

/// Fusion engine for combining lexical and semantic scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct FusionEngine {
    /// Normalizer applied to each score vector independently.
    normalizer: ScoreNormalizer,
}

impl FusionEngine {
    /// Create a new fusion engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_rank::fusion::{FusionEngine, ScoreNormalization};
    ///
    /// let engine = FusionEngine::new(ScoreNormalization::MinMax);
    /// ```
    pub fn new(normalization: ScoreNormalization) -> Self {
        Self {
            normalizer: ScoreNormalizer::new(normalization),
        }
    }

    /// Fuse candidates with their index-aligned semantic scores.
    ///
    /// `semantic_scores[i]` must be the similarity of `candidates[i]`.
    ///
    /// # Returns
    ///
    /// * `Ok(FusionOutcome::Ranked(..))` - candidates sorted by fused score
    /// * `Ok(FusionOutcome::Empty)` - no candidates or no semantic scores
    /// * `Ok(FusionOutcome::Degraded { .. })` - a score was not finite; the
    ///   original candidates are handed back unchanged
    /// * `Err(HybridRankError::Alignment { .. })` - the two inputs differ in
    ///   length and cannot be paired
    ///
    /// # Examples
    ///
    /// ```
    /// use hybrid_rank::fusion::{Candidate, FusionEngine, FusionOutcome};
    ///
    /// let engine = FusionEngine::default();
    /// let candidates = vec![
    ///     Candidate::new("a", "first", 10.0),
    ///     Candidate::new("b", "second", 5.0),
    /// ];
    ///
    /// let outcome = engine.fuse(candidates, &[0.1, 0.9], 0.25).unwrap();
    /// let FusionOutcome::Ranked(ranked) = outcome else { panic!() };
    /// assert_eq!(ranked[0].doc_id(), "b");
    /// ```
    pub fn fuse(
        &self,
        candidates: Vec<Candidate>,
        semantic_scores: &[f64],
        alpha: f64,
    ) -> Result<FusionOutcome> {
        if candidates.is_empty() || semantic_scores.is_empty() {
            warn!("Empty candidates or semantic scores provided for fusion");
            return Ok(FusionOutcome::Empty);
        }

        if candidates.len() != semantic_scores.len() {
            return Err(HybridRankError::alignment(
                candidates.len(),
                semantic_scores.len(),
            ));
        }

        let lexical_scores: Vec<f64> = candidates.iter().map(|c| c.lexical_score).collect();

        if let Some(position) = lexical_scores.iter().position(|s| !s.is_finite()) {
            let reason = format!(
                "candidate '{}' has no usable lexical score",
                candidates[position].doc_id
            );
            return Ok(FusionOutcome::Degraded { candidates, reason });
        }
        if let Some(position) = semantic_scores.iter().position(|s| !s.is_finite()) {
            let reason = format!(
                "semantic score for candidate '{}' is not finite",
                candidates[position].doc_id
            );
            return Ok(FusionOutcome::Degraded { candidates, reason });
        }

        let norm_lexical = self.normalizer.normalize(&lexical_scores);
        let norm_semantic = self.normalizer.normalize(semantic_scores);

        debug!(
            "Fusion stats -> alpha: {alpha}, lexical range: [{:.2}, {:.2}], semantic range: [{:.2}, {:.2}]",
            min(&lexical_scores),
            max(&lexical_scores),
            min(semantic_scores),
            max(semantic_scores),
        );

        let mut results: Vec<ScoredCandidate> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| ScoredCandidate {
                candidate,
                semantic_score: semantic_scores[i],
                normalized_lexical: norm_lexical[i],
                normalized_semantic: norm_semantic[i],
                fused_score: alpha * norm_lexical[i] + (1.0 - alpha) * norm_semantic[i],
            })
            .collect();

        // `sort_by` is stable: equal fused scores keep candidate-source order.
        results.sort_by(|a, b| {
            b.fused_score
                .partial_cmp(&a.fused_score)
                .unwrap_or(Ordering::Equal)
        });

        Ok(FusionOutcome::Ranked(results))
    }
}

fn min(scores: &[f64]) -> f64 {
    scores.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(scores: &[f64]) -> f64 {
    scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
