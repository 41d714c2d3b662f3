//! Types and data structures for score fusion.

use serde::{Deserialize, Serialize};

/// A document returned by first-stage lexical retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable document identifier.
    pub doc_id: String,
    /// Raw document text, used for semantic re-scoring.
    pub text: String,
    /// Lexical relevance score of unspecified scale (higher = more relevant).
    pub lexical_score: f64,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new<I: Into<String>, T: Into<String>>(doc_id: I, text: T, lexical_score: f64) -> Self {
        Self {
            doc_id: doc_id.into(),
            text: text.into(),
            lexical_score,
        }
    }
}

/// A candidate extended with its semantic, normalized and fused scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The candidate as produced by the candidate source.
    pub candidate: Candidate,
    /// Raw semantic similarity score.
    pub semantic_score: f64,
    /// Lexical score after normalization.
    pub normalized_lexical: f64,
    /// Semantic score after normalization.
    pub normalized_semantic: f64,
    /// Weighted combination of the two normalized scores.
    pub fused_score: f64,
}

impl ScoredCandidate {
    /// Document identifier of the underlying candidate.
    pub fn doc_id(&self) -> &str {
        &self.candidate.doc_id
    }
}

/// Outcome of fusing one query's candidates with their semantic scores.
#[derive(Debug, Clone, PartialEq)]
pub enum FusionOutcome {
    /// Candidates ranked by descending fused score.
    Ranked(Vec<ScoredCandidate>),
    /// No candidates or no semantic scores were supplied.
    Empty,
    /// Fusion could not be computed; the original candidates are returned
    /// unchanged in candidate-source order.
    Degraded {
        candidates: Vec<Candidate>,
        reason: String,
    },
}

impl FusionOutcome {
    /// Number of entries carried by this outcome.
    pub fn len(&self) -> usize {
        match self {
            FusionOutcome::Ranked(ranked) => ranked.len(),
            FusionOutcome::Empty => 0,
            FusionOutcome::Degraded { candidates, .. } => candidates.len(),
        }
    }

    /// Check if the outcome carries no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if fusion fell back to the unfused candidate list.
    pub fn is_degraded(&self) -> bool {
        matches!(self, FusionOutcome::Degraded { .. })
    }
}
