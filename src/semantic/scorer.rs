//! Embedding-based similarity scorer.

use log::warn;

use super::flat::FlatInnerProductIndex;
use super::{SimilarityScorer, TextEmbedder};
use crate::error::{HybridRankError, Result};

/// Scores documents by cosine similarity of their embeddings to the query.
///
/// The documents of one call are placed in a [`FlatInnerProductIndex`] and
/// searched best-first; the scorer then writes each score back at the
/// document's original position, so callers always see input order.
pub struct EmbeddingScorer<E> {
    embedder: E,
}

impl<E: TextEmbedder> EmbeddingScorer<E> {
    /// Create a new scorer around an embedder.
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    /// Compute index-aligned similarity scores, propagating failures.
    pub fn try_score(&self, query: &str, docs: &[String]) -> Result<Vec<f64>> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }

        let query_embedding = self
            .embedder
            .embed(&[query.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| HybridRankError::embedding("no embedding returned for query"))?;

        let doc_embeddings = self.embedder.embed(docs)?;
        if doc_embeddings.len() != docs.len() {
            return Err(HybridRankError::embedding(format!(
                "expected {} document embeddings, got {}",
                docs.len(),
                doc_embeddings.len()
            )));
        }

        let mut index = FlatInnerProductIndex::new(query_embedding.len());
        index.add(doc_embeddings)?;

        let hits = index.search(&query_embedding, docs.len())?;

        let mut scores = vec![0.0; docs.len()];
        for (score, original_index) in hits {
            scores[original_index] = f64::from(score);
        }

        Ok(scores)
    }
}

impl<E: TextEmbedder> SimilarityScorer for EmbeddingScorer<E> {
    fn score(&self, query: &str, docs: &[String]) -> Vec<f64> {
        match self.try_score(query, docs) {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Semantic scoring failed, using zero scores: {e}");
                vec![0.0; docs.len()]
            }
        }
    }
}
