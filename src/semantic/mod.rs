//! Semantic re-scoring of lexical candidates.
//!
//! The ranking core consumes similarity scores through [`SimilarityScorer`].
//! [`EmbeddingScorer`] implements it on top of any [`TextEmbedder`] and an
//! exact inner-product search, [`OpenAiEmbedder`] provides embeddings from an
//! OpenAI-compatible HTTP service.

pub mod flat;
pub mod openai;
pub mod scorer;

pub use flat::FlatInnerProductIndex;
pub use openai::{EmbeddingConfig, OpenAiEmbedder};
pub use scorer::EmbeddingScorer;

use crate::error::Result;

/// Trait for query/document similarity scorers.
///
/// The returned vector's i-th element is the similarity of `docs[i]` to
/// `query`, in input order regardless of any internal reordering. On internal
/// failure implementations return an all-zero vector of matching length
/// instead of an error.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, query: &str, docs: &[String]) -> Vec<f64>;
}

impl<S: SimilarityScorer + ?Sized> SimilarityScorer for &S {
    fn score(&self, query: &str, docs: &[String]) -> Vec<f64> {
        (**self).score(query, docs)
    }
}

impl<S: SimilarityScorer + ?Sized> SimilarityScorer for Box<S> {
    fn score(&self, query: &str, docs: &[String]) -> Vec<f64> {
        (**self).score(query, docs)
    }
}

/// Trait for converting texts to dense vector embeddings.
///
/// Output order must equal input order, one vector per text.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}
