//! # hybrid-rank
//!
//! Hybrid document ranking for batch retrieval runs.
//!
//! For every query a lexical search engine supplies candidates, an embedding
//! model re-scores their text, and the two score distributions are normalized
//! and blended into one ranking written in the standard six-column run format.
//!
//! ## Features
//!
//! - Min-max, z-score and rank normalization with a defined all-equal policy
//! - Weighted linear fusion with deterministic, stable tie-breaking
//! - Pluggable candidate sources and similarity scorers
//! - Elasticsearch retrieval and OpenAI-compatible embeddings out of the box
//! - Sequential or bounded-parallel batch execution with identical output

pub mod cli;
pub mod config;
pub mod error;
pub mod fusion;
pub mod io;
pub mod pipeline;
pub mod retrieval;
pub mod semantic;

pub mod prelude {
    pub use crate::error::{HybridRankError, Result};
    pub use crate::fusion::{Candidate, FusionEngine, FusionOutcome, ScoreNormalization};
    pub use crate::pipeline::{BatchOrchestrator, PipelineConfig, Query, ResultLine};
    pub use crate::retrieval::CandidateSource;
    pub use crate::semantic::{SimilarityScorer, TextEmbedder};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
