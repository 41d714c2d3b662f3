//! Error types for hybrid-rank.
//!
//! All fallible operations return [`HybridRankError`] through the crate-wide
//! [`Result`] alias. Recoverable per-query conditions (no candidates, degraded
//! fusion) are not errors; they are reported through the outcome types of
//! [`crate::fusion`] and [`crate::pipeline`]. An `Err` from a per-query
//! operation means the query must be skipped.
//!
//! # Examples
//!
//! ```
//! use hybrid_rank::error::{HybridRankError, Result};
//!
//! fn check_alpha(alpha: f64) -> Result<()> {
//!     if !(0.0..=1.0).contains(&alpha) {
//!         return Err(HybridRankError::invalid_config("alpha must be in [0, 1]"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_alpha(1.5).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for hybrid-rank operations.
#[derive(Error, Debug)]
pub enum HybridRankError {
    /// I/O errors (reading queries, writing the run file, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// HTTP transport errors from the search engine or embedding service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Candidate retrieval failed for a query
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Embedding computation failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Semantic scores are not index-aligned with the candidate list
    #[error("Alignment violation: {candidates} candidates but {scores} semantic scores")]
    Alignment { candidates: usize, scores: usize },

    /// The query set could not be loaded
    #[error("Query load error: {0}")]
    QueryLoad(String),

    /// The run file could not be persisted
    #[error("Persist error: {0}")]
    Persist(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with HybridRankError.
pub type Result<T> = std::result::Result<T, HybridRankError>;

impl HybridRankError {
    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        HybridRankError::InvalidConfig(msg.into())
    }

    /// Create a new retrieval error.
    pub fn retrieval<S: Into<String>>(msg: S) -> Self {
        HybridRankError::Retrieval(msg.into())
    }

    /// Create a new embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        HybridRankError::Embedding(msg.into())
    }

    /// Create a new alignment error.
    pub fn alignment(candidates: usize, scores: usize) -> Self {
        HybridRankError::Alignment { candidates, scores }
    }

    /// Create a new query load error.
    pub fn query_load<S: Into<String>>(msg: S) -> Self {
        HybridRankError::QueryLoad(msg.into())
    }

    /// Create a new persist error.
    pub fn persist<S: Into<String>>(msg: S) -> Self {
        HybridRankError::Persist(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HybridRankError::Other(msg.into())
    }
}
