//! Hybrid score fusion.
//!
//! This module normalizes a lexical and a semantic score vector independently
//! and blends them into one ranking score with a configurable weight:
//! - `alpha = 1.0` ranks purely by lexical score
//! - `alpha = 0.0` ranks purely by semantic score

pub mod engine;
pub mod normalizer;
pub mod types;

pub use engine::FusionEngine;
pub use normalizer::{ScoreNormalization, ScoreNormalizer, normalize};
pub use types::{Candidate, FusionOutcome, ScoredCandidate};
