//! Configuration for a hybrid ranking run.

use serde::{Deserialize, Serialize};

use crate::error::{HybridRankError, Result};
use crate::fusion::ScoreNormalization;

/// Default per-query output depth.
pub const DEFAULT_OUTPUT_DEPTH: usize = 50;

/// Default run tag written in the last column of every result line.
pub const DEFAULT_RUN_TAG: &str = "HYBRID_SYS";

/// Run parameters threaded from the batch orchestrator down to fusion.
///
/// `output_depth` has no serde default: a configuration file must state it,
/// because it changes both evaluation metrics and file size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Weight of the lexical score (0.0-1.0); the semantic score gets `1 - alpha`.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Number of lexical candidates requested per query.
    #[serde(default = "default_max_retrieve")]
    pub max_retrieve: usize,
    /// Number of ranked results written per query.
    pub output_depth: usize,
    /// Label identifying this pipeline configuration in the run file.
    #[serde(default = "default_run_tag")]
    pub run_tag: String,
    /// Normalization strategy applied to both score vectors.
    #[serde(default)]
    pub normalization: ScoreNormalization,
    /// Rewrite fractional numeric query ids ("1.0") to integer form ("1").
    #[serde(default = "default_normalize_query_ids")]
    pub normalize_query_ids: bool,
    /// Number of worker threads; 1 processes queries sequentially.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_alpha() -> f64 {
    0.5
}

fn default_max_retrieve() -> usize {
    200
}

fn default_run_tag() -> String {
    DEFAULT_RUN_TAG.to_string()
}

fn default_normalize_query_ids() -> bool {
    true
}

fn default_workers() -> usize {
    1
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            max_retrieve: default_max_retrieve(),
            output_depth: DEFAULT_OUTPUT_DEPTH,
            run_tag: default_run_tag(),
            normalization: ScoreNormalization::MinMax,
            normalize_query_ids: default_normalize_query_ids(),
            workers: default_workers(),
        }
    }
}

impl PipelineConfig {
    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(HybridRankError::invalid_config(format!(
                "alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        if self.max_retrieve == 0 {
            return Err(HybridRankError::invalid_config(
                "max_retrieve must be greater than 0",
            ));
        }
        if self.output_depth == 0 {
            return Err(HybridRankError::invalid_config(
                "output_depth must be greater than 0",
            ));
        }
        if self.run_tag.is_empty() || self.run_tag.chars().any(char::is_whitespace) {
            return Err(HybridRankError::invalid_config(format!(
                "run_tag must be a non-empty token without whitespace, got {:?}",
                self.run_tag
            )));
        }
        if self.workers == 0 {
            return Err(HybridRankError::invalid_config(
                "workers must be greater than 0",
            ));
        }
        Ok(())
    }
}
