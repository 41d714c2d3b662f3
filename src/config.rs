//! Application configuration.
//!
//! [`AppConfig`] gathers file locations, collaborator settings and the run
//! parameters. It is loaded once and passed by value into the components that
//! need it; nothing reads configuration from global state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pipeline::PipelineConfig;
use crate::retrieval::ElasticsearchConfig;
use crate::semantic::EmbeddingConfig;

/// Complete configuration of a hybrid ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// CSV file holding the query set.
    #[serde(default = "default_queries_path")]
    pub queries_path: PathBuf,
    /// Destination of the run file.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default)]
    pub elasticsearch: ElasticsearchConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    pub pipeline: PipelineConfig,
}

fn default_queries_path() -> PathBuf {
    PathBuf::from("data/IR2025/queries.csv")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("data/results/hybrid_results.txt")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            queries_path: default_queries_path(),
            output_path: default_output_path(),
            elasticsearch: ElasticsearchConfig::default(),
            embedding: EmbeddingConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the run parameters.
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
