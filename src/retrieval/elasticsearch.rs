//! Elasticsearch-backed candidate source.
//!
//! Runs a BM25 `match` query against one text field of an existing index
//! through the `_search` REST endpoint. Index population is not handled here.

use std::time::Duration;

use log::{debug, error, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::CandidateSource;
use crate::error::{HybridRankError, Result};
use crate::fusion::Candidate;

/// Identifier used when a hit carries no document id.
pub const UNKNOWN_DOC_ID: &str = "UNKNOWN";

/// Connection and field mapping for an Elasticsearch index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElasticsearchConfig {
    /// Base URL of the cluster.
    pub host: String,
    /// Index holding the documents.
    pub index: String,
    /// `_source` field carrying the document identifier.
    pub id_field: String,
    /// `_source` field carrying the document text; the query matches against it.
    pub text_field: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost:9200".to_string(),
            index: "ir2025_documents".to_string(),
            id_field: "ID".to_string(),
            text_field: "Text".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Candidate source querying an Elasticsearch index.
#[derive(Debug, Clone)]
pub struct ElasticsearchSource {
    client: Client,
    config: ElasticsearchConfig,
}

impl ElasticsearchSource {
    /// Create a new source and check that the cluster answers.
    ///
    /// An unreachable cluster is logged, not returned as an error: every
    /// query will then fail retrieval and be skipped by the batch.
    pub fn connect(config: ElasticsearchConfig) -> Result<Self> {
        let source = Self::new(config)?;
        if source.ping() {
            info!("Connected to Elasticsearch at {}", source.config.host);
        } else {
            error!("Could not connect to Elasticsearch at {}", source.config.host);
        }
        Ok(source)
    }

    /// Create a new source without contacting the cluster.
    pub fn new(config: ElasticsearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &ElasticsearchConfig {
        &self.config
    }

    /// Check whether the cluster root endpoint responds successfully.
    pub fn ping(&self) -> bool {
        self.client
            .get(self.config.host.trim_end_matches('/'))
            .send()
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }

    fn search_url(&self) -> String {
        format!(
            "{}/{}/_search",
            self.config.host.trim_end_matches('/'),
            self.config.index
        )
    }

    /// Build the `_search` request body for a query.
    pub fn search_body(&self, query_text: &str, limit: usize) -> Value {
        let mut matcher = Map::new();
        matcher.insert(self.config.text_field.clone(), Value::from(query_text));

        json!({
            "query": { "match": matcher },
            "size": limit
        })
    }

    /// Convert a `_search` response into candidates in hit order.
    ///
    /// A hit whose `_score` is null or missing keeps a NaN lexical score so
    /// the fusion stage reports the query as degraded instead of ranking it.
    pub fn parse_hits(&self, response: &Value) -> Result<Vec<Candidate>> {
        let hits = response
            .get("hits")
            .and_then(|hits| hits.get("hits"))
            .and_then(Value::as_array)
            .ok_or_else(|| HybridRankError::retrieval("response has no hits.hits array"))?;

        let candidates = hits
            .iter()
            .map(|hit| {
                let source = hit.get("_source");
                let doc_id = source
                    .and_then(|s| s.get(&self.config.id_field))
                    .and_then(scalar_to_string)
                    .unwrap_or_else(|| UNKNOWN_DOC_ID.to_string());
                let text = source
                    .and_then(|s| s.get(&self.config.text_field))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let lexical_score = hit
                    .get("_score")
                    .and_then(Value::as_f64)
                    .unwrap_or(f64::NAN);

                Candidate {
                    doc_id,
                    text,
                    lexical_score,
                }
            })
            .collect();

        Ok(candidates)
    }
}

impl CandidateSource for ElasticsearchSource {
    fn retrieve(&self, query_text: &str, limit: usize) -> Result<Vec<Candidate>> {
        let response = self
            .client
            .post(self.search_url())
            .json(&self.search_body(query_text, limit))
            .send()
            .map_err(|e| HybridRankError::retrieval(format!("search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HybridRankError::retrieval(format!(
                "search returned HTTP {status}"
            )));
        }

        let body: Value = response
            .json()
            .map_err(|e| HybridRankError::retrieval(format!("invalid search response: {e}")))?;
        let candidates = self.parse_hits(&body)?;

        let preview: String = query_text.chars().take(30).collect();
        debug!(
            "Retrieved {} documents for query: '{preview}...'",
            candidates.len()
        );

        Ok(candidates)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
