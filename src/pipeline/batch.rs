//! Batch orchestration over a whole query set.

use std::path::Path;
use std::time::Instant;

use log::{error, info};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use super::config::PipelineConfig;
use super::processor::{QueryOutcome, QueryProcessor};
use super::query::{Query, ResultLine};
use super::stats::BatchStats;
use crate::error::{HybridRankError, Result};
use crate::fusion::FusionEngine;
use crate::io::write_run_file;
use crate::retrieval::CandidateSource;
use crate::semantic::SimilarityScorer;

/// Number of processed queries between progress log lines.
const PROGRESS_INTERVAL: usize = 100;

/// Lines and statistics of a finished batch.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Result lines in query-input order.
    pub lines: Vec<ResultLine>,
    pub stats: BatchStats,
}

/// Drives the query processor over every query of a batch.
///
/// A query whose retrieval or fusion fails is logged and skipped; the rest of
/// the batch continues. With `workers > 1` queries run on a bounded thread
/// pool, and results are still concatenated in query-input order.
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    config: PipelineConfig,
    engine: FusionEngine,
}

impl BatchOrchestrator {
    /// Create a new orchestrator, validating the configuration.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let engine = FusionEngine::new(config.normalization);
        Ok(Self { config, engine })
    }

    /// Get the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process every query and collect the result lines.
    pub fn run<C, S>(&self, queries: &[Query], source: &C, scorer: &S) -> Result<BatchReport>
    where
        C: CandidateSource + ?Sized,
        S: SimilarityScorer + ?Sized,
    {
        let start = Instant::now();
        info!(
            "Starting execution (alpha={}, N={}, depth={}, workers={})",
            self.config.alpha,
            self.config.max_retrieve,
            self.config.output_depth,
            self.config.workers
        );

        let processor = QueryProcessor::new(&self.config, &self.engine);
        let total = queries.len();

        let results: Vec<Result<QueryOutcome>> = if self.config.workers > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.config.workers)
                .thread_name(|i| format!("hybrid-rank-{i}"))
                .build()
                .map_err(|e| HybridRankError::other(format!("Failed to create thread pool: {e}")))?;

            pool.install(|| {
                queries
                    .par_iter()
                    .map(|query| processor.process(query, source, scorer))
                    .collect()
            })
        } else {
            queries
                .iter()
                .enumerate()
                .map(|(i, query)| {
                    let result = processor.process(query, source, scorer);
                    if (i + 1) % PROGRESS_INTERVAL == 0 {
                        info!("Processed {}/{total} queries", i + 1);
                    }
                    result
                })
                .collect()
        };

        let mut report = BatchReport {
            lines: Vec::new(),
            stats: BatchStats {
                total_queries: total,
                ..Default::default()
            },
        };

        for (query, result) in queries.iter().zip(results) {
            match result {
                Ok(outcome) => {
                    report.stats.record(&outcome.status, outcome.lines.len());
                    report.lines.extend(outcome.lines);
                }
                Err(e) => {
                    error!("Skipping query {}: {e}", query.id);
                    report.stats.record_failure();
                }
            }
        }

        report.stats.elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "Batch finished: {} completed, {} degraded, {} without candidates, {} failed, {} lines",
            report.stats.completed,
            report.stats.degraded,
            report.stats.no_candidates,
            report.stats.failed,
            report.stats.result_lines
        );

        Ok(report)
    }

    /// Run the batch and persist the lines to `output_path`.
    ///
    /// The file is only replaced once every query has been processed.
    pub fn run_to_file<C, S, P>(
        &self,
        queries: &[Query],
        source: &C,
        scorer: &S,
        output_path: P,
    ) -> Result<BatchReport>
    where
        C: CandidateSource + ?Sized,
        S: SimilarityScorer + ?Sized,
        P: AsRef<Path>,
    {
        let report = self.run(queries, source, scorer)?;
        write_run_file(output_path, &report.lines)?;
        Ok(report)
    }
}
