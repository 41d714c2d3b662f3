//! Statistics for a batch run.

use serde::{Deserialize, Serialize};

use super::processor::QueryStatus;

/// Counters describing how the queries of a batch were handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Total number of queries in the batch.
    pub total_queries: usize,
    /// Queries fused and ranked normally.
    pub completed: usize,
    /// Queries written from the unfused candidate list.
    pub degraded: usize,
    /// Queries without candidates or semantic scores.
    pub no_candidates: usize,
    /// Queries skipped because of an error.
    pub failed: usize,
    /// Number of result lines produced.
    pub result_lines: usize,
    /// Wall-clock time of the batch in milliseconds.
    pub elapsed_ms: u64,
}

impl BatchStats {
    /// Record a query that produced an outcome.
    pub fn record(&mut self, status: &QueryStatus, lines: usize) {
        match status {
            QueryStatus::Complete => self.completed += 1,
            QueryStatus::NoCandidates => self.no_candidates += 1,
            QueryStatus::Degraded(_) => self.degraded += 1,
        }
        self.result_lines += lines;
    }

    /// Record a skipped query.
    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    /// Queries that produced at least a usable outcome.
    pub fn processed(&self) -> usize {
        self.completed + self.degraded + self.no_candidates
    }
}
