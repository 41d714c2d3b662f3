//! Per-query orchestration: retrieve, re-score, fuse, format.

use log::{debug, warn};

use super::config::PipelineConfig;
use super::query::{Query, ResultLine, normalize_query_id};
use crate::error::Result;
use crate::fusion::{Candidate, FusionEngine, FusionOutcome, ScoredCandidate};
use crate::retrieval::CandidateSource;
use crate::semantic::SimilarityScorer;

/// How a query that produced an outcome was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    /// Candidates were fused and ranked.
    Complete,
    /// The candidate source (or the scorer) returned nothing; no lines.
    NoCandidates,
    /// Fusion failed; lines carry the unfused candidates in source order.
    Degraded(String),
}

/// Result of processing one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Identifier as emitted in the run file.
    pub query_id: String,
    pub lines: Vec<ResultLine>,
    pub status: QueryStatus,
}

/// Processes a single query against the two scoring collaborators.
#[derive(Debug, Clone, Copy)]
pub struct QueryProcessor<'a> {
    config: &'a PipelineConfig,
    engine: &'a FusionEngine,
}

impl<'a> QueryProcessor<'a> {
    /// Create a new query processor.
    pub fn new(config: &'a PipelineConfig, engine: &'a FusionEngine) -> Self {
        Self { config, engine }
    }

    /// Process one query.
    ///
    /// # Returns
    ///
    /// An outcome whose status tells complete, empty and degraded queries
    /// apart. `Err` is returned when retrieval fails or the scorer breaks
    /// index alignment; the caller skips the query.
    pub fn process<C, S>(&self, query: &Query, source: &C, scorer: &S) -> Result<QueryOutcome>
    where
        C: CandidateSource + ?Sized,
        S: SimilarityScorer + ?Sized,
    {
        let query_id = self.emitted_query_id(&query.id);

        let candidates = source.retrieve(&query.text, self.config.max_retrieve)?;
        if candidates.is_empty() {
            warn!("No candidates found for query {query_id}");
            return Ok(self.empty_outcome(query_id));
        }

        let texts: Vec<String> = candidates.iter().map(|c| c.text.clone()).collect();
        let semantic_scores = scorer.score(&query.text, &texts);

        let outcome = self
            .engine
            .fuse(candidates, &semantic_scores, self.config.alpha)?;

        let result = match outcome {
            FusionOutcome::Ranked(ranked) => {
                let lines = self.format_ranked(&query_id, &ranked);
                QueryOutcome {
                    query_id,
                    lines,
                    status: QueryStatus::Complete,
                }
            }
            FusionOutcome::Empty => {
                warn!("No semantic scores for query {query_id}");
                self.empty_outcome(query_id)
            }
            FusionOutcome::Degraded { candidates, reason } => {
                warn!("Fusion degraded for query {query_id}: {reason}");
                let lines = self.format_unfused(&query_id, &candidates);
                QueryOutcome {
                    query_id,
                    lines,
                    status: QueryStatus::Degraded(reason),
                }
            }
        };

        debug!(
            "Query {} produced {} result lines",
            result.query_id,
            result.lines.len()
        );

        Ok(result)
    }

    fn emitted_query_id(&self, id: &str) -> String {
        if self.config.normalize_query_ids {
            normalize_query_id(id)
        } else {
            id.to_string()
        }
    }

    fn empty_outcome(&self, query_id: String) -> QueryOutcome {
        QueryOutcome {
            query_id,
            lines: Vec::new(),
            status: QueryStatus::NoCandidates,
        }
    }

    fn format_ranked(&self, query_id: &str, ranked: &[ScoredCandidate]) -> Vec<ResultLine> {
        ranked
            .iter()
            .take(self.config.output_depth)
            .enumerate()
            .map(|(position, scored)| {
                self.result_line(query_id, &scored.candidate.doc_id, position, scored.fused_score)
            })
            .collect()
    }

    fn format_unfused(&self, query_id: &str, candidates: &[Candidate]) -> Vec<ResultLine> {
        candidates
            .iter()
            .take(self.config.output_depth)
            .enumerate()
            .map(|(position, candidate)| {
                let score = if candidate.lexical_score.is_finite() {
                    candidate.lexical_score
                } else {
                    0.0
                };
                self.result_line(query_id, &candidate.doc_id, position, score)
            })
            .collect()
    }

    fn result_line(&self, query_id: &str, doc_id: &str, position: usize, score: f64) -> ResultLine {
        ResultLine {
            query_id: query_id.to_string(),
            doc_id: doc_id.to_string(),
            rank: position + 1,
            score,
            run_tag: self.config.run_tag.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HybridRankError;

    struct StaticSource {
        candidates: Vec<Candidate>,
    }

    impl CandidateSource for StaticSource {
        fn retrieve(&self, _query_text: &str, limit: usize) -> Result<Vec<Candidate>> {
            Ok(self.candidates.iter().take(limit).cloned().collect())
        }
    }

    struct FailingSource;

    impl CandidateSource for FailingSource {
        fn retrieve(&self, _query_text: &str, _limit: usize) -> Result<Vec<Candidate>> {
            Err(HybridRankError::retrieval("connection lost"))
        }
    }

    struct FixedScorer {
        scores: Vec<f64>,
    }

    impl SimilarityScorer for FixedScorer {
        fn score(&self, _query: &str, _docs: &[String]) -> Vec<f64> {
            self.scores.clone()
        }
    }

    fn source(lexical: &[f64]) -> StaticSource {
        StaticSource {
            candidates: lexical
                .iter()
                .enumerate()
                .map(|(i, &s)| Candidate::new(format!("doc{}", i + 1), format!("text {i}"), s))
                .collect(),
        }
    }

    fn scorer(scores: &[f64]) -> FixedScorer {
        FixedScorer {
            scores: scores.to_vec(),
        }
    }

    #[test]
    fn test_process_end_to_end() {
        let config = PipelineConfig::default();
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        let outcome = processor
            .process(
                &Query::new("1.0", "x"),
                &source(&[5.0, 3.0, 1.0]),
                &scorer(&[0.1, 0.9, 0.5]),
            )
            .unwrap();

        assert_eq!(outcome.status, QueryStatus::Complete);
        assert_eq!(outcome.query_id, "1");
        let rendered: Vec<String> = outcome.lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "1 Q0 doc2 1 0.750000 HYBRID_SYS",
                "1 Q0 doc1 2 0.500000 HYBRID_SYS",
                "1 Q0 doc3 3 0.250000 HYBRID_SYS",
            ]
        );
    }

    #[test]
    fn test_process_truncates_to_output_depth() {
        let config = PipelineConfig {
            output_depth: 2,
            ..Default::default()
        };
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        let outcome = processor
            .process(
                &Query::new("q", "x"),
                &source(&[4.0, 3.0, 2.0, 1.0]),
                &scorer(&[0.4, 0.3, 0.2, 0.1]),
            )
            .unwrap();

        assert_eq!(outcome.lines.len(), 2);
        assert_eq!(outcome.lines[0].rank, 1);
        assert_eq!(outcome.lines[1].rank, 2);
        assert_eq!(outcome.lines[0].doc_id, "doc1");
    }

    #[test]
    fn test_process_respects_max_retrieve() {
        let config = PipelineConfig {
            max_retrieve: 2,
            ..Default::default()
        };
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        struct LenScorer;
        impl SimilarityScorer for LenScorer {
            fn score(&self, _query: &str, docs: &[String]) -> Vec<f64> {
                (0..docs.len()).map(|i| i as f64).collect()
            }
        }

        let outcome = processor
            .process(&Query::new("q", "x"), &source(&[3.0, 2.0, 1.0]), &LenScorer)
            .unwrap();
        assert_eq!(outcome.lines.len(), 2);
    }

    #[test]
    fn test_process_no_candidates() {
        let config = PipelineConfig::default();
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        let outcome = processor
            .process(&Query::new("3", "x"), &source(&[]), &scorer(&[]))
            .unwrap();

        assert_eq!(outcome.status, QueryStatus::NoCandidates);
        assert!(outcome.lines.is_empty());
    }

    #[test]
    fn test_process_empty_semantic_scores() {
        let config = PipelineConfig::default();
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        let outcome = processor
            .process(&Query::new("3", "x"), &source(&[2.0, 1.0]), &scorer(&[]))
            .unwrap();

        assert_eq!(outcome.status, QueryStatus::NoCandidates);
        assert!(outcome.lines.is_empty());
    }

    #[test]
    fn test_process_retrieval_failure_is_error() {
        let config = PipelineConfig::default();
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        let result = processor.process(&Query::new("1", "x"), &FailingSource, &scorer(&[0.1]));
        assert!(matches!(result, Err(HybridRankError::Retrieval(_))));
    }

    #[test]
    fn test_process_misaligned_scorer_is_error() {
        let config = PipelineConfig::default();
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        let result = processor.process(
            &Query::new("1", "x"),
            &source(&[3.0, 2.0, 1.0]),
            &scorer(&[0.1, 0.2]),
        );
        assert!(matches!(result, Err(HybridRankError::Alignment { .. })));
    }

    #[test]
    fn test_process_degraded_keeps_source_order() {
        let config = PipelineConfig::default();
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        let source = StaticSource {
            candidates: vec![
                Candidate::new("a", "", 2.5),
                Candidate::new("b", "", f64::NAN),
            ],
        };

        let outcome = processor
            .process(&Query::new("9", "x"), &source, &scorer(&[0.9, 0.1]))
            .unwrap();

        assert!(matches!(outcome.status, QueryStatus::Degraded(_)));
        let rendered: Vec<String> = outcome.lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["9 Q0 a 1 2.500000 HYBRID_SYS", "9 Q0 b 2 0.000000 HYBRID_SYS"]
        );
    }

    #[test]
    fn test_query_id_normalization_toggle() {
        let config = PipelineConfig {
            normalize_query_ids: false,
            ..Default::default()
        };
        let engine = FusionEngine::default();
        let processor = QueryProcessor::new(&config, &engine);

        let outcome = processor
            .process(&Query::new("1.0", "x"), &source(&[1.0]), &scorer(&[0.5]))
            .unwrap();

        assert_eq!(outcome.query_id, "1.0");
        assert_eq!(outcome.lines[0].query_id, "1.0");
        assert_eq!(outcome.lines[0].score, 1.0);
    }
}
