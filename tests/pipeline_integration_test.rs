use std::collections::HashMap;
use std::fs;

use hybrid_rank::io::{read_queries, render_lines};
use hybrid_rank::prelude::*;

type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Candidate lists keyed by query text. Unknown queries fail.
struct MapSource {
    results: HashMap<String, Vec<Candidate>>,
}

impl MapSource {
    fn new() -> Self {
        Self {
            results: HashMap::new(),
        }
    }

    fn with(mut self, query: &str, candidates: &[(&str, &str, f64)]) -> Self {
        let candidates = candidates
            .iter()
            .map(|&(id, text, score)| Candidate::new(id, text, score))
            .collect();
        self.results.insert(query.to_string(), candidates);
        self
    }
}

impl CandidateSource for MapSource {
    fn retrieve(&self, query_text: &str, limit: usize) -> Result<Vec<Candidate>> {
        match self.results.get(query_text) {
            Some(candidates) => Ok(candidates.iter().take(limit).cloned().collect()),
            None => Err(HybridRankError::retrieval(format!(
                "index unavailable for '{query_text}'"
            ))),
        }
    }
}

/// Scores each document by a fixed value looked up from its text.
struct LookupScorer {
    scores: HashMap<String, f64>,
}

impl LookupScorer {
    fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: scores.iter().map(|&(t, s)| (t.to_string(), s)).collect(),
        }
    }
}

impl SimilarityScorer for LookupScorer {
    fn score(&self, _query: &str, docs: &[String]) -> Vec<f64> {
        docs.iter()
            .map(|d| self.scores.get(d).copied().unwrap_or(0.0))
            .collect()
    }
}

fn config(alpha: f64, depth: usize) -> PipelineConfig {
    PipelineConfig {
        alpha,
        output_depth: depth,
        run_tag: "TAG".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_end_to_end_single_query() -> TestResult {
    let source = MapSource::new().with(
        "x",
        &[("c1", "t1", 5.0), ("c2", "t2", 3.0), ("c3", "t3", 1.0)],
    );
    let scorer = LookupScorer::new(&[("t1", 0.1), ("t2", 0.9), ("t3", 0.5)]);

    let orchestrator = BatchOrchestrator::new(config(0.5, 50))?;
    let report = orchestrator.run(&[Query::new("1.0", "x")], &source, &scorer)?;

    assert_eq!(
        render_lines(&report.lines),
        "1 Q0 c2 1 0.750000 TAG\n1 Q0 c1 2 0.500000 TAG\n1 Q0 c3 3 0.250000 TAG"
    );
    assert_eq!(report.stats.completed, 1);
    assert_eq!(report.stats.result_lines, 3);

    Ok(())
}

#[test]
fn test_batch_skips_failures_and_keeps_order() -> TestResult {
    let source = MapSource::new()
        .with("empty", &[])
        .with("good", &[("d1", "alpha", 2.0), ("d2", "beta", 1.0)])
        .with("other", &[("e1", "gamma", 1.0)]);
    let scorer = LookupScorer::new(&[("alpha", 0.2), ("beta", 0.8), ("gamma", 0.4)]);

    let queries = vec![
        Query::new("1", "unknown"),
        Query::new("2", "empty"),
        Query::new("3", "good"),
        Query::new("4", "other"),
    ];

    let orchestrator = BatchOrchestrator::new(config(0.5, 10))?;
    let report = orchestrator.run(&queries, &source, &scorer)?;

    let ids: Vec<&str> = report.lines.iter().map(|l| l.query_id.as_str()).collect();
    assert_eq!(ids, vec!["3", "3", "4"]);
    assert_eq!(report.stats.total_queries, 4);
    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.no_candidates, 1);
    assert_eq!(report.stats.completed, 2);

    Ok(())
}

/// Returns one score too many for the query text "broken".
struct MisalignedScorer;

impl SimilarityScorer for MisalignedScorer {
    fn score(&self, query: &str, docs: &[String]) -> Vec<f64> {
        let extra = usize::from(query == "broken");
        vec![0.5; docs.len() + extra]
    }
}

#[test]
fn test_misaligned_scores_skip_only_that_query() -> TestResult {
    let source = MapSource::new()
        .with("broken", &[("b1", "b1", 2.0), ("b2", "b2", 1.0)])
        .with("fine", &[("f1", "f1", 1.0), ("f2", "f2", 3.0)]);
    let queries = vec![Query::new("1", "broken"), Query::new("2", "fine")];

    for workers in [1, 2] {
        let orchestrator = BatchOrchestrator::new(PipelineConfig {
            workers,
            ..config(0.5, 10)
        })?;
        let report = orchestrator.run(&queries, &source, &MisalignedScorer)?;

        assert_eq!(
            render_lines(&report.lines),
            "2 Q0 f2 1 1.000000 TAG\n2 Q0 f1 2 0.500000 TAG"
        );
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.completed, 1);
    }

    Ok(())
}

#[test]
fn test_output_depth_truncates() -> TestResult {
    let source = MapSource::new().with(
        "q",
        &[("a", "a", 4.0), ("b", "b", 3.0), ("c", "c", 2.0), ("d", "d", 1.0)],
    );
    let scorer = LookupScorer::new(&[]);

    let orchestrator = BatchOrchestrator::new(config(0.5, 2))?;
    let report = orchestrator.run(&[Query::new("7", "q")], &source, &scorer)?;

    assert_eq!(report.lines.len(), 2);
    assert_eq!(report.lines[0].doc_id, "a");
    assert_eq!(report.lines[1].rank, 2);

    Ok(())
}

#[test]
fn test_run_to_file_overwrites() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("runs").join("hybrid.txt");
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(&path, "stale content\n")?;

    let source = MapSource::new().with("x", &[("c1", "t1", 5.0), ("c2", "t2", 3.0)]);
    let scorer = LookupScorer::new(&[("t1", 0.3), ("t2", 0.6)]);

    let orchestrator = BatchOrchestrator::new(config(1.0, 50))?;
    orchestrator.run_to_file(&[Query::new("12", "x")], &source, &scorer, &path)?;

    let written = fs::read_to_string(&path)?;
    assert_eq!(written, "12 Q0 c1 1 1.000000 TAG\n12 Q0 c2 2 0.000000 TAG");

    Ok(())
}

#[test]
fn test_csv_queries_through_pipeline() -> TestResult {
    let csv = "QueryID,Query\n1.0,x\n2.0,y\n";
    let queries = read_queries(csv.as_bytes())?;

    let source = MapSource::new()
        .with("x", &[("a", "a", 1.0)])
        .with("y", &[("b", "b", 1.0)]);
    let scorer = LookupScorer::new(&[]);

    let orchestrator = BatchOrchestrator::new(config(0.5, 50))?;
    let report = orchestrator.run(&queries, &source, &scorer)?;

    assert_eq!(
        render_lines(&report.lines),
        "1 Q0 a 1 1.000000 TAG\n2 Q0 b 1 1.000000 TAG"
    );

    Ok(())
}

#[test]
fn test_alpha_extremes_follow_single_signal() -> TestResult {
    let engine = FusionEngine::new(ScoreNormalization::MinMax);
    let candidates = vec![
        Candidate::new("a", "", 12.0),
        Candidate::new("b", "", 30.0),
        Candidate::new("c", "", 7.5),
        Candidate::new("d", "", 19.0),
    ];
    let semantic = [0.9, 0.1, 0.5, 0.3];

    let ranked_ids = |outcome: FusionOutcome| -> Vec<String> {
        match outcome {
            FusionOutcome::Ranked(ranked) => {
                ranked.iter().map(|s| s.doc_id().to_string()).collect()
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    };

    let lexical_only = ranked_ids(engine.fuse(candidates.clone(), &semantic, 1.0)?);
    assert_eq!(lexical_only, vec!["b", "d", "a", "c"]);

    let semantic_only = ranked_ids(engine.fuse(candidates, &semantic, 0.0)?);
    assert_eq!(semantic_only, vec!["a", "c", "d", "b"]);

    Ok(())
}

#[test]
fn test_parallel_matches_sequential() -> TestResult {
    let mut source = MapSource::new();
    let mut queries = Vec::new();
    for q in 0..40 {
        let text = format!("query{q}");
        let candidates: Vec<(String, f64)> = (0..8)
            .map(|d| (format!("q{q}d{d}"), ((q * 7 + d * 3) % 11) as f64))
            .collect();
        let borrowed: Vec<(&str, &str, f64)> = candidates
            .iter()
            .map(|(id, s)| (id.as_str(), id.as_str(), *s))
            .collect();
        source = source.with(&text, &borrowed);
        queries.push(Query::new(q.to_string(), text));
    }
    let scorer = LookupScorer::new(&[]);

    let sequential = BatchOrchestrator::new(config(0.6, 5))?.run(&queries, &source, &scorer)?;
    let parallel = BatchOrchestrator::new(PipelineConfig {
        workers: 4,
        ..config(0.6, 5)
    })?
    .run(&queries, &source, &scorer)?;

    assert_eq!(sequential.lines, parallel.lines);
    assert_eq!(sequential.lines.len(), 200);

    Ok(())
}
