//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{HybridRankArgs, OutputFormat};
use crate::config::AppConfig;
use crate::pipeline::BatchStats;

/// Summary of a finished ranking run.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub output_path: String,
    pub alpha: f64,
    pub max_retrieve: usize,
    pub output_depth: usize,
    pub run_tag: String,
    pub stats: BatchStats,
}

impl RunSummary {
    /// Create a summary from the run configuration and its statistics.
    pub fn new(config: &AppConfig, stats: BatchStats) -> Self {
        Self {
            output_path: config.output_path.to_string_lossy().to_string(),
            alpha: config.pipeline.alpha,
            max_retrieve: config.pipeline.max_retrieve,
            output_depth: config.pipeline.output_depth,
            run_tag: config.pipeline.run_tag.clone(),
            stats,
        }
    }
}

/// Output a run summary in the requested format.
pub fn output_result(
    message: &str,
    summary: &RunSummary,
    args: &HybridRankArgs,
) -> anyhow::Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                print!("{}", render_human(message, summary));
            }
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
            Ok(())
        }
    }
}

/// Render a summary as human-readable text.
pub fn render_human(message: &str, summary: &RunSummary) -> String {
    let stats = &summary.stats;
    let mut out = String::new();
    out.push_str(&format!("{message}\n\n"));
    out.push_str(&format!("Output file:     {}\n", summary.output_path));
    out.push_str(&format!("Run tag:         {}\n", summary.run_tag));
    out.push_str(&format!(
        "Alpha:           {} (candidates {}, depth {})\n",
        summary.alpha, summary.max_retrieve, summary.output_depth
    ));
    out.push_str(&format!("Queries:         {}\n", stats.total_queries));
    out.push_str(&format!("  completed:     {}\n", stats.completed));
    out.push_str(&format!("  degraded:      {}\n", stats.degraded));
    out.push_str(&format!("  no candidates: {}\n", stats.no_candidates));
    out.push_str(&format!("  failed:        {}\n", stats.failed));
    out.push_str(&format!("Result lines:    {}\n", stats.result_lines));
    out.push_str(&format!("Elapsed:         {} ms\n", stats.elapsed_ms));
    out
}
