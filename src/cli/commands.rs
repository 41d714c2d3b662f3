//! Command implementations for the hybrid-rank CLI.

use anyhow::{Context, Result};
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::AppConfig;
use crate::io::load_queries;
use crate::pipeline::BatchOrchestrator;
use crate::retrieval::ElasticsearchSource;
use crate::semantic::{EmbeddingScorer, OpenAiEmbedder};

/// Execute a CLI command.
pub fn execute_command(args: HybridRankArgs) -> Result<()> {
    match &args.command {
        Command::Run(run_args) => run(run_args, &args),
        Command::Config(config_args) => show_config(config_args),
    }
}

/// Rank every query and write the run file.
fn run(run_args: &RunArgs, cli_args: &HybridRankArgs) -> Result<()> {
    let mut config = load_config(run_args.config.as_deref())?;
    apply_overrides(&mut config, run_args);
    config.validate().context("invalid run configuration")?;

    let queries = load_queries(&config.queries_path).with_context(|| {
        format!(
            "failed to load queries from {}",
            config.queries_path.display()
        )
    })?;

    info!("Initializing hybrid search pipeline");
    let source = ElasticsearchSource::connect(config.elasticsearch.clone())
        .context("failed to create the Elasticsearch client")?;
    let embedder = OpenAiEmbedder::new(config.embedding.clone())
        .context("failed to create the embedding client")?;
    let scorer = EmbeddingScorer::new(embedder);

    let orchestrator = BatchOrchestrator::new(config.pipeline.clone())?;
    let report = orchestrator
        .run_to_file(&queries, &source, &scorer, &config.output_path)
        .with_context(|| {
            format!(
                "failed to write results to {}",
                config.output_path.display()
            )
        })?;

    output_result(
        "Run completed",
        &RunSummary::new(&config, report.stats),
        cli_args,
    )
}

/// Print the effective configuration.
fn show_config(config_args: &ConfigArgs) -> Result<()> {
    let config = load_config(config_args.config.as_deref())?;
    println!("{}", config.to_json()?);
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

/// Apply command line overrides on top of a loaded configuration.
pub fn apply_overrides(config: &mut AppConfig, args: &RunArgs) {
    if let Some(queries) = &args.queries {
        config.queries_path = queries.clone();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }

    let pipeline = &mut config.pipeline;
    if let Some(alpha) = args.alpha {
        pipeline.alpha = alpha;
    }
    if let Some(max_retrieve) = args.max_retrieve {
        pipeline.max_retrieve = max_retrieve;
    }
    if let Some(depth) = args.depth {
        pipeline.output_depth = depth;
    }
    if let Some(run_tag) = &args.run_tag {
        pipeline.run_tag = run_tag.clone();
    }
    if let Some(workers) = args.workers {
        // 0 selects one worker per logical CPU.
        pipeline.workers = if workers == 0 { num_cpus::get() } else { workers };
    }
    if let Some(normalization) = args.normalization {
        pipeline.normalization = normalization.into();
    }
    if args.no_query_id_normalization {
        pipeline.normalize_query_ids = false;
    }

    if let Some(host) = &args.es_host {
        config.elasticsearch.host = host.clone();
    }
    if let Some(index) = &args.es_index {
        config.elasticsearch.index = index.clone();
    }
    if let Some(endpoint) = &args.embedding_endpoint {
        config.embedding.endpoint = endpoint.clone();
    }
    if let Some(model) = &args.model {
        config.embedding.model = model.clone();
    }
}
