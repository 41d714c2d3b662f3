//! Query and batch orchestration.
//!
//! For each query the pipeline retrieves lexical candidates, re-scores their
//! text semantically, fuses both signals and formats the top results as run
//! file lines. The batch layer drives this over a whole query set.

pub mod batch;
pub mod config;
pub mod processor;
pub mod query;
pub mod stats;

pub use batch::{BatchOrchestrator, BatchReport};
pub use config::PipelineConfig;
pub use processor::{QueryOutcome, QueryProcessor, QueryStatus};
pub use query::{Query, ResultLine, normalize_query_id};
pub use stats::BatchStats;
