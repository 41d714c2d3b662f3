//! First-stage lexical candidate retrieval.
//!
//! The ranking core only consumes candidates through [`CandidateSource`];
//! [`ElasticsearchSource`] is the adapter used by the command line tool.

pub mod elasticsearch;

pub use elasticsearch::{ElasticsearchConfig, ElasticsearchSource};

use crate::error::Result;
use crate::fusion::Candidate;

/// Trait for lexical candidate sources.
///
/// Implementations return at most `limit` candidates ranked by their own
/// relevance score. "No results" is an empty vector, not an error; `Err` is
/// reserved for failures such as a lost connection.
///
/// Sources are shared across worker threads when a batch runs in parallel.
pub trait CandidateSource: Send + Sync {
    fn retrieve(&self, query_text: &str, limit: usize) -> Result<Vec<Candidate>>;
}

impl<S: CandidateSource + ?Sized> CandidateSource for &S {
    fn retrieve(&self, query_text: &str, limit: usize) -> Result<Vec<Candidate>> {
        (**self).retrieve(query_text, limit)
    }
}

impl<S: CandidateSource + ?Sized> CandidateSource for Box<S> {
    fn retrieve(&self, query_text: &str, limit: usize) -> Result<Vec<Candidate>> {
        (**self).retrieve(query_text, limit)
    }
}
