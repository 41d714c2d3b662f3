//! Queries and result lines of a ranking run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A query to rank documents for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Query identifier as read from the query set.
    pub id: String,
    /// Query text sent to both scoring stages.
    pub text: String,
}

impl Query {
    /// Create a new query.
    pub fn new<I: Into<String>, T: Into<String>>(id: I, text: T) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// One `(query, document)` line of the run file.
///
/// Rendered as `queryId Q0 docId rank score runTag` with the score carrying
/// exactly six decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLine {
    pub query_id: String,
    pub doc_id: String,
    /// 1-based rank within the query.
    pub rank: usize,
    pub score: f64,
    pub run_tag: String,
}

impl fmt::Display for ResultLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Q0 {} {} {:.6} {}",
            self.query_id, self.doc_id, self.rank, self.score, self.run_tag
        )
    }
}

/// Normalize a query identifier ingested as a fractional number.
///
/// Identifiers such as `"1.0"` (a tabular reader turning integer ids into
/// floats) become `"1"`. Identifiers without a `.`, or that are not an
/// integral finite number, are returned unchanged.
///
/// # Examples
///
/// ```
/// use hybrid_rank::pipeline::query::normalize_query_id;
///
/// assert_eq!(normalize_query_id("1.0"), "1");
/// assert_eq!(normalize_query_id("007"), "007");
/// assert_eq!(normalize_query_id("1.5"), "1.5");
/// assert_eq!(normalize_query_id("q-12"), "q-12");
/// ```
pub fn normalize_query_id(id: &str) -> String {
    let trimmed = id.trim();
    if !trimmed.contains('.') {
        return id.to_string();
    }

    match trimmed.parse::<f64>() {
        Ok(value)
            if value.is_finite()
                && value.fract() == 0.0
                && value >= i64::MIN as f64
                && value < i64::MAX as f64 =>
        {
            (value as i64).to_string()
        }
        _ => id.to_string(),
    }
}
