//! Query set loading.
//!
//! The query set is a CSV file whose first row holds the column names:
//! ```csv
//! QueryID,Query
//! 1,covid vaccine side effects
//! 2,long term effects of remote work
//! ```

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use log::{info, warn};

use crate::error::{HybridRankError, Result};
use crate::pipeline::Query;

/// Header of the identifier column.
pub const ID_COLUMN: &str = "QueryID";

/// Header of the query text column.
pub const TEXT_COLUMN: &str = "Query";

/// Load queries from a CSV file, keeping file order.
pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<Query>> {
    let path = path.as_ref();
    info!("Loading queries from: {}", path.display());

    let file = std::fs::File::open(path).map_err(|e| {
        HybridRankError::query_load(format!("cannot open {}: {e}", path.display()))
    })?;
    let queries = read_queries(file)?;

    info!("Loaded {} queries", queries.len());
    Ok(queries)
}

/// Read queries from any CSV source.
///
/// Uses the `QueryID` and `Query` columns when both exist, otherwise the
/// first two columns.
pub fn read_queries<R: Read>(reader: R) -> Result<Vec<Query>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(HybridRankError::query_load(format!(
            "query file needs at least two columns, found {}",
            headers.len()
        )));
    }

    let position = |name: &str| headers.iter().position(|h| h == name);
    let (id_index, text_index) = match (position(ID_COLUMN), position(TEXT_COLUMN)) {
        (Some(id), Some(text)) => (id, text),
        _ => {
            warn!("Columns '{ID_COLUMN}'/'{TEXT_COLUMN}' not found. Using 1st and 2nd columns.");
            (0, 1)
        }
    };

    let mut queries = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let field = |index: usize| {
            record.get(index).ok_or_else(|| {
                // Row numbers are 1-based and count the header line.
                HybridRankError::query_load(format!("row {} is missing column {index}", row + 2))
            })
        };
        queries.push(Query::new(field(id_index)?, field(text_index)?));
    }

    Ok(queries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_read_queries_with_named_columns() {
        let data = "Query, QueryID ,Extra\nfirst query,1,x\n\"second, with comma\",2,y\n";
        let queries = read_queries(data.as_bytes()).unwrap();

        assert_eq!(
            queries,
            vec![
                Query::new("1", "first query"),
                Query::new("2", "second, with comma"),
            ]
        );
    }

    #[test]
    fn test_read_queries_falls_back_to_first_columns() {
        let data = "qid,text\n1.0,alpha\n2.0,beta\n";
        let queries = read_queries(data.as_bytes()).unwrap();

        assert_eq!(queries[0], Query::new("1.0", "alpha"));
        assert_eq!(queries[1], Query::new("2.0", "beta"));
    }

    #[test]
    fn test_read_queries_keeps_duplicates_in_order() {
        let data = "QueryID,Query\n5,a\n5,a\n3,b\n";
        let queries = read_queries(data.as_bytes()).unwrap();
        let ids: Vec<&str> = queries.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "5", "3"]);
    }

    #[test]
    fn test_read_queries_rejects_single_column() {
        let data = "QueryID\n1\n";
        assert!(matches!(
            read_queries(data.as_bytes()),
            Err(HybridRankError::QueryLoad(_))
        ));
    }

    #[test]
    fn test_read_queries_short_row() {
        let data = "QueryID,Query\n1\n";
        assert!(matches!(
            read_queries(data.as_bytes()),
            Err(HybridRankError::QueryLoad(_))
        ));
    }

    #[test]
    fn test_load_queries_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "QueryID,Query").unwrap();
        writeln!(file, "1,hello world").unwrap();

        let queries = load_queries(file.path()).unwrap();
        assert_eq!(queries, vec![Query::new("1", "hello world")]);
    }

    #[test]
    fn test_load_queries_missing_file() {
        assert!(matches!(
            load_queries("/nonexistent/queries.csv"),
            Err(HybridRankError::QueryLoad(_))
        ));
    }
}
