//! Reading query sets and writing run files.

pub mod queries;
pub mod run_file;

pub use queries::{load_queries, read_queries};
pub use run_file::{render_lines, write_run_file};
