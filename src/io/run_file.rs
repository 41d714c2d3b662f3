//! Persistence of the ranked run file.
//!
//! The whole file is written to a temporary sibling and atomically renamed
//! over the destination, so a failed write never leaves a truncated run.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;

use crate::error::{HybridRankError, Result};
use crate::pipeline::ResultLine;

/// Render result lines as newline-joined text (no trailing newline).
pub fn render_lines(lines: &[ResultLine]) -> String {
    lines
        .iter()
        .map(ResultLine::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write result lines to `path`, replacing any existing file.
///
/// Missing parent directories are created.
pub fn write_run_file<P: AsRef<Path>>(path: P, lines: &[ResultLine]) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(render_lines(lines).as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| {
        HybridRankError::persist(format!("cannot replace {}: {}", path.display(), e.error))
    })?;

    info!("Results saved to: {}", path.display());
    Ok(())
}
