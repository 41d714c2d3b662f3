//! hybrid-rank CLI binary.

use std::process;

use clap::Parser;

use hybrid_rank::cli::args::*;
use hybrid_rank::cli::commands::*;
use hybrid_rank::cli::logging::init_logging;

fn main() {
    let args = HybridRankArgs::parse();

    init_logging(&args);

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
