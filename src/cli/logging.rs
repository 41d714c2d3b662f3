//! Logger setup for the hybrid-rank binary.
//!
//! Records always go to stderr at the level chosen by `-v`/`-q`. With a log
//! directory, a dated file additionally receives every record down to DEBUG.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use env_logger::fmt::Formatter;
use env_logger::{Builder, Logger, Target};
use log::{LevelFilter, Log, Metadata, Record};

use crate::cli::args::HybridRankArgs;

/// Level written to the log file regardless of console verbosity.
pub const FILE_LEVEL: LevelFilter = LevelFilter::Debug;

/// Logger writing to the console and, optionally, to a log file.
pub struct RunLogger {
    console: Logger,
    file: Option<Logger>,
}

impl RunLogger {
    /// Create a logger with a console level and an optional log file.
    pub fn new(console_level: LevelFilter, log_file: Option<File>) -> Self {
        let console = Builder::new()
            .filter_level(console_level)
            .format(format_record)
            .build();
        let file = log_file.map(|file| {
            Builder::new()
                .filter_level(FILE_LEVEL)
                .format(format_record)
                .target(Target::Pipe(Box::new(file)))
                .build()
        });
        Self { console, file }
    }

    /// Most verbose level any target accepts.
    pub fn max_level(&self) -> LevelFilter {
        let file_level = self.file.as_ref().map_or(LevelFilter::Off, Logger::filter);
        self.console.filter().max(file_level)
    }
}

impl Log for RunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console.enabled(metadata) || self.file.as_ref().is_some_and(|f| f.enabled(metadata))
    }

    fn log(&self, record: &Record) {
        self.console.log(record);
        if let Some(file) = &self.file {
            file.log(record);
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(file) = &self.file {
            file.flush();
        }
    }
}

fn format_record(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    writeln!(
        buf,
        "{} | {} | {}",
        chrono::Local::now().format("%H:%M:%S"),
        record.level(),
        record.args()
    )
}

/// Map CLI verbosity to the console level.
pub fn console_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Warn,  // Default
        2 => LevelFilter::Info,  // Verbose
        _ => LevelFilter::Debug, // Very verbose (3+)
    }
}

/// Open (append) today's log file `YYYY_MM_DD.log` inside `dir`.
pub fn open_log_file(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    let file_name = chrono::Local::now().format("%Y_%m_%d.log").to_string();
    File::options()
        .create(true)
        .append(true)
        .open(dir.join(file_name))
}

/// Install the global logger for a CLI invocation.
pub fn init_logging(args: &HybridRankArgs) {
    let log_file = args.log_dir.as_deref().and_then(|dir| match open_log_file(dir) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Warning: cannot open log file in {}: {e}", dir.display());
            None
        }
    });

    let logger = RunLogger::new(console_level(args.verbosity()), log_file);
    let max_level = logger.max_level();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(max_level);
    }
}
