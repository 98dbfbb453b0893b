//! fqview - Terminal FASTQ Viewer
//!
//! Displays FASTQ files wrapped to the terminal width, with each sequence
//! line followed by its qualities.
//!
//! ## Usage
//!
//! ```bash
//! fqview reads.fastq
//! fqview --colorize-quality --max-quality I reads.fastq
//! zcat reads.fastq.gz | fqview -q | less -R
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::debug;

use fqview::config::{ViewConfig, DEFAULT_MAX_QUALITY};
use fqview::controller::{inputs_from_paths, run};

/// Verbosity of messages written to stderr
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn verbosity(self) -> usize {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }
}

/// fqview - Display FASTQ files in a more human-readable way
///
/// Wraps lines to terminal width, preserving existing ANSI colours, and
/// interleaves sequence and quality lines.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTQ files to display, read in order ("-" or nothing for stdin)
    files: Vec<PathBuf>,

    /// Color the quality line to show the quality visually. Order, lowest to
    /// highest, is black, magenta, red, yellow, white, green, blue, cyan.
    #[arg(short = 'q', long = "colorize-quality")]
    colorize_quality: bool,

    /// How many columns to wrap at (autodetected when unspecified)
    #[arg(short = 'c', long = "columns")]
    columns: Option<usize>,

    /// Leave extra space between lines for readability
    #[arg(short = 's', long = "skip-lines")]
    skip_lines: bool,

    /// Highest quality character your sequencer uses. Set below '~' to make
    /// better use of the available colors. Ignored without --colorize-quality.
    #[arg(short = 'm', long = "max-quality", default_value_t = DEFAULT_MAX_QUALITY.to_string())]
    max_quality: String,

    /// Set log level
    #[arg(short = 'l', long = "loglevel", value_enum, ignore_case = true, default_value = "warn")]
    loglevel: LogLevel,

    /// Silence all log output
    #[arg(long = "quiet", conflicts_with = "loglevel")]
    quiet: bool,

    /// Prepend log entries with a timestamp
    #[arg(short = 'X', long = "timestamp", value_name = "GRANULARITY", default_value = "none")]
    timestamp: stderrlog::Timestamp,
}

fn main() -> Result<()> {
    let args = Args::parse();

    stderrlog::new()
        .verbosity(args.loglevel.verbosity())
        .quiet(args.quiet)
        .timestamp(args.timestamp)
        .init()?;

    // Reject bad options before touching any input
    let config = ViewConfig::new(
        args.columns,
        args.colorize_quality,
        &args.max_quality,
        args.skip_lines,
    )?;
    debug!("Options read in - starting display");

    let inputs = inputs_from_paths(&args.files);
    run(&inputs, config)
}
