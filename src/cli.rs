use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "javadoc-scan", version)]
#[command(about = "Report public Java types and methods that lack a Javadoc comment")]
#[command(
    after_help = "Without a subcommand, `check` is assumed. A root directory named `check`, `files` or `help` must be given after an explicit `check`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "javadoc_scan=debug").
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Scan a source tree and report undocumented declarations.
    Check {
        /// Source root (defaults to $JAVADOC_SCAN_ROOT, then src/main/java).
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Exit with status 1 when any finding or unreadable file is reported.
        #[arg(long)]
        fail_on_findings: bool,

        /// Check files on a thread pool.
        #[arg(long)]
        parallel: bool,
    },
    /// List the Java source files that would be scanned.
    Files {
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
