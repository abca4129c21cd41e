use anyhow::Result;
use clap::Parser;
use javadoc_scan::audit::{self, AuditOptions};
use javadoc_scan::cli::{Cli, Commands, OutputFormat};
use javadoc_scan::config::resolve_root;
use javadoc_scan::report::{render_file_list, render_json, render_text, write_output};
use javadoc_scan::scan::find_java_files;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    let cli = parse_cli();
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Check {
            root,
            format,
            output,
            fail_on_findings,
            parallel,
        } => {
            let root = resolve_root(root.as_deref());
            debug!(root = %root.display(), ?format, parallel, "starting check");

            let report = audit::run(&root, &AuditOptions { parallel });
            let content = match format {
                OutputFormat::Text => render_text(&report),
                OutputFormat::Json => {
                    let mut json = render_json(&report)?;
                    json.push('\n');
                    json
                }
            };
            write_output(&content, output.as_deref())?;

            if fail_on_findings && report.has_problems() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Files { root } => {
            let root = resolve_root(root.as_deref());
            let files = find_java_files(&root);
            write_output(&render_file_list(files.as_slice()), None)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_cli() -> Cli {
    let args: Vec<String> = std::env::args().collect();
    Cli::parse_from(rewrite_args_for_implicit_check(args))
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Inserts `check` when no subcommand was given, so `javadoc-scan src` and a
/// bare `javadoc-scan` both run a scan. A root literally named `check`,
/// `files` or `help` is read as the subcommand; scan it with an explicit
/// `check` (`javadoc-scan check files`).
fn rewrite_args_for_implicit_check(mut args: Vec<String>) -> Vec<String> {
    let subcommands = ["check", "files", "help"];
    let value_flags = ["--log-level", "--format", "-f", "--output", "-o"];

    let mut idx = 1usize;
    while idx < args.len() {
        let a = args[idx].as_str();
        if a == "--" {
            break;
        }

        if value_flags.contains(&a) {
            idx += 2;
            continue;
        }

        if a.starts_with('-') {
            idx += 1;
            continue;
        }

        if subcommands.contains(&a) {
            return args;
        }
        break;
    }

    let asks_for_info = args
        .iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "-h" | "--help" | "-V" | "--version"));
    if asks_for_info {
        return args;
    }

    if !args.is_empty() {
        args.insert(1, "check".to_string());
    }
    args
}
