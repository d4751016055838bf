//! Sweep report generator.
//!
//! Usage:
//!   sweepreport [DIR] [options]
//!
//! Scans DIR (default ".") for `<set>-<tMin>-<tMax>-<alpha>-<iters>.out.csv.png`
//! plots with companion `.out.csv` score files, then writes an HTML report
//! to stdout. Structured logs go to stderr.
//!
//! Options:
//!   --out=<path>       Write HTML to <path> instead of stdout
//!   --summary=<path>   Also write a JSON run summary to <path>
//!   --quiet            Only warnings and errors on stderr
//!   --help             Show this help
//!
//! Environment: SWEEP_DIR, REPORT_OUT, REPORT_SUMMARY, REPORT_QUIET,
//! LOG_LEVEL, LOG_DOMAINS.
//!
//! Exit codes: 0 all artifacts rendered, 1 fatal error or bad usage,
//! 2 report produced but some artifacts were skipped.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use sweepreport::config::ReportConfig;
use sweepreport::logging::{self, Level};
use sweepreport::report;
use sweepreport::summary;

fn print_usage() {
    eprintln!("Usage: sweepreport [DIR] [options]");
    eprintln!();
    eprintln!("Renders an HTML report over annealing sweep artifacts in DIR (default .).");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --out=<path>       Write HTML to <path> instead of stdout");
    eprintln!("  --summary=<path>   Also write a JSON run summary to <path>");
    eprintln!("  --quiet            Only warnings and errors on stderr");
    eprintln!("  --help             Show this help");
}

fn fatal(reason: &str) -> ! {
    logging::log_fatal(reason);
    eprintln!("Error: {}", reason);
    std::process::exit(1);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut cfg = ReportConfig::from_env();
    let mut dir_arg_seen = false;

    for arg in &args[1..] {
        if arg == "--help" || arg == "-h" {
            print_usage();
            std::process::exit(0);
        } else if let Some(v) = arg.strip_prefix("--out=") {
            cfg.out = Some(PathBuf::from(v));
        } else if let Some(v) = arg.strip_prefix("--summary=") {
            cfg.summary = Some(PathBuf::from(v));
        } else if arg == "--quiet" {
            cfg.quiet = true;
        } else if arg.starts_with('-') {
            eprintln!("Unknown option: {}", arg);
            print_usage();
            std::process::exit(1);
        } else if !dir_arg_seen {
            cfg.dir = PathBuf::from(arg);
            dir_arg_seen = true;
        } else {
            eprintln!("Unexpected argument: {}", arg);
            print_usage();
            std::process::exit(1);
        }
    }

    if cfg.quiet {
        logging::set_min_level(Level::Warn);
    }

    if !cfg.dir.is_dir() {
        fatal(&format!("not a directory: {}", cfg.dir.display()));
    }

    let report = match report::build_report(&cfg.dir) {
        Ok(r) => r,
        Err(err) => fatal(&err.to_string()),
    };
    let entry_count: usize = report.groups.iter().map(|g| g.entries.len()).sum();

    // Sidecar before report: exit 1 means no report was emitted.
    if let Some(path) = &cfg.summary {
        let written = summary::build_summary(&cfg.dir, &report.groups, &report.skipped)
            .and_then(|s| summary::write_summary(path, &s));
        if let Err(err) = written {
            fatal(&err.to_string());
        }
        logging::log_summary_written(&path.display().to_string(), entry_count);
    }

    match &cfg.out {
        Some(path) => {
            if let Err(err) = fs::write(path, &report.html) {
                fatal(&format!("failed to write {}: {}", path.display(), err));
            }
            logging::log_report_written(
                &path.display().to_string(),
                report.groups.len(),
                entry_count,
                report.html.len(),
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            if let Err(err) = handle.write_all(report.html.as_bytes()) {
                fatal(&format!("failed to write report to stdout: {}", err));
            }
            logging::log_report_written(
                "stdout",
                report.groups.len(),
                entry_count,
                report.html.len(),
            );
        }
    }

    if !report.skipped.is_empty() {
        std::process::exit(2);
    }
}
