//! Invocation settings. CLI flags override environment values.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory holding the sweep artifacts.
    pub dir: PathBuf,
    /// HTML destination; stdout when unset.
    pub out: Option<PathBuf>,
    /// JSON sidecar destination; skipped when unset.
    pub summary: Option<PathBuf>,
    /// Raise the log threshold to warnings.
    pub quiet: bool,
}

impl ReportConfig {
    pub fn from_env() -> Self {
        Self {
            dir: PathBuf::from(std::env::var("SWEEP_DIR").unwrap_or_else(|_| ".".to_string())),
            out: std::env::var("REPORT_OUT").ok().map(PathBuf::from),
            summary: std::env::var("REPORT_SUMMARY").ok().map(PathBuf::from),
            quiet: std::env::var("REPORT_QUIET")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
