//! Structured logging for the report pipeline.
//!
//! Emits one JSON object per line on stderr; stdout is reserved for the
//! rendered report, so the two streams can be piped independently. Level
//! threshold comes from `LOG_LEVEL` unless overridden once at startup
//! (the `--quiet` path).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Scan,    // Directory listing, artifact pairing
    Render,  // HTML assembly
    Summary, // Sidecar manifest
    System,  // Startup, shutdown, fatal paths
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Scan => "scan",
            Domain::Render => "render",
            Domain::Summary => "summary",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // Check LOG_DOMAINS env var (comma-separated list or "all")
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Level threshold and sequence counter
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static MIN_LEVEL: OnceLock<Level> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

fn min_level() -> Level {
    *MIN_LEVEL.get_or_init(Level::from_env)
}

/// Pins the level threshold before any log call reads the environment.
/// Later calls are no-ops; the first writer wins.
pub fn set_min_level(level: Level) {
    let _ = MIN_LEVEL.set(level);
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit a structured log entry on stderr
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < min_level() || !domain.is_enabled() {
        return;
    }

    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("data".to_string(), Value::Object(fields));

    eprintln!("{}", Value::Object(entry));
}

// =============================================================================
// Domain-Specific Logging Helpers
// =============================================================================

pub fn log_artifact_skipped(name: &str, reason: &str) {
    log(
        Level::Warn,
        Domain::Scan,
        "artifact_skipped",
        obj(&[("name", v_str(name)), ("reason", v_str(reason))]),
    );
}

pub fn log_scan_complete(dir: &str, entries: usize, skipped: usize) {
    log(
        Level::Info,
        Domain::Scan,
        "scan_complete",
        obj(&[
            ("dir", v_str(dir)),
            ("entries", json!(entries)),
            ("skipped", json!(skipped)),
        ]),
    );
}

pub fn log_report_written(target: &str, groups: usize, entries: usize, bytes: usize) {
    log(
        Level::Info,
        Domain::Render,
        "report_written",
        obj(&[
            ("target", v_str(target)),
            ("groups", json!(groups)),
            ("entries", json!(entries)),
            ("bytes", json!(bytes)),
        ]),
    );
}

pub fn log_summary_written(target: &str, entries: usize) {
    log(
        Level::Info,
        Domain::Summary,
        "summary_written",
        obj(&[("target", v_str(target)), ("entries", json!(entries))]),
    );
}

pub fn log_fatal(reason: &str) {
    log(
        Level::Error,
        Domain::System,
        "fatal",
        obj(&[("reason", v_str(reason))]),
    );
}

// =============================================================================
// Utility Functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn test_level_as_str() {
        assert_eq!(Level::Warn.as_str(), "warn");
        assert_eq!(Level::Debug.as_str(), "debug");
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", json!(42))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 42);
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }
}
