//! Machine-readable run summary.
//!
//! Optional sidecar next to the HTML: what was rendered, what was skipped
//! and why, plus a sha256 per score file so a later run can tell whether
//! the inputs changed. Deliberately carries no timestamp, keeping the
//! sidecar byte-stable for unchanged inputs.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::report::ResultGroup;
use crate::scan::SkippedArtifact;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySummary {
    pub image: String,
    pub score_file: String,
    pub score_sha256: String,
    pub t_min: i64,
    pub t_max: i64,
    pub alpha: f64,
    pub iterations: i64,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub input_set: String,
    pub best_score: Option<i64>,
    pub entries: Vec<EntrySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipSummary {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub dir: String,
    pub group_count: u64,
    pub entry_count: u64,
    pub skipped_count: u64,
    pub groups: Vec<GroupSummary>,
    pub skipped: Vec<SkipSummary>,
}

pub fn file_sha256(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).map_err(|e| anyhow!("cannot open {}: {}", path.display(), e))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| anyhow!("cannot read {}: {}", path.display(), e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Builds the summary from already-grouped results. Hashing re-reads each
/// score file; inputs are not expected to change mid-run.
pub fn build_summary(
    dir: &Path,
    groups: &[ResultGroup],
    skipped: &[SkippedArtifact],
) -> Result<RunSummary> {
    let mut group_summaries = Vec::with_capacity(groups.len());
    let mut entry_count = 0u64;

    for group in groups {
        let mut entries = Vec::with_capacity(group.entries.len());
        for entry in &group.entries {
            entries.push(EntrySummary {
                image: entry.image_name().to_string(),
                score_file: entry
                    .score_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("unknown")
                    .to_string(),
                score_sha256: file_sha256(&entry.score_path)?,
                t_min: entry.t_min,
                t_max: entry.t_max,
                alpha: entry.alpha,
                iterations: entry.iterations,
                score: entry.score,
            });
            entry_count += 1;
        }
        group_summaries.push(GroupSummary {
            input_set: group.input_set.clone(),
            best_score: entries.iter().map(|e| e.score).min(),
            entries,
        });
    }

    Ok(RunSummary {
        dir: dir.display().to_string(),
        group_count: group_summaries.len() as u64,
        entry_count,
        skipped_count: skipped.len() as u64,
        groups: group_summaries,
        skipped: skipped
            .iter()
            .map(|s| SkipSummary {
                name: s.name.clone(),
                reason: s.error.to_string(),
            })
            .collect(),
    })
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let payload = serde_json::to_string_pretty(summary)?;
    fs::write(path, payload).map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;
    Ok(())
}
