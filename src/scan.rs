//! Results-directory scan.
//!
//! Discovery is name-driven: every file ending in the plot suffix is a
//! candidate run, sorted lexicographically so repeated scans of the same
//! directory yield the same order regardless of filesystem listing order.
//! A candidate that fails to decode or pair is recorded and skipped, never
//! fatal for the rest of the directory.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};

use crate::artifact::{ArtifactError, ResultEntry, PLOT_SUFFIX};
use crate::logging;

/// A candidate plot that was dropped, with the reason it failed.
#[derive(Debug)]
pub struct SkippedArtifact {
    pub name: String,
    pub error: ArtifactError,
}

/// Everything a scan produced: resolved entries plus the drop list.
#[derive(Debug)]
pub struct ScanOutcome {
    pub entries: Vec<ResultEntry>,
    pub skipped: Vec<SkippedArtifact>,
}

/// Lists plot filenames in `dir`, sorted. Non-UTF-8 names cannot match the
/// suffix convention and are not candidates.
pub fn discover_plots(dir: &Path) -> Result<Vec<String>> {
    let listing = fs::read_dir(dir)
        .map_err(|e| anyhow!("cannot read results dir {}: {}", dir.display(), e))?;
    let mut names: Vec<String> = listing
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(PLOT_SUFFIX))
        .collect();
    names.sort();
    Ok(names)
}

/// Resolves every candidate in `dir`, collecting failures instead of
/// aborting on them. Only an unlistable directory is an error.
pub fn scan_entries(dir: &Path) -> Result<ScanOutcome> {
    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for name in discover_plots(dir)? {
        match ResultEntry::from_plot(dir, &name) {
            Ok(entry) => entries.push(entry),
            Err(error) => {
                logging::log_artifact_skipped(&name, &error.to_string());
                skipped.push(SkippedArtifact { name, error });
            }
        }
    }

    logging::log_scan_complete(&dir.display().to_string(), entries.len(), skipped.len());
    Ok(ScanOutcome { entries, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn write_file(dir: &Path, name: &str, body: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b-1-2-0.9-10.out.csv.png");
        touch(tmp.path(), "a-1-2-0.9-10.out.csv.png");
        touch(tmp.path(), "a-1-2-0.9-10.out.csv");
        touch(tmp.path(), "notes.txt");

        let names = discover_plots(tmp.path()).unwrap();
        assert_eq!(
            names,
            vec!["a-1-2-0.9-10.out.csv.png", "b-1-2-0.9-10.out.csv.png"]
        );
    }

    #[test]
    fn test_discover_missing_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("no-such");
        assert!(discover_plots(&gone).is_err());
    }

    #[test]
    fn test_scan_skips_bad_entries_and_keeps_good() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "good-0-100-0.95-1000.out.csv", "42\n");
        touch(tmp.path(), "good-0-100-0.95-1000.out.csv.png");
        // plot with no companion score file
        touch(tmp.path(), "orphan-0-100-0.95-1000.out.csv.png");
        // undecodable name
        touch(tmp.path(), "junk.out.csv.png");

        let outcome = scan_entries(tmp.path()).unwrap();
        assert_eq!(outcome.entries.len(), 1);
        assert_eq!(outcome.entries[0].input_set, "good");
        assert_eq!(outcome.entries[0].score, 42);
        assert_eq!(outcome.skipped.len(), 2);

        let skipped_names: Vec<&str> =
            outcome.skipped.iter().map(|s| s.name.as_str()).collect();
        assert!(skipped_names.contains(&"orphan-0-100-0.95-1000.out.csv.png"));
        assert!(skipped_names.contains(&"junk.out.csv.png"));
    }

    #[test]
    fn test_scan_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let outcome = scan_entries(tmp.path()).unwrap();
        assert!(outcome.entries.is_empty());
        assert!(outcome.skipped.is_empty());
    }
}
