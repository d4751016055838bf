//! Artifact naming convention for annealing sweep results.
//!
//! Each sweep run leaves two files behind, sharing a base name that encodes
//! the run parameters:
//!
//!   `<input_set>-<t_min>-<t_max>-<alpha>-<iterations>.out.csv`      solver output
//!   `<input_set>-<t_min>-<t_max>-<alpha>-<iterations>.out.csv.png`  rendered plot
//!
//! The first line of the solver output is the integer cost of the best
//! solution found; the rest of the file holds assignment sections the report
//! never reads. An infeasible run writes `inf` on that line, which is
//! rejected here rather than coerced to zero.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Suffix of rendered plot images produced by the sweep harness.
pub const PLOT_SUFFIX: &str = ".out.csv.png";
/// Suffix of the solver output file carrying the score.
pub const SCORE_SUFFIX: &str = ".out.csv";

/// Why an artifact was dropped from the report.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("malformed filename {name:?}: {reason}")]
    MalformedFilename { name: String, reason: String },
    #[error("missing score file {path}")]
    MissingScoreFile { path: String },
    #[error("unreadable score in {path}: {reason}")]
    UnreadableScore { path: String, reason: String },
}

/// Run parameters decoded from a plot filename. Score not yet loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepParams {
    pub input_set: String,
    pub t_min: i64,
    pub t_max: i64,
    pub alpha: f64,
    pub iterations: i64,
}

/// One sweep run, fully resolved. Immutable once built.
#[derive(Debug, Clone)]
pub struct ResultEntry {
    pub input_set: String,
    pub t_min: i64,
    pub t_max: i64,
    pub alpha: f64,
    pub iterations: i64,
    pub image_path: PathBuf,
    pub score_path: PathBuf,
    pub score: i64,
}

impl ResultEntry {
    /// Builds a fully populated entry from a plot filename found in `dir`.
    pub fn from_plot(dir: &Path, name: &str) -> Result<Self, ArtifactError> {
        let params = parse_plot_name(name)?;
        // parse_plot_name guarantees the suffix is present
        let base = &name[..name.len() - PLOT_SUFFIX.len()];
        let score_path = dir.join(format!("{}{}", base, SCORE_SUFFIX));
        let score = read_score(&score_path)?;
        Ok(Self {
            input_set: params.input_set,
            t_min: params.t_min,
            t_max: params.t_max,
            alpha: params.alpha,
            iterations: params.iterations,
            image_path: dir.join(name),
            score_path,
            score,
        })
    }

    /// Bare image file name, as referenced from the rendered report.
    pub fn image_name(&self) -> &str {
        self.image_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
    }
}

/// Decodes the five hyphen-separated parameter fields from a plot filename.
///
/// Strict by design: wrong field count or a non-numeric field is an error,
/// never a silent zero.
pub fn parse_plot_name(name: &str) -> Result<SweepParams, ArtifactError> {
    let base = name.strip_suffix(PLOT_SUFFIX).ok_or_else(|| malformed(
        name,
        format!("missing {} suffix", PLOT_SUFFIX),
    ))?;

    let fields: Vec<&str> = base.split('-').collect();
    if fields.len() != 5 {
        return Err(malformed(
            name,
            format!("expected 5 hyphen-separated fields, got {}", fields.len()),
        ));
    }
    if fields[0].is_empty() {
        return Err(malformed(name, "empty input set id".to_string()));
    }

    Ok(SweepParams {
        input_set: fields[0].to_string(),
        t_min: parse_field(fields[1], "t_min", name)?,
        t_max: parse_field(fields[2], "t_max", name)?,
        alpha: parse_field(fields[3], "alpha", name)?,
        iterations: parse_field(fields[4], "iterations", name)?,
    })
}

/// Reads the integer score from the first line of a solver output file.
///
/// The handle is scoped to this call and closed on every exit path.
pub fn read_score(path: &Path) -> Result<i64, ArtifactError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ArtifactError::MissingScoreFile {
            path: path.display().to_string(),
        },
        _ => ArtifactError::UnreadableScore {
            path: path.display().to_string(),
            reason: err.to_string(),
        },
    })?;

    let mut first_line = String::new();
    let read = BufReader::new(file)
        .read_line(&mut first_line)
        .map_err(|err| unreadable(path, err.to_string()))?;
    if read == 0 {
        return Err(unreadable(path, "empty file".to_string()));
    }
    let trimmed = first_line.trim();
    if trimmed.is_empty() {
        return Err(unreadable(path, "empty first line".to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| unreadable(path, format!("not an integer: {:?}", trimmed)))
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    label: &str,
    name: &str,
) -> Result<T, ArtifactError> {
    value
        .parse()
        .map_err(|_| malformed(name, format!("{} is not numeric: {:?}", label, value)))
}

fn malformed(name: &str, reason: String) -> ArtifactError {
    ArtifactError::MalformedFilename {
        name: name.to_string(),
        reason,
    }
}

fn unreadable(path: &Path, reason: String) -> ArtifactError {
    ArtifactError::UnreadableScore {
        path: path.display().to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plot_name_valid() {
        let params = parse_plot_name("setA-0-100-0.95-1000.out.csv.png").unwrap();
        assert_eq!(params.input_set, "setA");
        assert_eq!(params.t_min, 0);
        assert_eq!(params.t_max, 100);
        assert_eq!(params.alpha, 0.95);
        assert_eq!(params.iterations, 1000);
    }

    #[test]
    fn test_parse_plot_name_hyphen_negative_not_representable() {
        // "-20" splits into an extra empty field, so the arity check fires;
        // the naming convention cannot encode negative bounds
        let params = parse_plot_name("cold--20-80-0.9-500.out.csv.png");
        assert!(matches!(
            params,
            Err(ArtifactError::MalformedFilename { .. })
        ));
    }

    #[test]
    fn test_parse_plot_name_too_few_fields() {
        let err = parse_plot_name("setA-0-100-0.95.out.csv.png").unwrap_err();
        assert!(matches!(err, ArtifactError::MalformedFilename { .. }));
        assert!(err.to_string().contains("got 4"));
    }

    #[test]
    fn test_parse_plot_name_too_many_fields() {
        let err = parse_plot_name("set-A-0-100-0.95-1000.out.csv.png").unwrap_err();
        assert!(matches!(err, ArtifactError::MalformedFilename { .. }));
        assert!(err.to_string().contains("got 6"));
    }

    #[test]
    fn test_parse_plot_name_rejects_non_numeric() {
        // must fail loudly, never coerce "abc" to 0
        let err = parse_plot_name("setA-abc-100-0.95-1000.out.csv.png").unwrap_err();
        assert!(err.to_string().contains("t_min"));
    }

    #[test]
    fn test_parse_plot_name_rejects_wrong_suffix() {
        let err = parse_plot_name("setA-0-100-0.95-1000.png").unwrap_err();
        assert!(matches!(err, ArtifactError::MalformedFilename { .. }));
    }

    #[test]
    fn test_parse_plot_name_rejects_empty_input_set() {
        let err = parse_plot_name("-0-100-0.95-1000.out.csv.png").unwrap_err();
        assert!(err.to_string().contains("empty input set"));
    }

    #[test]
    fn test_score_path_derivation() {
        let tmp = tempfile::TempDir::new().unwrap();
        // from_plot fails on the missing file, but the path it reports is the
        // plot name minus ".png".
        let err =
            ResultEntry::from_plot(tmp.path(), "setA-0-100-0.95-1000.out.csv.png").unwrap_err();
        match err {
            ArtifactError::MissingScoreFile { path } => {
                assert!(path.ends_with("setA-0-100-0.95-1000.out.csv"));
            }
            other => panic!("expected MissingScoreFile, got {:?}", other),
        }
    }
}
