//! Grouping, ordering, and HTML assembly.
//!
//! Groups keep first-seen order so the navigation index is stable across
//! runs; entries within a group are ordered by score, best (lowest) first.
//! Rendering is pure string assembly over already-resolved data, so the
//! same inputs always produce byte-identical output. Values are
//! filesystem-controlled, not untrusted network input, and are
//! interpolated without escaping.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::artifact::ResultEntry;
use crate::scan::{self, SkippedArtifact};

/// All runs sharing one input-set id, in discovery order until sorted.
#[derive(Debug, Clone)]
pub struct ResultGroup {
    pub input_set: String,
    pub entries: Vec<ResultEntry>,
}

/// Partitions entries by input-set id. Group order is first appearance;
/// entry order within a group is untouched here.
pub fn group_entries(entries: Vec<ResultEntry>) -> Vec<ResultGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<ResultGroup> = Vec::new();

    for entry in entries {
        let slot = match index.get(&entry.input_set) {
            Some(&i) => i,
            None => {
                index.insert(entry.input_set.clone(), groups.len());
                groups.push(ResultGroup {
                    input_set: entry.input_set.clone(),
                    entries: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].entries.push(entry);
    }

    groups
}

/// Orders each group by ascending score. The sort is stable, so ties keep
/// their discovery order; three-way compare holds for the full i64 range.
pub fn sort_groups(groups: &mut [ResultGroup]) {
    for group in groups {
        group.entries.sort_by(|a, b| a.score.cmp(&b.score));
    }
}

/// Outcome of one full pass over a results directory.
#[derive(Debug)]
pub struct Report {
    pub html: String,
    pub groups: Vec<ResultGroup>,
    pub skipped: Vec<SkippedArtifact>,
}

/// Runs the whole pipeline: discover, resolve, group, sort, render.
pub fn build_report(dir: &Path) -> Result<Report> {
    let outcome = scan::scan_entries(dir)?;
    let mut groups = group_entries(outcome.entries);
    sort_groups(&mut groups);
    let html = render_html(&groups);
    Ok(Report {
        html,
        groups,
        skipped: outcome.skipped,
    })
}

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Simulated Annealing parameter sweep</title>
<style type="text/css">img{max-width: 100%}</style>
</head>
<body>
<p>Simulated Annealing parameter changes.</p>
"#;

const HTML_FOOT: &str = "</body>\n</html>\n";

/// Renders the full report: navigation index over the groups, then one
/// section per group with each run's parameters, score, and plot.
pub fn render_html(groups: &[ResultGroup]) -> String {
    let mut html = String::from(HTML_HEAD);

    html.push_str("<ul>\n");
    for group in groups {
        html.push_str(&format!(
            "\t<li><a href='#{0}'>{0}</a></li>\n",
            group.input_set
        ));
    }
    html.push_str("</ul>\n");

    for group in groups {
        html.push_str(&format!("<h1 id='{0}'>{0}</h1>\n", group.input_set));
        for entry in &group.entries {
            html.push_str(&format!(
                "\t<h2>T={}&rarr;{} &alpha;={} N={}</h2>\n",
                entry.t_min, entry.t_max, entry.alpha, entry.iterations
            ));
            html.push_str(&format!("\t\tScore: {}\n", entry.score));
            html.push_str(&format!("\t\t<img src='{}'/>\n", entry.image_name()));
        }
    }

    html.push_str(HTML_FOOT);
    html
}
