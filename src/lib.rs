//! HTML report builder for simulated-annealing parameter sweeps.
//!
//! A sweep harness leaves `<set>-<tMin>-<tMax>-<alpha>-<iters>.out.csv`
//! score files and matching `.png` plots in a directory. This crate scans
//! that directory, decodes the parameters from each filename, reads the
//! scores, and renders one HTML page grouping runs by input set with the
//! best (lowest) score first. The pipeline is a single pass:
//! discover, parse, load, group, sort, render.

pub mod artifact;
pub mod config;
pub mod logging;
pub mod report;
pub mod scan;
pub mod summary;
