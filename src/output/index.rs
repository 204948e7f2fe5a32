//! Aggregate index artifacts
//!
//! After every level has run, three JSON files summarize what is on disk:
//! `dates.json` (run-date directories found under the output root),
//! `course_codes.json` (all codes this run attempted, across levels), and
//! `course_codes_by_level.json` (the per-level breakdown the frontend
//! consumes).

use crate::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// A `{value, label}` pair, the shape the frontend's select widgets expect
#[derive(Debug, Serialize)]
pub struct OptionItem {
    pub value: String,
    pub label: String,
}

/// Per-level course-code breakdown
#[derive(Debug, Serialize)]
pub struct CourseCodeIndex {
    /// Union of codes across all levels, sorted
    pub all: Vec<String>,

    /// Sorted codes per level key; levels with no codes are omitted
    pub by_level: BTreeMap<&'static str, Vec<String>>,
}

impl CourseCodeIndex {
    pub fn new(
        all: &BTreeSet<String>,
        by_level: &BTreeMap<&'static str, BTreeSet<String>>,
    ) -> Self {
        CourseCodeIndex {
            all: all.iter().cloned().collect(),
            by_level: by_level
                .iter()
                .filter(|(_, codes)| !codes.is_empty())
                .map(|(key, codes)| (*key, codes.iter().cloned().collect()))
                .collect(),
        }
    }
}

/// Lists run-date directory names under the output root, sorted
///
/// Plain files (the index JSONs themselves live here too) are skipped.
pub fn list_date_dirs(root: &Path) -> std::io::Result<Vec<String>> {
    let mut dates = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Ok(name) = entry.file_name().into_string() {
                dates.push(name);
            }
        }
    }
    dates.sort();
    Ok(dates)
}

/// Writes a sorted value list as `[{value, label}, ...]`
pub fn export_options(path: &Path, values: &[String]) -> Result<()> {
    let items: Vec<OptionItem> = values
        .iter()
        .map(|v| OptionItem {
            value: v.clone(),
            label: v.clone(),
        })
        .collect();

    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), &items)?;
    Ok(())
}

/// Writes the per-level breakdown, pretty-printed
pub fn export_course_code_index(path: &Path, index: &CourseCodeIndex) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), index)?;
    Ok(())
}
