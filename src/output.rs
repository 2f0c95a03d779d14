//! CLI output formatting.
//!
//! Data that other tools consume (decoded front matter, single values) goes
//! to stdout as JSON. Human-oriented summaries use a fixed-width status
//! column:
//!
//! ```text
//! ok    _index.md (1 key)
//! FAIL  posts/broken.md
//!           Malformed line 2: "this line has no pair"
//! ok    posts/night-walk.md (4 keys)
//! --    posts/plain.md (no front matter)
//!
//! Checked 4 files: 1 failed
//! ```
//!
//! Format functions are pure and return `Vec<String>` or `String`; the
//! `print_*` wrappers write to stdout.

use crate::check::{CheckOutcome, CheckReport, FileCheck};
use crate::value::Value;
use serde::Serialize;
use std::path::Path;

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Serialize to JSON, pretty or compact.
pub fn format_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Path relative to the report root, falling back to the full path.
fn display_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    if rel.as_os_str().is_empty() {
        path.display().to_string()
    } else {
        rel.display().to_string()
    }
}

fn file_lines(root: &Path, file: &FileCheck) -> Vec<String> {
    let path = display_path(root, &file.path);
    match &file.outcome {
        CheckOutcome::Valid { keys } => vec![format!("ok    {path} ({})", plural(*keys, "key"))],
        CheckOutcome::NoFrontMatter => vec![format!("--    {path} (no front matter)")],
        CheckOutcome::Failed(reason) => {
            vec![format!("FAIL  {path}"), format!("          {reason}")]
        }
    }
}

pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .files
        .iter()
        .flat_map(|f| file_lines(&report.root, f))
        .collect();
    let failed = report.failures().count();
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Checked {}: {failed} failed",
        plural(report.files.len(), "file")
    ));
    lines
}

pub fn print_check_report(report: &CheckReport) {
    for line in format_check_report(report) {
        println!("{line}");
    }
}

/// One-line confirmation for `set`.
pub fn format_set_result(path: &Path, key: &str, value: &Value) -> String {
    let rendered = serde_json::to_string(value).unwrap_or_else(|_| "?".to_string());
    format!(
        "Set {key} = {rendered} ({}) in {}",
        value.kind(),
        path.display()
    )
}
