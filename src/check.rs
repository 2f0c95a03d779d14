//! Front-matter validation across a content tree.
//!
//! `check` walks a content directory, picks the files whose extension is in
//! `check.extensions`, and parses each with the strict decoder. Every file
//! gets one outcome:
//!
//! - **Valid**: the block decoded cleanly (key count recorded)
//! - **NoFrontMatter**: no delimited block; not an error
//! - **Failed**: unreadable file or a malformed front-matter line
//!
//! Checking is always strict, independent of `codec.strict`: its job is to
//! surface exactly the lines the best-effort decoder would drop.
//!
//! ## Parallel Processing
//!
//! Files are parsed in parallel on a dedicated [rayon](https://docs.rs/rayon)
//! pool sized by `processing.max_processes`. Results are sorted by path so
//! output is stable across runs.

use crate::config::{self, ToolConfig};
use crate::document::ContentFile;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Valid { keys: usize },
    NoFrontMatter,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileCheck {
    pub path: PathBuf,
    pub outcome: CheckOutcome,
}

impl FileCheck {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, CheckOutcome::Failed(_))
    }
}

/// Per-file outcomes of a check run, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub root: PathBuf,
    pub files: Vec<FileCheck>,
}

impl CheckReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileCheck> {
        self.files.iter().filter(|f| f.is_failure())
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Check a single content file or every matching file under a directory.
pub fn check(root: &Path, config: &ToolConfig) -> Result<CheckReport, CheckError> {
    if !root.exists() {
        return Err(CheckError::NotFound(root.to_path_buf()));
    }
    let paths = collect_paths(root, config)?;
    info!(root = %root.display(), files = paths.len(), "checking front matter");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config::effective_threads(&config.processing))
        .build()?;
    let delimiter = config.document.delimiter.as_str();
    let mut files: Vec<FileCheck> =
        pool.install(|| paths.par_iter().map(|p| check_file(p, delimiter)).collect());
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(CheckReport {
        root: root.to_path_buf(),
        files,
    })
}

fn collect_paths(root: &Path, config: &ToolConfig) -> Result<Vec<PathBuf>, CheckError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && config.check.matches(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

/// Strictly parse one file.
pub fn check_file(path: &Path, delimiter: &str) -> FileCheck {
    let outcome = match std::fs::read_to_string(path) {
        Err(e) => CheckOutcome::Failed(format!("IO error: {e}")),
        Ok(text) => match ContentFile::parse_strict(&text, delimiter) {
            Err(e) => CheckOutcome::Failed(e.to_string()),
            Ok(file) if !file.has_front_matter => CheckOutcome::NoFrontMatter,
            Ok(file) => CheckOutcome::Valid {
                keys: file.front_matter.len(),
            },
        },
    };
    debug!(path = %path.display(), ?outcome, "checked");
    FileCheck {
        path: path.to_path_buf(),
        outcome,
    }
}
