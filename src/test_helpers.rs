//! Shared test utilities for the hugo-matter test suite.
//!
//! Provides sample content, file writers, and a small content tree that
//! the document and check tests build on.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_content_tree();
//! let report = check(tmp.path(), &ToolConfig::default()).unwrap();
//! assert_eq!(failed_names(&report), vec!["broken.md"]);
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::check::CheckReport;
use crate::config::ToolConfig;

/// A well-formed post whose front matter survives an encode/decode cycle.
pub const SAMPLE_POST: &str = "+++
# Post metadata
title = \"Night Walk\"
draft = false
weight = 10
tags = [\"film\", \"city\"]
+++
Streetlights and long exposures.
";

/// Write `content` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

pub fn strict_config() -> ToolConfig {
    let mut config = ToolConfig::default();
    config.codec.strict = true;
    config
}

/// Build a small content tree:
///
/// ```text
/// _index.md                 # clean
/// posts/night-walk.md       # clean
/// posts/broken.md           # malformed front-matter line
/// posts/plain.md            # no front matter
/// static/logo.png           # ignored (extension)
/// ```
pub fn setup_content_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "_index.md", "+++\ntitle = \"Home\"\n+++\n");
    write_file(tmp.path(), "posts/night-walk.md", SAMPLE_POST);
    write_file(
        tmp.path(),
        "posts/broken.md",
        "+++\ntitle = \"Broken\"\nthis line has no pair\n+++\nBody\n",
    );
    write_file(tmp.path(), "posts/plain.md", "Just text.\n");
    write_file(tmp.path(), "static/logo.png", "not an image");
    tmp
}

/// File names (not paths) of failed entries, in report order.
pub fn failed_names(report: &CheckReport) -> Vec<String> {
    report
        .failures()
        .map(|f| {
            f.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect()
}
