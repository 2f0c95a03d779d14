//! Tool configuration module.
//!
//! Handles loading, validating, and merging `hugo-matter.toml`. Stock
//! defaults are the base layer; a `hugo-matter.toml` in the config directory
//! (the current directory unless `--config-dir` says otherwise) overrides
//! any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [codec]
//! strict = false            # Fail on malformed lines / unencodable values
//!
//! [document]
//! delimiter = "+++"         # Line that opens and closes the front matter
//!
//! [check]
//! extensions = ["md"]       # Content file extensions visited by `check`
//!
//! [output]
//! pretty = true             # Pretty-print JSON output
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "hugo-matter.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `hugo-matter.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Codec behaviour (best-effort or strict).
    pub codec: CodecConfig,
    /// Content-file layout.
    pub document: DocumentConfig,
    /// Which files `check` visits.
    pub check: CheckConfig,
    /// CLI output formatting.
    pub output: OutputConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let delimiter = &self.document.delimiter;
        if delimiter.is_empty() {
            return Err(ConfigError::Validation(
                "document.delimiter must not be empty".into(),
            ));
        }
        if delimiter.chars().any(|c| c.is_whitespace() || c == '=') {
            return Err(ConfigError::Validation(
                "document.delimiter must not contain whitespace or '='".into(),
            ));
        }
        if self.check.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "check.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Use the strict decoder/encoder everywhere the CLI reads or writes.
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Line that opens and closes the front-matter block (`+++` for TOML).
    pub delimiter: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            delimiter: "+++".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// File extensions (without the dot) treated as content files.
    pub extensions: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
        }
    }
}

impl CheckConfig {
    /// Whether `path` has one of the configured extensions (case-insensitive).
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Pretty-print JSON written to stdout.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel check workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ToolConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `hugo-matter.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(None);
    }
    debug!(path = %config_path.display(), "loading config");
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `hugo-matter.toml` in the given directory, on top of
/// stock defaults.
pub fn load_config(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `hugo-matter.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# hugo-matter Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Codec
# ---------------------------------------------------------------------------
[codec]
# By default malformed front-matter lines are skipped and values with no
# front-matter form are written as quoted JSON text. Set to true to fail
# on either instead.
strict = false

# ---------------------------------------------------------------------------
# Content files
# ---------------------------------------------------------------------------
[document]
# Line that opens and closes the front-matter block.
delimiter = "+++"

[check]
# Extensions of files visited by `hugo-matter check <dir>`.
extensions = ["md"]

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Pretty-print JSON output.
pretty = true

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel check workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
