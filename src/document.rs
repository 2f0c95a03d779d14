//! Content files: a delimited front-matter block followed by a markdown body.
//!
//! Hugo content files carrying TOML front matter look like this:
//!
//! ```text
//! +++
//! title = "Night Walk"
//! tags = ["film", "city"]
//! +++
//! The body starts on the line after the closing delimiter.
//! ```
//!
//! The opening delimiter must be the very first line (a UTF-8 BOM is
//! tolerated). A file that does not open with the delimiter, or never closes
//! it, has no front matter: its whole text is the body.
//!
//! Rendering puts the pieces back in the same shape, so
//! `parse(render(file)).body == file.body` for every body.

use crate::codec::{self, CodecError};
use crate::config::ToolConfig;
use crate::value::{FrontMatter, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

/// Split `text` into its front-matter block and body.
///
/// The returned front matter excludes both delimiter lines; the body starts
/// right after the closing delimiter's line break. Delimiter lines are
/// compared after trimming trailing whitespace, so `\r\n` files work.
pub fn split_front_matter<'a>(text: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != delimiter {
        return None;
    }
    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == delimiter {
            return Some((&text[start..offset], &text[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

/// A parsed content file.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentFile {
    pub front_matter: FrontMatter,
    pub body: String,
    /// Whether the source had a delimited block (even an empty one).
    pub has_front_matter: bool,
    /// Whether the closing delimiter line ends with a line break. Only false
    /// for a file that ends right at the closing delimiter.
    pub closing_newline: bool,
}

impl Default for ContentFile {
    fn default() -> Self {
        Self {
            front_matter: FrontMatter::new(),
            body: String::new(),
            has_front_matter: false,
            closing_newline: true,
        }
    }
}

fn ends_with_closing_newline(text: &str, body: &str) -> bool {
    !body.is_empty() || text.ends_with('\n')
}

impl ContentFile {
    /// Parse with the best-effort decoder.
    pub fn parse(text: &str, delimiter: &str) -> Self {
        match split_front_matter(text, delimiter) {
            Some((front, body)) => Self {
                front_matter: codec::decode(front),
                body: body.to_string(),
                has_front_matter: true,
                closing_newline: ends_with_closing_newline(text, body),
            },
            None => Self::body_only(text),
        }
    }

    /// Parse with the strict decoder.
    ///
    /// Line numbers in errors are relative to the front-matter block, not
    /// the file.
    pub fn parse_strict(text: &str, delimiter: &str) -> Result<Self, CodecError> {
        match split_front_matter(text, delimiter) {
            Some((front, body)) => Ok(Self {
                front_matter: codec::decode_strict(front)?,
                body: body.to_string(),
                has_front_matter: true,
                closing_newline: ends_with_closing_newline(text, body),
            }),
            None => Ok(Self::body_only(text)),
        }
    }

    fn body_only(text: &str) -> Self {
        Self {
            body: text.to_string(),
            ..Self::default()
        }
    }

    /// Render with the best-effort encoder.
    pub fn render(&self, delimiter: &str) -> String {
        self.assemble(&codec::encode(&self.front_matter), delimiter)
    }

    /// Render with the strict encoder.
    pub fn render_strict(&self, delimiter: &str) -> Result<String, CodecError> {
        Ok(self.assemble(&codec::encode_strict(&self.front_matter)?, delimiter))
    }

    fn assemble(&self, encoded: &str, delimiter: &str) -> String {
        if !self.has_front_matter && self.front_matter.is_empty() {
            return self.body.clone();
        }
        let mut out = format!("{delimiter}\n");
        if !encoded.is_empty() {
            out.push_str(encoded);
            out.push('\n');
        }
        out.push_str(delimiter);
        if self.closing_newline || !self.body.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.body);
        out
    }
}

/// Read and parse a content file, honouring `codec.strict`.
pub fn read_content_file(path: &Path, config: &ToolConfig) -> Result<ContentFile, DocumentError> {
    debug!(path = %path.display(), "reading content file");
    let text = fs::read_to_string(path)?;
    let delimiter = &config.document.delimiter;
    if config.codec.strict {
        ContentFile::parse_strict(&text, delimiter).map_err(|source| DocumentError::Codec {
            path: path.to_path_buf(),
            source,
        })
    } else {
        Ok(ContentFile::parse(&text, delimiter))
    }
}

/// Set one key in a content file on disk and return the updated file.
///
/// Always strict on both ends, whatever `codec.strict` says: a line the
/// best-effort decoder would drop (a `[params]` table header, a stray word)
/// fails the edit instead of being lost on write-back, and the new value must
/// read back as written. Comment lines cannot be kept and are dropped with a
/// warning.
pub fn set_value(
    path: &Path,
    key: &str,
    value: Value,
    config: &ToolConfig,
) -> Result<ContentFile, DocumentError> {
    debug!(path = %path.display(), key, "setting front-matter value");
    let text = fs::read_to_string(path)?;
    let delimiter = &config.document.delimiter;
    let codec_err = |source: CodecError| DocumentError::Codec {
        path: path.to_path_buf(),
        source,
    };

    let mut file = ContentFile::parse_strict(&text, delimiter).map_err(codec_err)?;
    if let Some((front, _)) = split_front_matter(&text, delimiter) {
        let comments = front
            .lines()
            .filter(|l| l.trim_start().starts_with('#'))
            .count();
        if comments > 0 {
            warn!(path = %path.display(), comments, "front-matter comments are not preserved");
        }
    }

    file.front_matter.insert(key.to_string(), value);
    let rendered = file.render_strict(delimiter).map_err(codec_err)?;
    fs::write(path, rendered)?;
    Ok(file)
}

/// Render and write a content file, honouring `codec.strict`.
pub fn write_content_file(
    path: &Path,
    file: &ContentFile,
    config: &ToolConfig,
) -> Result<(), DocumentError> {
    let delimiter = &config.document.delimiter;
    let text = if config.codec.strict {
        file.render_strict(delimiter)
            .map_err(|source| DocumentError::Codec {
                path: path.to_path_buf(),
                source,
            })?
    } else {
        file.render(delimiter)
    };
    debug!(path = %path.display(), bytes = text.len(), "writing content file");
    fs::write(path, text)?;
    Ok(())
}
