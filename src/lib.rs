//! # hugo-matter
//!
//! A best-effort reader and writer for the TOML front matter of Hugo
//! content files.
//!
//! Only a flat `key = value` subset is understood: quoted strings, numbers,
//! booleans, and flat arrays of strings or numbers. Anything else on a value
//! line is kept as raw text, and lines that are not pairs are dropped. The
//! codec never fails on input; strict variants exist for callers who want
//! to know what was dropped.
//!
//! ```text
//! +++                                   decode        {
//! title = "Night Walk"              ─────────────▶      "title": "Night Walk",
//! tags = ["film", "city"]                               "tags": ["film", "city"],
//! weight = 10                       ◀─────────────      "weight": 10
//! +++                                   encode        }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`codec`] | `decode` / `encode` and their strict variants |
//! | [`value`] | `Value` tagged union, `FrontMatter` map, JSON bridging |
//! | [`document`] | Split and join the `+++` block and body; read/write files |
//! | [`check`] | Strict validation of every content file in a tree, in parallel |
//! | [`config`] | `hugo-matter.toml` loading, merging over stock defaults, validation |
//! | [`output`] | CLI output formatting |
//! | [`logger`] | `tracing` subscriber setup |
//!
//! # Design Decisions
//!
//! ## Best-Effort by Default
//!
//! Front matter is hand-edited. A stray line should not stop a site build or
//! an admin screen from loading the rest of the metadata, so `decode` skips
//! what it cannot read and `encode` always produces text. The strict
//! variants are opt-in (`codec.strict = true`) and `check` always uses them.
//!
//! ## Insertion Order
//!
//! Mappings are `IndexMap`s so that writing a file back keeps its keys in
//! the order the author wrote them. A repeated key keeps its first position
//! and takes the last value.
//!
//! ## No Escape Processing on Decode
//!
//! `encode` escapes `"` inside strings as `\"`; `decode` does not undo it.
//! Round-trips are exact only for strings without embedded double quotes.

pub mod check;
pub mod codec;
pub mod config;
pub mod document;
pub mod logger;
pub mod output;
pub mod value;

pub use codec::{CodecError, decode, decode_strict, encode, encode_strict};
pub use value::{ArrayItem, FrontMatter, Value};

#[cfg(test)]
pub(crate) mod test_helpers;
