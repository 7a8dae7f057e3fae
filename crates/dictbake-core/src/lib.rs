//! Dictbake Core - search-key baking for static dictionary data
//!
//! Adds precomputed, accent-free lowercase search keys (`normTerm`,
//! `normDef`) to every `{ term, lang, def }` entry of a JavaScript data
//! file, so client-side search does not have to fold every entry at load
//! time.
//!
//! # Architecture
//!
//! ```text
//! File text → strip_derived_fields → rewrite_entries → count → File text
//!                                          ↓
//!                                      normalize (NFD, drop Mn, lowercase)
//! ```
//!
//! # Guarantees
//!
//! - **Idempotent**: baking a baked file changes nothing
//! - **Pass-through**: text outside entries is preserved byte for byte
//! - **Derived only**: `normTerm`/`normDef` are always recomputed, never trusted

pub mod baker;
pub mod error;
pub mod normalizer;
pub mod rewriter;

pub use baker::{bake, check, run, BakeReport, Baked};
pub use error::{Error, Result};
pub use normalizer::normalize;
pub use rewriter::{count_derived_entries, rewrite_entries, scan_entries, strip_derived_fields};

/// Dictionary file baked when no path is given, relative to the working directory
pub const DEFAULT_DICT_PATH: &str = "docs/dictionary.js";

/// One dictionary record with its derived search keys
///
/// Field order is the order fields are written in, both in the baked
/// literal and when serialized.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub term: String,
    pub lang: String,
    pub norm_term: String,
    pub def: String,
    pub norm_def: String,
}

impl Entry {
    /// Build an entry from its authored fields, deriving the search keys
    pub fn new(term: &str, lang: &str, def: &str) -> Self {
        Entry {
            term: term.to_string(),
            lang: lang.to_string(),
            norm_term: normalize(term),
            def: def.to_string(),
            norm_def: normalize(def),
        }
    }

    /// Render as a single-line object literal (without indent or trailing text)
    pub fn to_literal(&self) -> String {
        format!(
            r#"{{ term: "{}", lang: "{}", normTerm: "{}", def: "{}", normDef: "{}" }}"#,
            self.term, self.lang, self.norm_term, self.def, self.norm_def
        )
    }
}
