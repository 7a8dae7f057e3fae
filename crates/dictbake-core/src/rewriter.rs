//! Entry rewriter — strips and re-inserts the derived search keys
//!
//! Works directly on the file text so everything outside an entry
//! (declarations, brackets, comments, blank lines) survives byte for byte.
//! An entry is one object literal of the shape
//!
//! ```text
//! <indent>{ term: "<TERM>", lang: "<LANG>", def: "<DEF>" }<trailing>
//! ```
//!
//! and is re-emitted as
//!
//! ```text
//! <indent>{ term: "<TERM>", lang: "<LANG>", normTerm: "<NT>", def: "<DEF>", normDef: "<ND>" }<trailing>
//! ```
//!
//! Quoted values may contain backslash escapes (including `\"`); the raw,
//! still-escaped text is what gets normalized and copied through.
//! Fragments that do not fit the shape are left alone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::Entry;

/// Body of a double-quoted literal: anything but an unescaped `"`
const QUOTED_BODY: &str = r#"(?:[^"\\]|\\.)*"#;

static DERIVED_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#",\s*(?:normTerm|normDef):\s*"{QUOTED_BODY}""#))
        .expect("derived field pattern")
});

static ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        concat!(
            r#"(?P<indent>[ \t]*)"#,
            r#"\{{ term: "(?P<term>{body})",\s+lang: "(?P<lang>{body})",\s+"#,
            r#"def: "(?P<def>{body})" \}}"#,
            r#"(?P<trailing>[^\n]*)"#,
        ),
        body = QUOTED_BODY
    ))
    .expect("entry pattern")
});

static NORM_TERM_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"normTerm:\s*""#).expect("normTerm pattern"));

// ── Public API ─────────────────────────────────────────────

/// Remove every `, normTerm: "…"` and `, normDef: "…"` assignment.
///
/// The leading comma and any whitespace before the field name go with it,
/// which is exactly what [`rewrite_entries`] inserts, so a baked entry
/// strips back to its authored form.
pub fn strip_derived_fields(text: &str) -> String {
    let stripped = DERIVED_FIELD.replace_all(text, "");
    tracing::debug!(
        removed_bytes = text.len() - stripped.len(),
        "stripped derived fields"
    );
    stripped.into_owned()
}

/// Rewrite every entry with freshly computed `normTerm` / `normDef`.
///
/// Expects text that has already been through [`strip_derived_fields`];
/// entries that still carry derived fields do not match and stay as they
/// are. Matching is left to right and non-overlapping; only the first
/// entry on a line is considered, the rest of the line is trailing text.
pub fn rewrite_entries(text: &str) -> String {
    let mut rewritten = 0usize;
    let out = ENTRY.replace_all(text, |caps: &Captures| {
        rewritten += 1;
        let entry = entry_from_captures(caps);
        format!("{}{}{}", &caps["indent"], entry.to_literal(), &caps["trailing"])
    });
    tracing::debug!(rewritten, "rewrote entries");
    out.into_owned()
}

/// Number of `normTerm` assignments present in `text`.
///
/// This is the processed count reported after a bake: it is measured on
/// the output, not tallied while rewriting.
pub fn count_derived_entries(text: &str) -> usize {
    NORM_TERM_FIELD.find_iter(text).count()
}

/// Parse every entry in `text` into structured records.
///
/// Derived fields already present in the text are ignored and recomputed.
pub fn scan_entries(text: &str) -> Vec<Entry> {
    let stripped = strip_derived_fields(text);
    ENTRY
        .captures_iter(&stripped)
        .map(|caps| entry_from_captures(&caps))
        .collect()
}

fn entry_from_captures(caps: &Captures) -> Entry {
    Entry::new(&caps["term"], &caps["lang"], &caps["def"])
}
