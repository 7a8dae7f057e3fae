//! Bake pipeline — strip, rewrite, count, and write back
//!
//! `bake` is the pure text-to-text pipeline; `run` and `check` wrap it with
//! file I/O. A failed read never writes, and the write goes through a
//! temporary file in the same directory followed by a rename, so the
//! dictionary is either fully baked or untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::rewriter::{count_derived_entries, rewrite_entries, strip_derived_fields};
use crate::{Error, Result};

/// Output of the pure bake pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baked {
    /// Full file text with derived fields refreshed
    pub text: String,
    /// Entries in `text` that carry a `normTerm` field
    pub entries: usize,
}

/// Outcome of baking one dictionary file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BakeReport {
    pub path: PathBuf,
    pub entries: usize,
    /// Baked text differs from what was on disk
    pub changed: bool,
    /// Baked text was written back to `path`
    pub written: bool,
}

// ── Public API ─────────────────────────────────────────────

/// Bake a whole dictionary source text.
///
/// # Guarantees
/// - Idempotent: `bake(&bake(x).text).text == bake(x).text`
/// - Text outside entries is untouched
pub fn bake(source: &str) -> Baked {
    let stripped = strip_derived_fields(source);
    let text = rewrite_entries(&stripped);
    let entries = count_derived_entries(&text);
    Baked { text, entries }
}

/// Read a dictionary file as UTF-8 text.
///
/// # Errors
/// Returns `FileAccess` if the file is missing, unreadable, or not UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

/// Bake the file at `path` in place.
///
/// The file is always rewritten, even when it contains no entries.
///
/// # Errors
/// Returns `FileAccess` if the file cannot be read (nothing is written),
/// or `FileWrite` if the baked text cannot be stored.
pub fn run(path: &Path) -> Result<BakeReport> {
    let source = read_source(path)?;
    let baked = bake(&source);
    let changed = baked.text != source;

    write_atomic(path, &baked.text)?;
    tracing::info!(
        path = %path.display(),
        entries = baked.entries,
        changed,
        "baked dictionary"
    );

    Ok(BakeReport {
        path: path.to_path_buf(),
        entries: baked.entries,
        changed,
        written: true,
    })
}

/// Bake the file at `path` in memory and report whether it is up to date.
///
/// # Errors
/// Returns `FileAccess` if the file cannot be read.
pub fn check(path: &Path) -> Result<BakeReport> {
    let source = read_source(path)?;
    let baked = bake(&source);
    let changed = baked.text != source;
    tracing::debug!(path = %path.display(), entries = baked.entries, changed, "checked dictionary");

    Ok(BakeReport {
        path: path.to_path_buf(),
        entries: baked.entries,
        changed,
        written: false,
    })
}

// ── Writing ────────────────────────────────────────────────

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source: io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    // Keep the mode of the file being replaced
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(meta.permissions())
            .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
