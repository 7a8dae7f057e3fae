//! Error types for dictbake
//!
//! All fallible operations return `Result<T, Error>`.
//! Entry fragments that fail to match are not errors: they are left in
//! place and simply not counted.

use std::io;
use std::path::PathBuf;

/// Dictbake error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Dictionary file missing, unreadable, or not valid UTF-8
    #[error("cannot read {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Baked output could not be written back
    #[error("cannot write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Path of the file the failed operation addressed
    pub fn path(&self) -> &std::path::Path {
        match self {
            Error::FileAccess { path, .. } | Error::FileWrite { path, .. } => path,
        }
    }
}

/// Result type alias for dictbake operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_access_display_names_path() {
        let err = Error::FileAccess {
            path: PathBuf::from("docs/dictionary.js"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cannot read docs/dictionary.js"), "{}", msg);
        assert!(msg.contains("No such file"), "{}", msg);
        assert_eq!(err.path(), std::path::Path::new("docs/dictionary.js"));
    }

    #[test]
    fn test_source_is_preserved() {
        let err = Error::FileWrite {
            path: PathBuf::from("out.js"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let source = std::error::Error::source(&err).expect("io source");
        assert_eq!(source.to_string(), "denied");
    }
}
