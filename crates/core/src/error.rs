use std::path::PathBuf;

use thiserror::Error;

/// Structural problems found while parsing a prefixed symbol list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// An indented vtable entry appeared before any `_ZTV` marker line.
    #[error("line {line}: vtable entry {text:?} appears before any vtable marker")]
    OrphanEntry { line: usize, text: String },
}

/// Error type for everything that can stop a single artifact pair from being evaluated.
///
/// Class or vtable differences are not errors; they are reported through
/// [`crate::verify::VerificationResult`].
#[derive(Debug, Error)]
pub enum VerifyError {
    /// A required list, dump or archive file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A prefixed symbol list is malformed.
    #[error("Malformed symbol list {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// The JAR container could not be opened or enumerated.
    #[error("Failed to read archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Configuration file is unreadable or invalid.
    #[error("Invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl VerifyError {
    /// Map an IO error to `NotFound` when appropriate, otherwise to `Io`.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            VerifyError::NotFound { path }
        } else {
            VerifyError::Io { path, source }
        }
    }
}

/// Convenience result type for verifier operations.
pub type VerifyResult<T> = Result<T, VerifyError>;
