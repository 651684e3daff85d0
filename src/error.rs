//! Error types for idmlcheck library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for idmlcheck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or checking a package.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A single XML artifact could not be parsed.
    #[error("XML parsing error in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    /// The package layout is unusable; the run cannot continue.
    #[error(transparent)]
    Structural(#[from] StructuralFailure),

    /// A BasedOn chain refers back to a style already visited.
    #[error("Style inheritance cycle at '{style_id}' while resolving {property}")]
    StyleCycle { style_id: String, property: String },

    /// A BasedOn chain is deeper than the configured bound.
    #[error("Style inheritance deeper than {depth} at '{style_id}' while resolving {property}")]
    StyleDepthExceeded {
        style_id: String,
        property: String,
        depth: usize,
    },

    /// An ItemTransform attribute is not six numbers.
    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    /// Error writing the source XML archive.
    #[error("Archive error: {0}")]
    Zip(String),

    /// Error during rendering (JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error ends the run instead of dropping one artifact.
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::Structural(_))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Zip(err.to_string()),
        }
    }
}

/// Failures that abort a run before any rule is evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralFailure {
    /// The unpacked root does not exist.
    #[error("Package directory does not exist: {0}")]
    MissingRoot(PathBuf),

    /// The unpacked root is a file, not a directory.
    #[error("Package path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A mandatory directory or file is absent.
    #[error("{artifact} does not exist")]
    MissingArtifact {
        artifact: &'static str,
        path: PathBuf,
    },

    /// A mandatory file exists but could not be parsed.
    #[error("{artifact} could not be parsed: {message}")]
    UnparsableArtifact {
        artifact: &'static str,
        message: String,
    },
}

impl StructuralFailure {
    pub(crate) fn missing(artifact: &'static str, path: impl Into<PathBuf>) -> Self {
        StructuralFailure::MissingArtifact {
            artifact,
            path: path.into(),
        }
    }
}
