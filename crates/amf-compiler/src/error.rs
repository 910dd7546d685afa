//! Error types for AMF compilation.
//!
//! Every error carries the one-based line number of the AMF document that
//! was being parsed when the error surfaced. Errors raised before the
//! document is opened (e.g. reference-config problems) carry line 0.

use std::path::PathBuf;
use thiserror::Error;

use amf_config::ConfigError;

/// Result type for AMF compilation.
pub type AmfResult<T> = Result<T, AmfError>;

/// Errors that can occur while compiling an AMF document.
///
/// All errors are fatal; a failed compilation leaves no partial config.
#[derive(Debug, Error)]
pub enum AmfError {
    /// I/O error reading the AMF document.
    #[error("cannot read AMF document {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The underlying XML parser rejected the document.
    #[error("XML parsing error: {message}. At line ({line})")]
    XmlParse {
        /// One-based line number.
        line: usize,
        /// Parser diagnostic.
        message: String,
    },

    /// Invariant violation inside the event router.
    #[error("internal AMF parsing error: {message}. At line ({line})")]
    InternalParse {
        /// One-based line number.
        line: usize,
        /// Description of the violated invariant.
        message: String,
    },

    /// The reference config is older than 2.3.
    #[error("reference config version {version} is not supported, requires 2.3 or higher. At line ({line})")]
    UnsupportedRefVersion {
        /// One-based line number.
        line: usize,
        /// Version of the rejected reference config.
        version: String,
    },

    /// The reference config lacks the ACES2065-1 color space.
    #[error("reference config is missing the ACES2065-1 color space. At line ({line})")]
    MissingRefAces {
        /// One-based line number.
        line: usize,
    },

    /// An input-transform block was present but no input color space could
    /// be assigned.
    #[error("input transform did not yield an input color space. At line ({line})")]
    MissingInputTransform {
        /// One-based line number.
        line: usize,
    },

    /// A referenced LUT file cannot be opened, absolutely or relative to
    /// the AMF document.
    #[error("file transform refers to path that does not exist: {path}. At line ({line})")]
    InvalidLutPath {
        /// One-based line number.
        line: usize,
        /// The unreadable path.
        path: PathBuf,
    },

    /// The configuration model reported an error.
    #[error("{source}. At line ({line})")]
    Config {
        /// One-based line number.
        line: usize,
        /// Underlying configuration error.
        source: ConfigError,
    },
}

impl AmfError {
    /// Returns the one-based AMF line number the error is attributed to,
    /// if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::XmlParse { line, .. }
            | Self::InternalParse { line, .. }
            | Self::UnsupportedRefVersion { line, .. }
            | Self::MissingRefAces { line }
            | Self::MissingInputTransform { line }
            | Self::InvalidLutPath { line, .. }
            | Self::Config { line, .. } => Some(*line),
        }
    }
}
