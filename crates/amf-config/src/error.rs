//! Error types for configuration loading and editing.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or editing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Config file not found.
    #[error("config file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },

    /// Invalid or unparseable config version.
    #[error("unsupported config version: {version}")]
    UnsupportedVersion {
        /// Version string from the config.
        version: String,
    },

    /// Color space not found in the config.
    #[error("color space not found: {name}")]
    ColorSpaceNotFound {
        /// Name of the missing color space.
        name: String,
    },

    /// View transform not found in the config.
    #[error("view transform not found: {name}")]
    ViewTransformNotFound {
        /// Name of the missing view transform.
        name: String,
    },

    /// Look not found in the config.
    #[error("look not found: {name}")]
    LookNotFound {
        /// Name of the missing look.
        name: String,
    },

    /// Display not found in the config.
    #[error("display not found: {name}")]
    DisplayNotFound {
        /// Name of the missing display.
        name: String,
    },

    /// The config failed cross-reference validation.
    #[error("validation error: {0}")]
    Validation(String),
}
