//! Configuration error types.

use std::path::PathBuf;

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading, translating, or writing config files.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The execution-environment file does not exist.
    #[error("execution environment file not found: {0}")]
    EeFileNotFound(PathBuf),

    /// Failed to read a YAML file.
    #[error("failed to read '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write a YAML file.
    #[error("failed to write '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse YAML.
    #[error("invalid YAML in '{path}': {source}")]
    ParseYaml {
        path: String,
        source: serde_yaml::Error,
    },

    /// Failed to serialize to YAML.
    #[error("failed to serialize YAML: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// The output file already exists and overwrite was not requested.
    #[error("output file already exists: {0} (pass --force to overwrite)")]
    OutputExists(PathBuf),
}
