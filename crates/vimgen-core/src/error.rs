//! Error types for schema loading and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or interpreting the schema file
///
/// Every variant is fatal: generation never starts from a partial schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read
    #[error("failed to read schema '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not a valid schema document
    #[error("failed to parse schema '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An object record is structurally unusable
    #[error("invalid schema object '{name}': {reason}")]
    InvalidObject { name: String, reason: String },
}

/// Errors raised while loading or validating generator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this tool
    #[error("failed to parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The namespace dependency table contains a cycle
    #[error("namespace dependency cycle: {}", path.join(" -> "))]
    DependencyCycle { path: Vec<String> },

    /// Unknown log level name
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}
