//! Generator configuration
//!
//! Configuration is read from an optional `vimgen.toml`:
//!
//! ```toml
//! output_root = "./vim"
//! failure_policy = "fail-fast"
//! log_level = "debug"
//! emit_root_module = true
//! ```
//!
//! Every key is optional; command-line flags override file values.

use crate::LogLevel;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// License notice written at the top of every generated file
pub const DEFAULT_LICENSE_BANNER: &str = "\
This Source Code Form is subject to the terms of the Mozilla Public
License, v. 2.0. If a copy of the MPL was not distributed with this
file, You can obtain one at http://mozilla.org/MPL/2.0/.";

/// What to do when one namespace fails to generate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Let every namespace finish, then report all failures together
    #[default]
    Collect,

    /// Stop at the first failure; namespaces that have not written yet are skipped
    FailFast,
}

/// Configuration for one generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Directory that receives one subdirectory per namespace
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Log level applied once the configuration is loaded
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write `<output_root>/mod.rs` declaring the namespace modules
    #[serde(default = "default_emit_root_module")]
    pub emit_root_module: bool,

    /// Notice placed in a `//` comment at the top of every generated file
    #[serde(default = "default_license_banner")]
    pub license_banner: String,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("./vim")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_emit_root_module() -> bool {
    true
}

fn default_license_banner() -> String {
    DEFAULT_LICENSE_BANNER.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            failure_policy: FailurePolicy::default(),
            log_level: default_log_level(),
            emit_root_module: default_emit_root_module(),
            license_banner: default_license_banner(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new("<memory>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the output root
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Set the failure policy
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Parsed log level
    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.log_level.parse()
    }

    /// Path of the generated file for `namespace`
    pub fn output_file(&self, namespace: crate::Namespace) -> PathBuf {
        self.output_root
            .join(namespace.tag())
            .join(namespace.file_name())
    }
}
