//! Configuration loading for the command line

use anyhow::{Context, Result};
use std::path::Path;
use vimgen_core::GeneratorConfig;
use vimgen_logging::{LogLevel, ReloadHandle};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "vimgen.toml";

/// Log level requested with `-v` flags, if any
pub fn verbosity_level(count: u8) -> Option<LogLevel> {
    match count {
        0 => None,
        1 => Some(LogLevel::Debug),
        _ => Some(LogLevel::Trace),
    }
}

/// Load the configuration
///
/// An explicit path must exist. Without one, `vimgen.toml` in `dir` is used
/// when present and defaults otherwise.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<GeneratorConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                tracing::debug!("No config file, using defaults");
                return Ok(GeneratorConfig::default());
            }
            candidate
        }
    };

    let config = GeneratorConfig::from_file(&path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Apply the configured log level unless `-v` or `RUST_LOG` already chose one
pub fn apply_log_level(config: &GeneratorConfig, verbosity: Option<LogLevel>) -> Result<()> {
    if verbosity.is_some() {
        return Ok(());
    }

    let level = config.log_level().context("Invalid log_level in config")?;
    let handle = ReloadHandle::global();
    if handle.current_level().is_some()
        && let Err(e) = handle.reload_level(level)
    {
        tracing::warn!(error = %e, "Failed to apply configured log level");
    }
    Ok(())
}
