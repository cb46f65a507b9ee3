//! Changing the log level after the subscriber is installed
//!
//! The command line installs logging before the configuration file is read,
//! so the level from `vimgen.toml` is applied afterwards through the global
//! [`ReloadHandle`].

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::reload;
use tracing_subscriber::{EnvFilter, Registry};
use vimgen_core::LogLevel;

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Swaps the filter of the installed subscriber
#[derive(Default)]
pub struct ReloadHandle {
    filter: Mutex<Option<FilterHandle>>,
    level: Mutex<Option<LogLevel>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The handle used by [`crate::init_logging`]
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    pub(crate) fn set_handle(&self, handle: FilterHandle, level: Option<LogLevel>) {
        *self.filter.lock() = Some(handle);
        *self.level.lock() = level;
    }

    /// Whether a subscriber has been installed through this handle
    pub fn is_initialized(&self) -> bool {
        self.filter.lock().is_some()
    }

    /// Level applied last, or `None` when `RUST_LOG` directives are in effect
    pub fn current_level(&self) -> Option<LogLevel> {
        *self.level.lock()
    }

    /// Replace the filter with one that applies `level` to every target
    pub fn reload_level(&self, level: LogLevel) -> Result<(), String> {
        let guard = self.filter.lock();
        let handle = guard
            .as_ref()
            .ok_or_else(|| "Reload handle not initialized".to_string())?;

        handle
            .reload(level_filter(level))
            .map_err(|e| format!("Failed to reload filter: {e}"))?;
        *self.level.lock() = Some(level);

        tracing::debug!(level = %level, "Log level changed");
        Ok(())
    }
}

pub(crate) fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(level.to_string())
}
