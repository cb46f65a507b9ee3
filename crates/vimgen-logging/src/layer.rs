//! Subscriber setup: a reloadable filter in front of a stderr formatter

use crate::reload::{ReloadHandle, level_filter};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, reload};
use vimgen_core::LogLevel;

/// Initialize logging to stderr
///
/// `RUST_LOG` takes precedence over `level` when it is set. Returns `false`
/// if a global subscriber was already installed, in which case nothing
/// changes.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::prelude::*;

    let (filter, applied) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => (level_filter(level), Some(level)),
    };
    let (filter, handle) = reload::Layer::new(filter);

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    // Try to set as global default (ignore error if already set)
    let installed = tracing::subscriber::set_global_default(subscriber).is_ok();
    if installed {
        ReloadHandle::global().set_handle(handle, applied);
    }
    installed
}
