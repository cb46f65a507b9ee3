//! vimgen-logging - Diagnostic logging for the generator
//!
//! This crate provides:
//! - [`init_logging`] to install a stderr subscriber honouring `RUST_LOG`
//! - [`ReloadHandle`] to change the level once configuration is known

mod layer;
mod reload;

pub use layer::init_logging;
pub use reload::ReloadHandle;
pub use vimgen_core::LogLevel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, init_logging};
}
