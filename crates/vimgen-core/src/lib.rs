//! vimgen-core - Schema model, type mapping, and namespace resolution
//!
//! This crate provides the building blocks shared by the vimgen code generator:
//! - [`Schema`] and [`SchemaObject`] for the parsed API schema
//! - [`TypeRef`] and [`map_type`] for the primitive/composite type mapper
//! - [`NamespaceIndex`] for resolving cross-namespace type references
//! - [`Namespace`] and [`NamespaceTable`] for the fixed output namespaces
//! - [`naming`] utilities for identifiers and doc comments
//! - [`GeneratorConfig`] for generator configuration

mod config;
mod error;
mod index;
mod namespace;
pub mod naming;
mod schema;
mod typeref;

pub use config::{DEFAULT_LICENSE_BANNER, FailurePolicy, GeneratorConfig};
pub use error::{ConfigError, SchemaError};
pub use index::{NamespaceIndex, ResolvedType};
pub use namespace::{Namespace, NamespaceSpec, NamespaceTable};
pub use schema::{Field, Method, Param, Schema, SchemaObject};
pub use typeref::{Cardinality, TypeKind, TypeRef, map_type, primitive_type};

use std::str::FromStr;

/// Log levels accepted by the configuration and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(ConfigError::InvalidLogLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        FailurePolicy, GeneratorConfig, LogLevel, Namespace, NamespaceIndex, NamespaceTable,
        Schema, SchemaObject, TypeRef, map_type,
    };
}
