//! vimgen-codegen - Template emission, formatting, and generation orchestration
//!
//! This crate turns a loaded schema into Rust source files:
//! - [`Template`] for the logic-less template language
//! - [`Emitter`] for rendering one namespace of the schema
//! - [`format_source`] and [`finalize`] for formatting and writing output
//! - [`Pipeline`] and [`Generator`] for running all namespaces concurrently
//! - [`CodegenError`] for error handling

mod emit;
mod error;
mod format;
mod generator;
mod template;
mod templates;

pub use emit::{
    Emitter, UndeclaredReference, emit_namespace, field_ident, method_ident, type_ident,
    variant_ident,
};
pub use error::CodegenError;
pub use format::{finalize, format_source, split_banner, write_atomic};
pub use generator::{
    GenerationReport, Generator, NamespaceReport, OutputStatus, Pipeline, ROOT_MODULE_FILE,
};
pub use template::{Context, Template, TemplateError, Value};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CodegenError, Emitter, GenerationReport, Generator, OutputStatus, Pipeline};
}
