//! Error types for code generation

use crate::template::TemplateError;
use std::path::PathBuf;
use thiserror::Error;
use vimgen_core::{ConfigError, Namespace, SchemaError};

/// Errors raised while generating the namespace files
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A template is malformed or references an unknown variable
    #[error("template error in namespace '{namespace}': {source}")]
    Template {
        namespace: Namespace,
        #[source]
        source: TemplateError,
    },

    /// The generated source does not parse; the raw buffer was written to `path`
    #[error("there are errors in the generated source for namespace '{namespace}' ({}): {source}", path.display())]
    Format {
        namespace: Namespace,
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    /// Reading or writing an output file failed
    #[error("I/O error at '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The root module could not be rendered or does not parse
    #[error("failed to generate root module '{}': {reason}", path.display())]
    RootModule { path: PathBuf, reason: String },

    /// An emission task panicked
    #[error("generation task for namespace '{namespace}' panicked")]
    TaskPanicked { namespace: Namespace },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// More than one namespace failed
    #[error("{} namespaces failed: {}", .0.len(), summarize(.0))]
    Aggregate(Vec<CodegenError>),
}

impl CodegenError {
    /// Namespace the error belongs to, if it belongs to exactly one
    pub fn namespace(&self) -> Option<Namespace> {
        match self {
            CodegenError::Template { namespace, .. }
            | CodegenError::Format { namespace, .. }
            | CodegenError::TaskPanicked { namespace } => Some(*namespace),
            _ => None,
        }
    }

    /// Flatten into the individual failures
    pub fn failures(&self) -> Vec<&CodegenError> {
        match self {
            CodegenError::Aggregate(errors) => errors.iter().flat_map(|e| e.failures()).collect(),
            other => vec![other],
        }
    }
}

fn summarize(errors: &[CodegenError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
