//! Generation orchestrator
//!
//! [`Pipeline`] loads the schema and derives the namespace index from it.
//! [`Generator`] then renders the four namespaces on four scoped threads that
//! share the schema, the index and the dependency table by reference, and
//! combines their outcomes according to the configured [`FailurePolicy`].

use crate::emit::Emitter;
use crate::error::CodegenError;
use crate::format::{finalize, format_source, write_atomic};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use vimgen_core::{
    FailurePolicy, GeneratorConfig, Namespace, NamespaceIndex, NamespaceTable, Schema,
    SchemaError,
};

/// File name of the module that declares the namespace modules
pub const ROOT_MODULE_FILE: &str = "mod.rs";

/// A loaded schema together with its namespace index
#[derive(Debug, Clone)]
pub struct Pipeline {
    schema: Schema,
    index: NamespaceIndex,
}

impl Pipeline {
    /// Read the schema file and index it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        Ok(Self::from_schema(Schema::from_file(path)?))
    }

    pub fn from_schema(schema: Schema) -> Self {
        let index = NamespaceIndex::build(schema.objects());
        tracing::debug!(objects = schema.len(), indexed = index.len(), "Built namespace index");
        Self { schema, index }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn index(&self) -> &NamespaceIndex {
        &self.index
    }

    /// Generator over this pipeline's schema
    pub fn generator<'a>(&'a self, config: &'a GeneratorConfig) -> Generator<'a> {
        Generator::new(&self.schema, &self.index, config)
    }
}

/// What happened to one namespace file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// Formatted source was written
    Written,
    /// Another namespace failed first and the write was abandoned
    Skipped,
    /// Rendering or formatting failed
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceReport {
    pub namespace: Namespace,
    pub path: PathBuf,
    pub objects: usize,
    pub status: OutputStatus,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// One entry per namespace, in namespace order
    pub namespaces: Vec<NamespaceReport>,
    /// Path of the root module, when one was written
    pub root_module: Option<PathBuf>,
}

impl GenerationReport {
    pub fn get(&self, namespace: Namespace) -> Option<&NamespaceReport> {
        self.namespaces.iter().find(|r| r.namespace == namespace)
    }

    /// Total number of objects written
    pub fn objects(&self) -> usize {
        self.namespaces
            .iter()
            .filter(|r| r.status == OutputStatus::Written)
            .map(|r| r.objects)
            .sum()
    }
}

/// Renders every namespace of a schema to disk
#[derive(Debug)]
pub struct Generator<'a> {
    schema: &'a Schema,
    index: &'a NamespaceIndex,
    config: &'a GeneratorConfig,
    table: NamespaceTable,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, index: &'a NamespaceIndex, config: &'a GeneratorConfig) -> Self {
        Self {
            schema,
            index,
            config,
            table: NamespaceTable::standard(),
        }
    }

    /// Use a different namespace dependency table
    pub fn with_table(mut self, table: NamespaceTable) -> Self {
        self.table = table;
        self
    }

    fn emitter(&self) -> Emitter<'_> {
        Emitter::new(self.schema, self.index, &self.table).with_banner(&self.config.license_banner)
    }

    /// Render and format one namespace without touching the filesystem
    pub fn preview(&self, namespace: Namespace) -> Result<String, CodegenError> {
        let raw = self
            .emitter()
            .emit(namespace)
            .map_err(|source| CodegenError::Template { namespace, source })?;

        format_source(&raw).map_err(|source| CodegenError::Format {
            namespace,
            path: self.config.output_file(namespace),
            source,
        })
    }

    /// Render and format the root module without touching the filesystem
    pub fn preview_root_module(&self) -> Result<String, CodegenError> {
        let path = self.root_module_path();
        let raw = self
            .emitter()
            .emit_root_module()
            .map_err(|e| CodegenError::RootModule {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        format_source(&raw).map_err(|e| CodegenError::RootModule {
            path,
            reason: e.to_string(),
        })
    }

    pub fn root_module_path(&self) -> PathBuf {
        self.config.output_root.join(ROOT_MODULE_FILE)
    }

    /// Generate every namespace
    ///
    /// The dependency table is validated and the output directories are
    /// created before any task starts. With [`FailurePolicy::Collect`] all
    /// four tasks run to completion and a single failure is returned as is,
    /// several as [`CodegenError::Aggregate`]. With
    /// [`FailurePolicy::FailFast`] tasks that have not written yet skip their
    /// write once a sibling fails, and the first failure in namespace order
    /// is returned.
    pub fn run(&self) -> Result<GenerationReport, CodegenError> {
        let root = &self.config.output_root;
        tracing::info!(
            output = %root.display(),
            objects = self.schema.len(),
            policy = ?self.config.failure_policy,
            "Starting generation"
        );

        self.table.validate()?;
        self.create_directories()?;

        let root_module = if self.config.emit_root_module {
            let path = self.root_module_path();
            write_atomic(&path, &self.preview_root_module()?)?;
            Some(path)
        } else {
            None
        };

        let abort = AtomicBool::new(false);
        let outcomes = self.run_tasks(&abort);

        let mut namespaces = Vec::with_capacity(outcomes.len());
        let mut errors = Vec::new();
        for (namespace, outcome) in outcomes {
            let status = match outcome {
                Ok(status) => status,
                Err(e) => {
                    tracing::error!(namespace = %namespace, error = %e, "Namespace generation failed");
                    errors.push(e);
                    OutputStatus::Failed
                }
            };
            namespaces.push(NamespaceReport {
                namespace,
                path: self.config.output_file(namespace),
                objects: self.schema.in_namespace(namespace).count(),
                status,
            });
        }

        let mut errors = errors.into_iter();
        let Some(first) = errors.next() else {
            let report = GenerationReport {
                namespaces,
                root_module,
            };
            tracing::info!(objects = report.objects(), "Generation complete");
            return Ok(report);
        };

        match self.config.failure_policy {
            FailurePolicy::FailFast => Err(first),
            FailurePolicy::Collect => {
                let rest: Vec<_> = errors.collect();
                if rest.is_empty() {
                    Err(first)
                } else {
                    Err(CodegenError::Aggregate(
                        std::iter::once(first).chain(rest).collect(),
                    ))
                }
            }
        }
    }

    fn create_directories(&self) -> Result<(), CodegenError> {
        let dirs = std::iter::once(self.config.output_root.clone()).chain(
            Namespace::ALL
                .iter()
                .map(|ns| self.config.output_root.join(ns.tag())),
        );

        for dir in dirs {
            fs::create_dir_all(&dir).map_err(|source| CodegenError::Io { path: dir, source })?;
        }
        Ok(())
    }

    /// One scoped thread per namespace, joined before returning
    fn run_tasks(&self, abort: &AtomicBool) -> Vec<(Namespace, Result<OutputStatus, CodegenError>)> {
        thread::scope(|scope| {
            let handles: Vec<_> = Namespace::ALL
                .iter()
                .map(|&namespace| {
                    let handle = scope.spawn(move || self.generate_namespace(namespace, abort));
                    (namespace, handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(namespace, handle)| {
                    let outcome = handle.join().unwrap_or_else(|_| {
                        tracing::error!(namespace = %namespace, "Generation task panicked");
                        Err(CodegenError::TaskPanicked { namespace })
                    });
                    (namespace, outcome)
                })
                .collect()
        })
    }

    fn generate_namespace(
        &self,
        namespace: Namespace,
        abort: &AtomicBool,
    ) -> Result<OutputStatus, CodegenError> {
        let span = tracing::info_span!("namespace", namespace = %namespace);
        let _guard = span.enter();

        let raw = match self.emitter().emit(namespace) {
            Ok(raw) => raw,
            Err(source) => {
                abort.store(true, Ordering::SeqCst);
                return Err(CodegenError::Template { namespace, source });
            }
        };

        if self.config.failure_policy == FailurePolicy::FailFast && abort.load(Ordering::SeqCst) {
            tracing::info!("Skipping write after a failure in another namespace");
            return Ok(OutputStatus::Skipped);
        }

        let path = self.config.output_file(namespace);
        finalize(namespace, &path, &raw).inspect_err(|_| abort.store(true, Ordering::SeqCst))?;

        tracing::info!(
            path = %path.display(),
            objects = self.schema.in_namespace(namespace).count(),
            "Wrote namespace"
        );
        Ok(OutputStatus::Written)
    }
}
