//! The fixed output namespaces and their dependency table

use crate::error::ConfigError;
use crate::naming::escape_reserved;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four output namespaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Managed objects: server-side entities with methods
    Mo,
    /// Data objects: plain transfer records
    Do,
    /// Enumerations
    Enum,
    /// Faults raised by methods
    Fault,
}

impl Namespace {
    /// All namespaces, in generation order.
    pub const ALL: [Namespace; 4] = [Namespace::Mo, Namespace::Do, Namespace::Enum, Namespace::Fault];

    /// Schema tag, also used for the output directory and file stem
    pub fn tag(self) -> &'static str {
        match self {
            Namespace::Mo => "mo",
            Namespace::Do => "do",
            Namespace::Enum => "enum",
            Namespace::Fault => "fault",
        }
    }

    /// Rust module identifier (`do` and `enum` are keywords)
    pub fn module_ident(self) -> String {
        escape_reserved(self.tag())
    }

    /// Name of the generated file inside the namespace directory
    pub fn file_name(self) -> String {
        format!("{}.rs", self.tag())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Declaration of one namespace: what it is, what it imports, what it may reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSpec {
    pub namespace: Namespace,
    pub description: &'static str,
    /// External `use` paths every generated file of this namespace needs
    pub imports: &'static [&'static str],
    /// Namespaces whose types this namespace may reference
    pub depends_on: &'static [Namespace],
}

const SERDE: &str = "serde::{Deserialize, Serialize}";
const CHRONO: &str = "chrono::{DateTime, Utc}";

/// Namespace dependency table
///
/// `do` and `enum` are leaves; `mo` and `fault` depend on `do`.
#[derive(Debug, Clone)]
pub struct NamespaceTable {
    specs: Vec<NamespaceSpec>,
}

impl NamespaceTable {
    /// The standard four-namespace layout
    pub fn standard() -> Self {
        Self::from_specs(vec![
            NamespaceSpec {
                namespace: Namespace::Mo,
                description: "Managed objects and the operations they expose.",
                imports: &[SERDE, CHRONO],
                depends_on: &[Namespace::Do],
            },
            NamespaceSpec {
                namespace: Namespace::Do,
                description: "Data objects exchanged with the API.",
                imports: &[SERDE, CHRONO],
                depends_on: &[],
            },
            NamespaceSpec {
                namespace: Namespace::Enum,
                description: "Enumerated value sets.",
                imports: &[SERDE, CHRONO],
                depends_on: &[],
            },
            NamespaceSpec {
                namespace: Namespace::Fault,
                description: "Faults reported by API operations.",
                imports: &[SERDE, CHRONO],
                depends_on: &[Namespace::Do],
            },
        ])
    }

    /// Build a table from explicit specs
    pub fn from_specs(specs: Vec<NamespaceSpec>) -> Self {
        Self { specs }
    }

    /// Look up a namespace's declaration
    pub fn spec(&self, namespace: Namespace) -> Option<&NamespaceSpec> {
        self.specs.iter().find(|s| s.namespace == namespace)
    }

    /// Whether `from` declares a dependency on `to`
    pub fn depends_on(&self, from: Namespace, to: Namespace) -> bool {
        self.spec(from)
            .is_some_and(|s| s.depends_on.contains(&to))
    }

    /// Full `use` list of a namespace: external imports, then sibling modules
    pub fn imports(&self, namespace: Namespace) -> Vec<String> {
        let Some(spec) = self.spec(namespace) else {
            return Vec::new();
        };

        spec.imports
            .iter()
            .map(|path| (*path).to_string())
            .chain(
                spec.depends_on
                    .iter()
                    .map(|dep| format!("super::{}", dep.module_ident())),
            )
            .collect()
    }

    /// Check that no namespace (transitively) depends on itself
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut finished = Vec::new();
        for spec in &self.specs {
            let mut path = Vec::new();
            self.visit(spec.namespace, &mut path, &mut finished)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        namespace: Namespace,
        path: &mut Vec<Namespace>,
        finished: &mut Vec<Namespace>,
    ) -> Result<(), ConfigError> {
        if finished.contains(&namespace) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|n| *n == namespace) {
            let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(namespace.to_string());
            return Err(ConfigError::DependencyCycle { path: cycle });
        }

        path.push(namespace);
        if let Some(spec) = self.spec(namespace) {
            for dep in spec.depends_on {
                self.visit(*dep, path, finished)?;
            }
        }
        path.pop();
        finished.push(namespace);

        Ok(())
    }
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::standard()
    }
}
