//! Namespace index: which output namespace owns each composite type
//!
//! The index is built once from the loaded schema, before any emission task
//! starts, and has no mutating API afterwards. Emission tasks share it by
//! reference across threads.

use crate::namespace::Namespace;
use crate::schema::SchemaObject;
use crate::typeref::TypeRef;
use std::collections::HashMap;
use std::fmt;

/// Frozen mapping from bare type name to owning namespace
#[derive(Debug, Clone, Default)]
pub struct NamespaceIndex {
    owners: HashMap<String, Namespace>,
}

impl NamespaceIndex {
    /// Build the index in a single pass over the schema objects
    ///
    /// A name declared twice keeps its last declaration.
    pub fn build(objects: &[SchemaObject]) -> Self {
        let mut owners = HashMap::with_capacity(objects.len());

        for obj in objects {
            if let Some(previous) = owners.insert(obj.name.clone(), obj.namespace) {
                tracing::warn!(
                    name = %obj.name,
                    previous = %previous,
                    namespace = %obj.namespace,
                    "Type declared more than once, keeping last declaration"
                );
            }
        }

        Self { owners }
    }

    /// Namespace that owns `name`, if it is declared in the schema
    pub fn owner(&self, name: &str) -> Option<Namespace> {
        self.owners.get(name).copied()
    }

    /// Resolve a type reference as seen from `current`
    ///
    /// Primitive types, undeclared names and names owned by `current` stay
    /// unqualified; everything else is qualified with its owner. The
    /// reference's kind and cardinality are carried through unchanged.
    pub fn resolve<'a>(&self, ty: &'a TypeRef, current: Namespace) -> ResolvedType<'a> {
        let qualifier = ty
            .reference_name()
            .and_then(|name| self.owner(name))
            .filter(|owner| *owner != current);

        ResolvedType { ty, qualifier }
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// A type reference together with the namespace it must be qualified with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedType<'a> {
    ty: &'a TypeRef,
    qualifier: Option<Namespace>,
}

impl<'a> ResolvedType<'a> {
    pub fn ty(&self) -> &'a TypeRef {
        self.ty
    }

    /// Owning namespace, when it differs from the current one
    pub fn qualifier(&self) -> Option<Namespace> {
        self.qualifier
    }

    /// Render as Rust, qualified with the owner's module identifier
    pub fn render(&self) -> String {
        let module = self.qualifier.map(Namespace::module_ident);
        self.ty.render(module.as_deref())
    }

    /// Qualified element path without decoration, as used for base types
    pub fn path(&self) -> String {
        let module = self.qualifier.map(Namespace::module_ident);
        self.ty.path(module.as_deref())
    }
}

impl fmt::Display for ResolvedType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
