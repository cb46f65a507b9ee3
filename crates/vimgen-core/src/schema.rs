//! Schema model and loader
//!
//! The schema is a JSON array of object records:
//!
//! ```json
//! [
//!   {
//!     "Name": "VirtualMachine",
//!     "Namespace": "mo",
//!     "Extends": "ManagedEntity",
//!     "Fields": [{ "Name": "name", "Type": "xsd:string" }],
//!     "Methods": [
//!       {
//!         "Name": "PowerOnVM_Task",
//!         "Parameters": [{ "Name": "host", "Type": "HostSystem" }],
//!         "ReturnType": "Task"
//!       }
//!     ]
//!   }
//! ]
//! ```
//!
//! Type-tokens are mapped to [`TypeRef`]s while loading, so the rest of the
//! pipeline never parses them again.

use crate::error::SchemaError;
use crate::namespace::Namespace;
use crate::typeref::{TypeRef, map_type};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// One composite type or operation shape declared by the schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaObject {
    pub name: String,
    pub namespace: Namespace,
    /// Base type, if any
    pub extends: Option<TypeRef>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub doc: String,
}

/// A field of a schema object
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Wire name, as written in the schema
    pub name: String,
    pub ty: TypeRef,
    pub doc: String,
}

/// A method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

/// A method exposed by a schema object
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: String,
    pub params: Vec<Param>,
    /// `None` when the method returns nothing
    pub returns: Option<TypeRef>,
    pub doc: String,
}

/// The loaded schema, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    objects: Vec<SchemaObject>,
}

impl Schema {
    /// Read and parse a schema file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let schema = Self::parse(&content, path)?;
        tracing::debug!(
            path = %path.display(),
            objects = schema.len(),
            "Loaded schema"
        );
        Ok(schema)
    }

    /// Parse a schema from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Self::parse(json, Path::new("<memory>"))
    }

    /// Build a schema from already-constructed objects
    pub fn from_objects(objects: Vec<SchemaObject>) -> Self {
        Self { objects }
    }

    fn parse(content: &str, path: &Path) -> Result<Self, SchemaError> {
        let raw: Vec<RawObject> =
            serde_json::from_str(content).map_err(|source| SchemaError::Parse {
                path: PathBuf::from(path),
                source,
            })?;

        let objects = raw
            .into_iter()
            .map(RawObject::into_object)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { objects })
    }

    /// All objects, in schema order
    pub fn objects(&self) -> &[SchemaObject] {
        &self.objects
    }

    /// Objects of one namespace, in schema order
    pub fn in_namespace(&self, namespace: Namespace) -> impl Iterator<Item = &SchemaObject> {
        self.objects
            .iter()
            .filter(move |obj| obj.namespace == namespace)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawObject {
    name: String,
    namespace: Namespace,
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    fields: Option<Vec<RawField>>,
    #[serde(default)]
    methods: Option<Vec<RawMethod>>,
    #[serde(default)]
    doc: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawField {
    name: String,
    #[serde(rename = "Type")]
    ty: String,
    #[serde(default)]
    doc: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMethod {
    name: String,
    #[serde(default)]
    parameters: Option<Vec<RawField>>,
    #[serde(default)]
    return_type: Option<String>,
    #[serde(default)]
    doc: Option<String>,
}

impl RawObject {
    fn into_object(self) -> Result<SchemaObject, SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::InvalidObject {
                name: self.name,
                reason: "object name is empty".to_string(),
            });
        }

        let owner = self.name;
        let fields = self
            .fields
            .unwrap_or_default()
            .into_iter()
            .map(|f| {
                let ty = required_type(&owner, &f.name, &f.ty)?;
                Ok(Field {
                    name: f.name,
                    ty,
                    doc: f.doc.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        let methods = self
            .methods
            .unwrap_or_default()
            .into_iter()
            .map(|m| {
                let params = m
                    .parameters
                    .unwrap_or_default()
                    .into_iter()
                    .map(|p| {
                        let ty = required_type(&owner, &format!("{}.{}", m.name, p.name), &p.ty)?;
                        Ok(Param { name: p.name, ty })
                    })
                    .collect::<Result<Vec<_>, SchemaError>>()?;

                Ok(Method {
                    returns: m.return_type.as_deref().and_then(map_type),
                    name: m.name,
                    params,
                    doc: m.doc.unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        Ok(SchemaObject {
            extends: self.extends.as_deref().and_then(map_type),
            name: owner,
            namespace: self.namespace,
            fields,
            methods,
            doc: self.doc.unwrap_or_default(),
        })
    }
}

fn required_type(owner: &str, member: &str, token: &str) -> Result<TypeRef, SchemaError> {
    map_type(token).ok_or_else(|| SchemaError::InvalidObject {
        name: owner.to_string(),
        reason: format!("member '{member}' has no type"),
    })
}
