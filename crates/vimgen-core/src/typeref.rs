//! Type references and the primitive type mapper.
//!
//! Schema type-tokens such as `xsd:string`, `HostSystem[]` or `*ManagedObjectReference`
//! are resolved once, when the schema is loaded, into a [`TypeRef`]. Templates never
//! look at the raw token again.
//!
//! # Type Mappings
//!
//! | XSD | Rust |
//! |-----|------|
//! | `string`, `token` | `String` |
//! | `int`, `integer` | `i32` |
//! | `long` | `i64` |
//! | `boolean` | `bool` |
//! | `dateTime` | `DateTime<Utc>` |
//! | `base64Binary` | `Vec<u8>` |
//! | `anyType` | `String` |
//! | `int[]` | `Vec<i32>` |
//! | `HostSystem` | `Option<Box<HostSystem>>` |
//! | `HostSystem[]` | `Vec<HostSystem>` |

use std::fmt;

/// Marker for an array type-token.
const ARRAY_SUFFIX: &str = "[]";

/// Marker for an explicit reference type-token.
const REFERENCE_PREFIX: char = '*';

/// XSD local name to native Rust type.
const PRIMITIVE_TYPES: &[(&str, &str)] = &[
    ("string", "String"),
    ("token", "String"),
    ("float", "f32"),
    ("double", "f64"),
    ("decimal", "f64"),
    ("integer", "i32"),
    ("int", "i32"),
    ("short", "i16"),
    ("byte", "i8"),
    ("long", "i64"),
    ("boolean", "bool"),
    ("dateTime", "DateTime<Utc>"),
    ("date", "DateTime<Utc>"),
    ("time", "DateTime<Utc>"),
    ("base64Binary", "Vec<u8>"),
    ("hexBinary", "Vec<u8>"),
    ("unsignedInt", "u32"),
    ("unsignedShort", "u16"),
    ("unsignedByte", "u8"),
    ("unsignedLong", "u64"),
    // Raw XML text of the element.
    ("anyType", "String"),
];

/// What a type reference points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A native Rust type from the primitive table, stored verbatim.
    Primitive(&'static str),

    /// A composite schema type, held by indirection.
    Reference(String),
}

/// Whether a type reference is a single value or a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    Scalar,
    Sequence,
}

/// A resolved type-token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub kind: TypeKind,
    pub cardinality: Cardinality,
}

impl TypeRef {
    /// A scalar native type.
    pub fn primitive(native: &'static str) -> Self {
        Self {
            kind: TypeKind::Primitive(native),
            cardinality: Cardinality::Scalar,
        }
    }

    /// A scalar reference to a composite type.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Reference(name.into()),
            cardinality: Cardinality::Scalar,
        }
    }

    /// The same element type, as a sequence.
    pub fn into_sequence(self) -> Self {
        Self {
            cardinality: Cardinality::Sequence,
            ..self
        }
    }

    pub fn is_sequence(&self) -> bool {
        self.cardinality == Cardinality::Sequence
    }

    /// Bare composite name, if this is a reference.
    pub fn reference_name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Reference(name) => Some(name),
            TypeKind::Primitive(_) => None,
        }
    }

    /// Element type path, without any decoration.
    pub fn path(&self, module: Option<&str>) -> String {
        match &self.kind {
            TypeKind::Primitive(native) => (*native).to_string(),
            TypeKind::Reference(name) => match module {
                Some(module) => format!("{module}::{name}"),
                None => name.clone(),
            },
        }
    }

    /// Render as Rust, optionally qualifying a composite name with a module path.
    ///
    /// Scalar references are boxed and optional, sequences use `Vec`.
    pub fn render(&self, module: Option<&str>) -> String {
        let element = self.path(module);

        match (&self.kind, self.cardinality) {
            (_, Cardinality::Sequence) => format!("Vec<{element}>"),
            (TypeKind::Primitive(_), Cardinality::Scalar) => element,
            (TypeKind::Reference(_), Cardinality::Scalar) => format!("Option<Box<{element}>>"),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

/// Look up an XSD local name in the primitive table.
pub fn primitive_type(local: &str) -> Option<&'static str> {
    PRIMITIVE_TYPES
        .iter()
        .find(|(xsd, _)| *xsd == local)
        .map(|(_, native)| *native)
}

/// Strip a `prefix:` namespace qualifier.
fn strip_namespace(token: &str) -> &str {
    token.rsplit_once(':').map_or(token, |(_, local)| local)
}

/// Map a schema type-token to a [`TypeRef`].
///
/// Returns `None` for an empty token, which is how an absent `Extends` or
/// return type is spelled in the schema.
///
/// # Examples
///
/// ```
/// use vimgen_core::{TypeRef, map_type};
///
/// assert_eq!(map_type("xsd:int"), Some(TypeRef::primitive("i32")));
/// assert_eq!(map_type("int"), map_type("xsd:int"));
/// assert_eq!(map_type("HostSystem[]"), Some(TypeRef::reference("HostSystem").into_sequence()));
/// assert_eq!(map_type(""), None);
/// ```
pub fn map_type(token: &str) -> Option<TypeRef> {
    let token = token.trim();
    let token = token.strip_prefix(REFERENCE_PREFIX).unwrap_or(token);
    let local = strip_namespace(token);

    if local.is_empty() {
        return None;
    }

    if let Some(native) = primitive_type(local) {
        return Some(TypeRef::primitive(native));
    }

    if let Some(base) = local.strip_suffix(ARRAY_SUFFIX) {
        return map_type(base).map(TypeRef::into_sequence);
    }

    Some(TypeRef::reference(local))
}
