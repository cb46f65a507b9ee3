//! Template emitter: renders one namespace of the schema to Rust source
//!
//! The output of [`Emitter::emit`] is unformatted; it goes through
//! [`crate::format`] before it reaches disk.

use crate::template::{Context, Template, TemplateError};
use crate::templates;
use std::collections::HashSet;
use vimgen_core::naming::{
    RESERVED_SUFFIX, Visibility, doc_comment, escape_reserved, sanitize_identifier,
    with_visibility,
};
use vimgen_core::{
    DEFAULT_LICENSE_BANNER, Namespace, NamespaceIndex, NamespaceTable, ResolvedType, Schema,
    SchemaObject, TypeRef,
};

/// Identifier of a generated type
pub fn type_ident(name: &str) -> String {
    escape_reserved(name)
}

/// Identifier of a struct field: public case, escaped before and after
/// the case change so `type` becomes `Type_`
pub fn field_ident(name: &str) -> String {
    escape_reserved(&with_visibility(&escape_reserved(name), Visibility::Public))
}

/// Identifier of a trait method or parameter
pub fn method_ident(name: &str) -> String {
    escape_reserved(&with_visibility(name, Visibility::Private))
}

/// Identifier of an enum variant for a wire value such as `vmx-07`
pub fn variant_ident(value: &str) -> String {
    escape_reserved(&with_visibility(&sanitize_identifier(value), Visibility::Public))
}

/// A reference from one namespace into another that the dependency table
/// does not allow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeclaredReference {
    pub object: String,
    pub from: Namespace,
    pub to: Namespace,
    pub type_name: String,
}

/// Renders schema objects through the embedded templates
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    schema: &'a Schema,
    index: &'a NamespaceIndex,
    table: &'a NamespaceTable,
    banner: &'a str,
}

impl<'a> Emitter<'a> {
    pub fn new(schema: &'a Schema, index: &'a NamespaceIndex, table: &'a NamespaceTable) -> Self {
        Self {
            schema,
            index,
            table,
            banner: DEFAULT_LICENSE_BANNER,
        }
    }

    /// Replace the license notice written below the generated-code marker
    pub fn with_banner(mut self, banner: &'a str) -> Self {
        self.banner = banner;
        self
    }

    /// Render the header and every object of `namespace`, in schema order
    ///
    /// A namespace without objects yields the header alone, which is still a
    /// valid source file.
    pub fn emit(&self, namespace: Namespace) -> Result<String, TemplateError> {
        let header = Template::parse("header", templates::HEADER)?;
        let body = Template::parse(namespace.tag(), templates::for_namespace(namespace))?;

        let mut out = header.render(&self.header_context(namespace))?;
        let mut count = 0usize;
        for object in self.schema.in_namespace(namespace) {
            out.push('\n');
            body.render_into(&self.object_context(object, namespace), &mut out)?;
            count += 1;
        }

        tracing::debug!(namespace = %namespace, objects = count, bytes = out.len(), "Rendered namespace");
        Ok(out)
    }

    /// Render the root module declaring every namespace module
    pub fn emit_root_module(&self) -> Result<String, TemplateError> {
        let template = Template::parse("root", templates::ROOT_MODULE)?;

        let modules = Namespace::ALL
            .iter()
            .map(|ns| {
                Context::new()
                    .text("tag", ns.tag())
                    .text("file", ns.file_name())
                    .text("ident", ns.module_ident())
                    .text("description", self.description(*ns))
            })
            .collect();

        template.render(
            &Context::new()
                .list("banner", banner_lines(self.banner))
                .list("modules", modules),
        )
    }

    /// Every type reference that leaves its namespace without a declared
    /// dependency, in schema order
    pub fn undeclared_references(&self) -> Vec<UndeclaredReference> {
        let mut found = Vec::new();

        for object in self.schema.objects() {
            let types = object
                .extends
                .iter()
                .chain(object.fields.iter().map(|f| &f.ty))
                .chain(object.methods.iter().flat_map(|m| {
                    m.params.iter().map(|p| &p.ty).chain(m.returns.iter())
                }));

            for ty in types {
                let Some(to) = self.index.resolve(ty, object.namespace).qualifier() else {
                    continue;
                };
                if !self.table.depends_on(object.namespace, to) {
                    found.push(UndeclaredReference {
                        object: object.name.clone(),
                        from: object.namespace,
                        to,
                        type_name: ty.reference_name().unwrap_or_default().to_string(),
                    });
                }
            }
        }

        found
    }

    fn description(&self, namespace: Namespace) -> &'static str {
        self.table
            .spec(namespace)
            .map(|spec| spec.description)
            .unwrap_or_default()
    }

    fn header_context(&self, namespace: Namespace) -> Context {
        let imports = self
            .table
            .imports(namespace)
            .into_iter()
            .map(|path| Context::new().text("path", path))
            .collect();

        Context::new()
            .list("banner", banner_lines(self.banner))
            .text("namespace", namespace.tag())
            .text("description", self.description(namespace))
            .list("imports", imports)
    }

    fn object_context(&self, object: &SchemaObject, namespace: Namespace) -> Context {
        let base = object
            .extends
            .iter()
            .map(|ty| Context::new().text("path", self.type_path(ty, namespace, object)))
            .collect();

        let mut field_idents = IdentScope::new(object, "field");
        let mut variant_idents = IdentScope::new(object, "variant");
        let fields = object
            .fields
            .iter()
            .map(|field| {
                // only one of the two identifiers is declared, depending on the namespace
                let (ident, variant) = if namespace == Namespace::Enum {
                    (field_ident(&field.name), variant_idents.claim(variant_ident(&field.name), &field.name))
                } else {
                    (field_idents.claim(field_ident(&field.name), &field.name), variant_ident(&field.name))
                };

                Context::new()
                    .text("ident", ident)
                    .text("variant", variant)
                    .text("wire_name", wire_name(&field.name))
                    .text("ty", self.render_type(&field.ty, namespace, object))
                    .text("doc", doc_comment(&field.doc))
            })
            .collect();

        let mut method_idents = IdentScope::new(object, "method");
        let methods = object
            .methods
            .iter()
            .map(|method| {
                let mut param_idents = IdentScope::new(object, "parameter");
                let params = method
                    .params
                    .iter()
                    .map(|param| {
                        Context::new()
                            .text("ident", param_idents.claim(method_ident(&param.name), &param.name))
                            .text("wire_name", wire_name(&param.name))
                            .text("ty", self.render_type(&param.ty, namespace, object))
                    })
                    .collect();
                let ret = method.returns.as_ref().map_or_else(
                    || "()".to_string(),
                    |ty| self.render_type(ty, namespace, object),
                );

                Context::new()
                    .text("ident", method_idents.claim(method_ident(&method.name), &method.name))
                    .text("wire_name", wire_name(&method.name))
                    .text("doc", doc_comment(&method.doc))
                    .list("params", params)
                    .text("ret", ret)
            })
            .collect();

        Context::new()
            .text("name", type_ident(&object.name))
            .text("wire_name", wire_name(&object.name))
            .text("doc", doc_comment(&object.doc))
            .list("base", base)
            .list("fields", fields)
            .list("methods", methods)
            .flag("has_methods", !object.methods.is_empty())
    }

    /// Full Rust type for a field, parameter or return value
    fn render_type(&self, ty: &TypeRef, namespace: Namespace, object: &SchemaObject) -> String {
        let resolved = self.index.resolve(ty, namespace);
        match self.undeclared_module(&resolved, namespace, object) {
            Some(module) => ty.render(Some(&module)),
            None => resolved.render(),
        }
    }

    /// Undecorated path for a base type
    fn type_path(&self, ty: &TypeRef, namespace: Namespace, object: &SchemaObject) -> String {
        let resolved = self.index.resolve(ty, namespace);
        match self.undeclared_module(&resolved, namespace, object) {
            Some(module) => ty.path(Some(&module)),
            None => resolved.path(),
        }
    }

    /// Module path for a reference outside the declared dependencies
    ///
    /// Such references have no `use` in the header, so they go through
    /// `super::` to stay resolvable.
    fn undeclared_module(
        &self,
        resolved: &ResolvedType<'_>,
        namespace: Namespace,
        object: &SchemaObject,
    ) -> Option<String> {
        let target = resolved.qualifier()?;
        if self.table.depends_on(namespace, target) {
            return None;
        }

        tracing::warn!(
            namespace = %namespace,
            object = %object.name,
            target = %target,
            ty = %resolved.ty(),
            "Reference to a namespace outside the declared dependencies"
        );
        Some(format!("super::{}", target.module_ident()))
    }
}

/// Identifiers already taken within one declaration
///
/// Wire names that differ only in the case of their first letter map to the
/// same identifier; later ones get the reserved suffix until they are unique.
struct IdentScope<'o> {
    object: &'o SchemaObject,
    kind: &'static str,
    used: HashSet<String>,
}

impl<'o> IdentScope<'o> {
    fn new(object: &'o SchemaObject, kind: &'static str) -> Self {
        Self {
            object,
            kind,
            used: HashSet::new(),
        }
    }

    fn claim(&mut self, ident: String, wire: &str) -> String {
        let mut unique = ident.clone();
        while !self.used.insert(unique.clone()) {
            unique.push_str(RESERVED_SUFFIX);
        }

        if unique != ident {
            tracing::warn!(
                object = %self.object.name,
                kind = self.kind,
                wire_name = wire,
                ident = %unique,
                "Identifier collides with an earlier one, renamed"
            );
        }
        unique
    }
}

/// Render `namespace` with the default license banner
pub fn emit_namespace(
    namespace: Namespace,
    schema: &Schema,
    index: &NamespaceIndex,
    table: &NamespaceTable,
) -> Result<String, TemplateError> {
    Emitter::new(schema, index, table).emit(namespace)
}

/// Schema names end up inside string literals
fn wire_name(name: &str) -> String {
    name.escape_default().to_string()
}

fn banner_lines(banner: &str) -> Vec<Context> {
    banner
        .lines()
        .map(|line| {
            let line = line.trim_end();
            let comment = if line.is_empty() {
                "//".to_string()
            } else {
                format!("// {line}")
            };
            Context::new().text("line", comment)
        })
        .collect()
}

#[cfg(test)]
#[path = "emit/emit_tests.rs"]
mod emit_tests;
