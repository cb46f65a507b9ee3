//! Embedded template sources
//!
//! One header shared by every namespace, one body template per namespace,
//! and the root module that ties the namespaces together.

use vimgen_core::Namespace;

pub const HEADER: &str = include_str!("../templates/header.rs.tmpl");
pub const ROOT_MODULE: &str = include_str!("../templates/root.rs.tmpl");

const MO: &str = include_str!("../templates/mo.rs.tmpl");
const DO: &str = include_str!("../templates/do.rs.tmpl");
const ENUM: &str = include_str!("../templates/enum.rs.tmpl");
const FAULT: &str = include_str!("../templates/fault.rs.tmpl");

/// Body template rendered once per object of `namespace`
pub fn for_namespace(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::Mo => MO,
        Namespace::Do => DO,
        Namespace::Enum => ENUM,
        Namespace::Fault => FAULT,
    }
}
