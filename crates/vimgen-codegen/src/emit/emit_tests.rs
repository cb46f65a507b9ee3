#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

const SCHEMA: &str = r#"[
    {
        "Name": "VirtualMachine",
        "Namespace": "mo",
        "Extends": "ManagedEntity",
        "Doc": "A virtual machine.",
        "Fields": [
            {"Name": "name", "Type": "xsd:string", "Doc": "Display name."},
            {"Name": "host", "Type": "HostSystem"},
            {"Name": "type", "Type": "xsd:int"},
            {"Name": "disks", "Type": "VirtualDisk[]"}
        ],
        "Methods": [
            {
                "Name": "PowerOnVM_Task",
                "Parameters": [{"Name": "host", "Type": "HostSystem"}],
                "ReturnType": "Task"
            },
            {"Name": "ResetVM", "Parameters": null, "ReturnType": ""}
        ]
    },
    {"Name": "ManagedEntity", "Namespace": "mo", "Fields": [{"Name": "parent", "Type": "ManagedEntity"}]},
    {"Name": "HostSystem", "Namespace": "do", "Fields": [{"Name": "tags", "Type": "xsd:string[]"}]},
    {"Name": "VirtualDisk", "Namespace": "do", "Fields": [{"Name": "capacityInKB", "Type": "xsd:long"}]},
    {"Name": "VirtualMachinePowerState", "Namespace": "enum", "Fields": [
        {"Name": "poweredOn", "Type": "xsd:string"},
        {"Name": "vmx-07", "Type": "xsd:string"}
    ]},
    {"Name": "InvalidState", "Namespace": "fault", "Extends": "MethodFault", "Fields": [
        {"Name": "host", "Type": "HostSystem"}
    ]},
    {"Name": "MethodFault", "Namespace": "do"}
]"#;

struct Fixture {
    schema: Schema,
    index: NamespaceIndex,
    table: NamespaceTable,
}

impl Fixture {
    fn new(json: &str) -> Self {
        let schema = Schema::from_json(json).unwrap();
        let index = NamespaceIndex::build(schema.objects());
        Self {
            schema,
            index,
            table: NamespaceTable::standard(),
        }
    }

    fn emitter(&self) -> Emitter<'_> {
        Emitter::new(&self.schema, &self.index, &self.table)
    }

    fn emit(&self, ns: Namespace) -> String {
        self.emitter().emit(ns).unwrap()
    }
}

fn assert_parses(source: &str) {
    if let Err(e) = syn::parse_file(source) {
        panic!("generated source does not parse: {e}\n{source}");
    }
}

// identifier tests

#[test_case("name", "Name")]
#[test_case("type", "Type_")]
#[test_case("self", "Self_")]
#[test_case("Self", "Self_")]
#[test_case("capacityInKB", "CapacityInKB")]
fn field_ident___applies_case_and_escaping(input: &str, expected: &str) {
    assert_eq!(field_ident(input), expected);
}

#[test_case("PowerOnVM_Task", "powerOnVM_Task")]
#[test_case("Type", "type_")]
#[test_case("Self", "self_")]
#[test_case("host", "host")]
fn method_ident___lowercases_and_escapes(input: &str, expected: &str) {
    assert_eq!(method_ident(input), expected);
}

#[test_case("poweredOn", "PoweredOn")]
#[test_case("vmx-07", "Vmx_07")]
#[test_case("64bit", "_64bit")]
#[test_case("self", "Self_")]
fn variant_ident___sanitizes_then_capitalizes(input: &str, expected: &str) {
    assert_eq!(variant_ident(input), expected);
}

#[test]
fn type_ident___escapes_keywords_only() {
    assert_eq!(type_ident("HostSystem"), "HostSystem");
    assert_eq!(type_ident("Self"), "Self_");
}

// Emitter::emit tests

#[test]
fn Emitter___emit___every_namespace___parses() {
    let fixture = Fixture::new(SCHEMA);

    for ns in Namespace::ALL {
        assert_parses(&fixture.emit(ns));
    }
}

#[test]
fn Emitter___emit___mo___qualifies_references_into_do() {
    let out = Fixture::new(SCHEMA).emit(Namespace::Mo);

    assert!(out.contains("pub struct VirtualMachine {"));
    assert!(out.contains("pub Name: String,"));
    assert!(out.contains("pub Host: Option<Box<do_::HostSystem>>,"));
    assert!(out.contains("pub Disks: Vec<do_::VirtualDisk>,"));
    assert!(out.contains("pub Type_: i32,"));
    assert!(out.contains("use super::do_;"));
}

#[test]
fn Emitter___emit___same_namespace_reference___stays_bare() {
    let out = Fixture::new(SCHEMA).emit(Namespace::Mo);

    assert!(out.contains("pub base: ManagedEntity,"));
    assert!(out.contains("pub Parent: Option<Box<ManagedEntity>>,"));
}

#[test]
fn Emitter___emit___mo___declares_methods_trait() {
    let out = Fixture::new(SCHEMA).emit(Namespace::Mo);

    assert!(out.contains("pub trait VirtualMachineMethods {"));
    assert!(out.contains(
        "fn powerOnVM_Task(&self, host: Option<Box<do_::HostSystem>>) -> Result<Option<Box<Task>>, Self::Error>;"
    ));
    assert!(out.contains("fn resetVM(&self) -> Result<(), Self::Error>;"));
    assert!(!out.contains("pub trait ManagedEntityMethods"));
}

#[test]
fn Emitter___emit___keeps_wire_names_and_docs() {
    let out = Fixture::new(SCHEMA).emit(Namespace::Mo);

    assert!(out.contains("/// A virtual machine.\n#[derive("));
    assert!(out.contains("#[serde(rename = \"VirtualMachine\")]"));
    assert!(out.contains("/// Display name.\n    #[serde(rename = \"name\", default)]"));
    assert!(out.contains("#[serde(rename = \"type\", default)]"));
}

#[test]
fn Emitter___emit___enum___renders_unit_variants() {
    let out = Fixture::new(SCHEMA).emit(Namespace::Enum);

    assert!(out.contains("pub enum VirtualMachinePowerState {"));
    assert!(out.contains("#[serde(rename = \"poweredOn\")]\n    PoweredOn,"));
    assert!(out.contains("#[serde(rename = \"vmx-07\")]\n    Vmx_07,"));
    assert!(!out.contains("use super::"));
}

#[test]
fn Emitter___emit___fault___implements_error() {
    let out = Fixture::new(SCHEMA).emit(Namespace::Fault);

    assert!(out.contains("pub struct InvalidState {"));
    assert!(out.contains("pub base: do_::MethodFault,"));
    assert!(out.contains("impl std::error::Error for InvalidState {}"));
    assert!(out.contains("f.write_str(\"InvalidState\")"));
}

#[test]
fn Emitter___emit___do___has_no_cross_namespace_imports() {
    let out = Fixture::new(SCHEMA).emit(Namespace::Do);

    assert!(out.contains("pub Tags: Vec<String>,"));
    assert!(out.contains("pub CapacityInKB: i64,"));
    assert!(out.contains("use serde::{Deserialize, Serialize};"));
    assert!(!out.contains("use super::"));
}

#[test]
fn Emitter___emit___preserves_schema_order() {
    let out = Fixture::new(SCHEMA).emit(Namespace::Do);

    let host = out.find("pub struct HostSystem").unwrap();
    let disk = out.find("pub struct VirtualDisk").unwrap();
    let fault = out.find("pub struct MethodFault").unwrap();
    assert!(host < disk && disk < fault);
}

#[test]
fn Emitter___emit___empty_namespace___header_only() {
    let fixture = Fixture::new("[]");

    for ns in Namespace::ALL {
        let out = fixture.emit(ns);

        assert!(out.starts_with("// Code generated by vimgen. DO NOT EDIT.\n"));
        assert!(!out.contains("pub struct"));
        assert_parses(&out);
    }
}

#[test]
fn Emitter___emit___header_names_namespace() {
    let out = Fixture::new("[]").emit(Namespace::Fault);

    assert!(out.contains("//! `fault`: Faults reported by API operations."));
    assert!(out.contains("// This Source Code Form is subject to the terms of the Mozilla Public"));
}

#[test]
fn Emitter___with_banner___replaces_license_lines() {
    let fixture = Fixture::new("[]");

    let out = fixture
        .emitter()
        .with_banner("Copyright Example\n\nAll rights reserved.")
        .emit(Namespace::Do)
        .unwrap();

    assert!(out.contains("// Copyright Example\n//\n// All rights reserved.\n"));
    assert!(!out.contains("Mozilla"));
}

#[test]
fn Emitter___emit___undeclared_dependency___routes_through_super() {
    let fixture = Fixture::new(
        r#"[
            {"Name": "Folder", "Namespace": "mo"},
            {"Name": "NotFound", "Namespace": "fault", "Fields": [{"Name": "parent", "Type": "Folder"}]}
        ]"#,
    );

    let out = fixture.emit(Namespace::Fault);

    assert!(out.contains("pub Parent: Option<Box<super::mo::Folder>>,"));
    assert_parses(&out);
}

#[test]
fn Emitter___emit___malformed_type___still_renders_raw_text() {
    let fixture = Fixture::new(
        r#"[{"Name": "Broken", "Namespace": "do", "Fields": [{"Name": "x", "Type": "Broken{"}]}]"#,
    );

    let out = fixture.emit(Namespace::Do);

    assert!(out.contains("pub X: Option<Box<Broken{>>,"));
    assert!(syn::parse_file(&out).is_err());
}

#[test]
fn Emitter___emit___fault_with_date_field___imports_chrono() {
    let fixture = Fixture::new(
        r#"[{"Name": "ExpiredFeatureLicense", "Namespace": "fault", "Fields": [
            {"Name": "feature", "Type": "xsd:string"},
            {"Name": "expirationDate", "Type": "xsd:dateTime"}
        ]}]"#,
    );

    let out = fixture.emit(Namespace::Fault);

    assert!(out.contains("use chrono::{DateTime, Utc};"));
    assert!(out.contains("pub ExpirationDate: DateTime<Utc>,"));
    assert_parses(&out);
}

#[test]
fn Emitter___emit___enum_value_of_underscores___gets_placeholder_variant() {
    let fixture = Fixture::new(
        r#"[{"Name": "HostDisplayMode", "Namespace": "enum", "Fields": [
            {"Name": "_", "Type": "xsd:string"},
            {"Name": "", "Type": "xsd:string"},
            {"Name": "normal", "Type": "xsd:string"}
        ]}]"#,
    );

    let out = fixture.emit(Namespace::Enum);

    assert!(out.contains("#[serde(rename = \"_\")]\n    _Empty,"));
    assert!(out.contains("#[serde(rename = \"\")]\n    Empty,"));
    assert!(out.contains("    Normal,"));
    assert_parses(&out);
}

#[test]
fn Emitter___emit___enum_values_sanitizing_alike___get_distinct_variants() {
    let fixture = Fixture::new(
        r#"[{"Name": "DiskMode", "Namespace": "enum", "Fields": [
            {"Name": "thin-provisioned", "Type": "xsd:string"},
            {"Name": "thin_provisioned", "Type": "xsd:string"}
        ]}]"#,
    );

    let out = fixture.emit(Namespace::Enum);

    assert!(out.contains("#[serde(rename = \"thin-provisioned\")]\n    Thin_provisioned,"));
    assert!(out.contains("#[serde(rename = \"thin_provisioned\")]\n    Thin_provisioned_,"));
    assert_parses(&out);
}

#[test]
fn Emitter___emit___fields_differing_in_case___get_distinct_idents() {
    let fixture = Fixture::new(
        r#"[{"Name": "OptionValue", "Namespace": "do", "Fields": [
            {"Name": "key", "Type": "xsd:string"},
            {"Name": "Key", "Type": "xsd:int"},
            {"Name": "KEY", "Type": "xsd:int"}
        ]}]"#,
    );

    let out = fixture.emit(Namespace::Do);

    assert!(out.contains("#[serde(rename = \"key\", default)]\n    pub Key: String,"));
    assert!(out.contains("#[serde(rename = \"Key\", default)]\n    pub Key_: i32,"));
    assert!(out.contains("pub KEY: i32,"));
    assert_parses(&out);
}

#[test]
fn Emitter___emit___reserved_and_suffixed_fields___stay_distinct() {
    let fixture = Fixture::new(
        r#"[{"Name": "Tagged", "Namespace": "do", "Fields": [
            {"Name": "type", "Type": "xsd:string"},
            {"Name": "Type_", "Type": "xsd:string"}
        ]}]"#,
    );

    let out = fixture.emit(Namespace::Do);

    assert!(out.contains("pub Type_: String,"));
    assert!(out.contains("pub Type__: String,"));
    assert_parses(&out);
}

#[test]
fn Emitter___emit___methods_and_params_differing_in_case___get_distinct_idents() {
    let fixture = Fixture::new(
        r#"[{"Name": "Alarm", "Namespace": "mo", "Methods": [
            {"Name": "Reset", "Parameters": [
                {"Name": "force", "Type": "xsd:boolean"},
                {"Name": "Force", "Type": "xsd:int"}
            ]},
            {"Name": "reset"}
        ]}]"#,
    );

    let out = fixture.emit(Namespace::Mo);

    assert!(out.contains("fn reset(&self, force: bool, force_: i32) -> Result<(), Self::Error>;"));
    assert!(out.contains("fn reset_(&self) -> Result<(), Self::Error>;"));
    assert_parses(&out);
}

// Emitter::emit_root_module tests

#[test]
fn Emitter___emit_root_module___declares_every_namespace() {
    let fixture = Fixture::new("[]");

    let out = fixture.emitter().emit_root_module().unwrap();

    assert!(out.contains("#[path = \"mo/mo.rs\"]\npub mod mo;"));
    assert!(out.contains("#[path = \"do/do.rs\"]\npub mod do_;"));
    assert!(out.contains("#[path = \"enum/enum.rs\"]\npub mod enum_;"));
    assert!(out.contains("#[path = \"fault/fault.rs\"]\npub mod fault;"));
    assert_parses(&out);
}

// Emitter::undeclared_references tests

#[test]
fn Emitter___undeclared_references___standard_layout___is_empty() {
    let fixture = Fixture::new(SCHEMA);

    assert!(fixture.emitter().undeclared_references().is_empty());
}

#[test]
fn Emitter___undeclared_references___reports_each_offending_use() {
    let fixture = Fixture::new(
        r#"[
            {"Name": "Folder", "Namespace": "mo"},
            {"Name": "PowerState", "Namespace": "enum"},
            {"Name": "Item", "Namespace": "do", "Fields": [
                {"Name": "folder", "Type": "Folder"},
                {"Name": "state", "Type": "PowerState[]"}
            ]}
        ]"#,
    );

    let found = fixture.emitter().undeclared_references();

    assert_eq!(
        found,
        vec![
            UndeclaredReference {
                object: "Item".into(),
                from: Namespace::Do,
                to: Namespace::Mo,
                type_name: "Folder".into(),
            },
            UndeclaredReference {
                object: "Item".into(),
                from: Namespace::Do,
                to: Namespace::Enum,
                type_name: "PowerState".into(),
            },
        ]
    );
}

#[test]
fn emit_namespace___matches_default_emitter() {
    let fixture = Fixture::new(SCHEMA);

    let out = emit_namespace(Namespace::Do, &fixture.schema, &fixture.index, &fixture.table).unwrap();

    assert_eq!(out, fixture.emit(Namespace::Do));
}
