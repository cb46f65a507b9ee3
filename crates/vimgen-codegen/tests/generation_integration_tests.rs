//! Integration tests for end-to-end generation.
//!
//! Each test writes a schema file, runs the full pipeline into a temporary
//! output root and inspects the files on disk.

#![allow(non_snake_case)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vimgen_codegen::{CodegenError, OutputStatus, Pipeline};
use vimgen_core::{FailurePolicy, GeneratorConfig, Namespace};

const VM_SCHEMA: &str = r#"[
    {
        "Name": "VirtualMachine",
        "Namespace": "mo",
        "Fields": [
            {"Name": "name", "Type": "xsd:string"},
            {"Name": "host", "Type": "HostSystem"}
        ]
    },
    {"Name": "HostSystem", "Namespace": "do"}
]"#;

/// Helper to write a schema file and load it.
fn load(dir: &TempDir, json: &str) -> Pipeline {
    let path = dir.path().join("vim.json");
    fs::write(&path, json).unwrap();
    Pipeline::load(&path).unwrap()
}

fn output_root(dir: &TempDir) -> PathBuf {
    dir.path().join("vim")
}

fn read(root: &Path, ns: Namespace) -> String {
    fs::read_to_string(root.join(ns.tag()).join(ns.file_name())).unwrap()
}

// =============================================================================
// Successful generation
// =============================================================================

mod generation {
    use super::*;

    #[test]
    fn generate___vm_and_host___cross_namespace_reference_is_qualified() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, VM_SCHEMA);
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        pipeline.generator(&config).run().unwrap();

        let mo = read(&output_root(&dir), Namespace::Mo);
        assert!(mo.contains("pub struct VirtualMachine {"));
        assert!(mo.contains("pub Name: String,"));
        assert!(mo.contains("pub Host: Option<Box<do_::HostSystem>>,"));
        assert!(mo.contains("use super::do_;"));

        let do_ = read(&output_root(&dir), Namespace::Do);
        assert!(do_.contains("pub struct HostSystem"));
        assert!(!do_.contains("do_::"));
    }

    #[test]
    fn generate___reserved_field_name___is_escaped() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(
            &dir,
            r#"[{"Name": "Description", "Namespace": "do", "Fields": [{"Name": "type", "Type": "xsd:string"}]}]"#,
        );
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        pipeline.generator(&config).run().unwrap();

        let do_ = read(&output_root(&dir), Namespace::Do);
        assert!(do_.contains("pub Type_: String,"));
        assert!(do_.contains("#[serde(rename = \"type\", default)]"));
    }

    #[test]
    fn generate___empty_schema___writes_four_valid_files() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, "[]");
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        let report = pipeline.generator(&config).run().unwrap();

        for ns in Namespace::ALL {
            let source = read(&output_root(&dir), ns);
            assert!(syn::parse_file(&source).is_ok(), "{ns} does not parse");
            assert!(source.starts_with("// Code generated by vimgen. DO NOT EDIT."));
            assert_eq!(report.get(ns).unwrap().objects, 0);
        }
    }

    #[test]
    fn generate___output_is_formatted_and_parses() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, VM_SCHEMA);
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        pipeline.generator(&config).run().unwrap();

        let mo = read(&output_root(&dir), Namespace::Mo);
        let reformatted = vimgen_codegen::format_source(&mo).unwrap();
        assert_eq!(mo, reformatted);
    }

    #[test]
    fn generate___root_module___declares_escaped_modules() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, VM_SCHEMA);
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        pipeline.generator(&config).run().unwrap();

        let root = fs::read_to_string(output_root(&dir).join("mod.rs")).unwrap();
        assert!(root.contains("pub mod mo;"));
        assert!(root.contains("pub mod do_;"));
        assert!(root.contains("pub mod enum_;"));
        assert!(root.contains("pub mod fault;"));
        assert!(syn::parse_file(&root).is_ok());
    }

    #[test]
    fn generate___rerun___produces_identical_output() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, VM_SCHEMA);
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        pipeline.generator(&config).run().unwrap();
        let first = read(&output_root(&dir), Namespace::Mo);
        pipeline.generator(&config).run().unwrap();
        let second = read(&output_root(&dir), Namespace::Mo);

        assert_eq!(first, second);
    }
}

// =============================================================================
// Failure handling
// =============================================================================

mod failures {
    use super::*;

    const BROKEN_DO: &str = r#"[
        {"Name": "VirtualMachine", "Namespace": "mo"},
        {"Name": "Broken", "Namespace": "do", "Fields": [{"Name": "x", "Type": "Broken{"}]},
        {"Name": "PowerState", "Namespace": "enum", "Fields": [{"Name": "on", "Type": "xsd:string"}]}
    ]"#;

    #[test]
    fn generate___malformed_output___raw_buffer_kept_and_namespace_named() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, BROKEN_DO);
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        let err = pipeline.generator(&config).run().unwrap_err();

        assert_eq!(err.namespace(), Some(Namespace::Do));
        assert!(err.to_string().contains("namespace 'do'"));
        let raw = read(&output_root(&dir), Namespace::Do);
        assert!(raw.contains("Option<Box<Broken{>>"));
    }

    #[test]
    fn generate___collect___sibling_namespaces_still_written() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, BROKEN_DO);
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        let _ = pipeline.generator(&config).run();

        assert!(read(&output_root(&dir), Namespace::Mo).contains("pub struct VirtualMachine"));
        assert!(read(&output_root(&dir), Namespace::Enum).contains("pub enum PowerState"));
        assert!(syn::parse_file(&read(&output_root(&dir), Namespace::Fault)).is_ok());
    }

    #[test]
    fn generate___fail_fast___returns_format_error() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, BROKEN_DO);
        let config = GeneratorConfig::new()
            .with_output_root(output_root(&dir))
            .with_failure_policy(FailurePolicy::FailFast);

        let err = pipeline.generator(&config).run().unwrap_err();

        assert!(matches!(
            err,
            CodegenError::Format {
                namespace: Namespace::Do,
                ..
            }
        ));
    }

    #[test]
    fn generate___unknown_namespace_tag___fails_before_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vim.json");
        fs::write(&path, r#"[{"Name": "X", "Namespace": "nope"}]"#).unwrap();

        let result = Pipeline::load(&path);

        assert!(result.is_err());
        assert!(!output_root(&dir).exists());
    }
}

// =============================================================================
// Reports
// =============================================================================

mod reports {
    use super::*;

    #[test]
    fn report___counts_objects_per_namespace() {
        let dir = TempDir::new().unwrap();
        let pipeline = load(&dir, VM_SCHEMA);
        let config = GeneratorConfig::new().with_output_root(output_root(&dir));

        let report = pipeline.generator(&config).run().unwrap();

        assert_eq!(report.get(Namespace::Mo).unwrap().objects, 1);
        assert_eq!(report.get(Namespace::Do).unwrap().objects, 1);
        assert_eq!(report.get(Namespace::Enum).unwrap().objects, 0);
        assert!(
            report
                .namespaces
                .iter()
                .all(|r| r.status == OutputStatus::Written)
        );
    }
}
