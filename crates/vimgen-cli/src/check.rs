//! Check command implementation

use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;
use vimgen_codegen::{Emitter, Pipeline};
use vimgen_core::{Namespace, NamespaceTable};

/// Check command implementation
pub fn run(schema_path: &Path) -> Result<()> {
    println!("Checking schema: {}", schema_path.display());

    let pipeline = Pipeline::load(schema_path)
        .with_context(|| format!("Failed to load schema: {}", schema_path.display()))?;
    let table = NamespaceTable::standard();
    table.validate()?;

    print!("{}", summarize(&pipeline, &table));
    Ok(())
}

fn summarize(pipeline: &Pipeline, table: &NamespaceTable) -> String {
    let mut out = String::new();

    for ns in Namespace::ALL {
        let count = pipeline.schema().in_namespace(ns).count();
        let _ = writeln!(out, "✓ {ns}: {count} objects");
    }

    let undeclared = Emitter::new(pipeline.schema(), pipeline.index(), table).undeclared_references();
    if undeclared.is_empty() {
        let _ = writeln!(out, "\nSchema is valid!");
    } else {
        let _ = writeln!(
            out,
            "\n{} references outside the namespace dependencies:",
            undeclared.len()
        );
        for reference in &undeclared {
            let _ = writeln!(
                out,
                "  {}.{} -> {}::{}",
                reference.from, reference.object, reference.to, reference.type_name
            );
        }
    }

    out
}
