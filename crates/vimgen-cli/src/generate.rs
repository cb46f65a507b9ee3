//! Generate command implementation

use crate::settings::{apply_log_level, load_config};
use anyhow::{Context, Result};
use clap::Args;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use vimgen_codegen::{GenerationReport, Generator, OutputStatus, Pipeline};
use vimgen_core::{FailurePolicy, GeneratorConfig, Namespace};
use vimgen_logging::LogLevel;

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Path to the JSON schema
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Output root (default: ./vim, or output_root from the config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a vimgen.toml (default: ./vimgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop at the first failing namespace
    #[arg(long)]
    pub fail_fast: bool,

    /// Do not write <output>/mod.rs
    #[arg(long)]
    pub no_root_module: bool,

    /// Print the generated sources instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Command-line flags override configuration file values
    pub fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(output) = &self.output {
            config.output_root = output.clone();
        }
        if self.fail_fast {
            config.failure_policy = FailurePolicy::FailFast;
        }
        if self.no_root_module {
            config.emit_root_module = false;
        }
        config
    }
}

/// Run the generate command
pub fn run(args: &GenerateArgs, verbosity: Option<LogLevel>) -> Result<()> {
    let config = load_config(args.config.as_deref(), Path::new("."))?;
    apply_log_level(&config, verbosity)?;
    let config = args.apply(config);

    let pipeline = Pipeline::load(&args.schema)
        .with_context(|| format!("Failed to load schema: {}", args.schema.display()))?;
    let generator = pipeline.generator(&config);

    if args.dry_run {
        print!("{}", render_preview(&generator, &config)?);
        return Ok(());
    }

    let report = generator.run()?;
    print!("{}", format_report(&report));

    Ok(())
}

/// Every file that would be written, each under a path banner
fn render_preview(generator: &Generator<'_>, config: &GeneratorConfig) -> Result<String> {
    let mut out = String::new();

    if config.emit_root_module {
        let source = generator.preview_root_module()?;
        let _ = writeln!(out, "// ==> {} <==\n{source}", generator.root_module_path().display());
    }
    for ns in Namespace::ALL {
        let source = generator.preview(ns)?;
        let _ = writeln!(out, "// ==> {} <==\n{source}", config.output_file(ns).display());
    }

    Ok(out)
}

fn format_report(report: &GenerationReport) -> String {
    let mut out = String::new();

    for entry in &report.namespaces {
        let mark = match entry.status {
            OutputStatus::Written => "✓",
            OutputStatus::Skipped => "-",
            OutputStatus::Failed => "✗",
        };
        let _ = writeln!(
            out,
            "{mark} {}: {} objects -> {}",
            entry.namespace,
            entry.objects,
            entry.path.display()
        );
    }
    if let Some(root) = &report.root_module {
        let _ = writeln!(out, "✓ root module -> {}", root.display());
    }
    let _ = writeln!(out, "\nGenerated {} objects.", report.objects());

    out
}
