//! vimgen CLI - Rust bindings generator for the vSphere API schema
//!
//! Commands:
//! - `vimgen generate` - Generate the `mo`, `do`, `enum` and `fault` modules
//! - `vimgen check` - Validate a schema file without writing anything

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vimgen_logging::LogLevel;

mod check;
mod generate;
mod settings;

#[derive(Parser)]
#[command(name = "vimgen")]
#[command(author, version, about = "Generate Rust bindings from a vSphere API schema", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the namespace modules from a schema file
    Generate(generate::GenerateArgs),

    /// Load and index a schema file and report cross-namespace references
    Check {
        /// Path to the JSON schema
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let verbosity = settings::verbosity_level(cli.verbose);

    vimgen_logging::init_logging(verbosity.unwrap_or(LogLevel::Info));

    match cli.command {
        Commands::Generate(args) => {
            generate::run(&args, verbosity)?;
        }
        Commands::Check { schema } => {
            check::run(&schema)?;
        }
    }

    Ok(())
}
