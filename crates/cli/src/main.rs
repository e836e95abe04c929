//! Orgscope CLI - Command-line interface for the visibility engine
//!
//! Usage:
//!   orgscope check --role <role> --matricule <m> --target-id <id> --target-type <t>
//!   orgscope search --role <role> --matricule <m> --ministere <name>
//!   orgscope relate --matricule <m> --unit <id> --rang <n>
//!   orgscope override --entity-id <id> --entity-type <t> --level <l> --by <who>
//!
//! The hierarchy and organization snapshot are JSON files passed via
//! --hierarchy and --org (default: hierarchy.json / org.json).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{CheckCommand, EngineContext, OverrideCommand, RelateCommand, SearchCommand};

#[derive(Parser)]
#[command(name = "orgscope")]
#[command(about = "Orgscope - Hierarchical visibility resolution for organization graphs")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Role hierarchy configuration file
    #[arg(long, global = true, default_value = "hierarchy.json")]
    hierarchy: PathBuf,

    /// Organization snapshot file
    #[arg(long, global = true, default_value = "org.json")]
    org: PathBuf,

    /// Print the audit trail as JSON after the command
    #[arg(long, global = true)]
    show_audit: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether an actor can see a target entity
    Check(CheckCommand),
    /// List the units of a ministry visible to an actor
    Search(SearchCommand),
    /// Create or update a BELONGS_TO edge
    Relate(RelateCommand),
    /// Persist a visibility override for an entity
    Override(OverrideCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut ctx = EngineContext::load(&cli.hierarchy, &cli.org)?;

    match &cli.command {
        Commands::Check(cmd) => cmd.run(&mut ctx)?,
        Commands::Search(cmd) => cmd.run(&mut ctx)?,
        Commands::Relate(cmd) => cmd.run(&mut ctx)?,
        Commands::Override(cmd) => cmd.run(&mut ctx)?,
    }

    if cli.show_audit {
        println!(
            "{}",
            serde_json::to_string_pretty(&ctx.audit.export_json())?
        );
    }

    Ok(())
}
