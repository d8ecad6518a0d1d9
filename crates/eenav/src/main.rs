//! eenav - execution environment navigator tooling.
//!
//! Main entry point for the eenav CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{build, check, doctor, generate};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// eenav - generate ansible-navigator configuration and validate EE projects
#[derive(Parser)]
#[command(name = "eenav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate ansible-navigator.yml from an execution-environment descriptor
    Generate(generate::GenerateArgs),

    /// Run the validation check battery against a project
    Check(check::CheckArgs),

    /// Show container engine and tool availability
    Doctor(doctor::DoctorArgs),

    /// Build an execution environment image via ansible-builder
    Build(build::BuildArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "eenav=debug,eenav_config=debug,eenav_checks=debug,eenav_engine=debug,info"
    } else {
        "eenav=info,eenav_config=info,eenav_checks=info,eenav_engine=info,warn"
    };

    let file_appender = tracing_appender::rolling::daily(eenav_config::log_dir(), "eenav.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "eenav=debug,eenav_config=debug,eenav_checks=debug,eenav_engine=debug,info",
                )),
        )
        .init();

    // Create context for commands
    let ctx = commands::Context {
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Generate(args) => generate::run(args, &ctx).await,
        Commands::Check(args) => check::run(args, &ctx).await,
        Commands::Doctor(args) => doctor::run(args, &ctx).await,
        Commands::Build(args) => build::run(args, &ctx).await,
    }
}
