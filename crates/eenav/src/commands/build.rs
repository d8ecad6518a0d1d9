//! Build command - delegates image builds to ansible-builder.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, ValueEnum};

use eenav_engine::{build_image, resolve_engine, BuildRequest, EngineChoice};

use super::Context;

/// Arguments for the build command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Execution environment YAML file
    #[arg(short = 'e', long, default_value = "execution-environment.yml")]
    pub ee_file: PathBuf,

    /// Image tag to build
    #[arg(short = 't', long, default_value = "localhost/custom-ee:latest")]
    pub tag: String,

    /// Container engine to use
    #[arg(long, value_enum, default_value_t = EngineArg::Auto)]
    pub engine: EngineArg,

    /// Build timeout in seconds
    #[arg(long, default_value_t = 600)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    Auto,
    Podman,
    Docker,
}

impl From<EngineArg> for EngineChoice {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Auto => EngineChoice::Auto,
            EngineArg::Podman => EngineChoice::Podman,
            EngineArg::Docker => EngineChoice::Docker,
        }
    }
}

/// Run the build command.
pub async fn run(args: BuildArgs, ctx: &Context) -> Result<()> {
    if !args.ee_file.exists() {
        anyhow::bail!(
            "execution environment file not found: {}",
            args.ee_file.display()
        );
    }

    let engine = resolve_engine(args.engine.into()).await?;
    println!("Building {} with {}", args.tag, engine.name());

    let request = BuildRequest {
        ee_file: args.ee_file,
        tag: args.tag.clone(),
        engine,
        verbose: ctx.verbose,
        timeout: Duration::from_secs(args.timeout),
    };

    build_image(&request).await?;
    println!("Built: {}", args.tag);

    Ok(())
}
