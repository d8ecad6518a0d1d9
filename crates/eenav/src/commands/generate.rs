//! Generate command - EE descriptor to navigator config translation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use eenav_config::{create_sample_files, ExecutionEnvironment, GenerateOptions, NavigatorConfig};

use super::Context;

/// Arguments for the generate command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Execution environment YAML file
    #[arg(short = 'e', long, default_value = "execution-environment.yml")]
    pub ee_file: PathBuf,

    /// Output ansible-navigator.yml file
    #[arg(short = 'o', long, default_value = "ansible-navigator.yml")]
    pub output: PathBuf,

    /// Override the container image name
    #[arg(short = 'i', long)]
    pub image: Option<String>,

    /// Create sample inventory.yml and site.yml files
    #[arg(long)]
    pub create_samples: bool,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

/// Run the generate command.
pub async fn run(args: GenerateArgs, ctx: &Context) -> Result<()> {
    let project_root = std::env::current_dir()?;

    if ctx.verbose {
        println!("Loading EE configuration from: {}", args.ee_file.display());
    }

    let ee = ExecutionEnvironment::load(&args.ee_file)?;
    tracing::debug!(base_image = %ee.base_image(), "loaded EE descriptor");

    let opts = GenerateOptions {
        image_override: args.image.clone(),
        project_root: project_root.clone(),
    };
    let config = NavigatorConfig::from_ee(&ee, &opts);

    config.save(&args.output, args.force)?;
    println!("Generated: {}", args.output.display());

    if args.create_samples {
        for path in create_sample_files(&project_root)? {
            println!("Created sample {}", path.display());
        }
    }

    if ctx.verbose {
        println!("\nGenerated configuration:\n");
        println!("{}", config.to_yaml()?);

        let image = args.image.unwrap_or_else(|| ee.base_image());
        println!("Usage:");
        println!("  ansible-navigator run site.yml -i inventory.yml --eei {image}");
    }

    Ok(())
}
