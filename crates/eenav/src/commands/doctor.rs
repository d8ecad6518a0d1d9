//! Doctor command - engine and tool availability summary.

use anyhow::Result;
use clap::Args;
use console::style;
use serde_json::json;

use eenav_engine::{probe_tool, EngineStatus};

use super::Context;

/// Tools probed beyond the container engines.
const TOOLS: [&str; 3] = ["ansible", "ansible-builder", "ansible-navigator"];

/// Arguments for the doctor command.
#[derive(Args, Debug)]
pub struct DoctorArgs {}

/// Run the doctor command.
pub async fn run(_args: DoctorArgs, ctx: &Context) -> Result<()> {
    let engine_status = EngineStatus::detect().await;

    let mut probes = Vec::new();
    for tool in TOOLS {
        probes.push(probe_tool(tool).await);
    }

    if ctx.json_output {
        let engine = match &engine_status {
            EngineStatus::Available { engine, version } => json!({
                "available": true,
                "engine": engine.binary(),
                "version": version,
            }),
            EngineStatus::Missing { probed, .. } => json!({
                "available": false,
                "probed": probed,
            }),
        };
        let output = json!({
            "container_engine": engine,
            "tools": probes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("# eenav doctor\n");

    println!("Container engine:");
    match &engine_status {
        EngineStatus::Available { engine, version } => {
            println!("  {} {} ({version})", style("✓").green(), engine.name());
        }
        EngineStatus::Missing { install_hint, .. } => {
            println!("  {} none found", style("✗").red());
            println!("\n{install_hint}");
        }
    }
    println!();

    println!("Tools:");
    for probe in &probes {
        match &probe.version {
            Some(version) => {
                println!("  {} {:<18} {version}", style("✓").green(), probe.name);
            }
            None => {
                println!("  {} {:<18} not found", style("✗").red(), probe.name);
            }
        }
    }

    Ok(())
}
