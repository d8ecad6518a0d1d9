//! Check command - runs the validation battery.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use console::style;

use eenav_checks::{run_suites, Suite};

use super::Context;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Which suite to run
    #[arg(long, value_enum, default_value_t = SuiteArg::All)]
    pub suite: SuiteArg,

    /// Project root to check
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SuiteArg {
    Structure,
    Release,
    Workflows,
    Compat,
    All,
}

impl SuiteArg {
    fn suites(self) -> Vec<Suite> {
        match self {
            SuiteArg::Structure => vec![Suite::Structure],
            SuiteArg::Release => vec![Suite::Release],
            SuiteArg::Workflows => vec![Suite::Workflows],
            SuiteArg::Compat => vec![Suite::Compat],
            SuiteArg::All => Suite::ALL.to_vec(),
        }
    }
}

/// Run the check command.
pub async fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    let report = run_suites(&args.root, &args.suite.suites()).await;

    if ctx.json_output {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.render_text());

        let summary = if report.all_passed() {
            style("All checks passed.").green().to_string()
        } else {
            style(format!(
                "{} check(s) failed.",
                report.total() - report.passed()
            ))
            .red()
            .to_string()
        };
        println!("\n{summary}");
    }

    if !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
