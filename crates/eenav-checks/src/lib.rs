//! Check battery for eenav.
//!
//! A fixed battery of independent pass/fail checks over an EE project tree,
//! grouped into suites:
//! - `structure` — scaffold sanity (directories, descriptor, Makefile)
//! - `release` — release readiness (files, docs, secret hygiene)
//! - `workflows` — GitHub Actions key-presence inspection
//! - `compat` — external tool availability probes
//!
//! Checks never depend on each other and a failing check never aborts the
//! battery; the [`Report`] rollup decides the exit status.

use std::path::Path;

pub mod compat;
pub mod release;
pub mod report;
pub mod structure;
mod util;
pub mod workflows;

pub use report::{CheckResult, Report, SuiteReport};

/// The selectable suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suite {
    Structure,
    Release,
    Workflows,
    Compat,
}

impl Suite {
    /// Every suite, in battery order.
    pub const ALL: [Suite; 4] = [
        Suite::Structure,
        Suite::Release,
        Suite::Workflows,
        Suite::Compat,
    ];
}

/// Run the given suites against `root` and aggregate a report.
pub async fn run_suites(root: &Path, suites: &[Suite]) -> Report {
    let mut reports = Vec::with_capacity(suites.len());

    for suite in suites {
        tracing::debug!(?suite, root = %root.display(), "running check suite");
        let report = match suite {
            Suite::Structure => structure::run(root),
            Suite::Release => release::run(root),
            Suite::Workflows => workflows::run(root),
            Suite::Compat => compat::run().await,
        };
        reports.push(report);
    }

    Report::new(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_selected_suites_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let report = run_suites(dir.path(), &[Suite::Structure, Suite::Release]).await;
        assert_eq!(report.suites.len(), 2);
        assert_eq!(report.suites[0].suite, "structure");
        assert_eq!(report.suites[1].suite, "release");
        // An empty project fails both filesystem suites.
        assert!(!report.all_passed());
    }

    #[tokio::test]
    async fn test_all_covers_every_suite() {
        let dir = tempfile::tempdir().unwrap();
        let report = run_suites(dir.path(), &Suite::ALL).await;
        assert_eq!(report.suites.len(), 4);
        assert_eq!(report.suites[3].suite, "compat");
    }
}
