//! Compat suite — external tool availability.
//!
//! Each check shells out with a `--version` probe and reports the version
//! line. The heavyweight integration paths (actually building an image,
//! running a playbook through navigator) live behind `eenav build`, not here.

use eenav_engine::probe_tool;

use crate::report::{CheckResult, SuiteReport};

/// Run the compat suite. Probes run sequentially; each failure stands alone.
pub async fn run() -> SuiteReport {
    SuiteReport::new(
        "compat",
        vec![
            probe("Podman Compatibility", "podman").await,
            probe("Docker Compatibility", "docker").await,
            probe("Ansible Compatibility", "ansible").await,
            probe("Ansible Builder", "ansible-builder").await,
            probe("Ansible Navigator", "ansible-navigator").await,
        ],
    )
}

async fn probe(check_name: &str, binary: &str) -> CheckResult {
    let result = probe_tool(binary).await;
    match result.version {
        Some(version) => CheckResult::pass(check_name, version),
        None => CheckResult::fail(check_name, format!("{binary} not available")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suite_has_five_probes() {
        let report = run().await;
        assert_eq!(report.total(), 5);
        assert_eq!(report.suite, "compat");
    }

    #[tokio::test]
    async fn test_missing_binary_reports_unavailable() {
        let result = probe("Ghost Tool", "definitely-not-installed-xyz").await;
        assert!(!result.passed);
        assert!(result.message.contains("not available"));
    }
}
