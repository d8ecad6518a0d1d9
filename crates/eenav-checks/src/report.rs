//! Check result and report model.
//!
//! Every check is an independent predicate producing pass/fail plus a
//! message; suites never short-circuit. The report aggregates suites into an
//! overall rollup rendered as text or JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a single check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    /// Human-readable check name.
    pub name: String,
    /// Whether the check passed.
    pub passed: bool,
    /// Detail line: what was verified, or what is wrong.
    pub message: String,
}

impl CheckResult {
    /// A passing result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: message.into(),
        }
    }

    /// A failing result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
        }
    }
}

/// All results from one suite.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    /// Suite identifier (structure, release, workflows, compat).
    pub suite: String,
    /// Check outcomes in execution order.
    pub results: Vec<CheckResult>,
}

impl SuiteReport {
    pub fn new(suite: impl Into<String>, results: Vec<CheckResult>) -> Self {
        Self {
            suite: suite.into(),
            results,
        }
    }

    /// Number of passing checks.
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Total number of checks.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Whether every check in the suite passed.
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

/// Aggregated battery report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// When the battery ran.
    pub generated_at: DateTime<Utc>,
    /// Per-suite results.
    pub suites: Vec<SuiteReport>,
}

impl Report {
    pub fn new(suites: Vec<SuiteReport>) -> Self {
        Self {
            generated_at: Utc::now(),
            suites,
        }
    }

    /// Number of passing checks across all suites.
    pub fn passed(&self) -> usize {
        self.suites.iter().map(SuiteReport::passed).sum()
    }

    /// Total number of checks across all suites.
    pub fn total(&self) -> usize {
        self.suites.iter().map(SuiteReport::total).sum()
    }

    /// Whether the whole battery passed.
    pub fn all_passed(&self) -> bool {
        self.suites.iter().all(SuiteReport::all_passed)
    }

    /// Failing results across all suites, for the summary tail.
    pub fn failures(&self) -> Vec<&CheckResult> {
        self.suites
            .iter()
            .flat_map(|s| s.results.iter().filter(|r| !r.passed))
            .collect()
    }

    /// Plain-text rendering: one line per check, per-suite headers, rollup.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for suite in &self.suites {
            out.push_str(&format!("=== {} ===\n", suite.suite));
            for result in &suite.results {
                let icon = if result.passed { "✓" } else { "✗" };
                out.push_str(&format!("{icon} {}: {}\n", result.name, result.message));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "Results: {}/{} checks passed\n",
            self.passed(),
            self.total()
        ));

        if !self.all_passed() {
            out.push_str("\nFailed checks:\n");
            for failure in self.failures() {
                out.push_str(&format!("  ✗ {}: {}\n", failure.name, failure.message));
            }
        }

        out
    }

    /// JSON rendering for scripting.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
