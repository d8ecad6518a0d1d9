//! Workflows suite — GitHub Actions inspection.
//!
//! All checks operate at dictionary-key level: they assert that expected keys
//! and references exist, not that the workflow semantics are correct.

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::report::{CheckResult, SuiteReport};
use crate::util::{file_name, has_trigger_key, parse_yaml_file, trigger_block, yaml_files_in};

const BUILD_WORKFLOW: &str = ".github/workflows/build-ee.yml";
const ACTION_FILE: &str = ".github/actions/build-push/action.yml";

/// Secrets the build pipeline is expected to reference.
const EXPECTED_SECRETS: [&str; 3] = [
    "REDHAT_REGISTRY_USERNAME",
    "REDHAT_REGISTRY_PASSWORD",
    "ANSIBLE_GALAXY_SERVER_AUTOMATION_HUB_TOKEN",
];

/// Registries the build matrix fans out over.
const EXPECTED_REGISTRIES: [&str; 4] = ["docker", "ecr", "acr", "gcr"];

/// Run the workflows suite against a project root.
pub fn run(root: &Path) -> SuiteReport {
    SuiteReport::new(
        "workflows",
        vec![
            check_workflow_syntax(root),
            check_build_workflow(root),
            check_custom_action(root),
            check_secrets_usage(root),
            check_matrix_strategy(root),
            check_conditional_logic(root),
            check_security_practices(root),
        ],
    )
}

fn check_workflow_syntax(root: &Path) -> CheckResult {
    let workflows_dir = root.join(".github/workflows");
    if !workflows_dir.exists() {
        return CheckResult::fail("Workflow Syntax", "workflow directory not found");
    }

    let workflow_files = yaml_files_in(&workflows_dir);
    if workflow_files.is_empty() {
        return CheckResult::fail("Workflow Syntax", "no workflow files found");
    }

    let mut invalid = Vec::new();
    let mut valid = Vec::new();

    for path in &workflow_files {
        let name = file_name(path);
        match parse_yaml_file(path) {
            Ok(doc) if !doc.is_mapping() => invalid.push(format!("{name}: not a mapping")),
            Ok(doc) => {
                let mut missing = Vec::new();
                if doc.get("name").is_none() {
                    missing.push("name");
                }
                if !has_trigger_key(&doc) {
                    missing.push("on");
                }
                if doc.get("jobs").is_none() {
                    missing.push("jobs");
                }
                if missing.is_empty() {
                    valid.push(name);
                } else {
                    invalid.push(format!("{name}: missing {missing:?}"));
                }
            }
            Err(e) => invalid.push(format!("{name}: {e}")),
        }
    }

    if invalid.is_empty() {
        CheckResult::pass("Workflow Syntax", format!("valid: {valid:?}"))
    } else {
        CheckResult::fail("Workflow Syntax", format!("invalid: {invalid:?}"))
    }
}

fn check_build_workflow(root: &Path) -> CheckResult {
    let path = root.join(BUILD_WORKFLOW);
    if !path.exists() {
        return CheckResult::fail("Build Workflow", "build-ee.yml not found");
    }

    let doc = match parse_yaml_file(&path) {
        Ok(doc) => doc,
        Err(e) => return CheckResult::fail("Build Workflow", e),
    };

    let mut issues = Vec::new();

    match trigger_block(&doc) {
        None => issues.push("missing 'on' triggers".to_string()),
        Some(triggers) => {
            let missing: Vec<&str> = ["workflow_dispatch", "push", "pull_request"]
                .iter()
                .filter(|t| !has_entry(triggers, t))
                .copied()
                .collect();
            if !missing.is_empty() {
                issues.push(format!("missing triggers: {missing:?}"));
            }
        }
    }

    match doc.get("jobs").and_then(|j| j.get("build")) {
        None => issues.push("missing 'build' job".to_string()),
        Some(build_job) => {
            if build_job.get("runs-on").is_none() {
                issues.push("build job missing 'runs-on'".to_string());
            }
            match build_job.get("steps").and_then(Value::as_sequence) {
                None => issues.push("build job missing 'steps'".to_string()),
                Some(steps) => {
                    let step_names: Vec<String> = steps
                        .iter()
                        .filter_map(|s| s.get("name").and_then(Value::as_str))
                        .map(str::to_lowercase)
                        .collect();
                    for essential in ["checkout", "dependencies"] {
                        if !step_names.iter().any(|n| n.contains(essential)) {
                            issues.push(format!("missing essential step containing '{essential}'"));
                        }
                    }
                }
            }
        }
    }

    if let Some(env) = doc.get("env") {
        if env.get("IMAGE_NAME").is_none() {
            issues.push("missing IMAGE_NAME environment variable".to_string());
        }
    }

    if issues.is_empty() {
        CheckResult::pass("Build Workflow", "well-structured workflow")
    } else {
        CheckResult::fail("Build Workflow", format!("issues: {issues:?}"))
    }
}

fn check_custom_action(root: &Path) -> CheckResult {
    let path = root.join(ACTION_FILE);
    if !path.exists() {
        return CheckResult::fail("Custom Action", "action.yml not found");
    }

    let doc = match parse_yaml_file(&path) {
        Ok(doc) => doc,
        Err(e) => return CheckResult::fail("Custom Action", e),
    };

    let mut issues = Vec::new();

    let missing_props: Vec<&str> = ["name", "description", "inputs", "runs"]
        .iter()
        .filter(|prop| doc.get(**prop).is_none())
        .copied()
        .collect();
    if !missing_props.is_empty() {
        issues.push(format!("missing properties: {missing_props:?}"));
    }

    if let Some(inputs) = doc.get("inputs") {
        let missing_inputs: Vec<&str> = ["image_tag", "registry_type"]
            .iter()
            .filter(|input| inputs.get(**input).is_none())
            .copied()
            .collect();
        if !missing_inputs.is_empty() {
            issues.push(format!("missing inputs: {missing_inputs:?}"));
        }
    }

    if let Some(runs) = doc.get("runs") {
        match runs.get("using").and_then(Value::as_str) {
            None => issues.push("missing 'using' in runs section".to_string()),
            Some("composite") => {}
            Some(_) => issues.push("action should use 'composite' runner".to_string()),
        }
        if runs.get("steps").is_none() {
            issues.push("missing 'steps' in runs section".to_string());
        }
    }

    if issues.is_empty() {
        CheckResult::pass("Custom Action", "well-structured action")
    } else {
        CheckResult::fail("Custom Action", format!("issues: {issues:?}"))
    }
}

fn check_secrets_usage(root: &Path) -> CheckResult {
    let workflow_files = [
        root.join(BUILD_WORKFLOW),
        root.join(".github/workflows/check-base-images.yml"),
    ];

    let mut issues = Vec::new();
    let mut found = Vec::new();

    for path in &workflow_files {
        if !path.exists() {
            continue;
        }
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                issues.push(format!("error reading {}: {e}", file_name(path)));
                continue;
            }
        };

        for secret in EXPECTED_SECRETS {
            if content.contains(&format!("secrets.{secret}")) && !found.contains(&secret) {
                found.push(secret);
            }
        }

        // Lines assigning credential-looking values outside the secrets
        // context read as hardcoded.
        for (lineno, line) in content.lines().enumerate() {
            let lower = line.to_lowercase();
            let looks_sensitive = ["password:", "token:", "secret:", "key:"]
                .iter()
                .any(|p| lower.contains(p));
            if looks_sensitive
                && lower.contains('=')
                && !lower.contains("secrets.")
                && !line.trim_start().starts_with('#')
            {
                issues.push(format!(
                    "potential hardcoded credential in {}:{}",
                    file_name(path),
                    lineno + 1
                ));
            }
        }
    }

    let missing: Vec<&str> = EXPECTED_SECRETS
        .iter()
        .filter(|s| !found.contains(s))
        .copied()
        .collect();
    if !missing.is_empty() {
        issues.push(format!("missing secret references: {missing:?}"));
    }

    if issues.is_empty() {
        CheckResult::pass("Secrets Usage", format!("found secrets: {found:?}"))
    } else {
        CheckResult::fail("Secrets Usage", format!("issues: {issues:?}"))
    }
}

fn check_matrix_strategy(root: &Path) -> CheckResult {
    let path = root.join(BUILD_WORKFLOW);
    if !path.exists() {
        return CheckResult::fail("Matrix Strategy", "build-ee.yml not found");
    }

    let doc = match parse_yaml_file(&path) {
        Ok(doc) => doc,
        Err(e) => return CheckResult::fail("Matrix Strategy", e),
    };

    let Some(build_job) = doc.get("jobs").and_then(|j| j.get("build")) else {
        return CheckResult::fail("Matrix Strategy", "build job not found");
    };

    let Some(matrix) = build_job.get("strategy").and_then(|s| s.get("matrix")) else {
        return CheckResult::fail("Matrix Strategy", "missing strategy.matrix");
    };

    let Some(registries) = matrix.get("registry") else {
        return CheckResult::fail("Matrix Strategy", "missing registry matrix");
    };

    let missing: Vec<&str> = EXPECTED_REGISTRIES
        .iter()
        .filter(|r| !has_entry(registries, r))
        .copied()
        .collect();

    if missing.is_empty() {
        CheckResult::pass("Matrix Strategy", "registry matrix configured")
    } else {
        CheckResult::fail("Matrix Strategy", format!("missing registries: {missing:?}"))
    }
}

fn check_conditional_logic(root: &Path) -> CheckResult {
    let path = root.join(BUILD_WORKFLOW);
    if !path.exists() {
        return CheckResult::fail("Conditional Logic", "build-ee.yml not found");
    }

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => return CheckResult::fail("Conditional Logic", format!("cannot read: {e}")),
    };

    let patterns = [
        "if:",
        "github.event_name",
        "startsWith(github.ref",
        "matrix.enabled",
    ];
    let found: Vec<&str> = patterns
        .iter()
        .filter(|p| content.contains(**p))
        .copied()
        .collect();

    let mut issues = Vec::new();
    if found.len() < 2 {
        issues.push(format!("limited conditional logic found: {found:?}"));
    }
    if !content.contains("startsWith(github.ref") {
        issues.push("missing tag-based conditional logic".to_string());
    }

    if issues.is_empty() {
        CheckResult::pass("Conditional Logic", format!("conditionals found: {found:?}"))
    } else {
        CheckResult::fail("Conditional Logic", format!("issues: {issues:?}"))
    }
}

fn check_security_practices(root: &Path) -> CheckResult {
    let workflows_dir = root.join(".github/workflows");
    if !workflows_dir.exists() {
        return CheckResult::fail("Security Practices", "workflow directory not found");
    }

    let mut issues = Vec::new();
    let mut good_practices = 0usize;

    for path in yaml_files_in(&workflows_dir) {
        let name = file_name(&path);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                issues.push(format!("error checking {name}: {e}"));
                continue;
            }
        };

        if content.contains("uses:") {
            if content.contains('@') {
                good_practices += 1;
            } else {
                issues.push(format!("{name}: actions not pinned to versions"));
            }
        }

        if content.to_lowercase().contains("password") && !content.contains("secrets.") {
            issues.push(format!("{name}: potential insecure password usage"));
        }

        if let Ok(doc) = parse_yaml_file(&path) {
            if doc.get("permissions").is_some() {
                good_practices += 1;
            }
        }

        if content.contains("timeout-minutes") || content.contains("timeout") {
            good_practices += 1;
        }
    }

    if issues.is_empty() {
        CheckResult::pass(
            "Security Practices",
            format!("good practices: {good_practices}"),
        )
    } else {
        CheckResult::fail("Security Practices", format!("issues: {issues:?}"))
    }
}

/// Membership test covering both trigger/matrix shapes: mapping keys and
/// sequences of strings.
fn has_entry(value: &Value, entry: &str) -> bool {
    match value {
        Value::Mapping(_) => value.get(entry).is_some(),
        Value::Sequence(seq) => seq.iter().any(|v| v.as_str() == Some(entry)),
        Value::String(s) => s == entry,
        _ => false,
    }
}
