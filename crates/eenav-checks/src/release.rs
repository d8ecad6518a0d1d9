//! Release suite — release readiness checks.

use std::fs;
use std::path::Path;

use crate::report::{CheckResult, SuiteReport};
use crate::util::{file_name, parse_yaml_file, walk_files};

/// Files a releasable EE project carries at its root.
const REQUIRED_FILES: [&str; 5] = [
    "execution-environment.yml",
    "ansible.cfg",
    "Makefile",
    ".env.example",
    ".gitignore",
];

/// Known YAML documents; absent entries are skipped, present ones must parse.
const KNOWN_YAML_FILES: [&str; 9] = [
    "execution-environment.yml",
    "ansible-navigator.yml",
    ".github/workflows/build-ee.yml",
    ".github/workflows/check-base-images.yml",
    ".github/actions/build-push/action.yml",
    "examples/execution-environment.yml",
    "examples/ansible-navigator.yml",
    "examples/inventory.yml",
    "examples/site.yml",
];

/// Topics the README has to cover.
const README_TOPICS: [&str; 4] = ["setup", "install", "build", "usage"];

/// Patterns that suggest a committed credential.
const SENSITIVE_PATTERNS: [&str; 5] = ["password", "token", "secret", "key", "credential"];

/// Run the release suite against a project root.
pub fn run(root: &Path) -> SuiteReport {
    SuiteReport::new(
        "release",
        vec![
            check_required_files(root),
            check_yaml_validity(root),
            check_readme(root),
            check_example_ee(root),
            check_secret_exposure(root),
            check_env_file_permissions(root),
        ],
    )
}

fn check_required_files(root: &Path) -> CheckResult {
    let missing: Vec<&str> = REQUIRED_FILES
        .iter()
        .filter(|f| !root.join(f).exists())
        .copied()
        .collect();

    if missing.is_empty() {
        CheckResult::pass("Required Files", "all files present")
    } else {
        CheckResult::fail("Required Files", format!("missing: {missing:?}"))
    }
}

fn check_yaml_validity(root: &Path) -> CheckResult {
    let invalid: Vec<&str> = KNOWN_YAML_FILES
        .iter()
        .filter(|f| {
            let path = root.join(f);
            path.exists() && parse_yaml_file(&path).is_err()
        })
        .copied()
        .collect();

    if invalid.is_empty() {
        CheckResult::pass("YAML Validity", "all YAML files valid")
    } else {
        CheckResult::fail("YAML Validity", format!("invalid: {invalid:?}"))
    }
}

fn check_readme(root: &Path) -> CheckResult {
    let path = root.join("README.md");
    if !path.exists() {
        return CheckResult::fail("README Documentation", "README.md missing");
    }

    let content = match fs::read_to_string(&path) {
        Ok(c) => c.to_lowercase(),
        Err(e) => return CheckResult::fail("README Documentation", format!("cannot read: {e}")),
    };

    let missing: Vec<&str> = README_TOPICS
        .iter()
        .filter(|topic| !content.contains(**topic))
        .copied()
        .collect();

    if missing.is_empty() {
        CheckResult::pass("README Documentation", "covers required topics")
    } else {
        CheckResult::fail(
            "README Documentation",
            format!("missing topics: {missing:?}"),
        )
    }
}

fn check_example_ee(root: &Path) -> CheckResult {
    let path = root.join("examples/execution-environment.yml");
    if !path.exists() {
        return CheckResult::fail("Example EE", "examples/execution-environment.yml missing");
    }

    let doc = match parse_yaml_file(&path) {
        Ok(doc) => doc,
        Err(e) => return CheckResult::fail("Example EE", e),
    };

    let missing: Vec<&str> = ["version", "images", "dependencies"]
        .iter()
        .filter(|field| doc.get(**field).is_none())
        .copied()
        .collect();

    if missing.is_empty() {
        CheckResult::pass("Example EE", "example descriptor has required fields")
    } else {
        CheckResult::fail("Example EE", format!("missing fields: {missing:?}"))
    }
}

fn check_secret_exposure(root: &Path) -> CheckResult {
    let mut exposed = Vec::new();

    for path in walk_files(root) {
        let lower_path = path.display().to_string().to_lowercase();
        // Examples and docs legitimately mention `TOKEN=...` placeholders.
        if lower_path.contains("example") || lower_path.contains("readme") {
            continue;
        }

        let Ok(content) = fs::read_to_string(&path) else {
            continue; // binary or unreadable, not our concern here
        };
        let content = content.to_lowercase();

        if SENSITIVE_PATTERNS
            .iter()
            .any(|pattern| content.contains(&format!("{pattern}=")))
        {
            exposed.push(file_name(&path));
        }
    }

    if exposed.is_empty() {
        CheckResult::pass("Secret Exposure", "no exposed secrets found")
    } else {
        CheckResult::fail(
            "Secret Exposure",
            format!("potential secrets in: {exposed:?}"),
        )
    }
}

fn check_env_file_permissions(root: &Path) -> CheckResult {
    let path = root.join(".env");
    if !path.exists() {
        return CheckResult::pass("File Permissions", "no .env file present");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        match fs::metadata(&path) {
            Ok(meta) if meta.permissions().mode() & 0o004 != 0 => {
                return CheckResult::fail("File Permissions", ".env is world-readable");
            }
            Err(e) => {
                return CheckResult::fail("File Permissions", format!("cannot stat .env: {e}"));
            }
            _ => {}
        }
    }

    CheckResult::pass("File Permissions", "appropriate permissions")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaffold() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::create_dir_all(root.join("examples")).unwrap();
        fs::write(root.join("execution-environment.yml"), "version: 3\n").unwrap();
        fs::write(root.join("ansible.cfg"), "[defaults]\n[galaxy]\n").unwrap();
        fs::write(root.join("Makefile"), "help:\n").unwrap();
        fs::write(root.join(".env.example"), "# ANSIBLE_GALAXY_SERVER_AUTOMATION_HUB_TOKEN\n")
            .unwrap();
        fs::write(root.join(".gitignore"), ".env\nartifacts/\n").unwrap();
        fs::write(
            root.join("README.md"),
            "# Project\n\n## Setup\n\n## Install\n\n## Build\n\n## Usage\n",
        )
        .unwrap();
        fs::write(
            root.join("examples/execution-environment.yml"),
            "version: 3\nimages: {}\ndependencies: {}\n",
        )
        .unwrap();

        dir
    }

    fn result_for<'a>(report: &'a SuiteReport, name: &str) -> &'a CheckResult {
        report
            .results
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no check named {name}"))
    }

    #[test]
    fn test_full_scaffold_passes() {
        let dir = scaffold();
        let report = run(dir.path());
        assert!(report.all_passed(), "{:#?}", report.results);
        assert_eq!(report.total(), 6);
    }

    #[test]
    fn test_missing_required_file_fails() {
        let dir = scaffold();
        fs::remove_file(dir.path().join(".gitignore")).unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "Required Files");
        assert!(!result.passed);
        assert!(result.message.contains(".gitignore"));
    }

    #[test]
    fn test_absent_yaml_files_are_skipped() {
        let dir = scaffold();
        // Most of KNOWN_YAML_FILES don't exist in the scaffold; the check
        // only judges the ones present.
        assert!(result_for(&run(dir.path()), "YAML Validity").passed);
    }

    #[test]
    fn test_invalid_known_yaml_fails() {
        let dir = scaffold();
        fs::write(dir.path().join("ansible-navigator.yml"), "a: [broken\n").unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "YAML Validity");
        assert!(!result.passed);
        assert!(result.message.contains("ansible-navigator.yml"));
    }

    #[test]
    fn test_readme_missing_topic_fails() {
        let dir = scaffold();
        fs::write(dir.path().join("README.md"), "# Project\n\nSetup and install.\n").unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "README Documentation");
        assert!(!result.passed);
        assert!(result.message.contains("build"));
    }

    #[test]
    fn test_example_ee_missing_field_fails() {
        let dir = scaffold();
        fs::write(
            dir.path().join("examples/execution-environment.yml"),
            "version: 3\n",
        )
        .unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "Example EE");
        assert!(!result.passed);
        assert!(result.message.contains("images"));
    }

    #[test]
    fn test_secret_exposure_detected() {
        let dir = scaffold();
        fs::write(dir.path().join("deploy.sh"), "export TOKEN=abcd1234\n").unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "Secret Exposure");
        assert!(!result.passed);
        assert!(result.message.contains("deploy.sh"));
    }

    #[test]
    fn test_secret_in_example_file_ignored() {
        let dir = scaffold();
        // .env.example already contains a token-looking line; the scaffold
        // still passes because example files are exempt.
        fs::write(
            dir.path().join("examples/vars.yml"),
            "api_token: \"token=demo\"\n",
        )
        .unwrap();
        assert!(result_for(&run(dir.path()), "Secret Exposure").passed);
    }

    #[cfg(unix)]
    #[test]
    fn test_world_readable_env_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scaffold();
        let env = dir.path().join(".env");
        fs::write(&env, "EENAV_TEST_MARKER=1\n").unwrap();
        fs::set_permissions(&env, fs::Permissions::from_mode(0o644)).unwrap();
        let report = run(dir.path());
        assert!(!result_for(&report, "File Permissions").passed);

        fs::set_permissions(&env, fs::Permissions::from_mode(0o600)).unwrap();
        let report = run(dir.path());
        assert!(result_for(&report, "File Permissions").passed);
    }
}
