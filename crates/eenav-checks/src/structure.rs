//! Structure suite — project scaffold sanity checks.

use std::fs;
use std::path::Path;

use eenav_config::ExecutionEnvironment;

use crate::report::{CheckResult, SuiteReport};
use crate::util::{file_name, has_trigger_key, parse_yaml_file, yaml_files_in};

/// Directories every EE project is expected to carry.
const REQUIRED_DIRS: [&str; 6] = [
    ".github/workflows",
    ".github/actions/build-push",
    "scripts",
    "examples",
    "tests",
    "docs",
];

/// Makefile targets the scaffold documents.
const REQUIRED_TARGETS: [&str; 5] = ["help", "build", "test", "clean", "setup"];

/// Run the structure suite against a project root.
pub fn run(root: &Path) -> SuiteReport {
    SuiteReport::new(
        "structure",
        vec![
            check_directory_structure(root),
            check_ee_file(root),
            check_ansible_cfg(root),
            check_scripts_executable(root),
            check_makefile_targets(root),
            check_examples_valid(root),
            check_workflows_valid(root),
        ],
    )
}

fn check_directory_structure(root: &Path) -> CheckResult {
    let missing: Vec<&str> = REQUIRED_DIRS
        .iter()
        .filter(|d| !root.join(d).exists())
        .copied()
        .collect();

    if missing.is_empty() {
        CheckResult::pass("Directory Structure", "all required directories exist")
    } else {
        CheckResult::fail(
            "Directory Structure",
            format!("missing directories: {missing:?}"),
        )
    }
}

fn check_ee_file(root: &Path) -> CheckResult {
    let path = root.join("execution-environment.yml");
    if !path.exists() {
        return CheckResult::fail("EE File", "execution-environment.yml not found");
    }

    match ExecutionEnvironment::load(&path) {
        Ok(_) => CheckResult::pass("EE File", "execution-environment.yml is valid YAML"),
        Err(e) => CheckResult::fail("EE File", e.to_string()),
    }
}

fn check_ansible_cfg(root: &Path) -> CheckResult {
    let path = root.join("ansible.cfg");
    if !path.exists() {
        return CheckResult::fail("Ansible Config", "ansible.cfg not found");
    }

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => return CheckResult::fail("Ansible Config", format!("cannot read: {e}")),
    };

    let missing: Vec<&str> = ["[defaults]", "[galaxy]"]
        .iter()
        .filter(|section| !content.contains(**section))
        .copied()
        .collect();

    if missing.is_empty() {
        CheckResult::pass("Ansible Config", "has required sections")
    } else {
        CheckResult::fail("Ansible Config", format!("missing sections: {missing:?}"))
    }
}

fn check_scripts_executable(root: &Path) -> CheckResult {
    let scripts_dir = root.join("scripts");
    if !scripts_dir.exists() {
        return CheckResult::fail("Scripts Executable", "scripts directory not found");
    }

    let scripts: Vec<_> = fs::read_dir(&scripts_dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == "sh" || e == "py")
        })
        .collect();

    if scripts.is_empty() {
        return CheckResult::fail("Scripts Executable", "no script files found");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let non_executable: Vec<String> = scripts
            .iter()
            .filter(|p| {
                fs::metadata(p)
                    .map(|m| m.permissions().mode() & 0o111 == 0)
                    .unwrap_or(true)
            })
            .map(|p| file_name(p))
            .collect();

        if !non_executable.is_empty() {
            return CheckResult::fail(
                "Scripts Executable",
                format!("not executable: {non_executable:?}"),
            );
        }
    }

    CheckResult::pass("Scripts Executable", "all scripts are executable")
}

fn check_makefile_targets(root: &Path) -> CheckResult {
    let path = root.join("Makefile");
    if !path.exists() {
        return CheckResult::fail("Makefile Targets", "Makefile not found");
    }

    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => return CheckResult::fail("Makefile Targets", format!("cannot read: {e}")),
    };

    let missing: Vec<&str> = REQUIRED_TARGETS
        .iter()
        .filter(|target| !content.contains(&format!("{target}:")))
        .copied()
        .collect();

    if missing.is_empty() {
        CheckResult::pass("Makefile Targets", "has required targets")
    } else {
        CheckResult::fail("Makefile Targets", format!("missing targets: {missing:?}"))
    }
}

fn check_examples_valid(root: &Path) -> CheckResult {
    let examples_dir = root.join("examples");
    if !examples_dir.exists() {
        return CheckResult::fail("Examples", "examples directory not found");
    }

    let yaml_files = yaml_files_in(&examples_dir);
    if yaml_files.is_empty() {
        return CheckResult::fail("Examples", "no example YAML files found");
    }

    let invalid: Vec<String> = yaml_files
        .iter()
        .filter(|p| parse_yaml_file(p).is_err())
        .map(|p| file_name(p))
        .collect();

    if invalid.is_empty() {
        CheckResult::pass("Examples", "all example files are valid YAML")
    } else {
        CheckResult::fail("Examples", format!("invalid example files: {invalid:?}"))
    }
}

fn check_workflows_valid(root: &Path) -> CheckResult {
    let workflows_dir = root.join(".github/workflows");
    if !workflows_dir.exists() {
        return CheckResult::fail("Workflows", ".github/workflows not found");
    }

    let workflow_files = yaml_files_in(&workflows_dir);
    if workflow_files.is_empty() {
        return CheckResult::fail("Workflows", "no workflow files found");
    }

    let mut invalid = Vec::new();
    for path in &workflow_files {
        match parse_yaml_file(path) {
            Ok(doc) => {
                if doc.get("name").is_none() || !has_trigger_key(&doc) || doc.get("jobs").is_none()
                {
                    invalid.push(file_name(path));
                }
            }
            Err(_) => invalid.push(file_name(path)),
        }
    }

    if invalid.is_empty() {
        CheckResult::pass("Workflows", "all workflow files are valid")
    } else {
        CheckResult::fail("Workflows", format!("invalid workflow files: {invalid:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lay down a complete scaffold that passes every structure check.
    fn scaffold() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        for d in REQUIRED_DIRS {
            fs::create_dir_all(root.join(d)).unwrap();
        }

        fs::write(
            root.join("execution-environment.yml"),
            "version: 3\nimages:\n  base_image:\n    name: quay.io/ansible/creator-ee:latest\n",
        )
        .unwrap();
        fs::write(
            root.join("ansible.cfg"),
            "[defaults]\nhost_key_checking = False\n\n[galaxy]\nserver_list = galaxy\n",
        )
        .unwrap();
        fs::write(
            root.join("Makefile"),
            "help:\n\t@echo help\nbuild:\n\t@echo build\ntest:\n\t@echo test\nclean:\n\t@echo clean\nsetup:\n\t@echo setup\n",
        )
        .unwrap();
        fs::write(root.join("examples/execution-environment.yml"), "version: 3\n").unwrap();
        fs::write(
            root.join(".github/workflows/build-ee.yml"),
            "name: Build EE\n'on':\n  push: {}\njobs:\n  build:\n    runs-on: ubuntu-latest\n    steps: []\n",
        )
        .unwrap();

        let script = root.join("scripts/build-local.sh");
        fs::write(&script, "#!/bin/sh\necho build\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        }

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
        assert_eq!(report.total(), 7);
    }

    #[test]
    fn test_missing_directories_fail() {
        let dir = scaffold();
        fs::remove_dir_all(dir.path().join("docs")).unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "Directory Structure");
        assert!(!result.passed);
        assert!(result.message.contains("docs"));
    }

    #[test]
    fn test_invalid_ee_yaml_fails() {
        let dir = scaffold();
        fs::write(
            dir.path().join("execution-environment.yml"),
            "images: [unclosed\n",
        )
        .unwrap();
        let report = run(dir.path());
        assert!(!result_for(&report, "EE File").passed);
    }

    #[test]
    fn test_ansible_cfg_missing_section_fails() {
        let dir = scaffold();
        fs::write(dir.path().join("ansible.cfg"), "[defaults]\n").unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "Ansible Config");
        assert!(!result.passed);
        assert!(result.message.contains("[galaxy]"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_script_fails() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scaffold();
        let script = dir.path().join("scripts/build-local.sh");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o644)).unwrap();
        let report = run(dir.path());
        assert!(!result_for(&report, "Scripts Executable").passed);
    }

    #[test]
    fn test_makefile_missing_target_fails() {
        let dir = scaffold();
        fs::write(dir.path().join("Makefile"), "help:\n\t@echo help\n").unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "Makefile Targets");
        assert!(!result.passed);
        assert!(result.message.contains("build"));
    }

    #[test]
    fn test_workflow_without_jobs_fails() {
        let dir = scaffold();
        fs::write(
            dir.path().join(".github/workflows/broken.yml"),
            "name: Broken\n'on': [push]\n",
        )
        .unwrap();
        let report = run(dir.path());
        let result = result_for(&report, "Workflows");
        assert!(!result.passed);
        assert!(result.message.contains("broken.yml"));
    }

    #[test]
    fn test_workflow_boolean_on_key_accepted() {
        let dir = scaffold();
        // Unquoted `on` resolves to boolean true under YAML 1.1 resolvers.
        fs::write(
            dir.path().join(".github/workflows/build-ee.yml"),
            "name: Build EE\ntrue:\n  push: {}\njobs:\n  build: {}\n",
        )
        .unwrap();
        let report = run(dir.path());
        assert!(result_for(&report, "Workflows").passed);
    }

    #[test]
    fn test_empty_root_fails_everything() {
        let dir = tempfile::tempdir().unwrap();
        let report = run(dir.path());
        assert!(!report.all_passed());
        assert_eq!(report.passed(), 0);
    }
}
