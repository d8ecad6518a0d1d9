//! Sample inventory and playbook scaffolding.
//!
//! `eenav generate --create-samples` drops a minimal localhost inventory and
//! a smoke-test playbook next to the generated navigator config so a fresh
//! project can run `ansible-navigator run site.yml` immediately.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

const SAMPLE_INVENTORY: &str = r#"all:
  hosts:
    localhost:
      ansible_connection: local
  vars:
    ansible_python_interpreter: '{{ ansible_playbook_python }}'
"#;

const SAMPLE_PLAYBOOK: &str = r#"- name: Sample Playbook
  hosts: localhost
  gather_facts: true
  tasks:
    - name: Display Ansible version
      debug:
        var: ansible_version

    - name: Display available collections
      shell: ansible-galaxy collection list
      register: collections_result

    - name: Show collections
      debug:
        var: collections_result.stdout_lines
"#;

/// Create `inventory.yml` and `site.yml` in `dir` when they do not exist.
///
/// Existing files are left alone. Returns the paths that were created.
pub fn create_sample_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();

    for (name, content) in [("inventory.yml", SAMPLE_INVENTORY), ("site.yml", SAMPLE_PLAYBOOK)] {
        let path = dir.join(name);
        if path.exists() {
            continue;
        }
        fs::write(&path, content).map_err(|source| ConfigError::WriteFile {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "created sample file");
        created.push(path);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_both_samples() {
        let dir = tempfile::tempdir().unwrap();
        let created = create_sample_files(dir.path()).unwrap();
        assert_eq!(created.len(), 2);
        assert!(dir.path().join("inventory.yml").exists());
        assert!(dir.path().join("site.yml").exists());
    }

    #[test]
    fn test_samples_are_valid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        create_sample_files(dir.path()).unwrap();

        for name in ["inventory.yml", "site.yml"] {
            let text = fs::read_to_string(dir.path().join(name)).unwrap();
            let parsed: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
            assert!(!parsed.is_null());
        }
    }

    #[test]
    fn test_existing_files_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let inventory = dir.path().join("inventory.yml");
        fs::write(&inventory, "all: {}\n").unwrap();

        let created = create_sample_files(dir.path()).unwrap();
        assert_eq!(created.len(), 1);
        assert!(created[0].ends_with("site.yml"));
        assert_eq!(fs::read_to_string(&inventory).unwrap(), "all: {}\n");
    }
}
