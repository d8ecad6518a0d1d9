//! EE descriptor → ansible-navigator configuration translation.
//!
//! Produces the `ansible-navigator.yml` document: which image to run, how to
//! pull it, environment variables injected into the container, volume mounts,
//! logging and artifact settings. Field names follow navigator's kebab-case
//! schema, so every struct here carries serde renames.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ee::ExecutionEnvironment;
use crate::error::{ConfigError, Result};

/// Environment variables whose values are copied from the calling process
/// into the container when set (galaxy authentication tokens).
pub const PASSTHROUGH_ENV_VARS: [&str; 2] = [
    "ANSIBLE_GALAXY_SERVER_AUTOMATION_HUB_TOKEN",
    "ANSIBLE_GALAXY_SERVER_GALAXY_TOKEN",
];

/// Options controlling navigator config generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Override the container image instead of using the EE base image.
    pub image_override: Option<String>,
    /// Project directory probed for `ansible.cfg`.
    pub project_root: std::path::PathBuf,
}

/// Top-level `ansible-navigator.yml` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorConfig {
    #[serde(rename = "ansible-navigator")]
    pub navigator: NavigatorSettings,
}

/// The body under the `ansible-navigator` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorSettings {
    pub ansible: AnsibleSection,
    #[serde(rename = "execution-environment")]
    pub execution_environment: EeSection,
    pub logging: LoggingSection,
    #[serde(rename = "playbook-artifact")]
    pub playbook_artifact: ArtifactSection,
    pub runner: RunnerSection,
    pub settings: SettingsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnsibleSection {
    pub inventories: Vec<String>,
    pub playbook: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EeSection {
    pub enabled: bool,
    pub image: String,
    #[serde(rename = "pull-policy")]
    pub pull_policy: String,
    #[serde(rename = "container-engine")]
    pub container_engine: String,
    #[serde(rename = "environment-variables")]
    pub environment_variables: EnvVarsSection,
    #[serde(rename = "volume-mounts")]
    pub volume_mounts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvVarsSection {
    pub set: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: String,
    pub append: bool,
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSection {
    pub enable: bool,
    pub replay: String,
    #[serde(rename = "save-as")]
    pub save_as: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerSection {
    #[serde(rename = "artifact-dir")]
    pub artifact_dir: String,
    #[serde(rename = "rotate-artifacts-count")]
    pub rotate_artifacts_count: u32,
    pub timeout: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSection {
    #[serde(rename = "effective-settings-file")]
    pub effective_settings_file: String,
    #[serde(rename = "schema-cache-path")]
    pub schema_cache_path: String,
}

impl NavigatorConfig {
    /// Translate an EE descriptor into a navigator configuration.
    ///
    /// Galaxy tokens are read from the process environment; `ansible.cfg`
    /// presence in the project root decides the extra config mount.
    pub fn from_ee(ee: &ExecutionEnvironment, opts: &GenerateOptions) -> Self {
        let tokens: Vec<(String, String)> = PASSTHROUGH_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_string(), v)))
            .collect();
        let ansible_cfg = opts.project_root.join("ansible.cfg").exists();
        Self::build(ee, opts.image_override.as_deref(), &tokens, ansible_cfg)
    }

    /// Deterministic inner translation, with environment inputs made explicit.
    pub(crate) fn build(
        ee: &ExecutionEnvironment,
        image_override: Option<&str>,
        passthrough: &[(String, String)],
        ansible_cfg_present: bool,
    ) -> Self {
        let image = image_override
            .map(str::to_string)
            .unwrap_or_else(|| ee.base_image());

        let mut set = BTreeMap::from([
            ("ANSIBLE_HOST_KEY_CHECKING".to_string(), "false".to_string()),
            ("ANSIBLE_STDOUT_CALLBACK".to_string(), "yaml".to_string()),
            ("ANSIBLE_TIMEOUT".to_string(), "30".to_string()),
        ]);
        for (name, value) in passthrough {
            set.insert(name.clone(), value.clone());
        }

        let mut volume_mounts = vec![
            "${HOME}/.ssh:/home/runner/.ssh:Z".to_string(),
            "${PWD}:/runner/project:Z".to_string(),
        ];
        if ansible_cfg_present {
            volume_mounts.push("${PWD}/ansible.cfg:/etc/ansible/ansible.cfg:Z".to_string());
        }

        NavigatorConfig {
            navigator: NavigatorSettings {
                ansible: AnsibleSection {
                    inventories: vec!["inventory.yml".to_string()],
                    playbook: "site.yml".to_string(),
                },
                execution_environment: EeSection {
                    enabled: true,
                    image,
                    pull_policy: "missing".to_string(),
                    container_engine: "auto".to_string(),
                    environment_variables: EnvVarsSection { set },
                    volume_mounts,
                },
                logging: LoggingSection {
                    level: "debug".to_string(),
                    append: true,
                    file: "./navigator.log".to_string(),
                },
                playbook_artifact: ArtifactSection {
                    enable: true,
                    replay: "./artifacts".to_string(),
                    save_as: "./artifacts/{playbook_name}-{time_stamp}.json".to_string(),
                },
                runner: RunnerSection {
                    artifact_dir: "./artifacts".to_string(),
                    rotate_artifacts_count: 10,
                    timeout: 300,
                },
                settings: SettingsSection {
                    effective_settings_file: "./ansible-navigator-settings.json".to_string(),
                    schema_cache_path: "~/.ansible-navigator/schema_cache".to_string(),
                },
            },
        }
    }

    /// Serialize to a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the configuration to `path`.
    ///
    /// Refuses to clobber an existing file unless `force` is set.
    pub fn save(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(ConfigError::OutputExists(path.to_path_buf()));
        }
        let text = self.to_yaml()?;
        fs::write(path, text).map_err(|source| ConfigError::WriteFile {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote navigator config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ee::DEFAULT_BASE_IMAGE;

    fn sample_ee() -> ExecutionEnvironment {
        ExecutionEnvironment::from_yaml(
            r#"
version: 3
images:
  base_image:
    name: quay.io/ansible/awx-ee:latest
dependencies:
  galaxy: |
    collections:
      - name: ansible.posix
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_image_from_ee_base_image() {
        let config = NavigatorConfig::build(&sample_ee(), None, &[], false);
        assert_eq!(
            config.navigator.execution_environment.image,
            "quay.io/ansible/awx-ee:latest"
        );
    }

    #[test]
    fn test_image_override_wins() {
        let config =
            NavigatorConfig::build(&sample_ee(), Some("localhost/my-ee:test"), &[], false);
        assert_eq!(
            config.navigator.execution_environment.image,
            "localhost/my-ee:test"
        );
    }

    #[test]
    fn test_image_falls_back_to_default() {
        let ee = ExecutionEnvironment::from_yaml("version: 3\n").unwrap();
        let config = NavigatorConfig::build(&ee, None, &[], false);
        assert_eq!(config.navigator.execution_environment.image, DEFAULT_BASE_IMAGE);
    }

    #[test]
    fn test_fixed_environment_variables() {
        let config = NavigatorConfig::build(&sample_ee(), None, &[], false);
        let set = &config.navigator.execution_environment.environment_variables.set;
        assert_eq!(set.get("ANSIBLE_HOST_KEY_CHECKING").unwrap(), "false");
        assert_eq!(set.get("ANSIBLE_STDOUT_CALLBACK").unwrap(), "yaml");
        assert_eq!(set.get("ANSIBLE_TIMEOUT").unwrap(), "30");
    }

    #[test]
    fn test_token_passthrough() {
        let tokens = vec![(
            "ANSIBLE_GALAXY_SERVER_AUTOMATION_HUB_TOKEN".to_string(),
            "s3cret".to_string(),
        )];
        let config = NavigatorConfig::build(&sample_ee(), None, &tokens, false);
        let set = &config.navigator.execution_environment.environment_variables.set;
        assert_eq!(
            set.get("ANSIBLE_GALAXY_SERVER_AUTOMATION_HUB_TOKEN").unwrap(),
            "s3cret"
        );
        assert!(!set.contains_key("ANSIBLE_GALAXY_SERVER_GALAXY_TOKEN"));
    }

    #[test]
    fn test_volume_mounts_without_ansible_cfg() {
        let config = NavigatorConfig::build(&sample_ee(), None, &[], false);
        let mounts = &config.navigator.execution_environment.volume_mounts;
        assert_eq!(mounts.len(), 2);
        assert!(mounts[0].contains(".ssh"));
        assert!(mounts[1].contains("${PWD}"));
    }

    #[test]
    fn test_volume_mounts_with_ansible_cfg() {
        let config = NavigatorConfig::build(&sample_ee(), None, &[], true);
        let mounts = &config.navigator.execution_environment.volume_mounts;
        assert_eq!(mounts.len(), 3);
        assert_eq!(
            mounts[2],
            "${PWD}/ansible.cfg:/etc/ansible/ansible.cfg:Z"
        );
    }

    #[test]
    fn test_yaml_shape_uses_kebab_case_keys() {
        let config = NavigatorConfig::build(&sample_ee(), None, &[], false);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("ansible-navigator:"));
        assert!(yaml.contains("execution-environment:"));
        assert!(yaml.contains("pull-policy: missing"));
        assert!(yaml.contains("container-engine: auto"));
        assert!(yaml.contains("volume-mounts:"));
        assert!(yaml.contains("playbook-artifact:"));
        assert!(yaml.contains("rotate-artifacts-count: 10"));
    }

    #[test]
    fn test_yaml_round_trips() {
        let config = NavigatorConfig::build(&sample_ee(), None, &[], true);
        let yaml = config.to_yaml().unwrap();
        let parsed: NavigatorConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(
            parsed.navigator.execution_environment.volume_mounts.len(),
            3
        );
        assert_eq!(parsed.navigator.runner.timeout, 300);
    }

    #[test]
    fn test_save_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ansible-navigator.yml");
        let config = NavigatorConfig::build(&sample_ee(), None, &[], false);

        config.save(&path, false).unwrap();
        let err = config.save(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::OutputExists(_)));

        // --force overwrites
        config.save(&path, true).unwrap();
    }
}
