//! Execution-environment descriptor parsing.
//!
//! An execution environment (EE) is a container image definition for running
//! automation tooling, described by a YAML manifest (`execution-environment.yml`).
//! Only the fields the navigator translation needs are typed; the build
//! `options` block is carried opaquely.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Base image used when the descriptor names none.
pub const DEFAULT_BASE_IMAGE: &str = "quay.io/ansible/creator-ee:latest";

/// Parsed `execution-environment.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionEnvironment {
    /// EE schema version (v3 is current for ansible-builder).
    pub version: Option<u32>,

    /// Image sources.
    pub images: Option<Images>,

    /// Galaxy / python / system dependencies.
    pub dependencies: Option<Dependencies>,

    /// Build options, passed through untouched.
    pub options: Option<BTreeMap<String, serde_yaml::Value>>,
}

/// The `images` section of an EE descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Images {
    /// The base image, either a bare string or a mapping with a `name` key.
    pub base_image: Option<BaseImage>,
}

/// Base image reference — ansible-builder accepts both spellings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseImage {
    /// `base_image: quay.io/...`
    Name(String),
    /// `base_image: { name: quay.io/..., options: ... }`
    Spec {
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<serde_yaml::Value>,
    },
}

/// The `dependencies` section of an EE descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependencies {
    /// Collection requirements, inline requirements text or a mapping.
    pub galaxy: Option<GalaxySource>,

    /// Python requirements, carried opaquely.
    pub python: Option<serde_yaml::Value>,

    /// System (bindep) requirements, carried opaquely.
    pub system: Option<serde_yaml::Value>,
}

/// Galaxy requirements come in two forms in the wild.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GalaxySource {
    /// Inline requirements document as a YAML block scalar.
    Inline(String),
    /// Structured `collections:` mapping.
    Manifest(serde_yaml::Mapping),
}

impl ExecutionEnvironment {
    /// Load an EE descriptor from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::EeFileNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::ParseYaml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Parse an EE descriptor from a YAML string.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Resolve the base image with fallback to [`DEFAULT_BASE_IMAGE`].
    ///
    /// Mapping form wins its `name` key; bare string form is used verbatim;
    /// anything missing falls back to the default.
    pub fn base_image(&self) -> String {
        match self.images.as_ref().and_then(|i| i.base_image.as_ref()) {
            Some(BaseImage::Name(name)) => name.clone(),
            Some(BaseImage::Spec { name, .. }) => name
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_IMAGE.to_string()),
            None => DEFAULT_BASE_IMAGE.to_string(),
        }
    }

    /// Extract the galaxy requirements document, if any.
    ///
    /// Inline text is trimmed; a structured mapping is re-serialized so the
    /// caller always sees a requirements document.
    pub fn galaxy_requirements(&self) -> Option<String> {
        match self.dependencies.as_ref().and_then(|d| d.galaxy.as_ref()) {
            Some(GalaxySource::Inline(text)) => Some(text.trim().to_string()),
            Some(GalaxySource::Manifest(mapping)) => serde_yaml::to_string(mapping).ok(),
            None => None,
        }
    }
}
