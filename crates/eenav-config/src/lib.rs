//! Configuration model for eenav.
//!
//! Provides the two YAML documents this tool cares about:
//! - the execution-environment descriptor (`execution-environment.yml`),
//!   parsed with string/mapping dispatch and fallback defaults
//! - the ansible-navigator configuration (`ansible-navigator.yml`),
//!   generated from the descriptor with environment-variable injection and
//!   conditional volume mounts
//!
//! plus sample-file scaffolding and path helpers.

pub mod ee;
pub mod error;
pub mod navigator;
pub mod paths;
pub mod samples;

pub use ee::{BaseImage, Dependencies, ExecutionEnvironment, GalaxySource, Images, DEFAULT_BASE_IMAGE};
pub use error::{ConfigError, Result};
pub use navigator::{GenerateOptions, NavigatorConfig, PASSTHROUGH_ENV_VARS};
pub use paths::{log_dir, xdg_config_dir};
pub use samples::create_sample_files;
