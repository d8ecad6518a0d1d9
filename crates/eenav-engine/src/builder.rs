//! ansible-builder invocation.
//!
//! Build orchestration is delegated entirely to `ansible-builder`; this
//! module only assembles the command line, streams its output, and enforces
//! a deadline.

use std::path::PathBuf;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::detect::ContainerEngine;
use crate::error::{EngineError, Result};

const BUILDER_BINARY: &str = "ansible-builder";

/// Parameters for one execution-environment image build.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Path to `execution-environment.yml`.
    pub ee_file: PathBuf,
    /// Image tag to produce.
    pub tag: String,
    /// Engine handed to `--container-runtime`.
    pub engine: ContainerEngine,
    /// Pass `-v3` to ansible-builder.
    pub verbose: bool,
    /// Overall build deadline.
    pub timeout: Duration,
}

impl BuildRequest {
    /// The argument vector handed to ansible-builder.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "-f".to_string(),
            self.ee_file.display().to_string(),
            "-t".to_string(),
            self.tag.clone(),
            "--container-runtime".to_string(),
            self.engine.binary().to_string(),
        ];
        if self.verbose {
            args.push("-v3".to_string());
        }
        args
    }
}

/// Run `ansible-builder build` with the request parameters.
///
/// Output streams straight to the user's terminal. A timeout kills the
/// child and surfaces as [`EngineError::Timeout`].
pub async fn build_image(request: &BuildRequest) -> Result<()> {
    let args = request.args();
    tracing::info!(
        tag = %request.tag,
        engine = request.engine.binary(),
        "invoking {BUILDER_BINARY} {}",
        args.join(" ")
    );

    let mut child = Command::new(BUILDER_BINARY)
        .args(&args)
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                EngineError::ToolNotFound {
                    tool: BUILDER_BINARY.to_string(),
                }
            } else {
                EngineError::Spawn {
                    tool: BUILDER_BINARY.to_string(),
                    source,
                }
            }
        })?;

    let status = timeout(request.timeout, child.wait())
        .await
        .map_err(|_| EngineError::Timeout {
            tool: BUILDER_BINARY.to_string(),
            secs: request.timeout.as_secs(),
        })?
        .map_err(|source| EngineError::Spawn {
            tool: BUILDER_BINARY.to_string(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(EngineError::Failed {
            tool: BUILDER_BINARY.to_string(),
            code: status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BuildRequest {
        BuildRequest {
            ee_file: PathBuf::from("execution-environment.yml"),
            tag: "localhost/custom-ee:test".to_string(),
            engine: ContainerEngine::Podman,
            verbose: false,
            timeout: Duration::from_secs(600),
        }
    }

    #[test]
    fn test_build_args_basic() {
        let args = request().args();
        assert_eq!(
            args,
            vec![
                "build",
                "-f",
                "execution-environment.yml",
                "-t",
                "localhost/custom-ee:test",
                "--container-runtime",
                "podman",
            ]
        );
    }

    #[test]
    fn test_build_args_verbose() {
        let mut req = request();
        req.verbose = true;
        req.engine = ContainerEngine::Docker;
        let args = req.args();
        assert_eq!(args.last().unwrap(), "-v3");
        assert!(args.contains(&"docker".to_string()));
    }
}
