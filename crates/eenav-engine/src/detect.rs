//! Container engine detection and tool availability probing.

use std::fmt;
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{EngineError, Result};

/// How long a `--version` probe may take before we call the tool broken.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Supported container engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerEngine {
    /// Rootless-friendly default.
    Podman,
    /// Fallback engine.
    Docker,
}

impl ContainerEngine {
    /// Binary name on PATH.
    pub fn binary(&self) -> &'static str {
        match self {
            ContainerEngine::Podman => "podman",
            ContainerEngine::Docker => "docker",
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            ContainerEngine::Podman => "Podman",
            ContainerEngine::Docker => "Docker",
        }
    }
}

impl fmt::Display for ContainerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Engine selection from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineChoice {
    /// Prefer podman, fall back to docker.
    #[default]
    Auto,
    Podman,
    Docker,
}

/// Result of probing one external tool with `--version`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolProbe {
    /// Binary name that was probed.
    pub name: String,
    /// First line of `--version` output when the tool responded.
    pub version: Option<String>,
}

impl ToolProbe {
    /// Whether the tool answered the probe.
    pub fn available(&self) -> bool {
        self.version.is_some()
    }
}

/// Run `<binary> --version` and capture the first output line.
///
/// Any failure mode (missing binary, non-zero exit, timeout) reads as
/// unavailable; probes never error.
pub async fn probe_tool(binary: &str) -> ToolProbe {
    let output = timeout(
        PROBE_TIMEOUT,
        Command::new(binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output(),
    )
    .await;

    let version = match output {
        Ok(Ok(out)) if out.status.success() => String::from_utf8_lossy(&out.stdout)
            .lines()
            .next()
            .map(|line| line.trim().to_string()),
        Ok(Ok(_)) | Ok(Err(_)) => None,
        Err(_) => {
            tracing::warn!(tool = binary, "version probe timed out");
            None
        }
    };

    ToolProbe {
        name: binary.to_string(),
        version,
    }
}

/// Availability of a container engine on this host.
#[derive(Debug, Clone)]
pub enum EngineStatus {
    /// An engine answered its version probe.
    Available {
        engine: ContainerEngine,
        version: String,
    },
    /// Neither podman nor docker responded.
    Missing {
        probed: Vec<&'static str>,
        install_hint: String,
    },
}

impl EngineStatus {
    /// Whether an engine is usable.
    pub fn is_available(&self) -> bool {
        matches!(self, EngineStatus::Available { .. })
    }

    /// Probe podman first, then docker.
    pub async fn detect() -> Self {
        for engine in [ContainerEngine::Podman, ContainerEngine::Docker] {
            let probe = probe_tool(engine.binary()).await;
            if let Some(version) = probe.version {
                return EngineStatus::Available { engine, version };
            }
        }

        EngineStatus::Missing {
            probed: vec!["podman", "docker"],
            install_hint: install_hint(),
        }
    }
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineStatus::Available { engine, version } => {
                write!(f, "{engine} available ({version})")
            }
            EngineStatus::Missing {
                probed,
                install_hint,
            } => {
                write!(
                    f,
                    "no container engine found (probed: {})\n\n{install_hint}",
                    probed.join(", ")
                )
            }
        }
    }
}

/// Resolve a CLI engine choice to a concrete engine.
pub async fn resolve_engine(choice: EngineChoice) -> Result<ContainerEngine> {
    match choice {
        EngineChoice::Auto => match EngineStatus::detect().await {
            EngineStatus::Available { engine, .. } => Ok(engine),
            EngineStatus::Missing {
                probed,
                install_hint,
            } => Err(EngineError::NoEngine {
                probed: probed.join(", "),
                install_hint,
            }),
        },
        EngineChoice::Podman => require_engine(ContainerEngine::Podman).await,
        EngineChoice::Docker => require_engine(ContainerEngine::Docker).await,
    }
}

async fn require_engine(engine: ContainerEngine) -> Result<ContainerEngine> {
    let probe = probe_tool(engine.binary()).await;
    if probe.available() {
        Ok(engine)
    } else {
        Err(EngineError::ToolNotFound {
            tool: engine.binary().to_string(),
        })
    }
}

fn install_hint() -> String {
    "Building execution environments requires a container engine.\n\
     Install one of:\n\
     \n\
       Ubuntu/Debian: sudo apt-get install podman\n\
       Fedora:        sudo dnf install podman\n\
       Arch:          sudo pacman -S podman\n\
       macOS:         brew install podman && podman machine init\n\
     \n\
     Docker is also supported: https://docs.docker.com/engine/install/"
        .to_string()
}
