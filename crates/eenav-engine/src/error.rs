//! Engine error types.

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors from container engine detection and external tool invocation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A required external binary is not installed.
    #[error("'{tool}' not found on PATH")]
    ToolNotFound { tool: String },

    /// Failed to spawn an external process.
    #[error("failed to run '{tool}': {source}")]
    Spawn {
        tool: String,
        source: std::io::Error,
    },

    /// The process ran past its deadline.
    #[error("'{tool}' timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },

    /// The process exited with a non-zero status.
    #[error("'{tool}' failed with exit code {code}")]
    Failed { tool: String, code: i32 },

    /// No usable container engine on this host.
    #[error("no container engine available (probed: {probed})\n\n{install_hint}")]
    NoEngine { probed: String, install_hint: String },
}
