//! Container engine detection and external tool plumbing for eenav.
//!
//! Everything heavyweight (image builds, playbook runs) happens in external
//! binaries; this crate finds those binaries, probes their versions, and
//! invokes `ansible-builder` with a deadline.

pub mod builder;
pub mod detect;
pub mod error;

pub use builder::{build_image, BuildRequest};
pub use detect::{
    probe_tool, resolve_engine, ContainerEngine, EngineChoice, EngineStatus, ToolProbe,
};
pub use error::{EngineError, Result};
