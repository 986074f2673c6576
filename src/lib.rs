//! # Clawbuild - Resource-Aware Build Planning for ZeroClaw
//!
//! Clawbuild computes a `cargo build` invocation tuned to the machine it runs
//! on. It probes host memory and CPU count, picks a build profile and job
//! count from a named policy mode, detects channel features from ZeroClaw's
//! runtime configuration, and assembles the final command.
//!
//! ## Quick Start
//!
//! ```bash
//! # Build with defaults (balanced mode, auto-detected channels)
//! clawbuild
//!
//! # Inspect the plan without building
//! clawbuild --dry-run
//!
//! # Conservative single-job build
//! clawbuild --mode safe
//! ```

pub mod cli;
pub mod config;
pub mod features;
pub mod host;
pub mod invoke;
pub mod policy;

pub use cli::{Cli, Output};

/// Result type alias for clawbuild operations
pub type Result<T> = anyhow::Result<T>;
