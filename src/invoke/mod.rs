//! Build command assembly and execution
//!
//! Turns a resolved plan and feature set into the literal `cargo build`
//! argv plus environment, prints it for auditing, and hands control to cargo.
//! The resolver's job ends once cargo is launched; cargo's exit status
//! becomes the process exit status.

use anyhow::{Context, Result, bail};
use std::process::Command;

use crate::features::FeatureSet;
use crate::policy::{BuildPlan, BuildProfile};

/// Literal build-tool invocation: program, arguments, and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl Invocation {
    /// Render the invocation as a single shell-style line for display
    pub fn command_line(&self) -> String {
        let mut parts: Vec<String> = self
            .envs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Assemble the cargo invocation for a resolved plan
pub fn assemble(plan: &BuildPlan, features: &FeatureSet) -> Invocation {
    let mut args = vec!["build".to_string()];

    match plan.profile {
        BuildProfile::Release => args.push("--release".to_string()),
        BuildProfile::ReleaseFast => {
            args.push("--profile".to_string());
            args.push("release-fast".to_string());
        }
        // dev is cargo's default; no selector argument
        BuildProfile::Dev => {}
    }

    if plan.locked {
        args.push("--locked".to_string());
    }

    if !features.is_empty() {
        args.push("--features".to_string());
        args.push(features.to_arg());
    }

    Invocation {
        program: "cargo".to_string(),
        args,
        envs: vec![("CARGO_BUILD_JOBS".to_string(), plan.jobs.to_string())],
    }
}

/// Run the assembled invocation, propagating cargo's exit status.
///
/// Only returns `Ok` when the build succeeds; a failing build exits the
/// process with cargo's own status instead of unwinding back through main.
pub fn execute(invocation: &Invocation) -> Result<()> {
    if which::which(&invocation.program).is_err() {
        bail!("'{}' not found in PATH", invocation.program);
    }

    let mut command = Command::new(&invocation.program);
    command.args(&invocation.args);
    for (key, value) in &invocation.envs {
        command.env(key, value);
    }

    tracing::debug!(command = %invocation.command_line(), "launching build");

    let status = command
        .status()
        .with_context(|| format!("failed to launch '{}'", invocation.program))?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
