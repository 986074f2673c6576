//! Command-line interface for clawbuild
//!
//! Flag parsing via clap, then a single synchronous resolution pass: probe
//! the host, locate and scan the config, pick the plan, assemble the cargo
//! invocation, and either print it (dry run) or launch it.

use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::{Path, PathBuf};

mod output;

pub use output::Output;

use crate::config::{self, channels};
use crate::features::{self, FeatureSet};
use crate::host::{self, HostProfile};
use crate::invoke;
use crate::policy::{BuildMode, BuildPlan, BuildProfile};

/// Resource-aware cargo build planner for ZeroClaw
#[derive(Parser)]
#[command(
    name = "clawbuild",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resource-aware cargo build planner for ZeroClaw",
    long_about = "Clawbuild probes host memory and CPUs, picks a build profile and job count \
                  from a policy mode, detects channel features from ZeroClaw's config.toml, \
                  and runs the resulting cargo build."
)]
pub struct Cli {
    /// Policy mode governing default profile and parallelism
    #[arg(long, value_enum, env = "ZEROCLAW_BUILD_MODE", default_value_t = BuildMode::Balanced)]
    pub mode: BuildMode,

    /// Detect channel features from the ZeroClaw config (default)
    #[arg(long, overrides_with = "no_auto_channels")]
    pub auto_channels: bool,

    /// Disable config-driven channel feature detection
    #[arg(long, overrides_with = "auto_channels")]
    pub no_auto_channels: bool,

    /// Explicit ZeroClaw configuration file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Shortcut adding the channel-lark feature
    #[arg(long)]
    pub with_feishu: bool,

    /// Shortcut adding the channel-matrix feature
    #[arg(long)]
    pub with_matrix: bool,

    /// Extra cargo features, comma-separated (repeatable)
    #[arg(long, value_name = "FEATURES", action = clap::ArgAction::Append)]
    pub features: Vec<String>,

    /// Force the build profile, skipping the mode's profile rule
    #[arg(long, value_enum, env = "ZEROCLAW_BUILD_PROFILE")]
    pub profile: Option<BuildProfile>,

    /// Force the job count, skipping the mode's jobs rule
    #[arg(long, value_name = "N", env = "ZEROCLAW_BUILD_JOBS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// Pass --locked to cargo (default)
    #[arg(long, overrides_with = "no_locked")]
    pub locked: bool,

    /// Allow cargo to re-resolve dependency versions
    #[arg(long, overrides_with = "locked")]
    pub no_locked: bool,

    /// Print the resolved plan and command without building
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Resolve the build plan and execute (or print) the invocation
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        let host = host::probe();

        let env_config = env::var_os("ZEROCLAW_CONFIG").map(PathBuf::from);
        let config_path = config::locate(
            self.config.as_deref(),
            env_config.as_deref(),
            Path::new("."),
            dirs::home_dir().as_deref(),
        );

        let auto_channels = !self.no_auto_channels;
        let detected = if auto_channels {
            config_path.as_deref().map(channels::detect)
        } else {
            None
        };
        let features = features::build_feature_set(
            &self.features,
            self.with_feishu,
            self.with_matrix,
            detected.as_ref(),
        );

        let profile = match self.profile {
            Some(profile) => profile,
            None => self.mode.default_profile(&host),
        };
        let jobs = match self.jobs {
            Some(jobs) => jobs as usize,
            None => self.mode.default_jobs(&host),
        };
        let plan = BuildPlan {
            profile,
            jobs,
            locked: !self.no_locked,
        };
        tracing::debug!(
            profile = %plan.profile,
            jobs = plan.jobs,
            locked = plan.locked,
            "resolved build plan"
        );

        let invocation = invoke::assemble(&plan, &features);

        print_summary(
            &output,
            &host,
            self.mode,
            &plan,
            &features,
            auto_channels,
            config_path.as_deref(),
        );
        output.step(&invocation.command_line());

        if self.dry_run {
            output.info("Dry run: build not executed");
            return Ok(());
        }

        invoke::execute(&invocation)?;
        output.success("Build finished");
        Ok(())
    }
}

fn print_summary(
    output: &Output,
    host: &HostProfile,
    mode: BuildMode,
    plan: &BuildPlan,
    features: &FeatureSet,
    auto_channels: bool,
    config_path: Option<&Path>,
) {
    output.header("Build plan");
    output.key_value("host", &host.summary(), false);
    output.key_value("mode", mode.as_str(), false);
    output.key_value("profile", plan.profile.as_str(), true);
    output.key_value("jobs", &plan.jobs.to_string(), true);
    let features_display = if features.is_empty() {
        "(none)".to_string()
    } else {
        features.to_arg()
    };
    output.key_value("features", &features_display, false);
    output.key_value("locked", if plan.locked { "yes" } else { "no" }, false);

    let config_display = match (auto_channels, config_path) {
        (false, _) => "(detection disabled)".to_string(),
        (true, Some(path)) => path.display().to_string(),
        (true, None) => "(none found)".to_string(),
    };
    output.key_value("config", &config_display, false);
    output.blank_line();
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
