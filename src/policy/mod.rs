//! Build policy selection
//!
//! Maps a named mode plus the probed host resources to a build profile and a
//! parallel job count. The tables degrade toward single-job release builds as
//! memory shrinks, so a failed probe (0 MB) lands on the safest settings.

use clap::ValueEnum;
use std::fmt;

use crate::host::HostProfile;

/// Named policy bundle governing how aggressively defaults use host resources
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Always a single-job release build
    Safe,
    /// Memory-conscious parallelism, release profile
    Balanced,
    /// Use the host fully, including the fat-LTO release-fast profile
    Fast,
}

/// Cargo optimization tier passed to the build
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Release,
    ReleaseFast,
    Dev,
}

/// Resolved build settings for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildPlan {
    pub profile: BuildProfile,
    pub jobs: usize,
    pub locked: bool,
}

impl BuildMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildMode::Safe => "safe",
            BuildMode::Balanced => "balanced",
            BuildMode::Fast => "fast",
        }
    }

    /// Default profile for this mode on the given host
    pub fn default_profile(self, host: &HostProfile) -> BuildProfile {
        match self {
            BuildMode::Safe | BuildMode::Balanced => BuildProfile::Release,
            BuildMode::Fast => {
                if host.memory_mb >= 16384 && host.cpu_count >= 8 {
                    BuildProfile::ReleaseFast
                } else {
                    BuildProfile::Release
                }
            }
        }
    }

    /// Default job count for this mode on the given host, clamped to
    /// `1 <= jobs <= cpu_count`
    pub fn default_jobs(self, host: &HostProfile) -> usize {
        let jobs = match self {
            BuildMode::Safe => 1,
            BuildMode::Balanced => {
                if host.memory_mb <= 4096 {
                    1
                } else if host.memory_mb <= 8192 {
                    2
                } else if host.cpu_count >= 8 {
                    3
                } else {
                    2
                }
            }
            BuildMode::Fast => {
                if host.memory_mb <= 4096 {
                    1
                } else if host.memory_mb <= 8192 {
                    2
                } else if host.memory_mb <= 16384 {
                    4
                } else {
                    8
                }
            }
        };
        jobs.min(host.cpu_count).max(1)
    }
}

impl BuildProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            BuildProfile::Release => "release",
            BuildProfile::ReleaseFast => "release-fast",
            BuildProfile::Dev => "dev",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
