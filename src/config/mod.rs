//! Configuration file handling
//!
//! Clawbuild never parses ZeroClaw's config as structured data; it only needs
//! to find the file and scan it for a handful of channel sections. Locating
//! follows a fixed precedence chain and the first candidate that exists wins.

pub mod channels;

use std::path::{Path, PathBuf};

/// Resolve the configuration file to scan for channel features.
///
/// Precedence, first existing candidate wins:
/// 1. explicit `--config` path
/// 2. `ZEROCLAW_CONFIG` environment path
/// 3. `<project-root>/config.toml`
/// 4. `<home>/.zeroclaw/config.toml`
///
/// A named candidate that does not exist falls through to the next; there is
/// no merging between candidates. Returns `None` when nothing exists.
pub fn locate(
    explicit: Option<&Path>,
    env_path: Option<&Path>,
    project_root: &Path,
    home: Option<&Path>,
) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }
    if let Some(path) = env_path {
        candidates.push(path.to_path_buf());
    }
    candidates.push(project_root.join("config.toml"));
    if let Some(home) = home {
        candidates.push(home.join(".zeroclaw").join("config.toml"));
    }

    for candidate in candidates {
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "located config file");
            return Some(candidate);
        }
    }

    tracing::debug!("no config file found");
    None
}
