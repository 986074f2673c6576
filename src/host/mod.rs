//! Host resource probing
//!
//! Reads total memory and logical CPU count once per invocation. The probe
//! never fails: unavailable queries degrade to 0 MB / 1 CPU, which the policy
//! tables treat as the most constrained host.

use sysinfo::{MemoryRefreshKind, RefreshKind, System};

/// Snapshot of the resources available on the build host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostProfile {
    /// Total system memory in megabytes (0 when the query is unavailable)
    pub memory_mb: u64,

    /// Logical CPU count, always at least 1
    pub cpu_count: usize,
}

impl HostProfile {
    /// Human-readable resource summary for the plan printout
    pub fn summary(&self) -> String {
        format!("{} MB memory, {} CPUs", self.memory_mb, self.cpu_count)
    }
}

/// Probe the host's memory and CPU count
pub fn probe() -> HostProfile {
    let mut sys = System::new_with_specifics(
        RefreshKind::new().with_memory(MemoryRefreshKind::everything()),
    );
    sys.refresh_memory();

    // sysinfo reports bytes; 0 when the platform query is unavailable
    let memory_mb = sys.total_memory() / (1024 * 1024);
    let cpu_count = num_cpus::get().max(1);

    tracing::debug!(memory_mb, cpu_count, "probed host resources");

    HostProfile {
        memory_mb,
        cpu_count,
    }
}
