#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct ResourceSnapshot {
    pub cpu_usage: f32,
    pub resident_mb: u64,
    pub peak_resident_mb: u64,
    pub elapsed: Duration,
}

/// Samples this process's CPU and resident memory. Used to show that the
/// cursor keeps memory bounded by its window, not by the file size.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    started: Instant,
    peak_resident_mb: Mutex<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = sysinfo::get_current_pid().ok();
        let mut system = System::new();
        if enabled {
            if let Some(pid) = pid {
                system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            }
        }

        Self {
            system: Mutex::new(system),
            pid,
            started: Instant::now(),
            peak_resident_mb: Mutex::new(0),
            enabled,
        }
    }

    pub fn snapshot(&self) -> Option<ResourceSnapshot> {
        if !self.enabled {
            return None;
        }
        let pid = self.pid?;

        let mut system = self.system.lock().ok()?;
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let process = system.process(pid)?;
        let resident_mb = process.memory() / 1024 / 1024;

        let mut peak = self.peak_resident_mb.lock().ok()?;
        *peak = (*peak).max(resident_mb);

        Some(ResourceSnapshot {
            cpu_usage: process.cpu_usage(),
            resident_mb,
            peak_resident_mb: *peak,
            elapsed: self.started.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(s) = self.snapshot() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, RSS: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                s.cpu_usage,
                s.resident_mb,
                s.peak_resident_mb,
                s.elapsed
            );
        }
    }

    pub fn log_final_stats(&self, bytes_read: u64) {
        if let Some(s) = self.snapshot() {
            let secs = s.elapsed.as_secs_f64();
            let throughput = if secs > 0.0 {
                bytes_read as f64 / 1024.0 / 1024.0 / secs
            } else {
                0.0
            };
            tracing::info!(
                "📊 Final - Time: {:?}, Peak RSS: {}MB, Read: {} bytes ({:.1} MB/s)",
                s.elapsed,
                s.peak_resident_mb,
                bytes_read,
                throughput
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self, _bytes_read: u64) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
