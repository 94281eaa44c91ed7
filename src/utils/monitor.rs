#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

/// Samples process CPU and memory between pipeline phases.
///
/// Disabled monitors (or hosts where the current pid cannot be resolved) do no
/// sampling at all, so callers can log unconditionally.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    sampler: Option<Mutex<Sampler>>,
    start_time: Instant,
}

#[cfg(feature = "cli")]
struct Sampler {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let sampler = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => {
                    let mut system = System::new_with_specifics(RefreshKind::everything());
                    system.refresh_all();
                    Some(Mutex::new(Sampler {
                        system,
                        pid,
                        peak_memory_mb: 0,
                    }))
                }
                Err(e) => {
                    tracing::warn!("System monitoring unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            sampler,
            start_time: Instant::now(),
        }
    }

    pub fn get_stats(&self) -> Option<SystemStats> {
        let mut sampler = self.sampler.as_ref()?.lock().ok()?;
        sampler.system.refresh_all();

        let (cpu_usage, memory_mb) = {
            let process = sampler.system.process(sampler.pid)?;
            (process.cpu_usage(), process.memory() / 1024 / 1024)
        };
        sampler.peak_memory_mb = sampler.peak_memory_mb.max(memory_mb);

        Some(SystemStats {
            cpu_usage,
            memory_usage_mb: memory_mb,
            peak_memory_mb: sampler.peak_memory_mb,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, file: &str, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} [{}] - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                file,
                phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed_time,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sampler.is_some()
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

    pub fn log_stats(&self, _file: &str, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
