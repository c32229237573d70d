//! Sources of gauge readings.

use sysinfo::{Pid, System};

/// Produces the gauge readings of one sample tick.
///
/// Called from the sampling task only; implementations may keep mutable state
/// between calls (sysinfo needs two refreshes to compute CPU usage).
pub trait Sampler: Send + 'static {
    fn sample(&mut self) -> Vec<(&'static str, f64)>;
}

/// Host and current-process statistics via `sysinfo`.
pub struct SystemSampler {
    sys: System,
    pid: Option<Pid>,
}

impl SystemSampler {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = e, "current pid unavailable, process readings disabled");
                None
            }
        };
        Self {
            sys: System::new(),
            pid,
        }
    }

    fn process_readings(&mut self, out: &mut Vec<(&'static str, f64)>) {
        let Some(pid) = self.pid else {
            return;
        };
        if !self.sys.refresh_process(pid) {
            return;
        }
        let Some(p) = self.sys.process(pid) else {
            return;
        };
        let disk = p.disk_usage();
        out.extend([
            ("ProcessResidentMemory", p.memory() as f64),
            ("ProcessVirtualMemory", p.virtual_memory() as f64),
            ("ProcessCpuUtilization", p.cpu_usage() as f64),
            ("ProcessDiskReadBytes", disk.total_read_bytes as f64),
            ("ProcessDiskWrittenBytes", disk.total_written_bytes as f64),
            ("ProcessRunTime", p.run_time() as f64),
        ]);
    }
}

impl Default for SystemSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for SystemSampler {
    fn sample(&mut self) -> Vec<(&'static str, f64)> {
        self.sys.refresh_memory();
        self.sys.refresh_cpu();

        let load = System::load_average();
        let mut out = vec![
            ("TotalMemory", self.sys.total_memory() as f64),
            ("UsedMemory", self.sys.used_memory() as f64),
            ("FreeMemory", self.sys.free_memory() as f64),
            ("AvailableMemory", self.sys.available_memory() as f64),
            ("TotalSwap", self.sys.total_swap() as f64),
            ("UsedSwap", self.sys.used_swap() as f64),
            ("CpuUtilization", self.sys.global_cpu_info().cpu_usage() as f64),
            ("CpuCount", self.sys.cpus().len() as f64),
            ("LoadAverage1", load.one),
            ("LoadAverage5", load.five),
            ("LoadAverage15", load.fifteen),
            ("Uptime", System::uptime() as f64),
        ];
        self.process_readings(&mut out);
        out
    }
}
