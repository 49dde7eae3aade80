use sysinfo::{MINIMUM_CPU_UPDATE_INTERVAL, System};

/// CPU and memory utilization, as whole percentages in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSample {
    pub cpu_percent: u8,

    pub memory_percent: u8,
}

impl MetricSample {
    pub fn from_percentages(cpu_percent: f32, memory_percent: f32) -> Self {
        Self {
            cpu_percent: round_percent(cpu_percent),
            memory_percent: round_percent(memory_percent),
        }
    }
}

#[derive(Debug)]
pub struct MetricSampler {
    system: System,
}

impl MetricSampler {
    pub fn new() -> Self {
        let mut system = System::new();
        // CPU usage is a delta between refreshes; prime it so the first
        // sample already covers a full update interval.
        system.refresh_cpu_usage();
        std::thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        Self { system }
    }

    pub fn sample(&mut self) -> MetricSample {
        self.system.refresh_cpu_usage();
        self.system.refresh_memory();

        let cpu_percent = self.system.global_cpu_usage();
        let memory_percent = memory_percent(
            self.system.total_memory(),
            self.system.available_memory(),
        );

        MetricSample::from_percentages(cpu_percent, memory_percent)
    }
}

impl Default for MetricSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn memory_percent(total: u64, available: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }

    (total.saturating_sub(available) as f64 / total as f64 * 100.0) as f32
}

fn round_percent(value: f32) -> u8 {
    if !value.is_finite() {
        return 0;
    }

    value.round().clamp(0.0, 100.0) as u8
}
