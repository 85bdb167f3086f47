//! Background collection of process-level metrics.
//!
//! # Responsibilities
//! - Periodically sample this process (memory, CPU, start time)
//! - Publish the samples as gauges in the service registry
//! - Run exporter upkeep on the same interval
//! - Stop when the shutdown coordinator fires

use std::time::Duration;

use sysinfo::{Pid, ProcessesToUpdate, System};
use tokio::time;

use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics::{
    MetricsRegistry, PROCESS_CPU_USAGE_PERCENT, PROCESS_RESIDENT_MEMORY_BYTES,
    PROCESS_START_TIME_SECONDS, PROCESS_VIRTUAL_MEMORY_BYTES,
};

pub struct ProcessCollector {
    metrics: MetricsRegistry,
    interval: Duration,
    system: System,
    pid: Option<Pid>,
}

impl ProcessCollector {
    pub fn new(metrics: MetricsRegistry, interval: Duration) -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = %e, "Process metrics unavailable on this platform");
                None
            }
        };

        Self {
            metrics,
            interval,
            system: System::new(),
            pid,
        }
    }

    pub async fn run(mut self, mut shutdown: ShutdownSignal) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Process metrics collector starting"
        );

        let mut ticker = time::interval(self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.collect();
                }
                () = shutdown.recv() => {
                    tracing::info!("Process metrics collector received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Take one sample and publish it.
    pub fn collect(&mut self) {
        self.metrics.run_upkeep();

        let Some(pid) = self.pid else {
            return;
        };

        self.system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        let Some(process) = self.system.process(pid) else {
            tracing::debug!(pid = %pid, "Own process missing from sample");
            return;
        };

        self.metrics
            .set_process_gauge(PROCESS_START_TIME_SECONDS, process.start_time() as f64);
        self.metrics
            .set_process_gauge(PROCESS_RESIDENT_MEMORY_BYTES, process.memory() as f64);
        self.metrics
            .set_process_gauge(PROCESS_VIRTUAL_MEMORY_BYTES, process.virtual_memory() as f64);
        self.metrics
            .set_process_gauge(PROCESS_CPU_USAGE_PERCENT, f64::from(process.cpu_usage()));
    }
}
