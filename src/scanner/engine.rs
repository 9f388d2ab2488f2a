//! Main scanning engine implementation
//!
//! A fixed pool of workers drains a shared port cursor. Each worker probes
//! one port at a time without holding any lock; only the append of an open
//! finding takes the collector mutex. Results are sorted by port once every
//! worker has finished, so the output order never depends on which probe
//! completed first.
//!
//! The pool never exceeds the file descriptor budget. If a probe still
//! reports local socket exhaustion the scan is aborted: a port that could
//! not be probed is not a closed port.

use crate::config::ScanConfig;
use crate::network::{limits, PortProbeResult, ProbeOutcome, Prober, TcpConnectProber};
use crate::scanner::{OpenPortFinding, PortScanResult, ResultCollector, ScanTarget};
use crate::services;
use crate::ScanError;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinSet;

/// Main scanning engine
pub struct ScanEngine<P = TcpConnectProber> {
    threads: usize,
    timeout: Duration,
    prober: Arc<P>,
}

/// Per-worker counters merged after the sweep
#[derive(Debug, Default, Clone, Copy)]
struct WorkerStats {
    probed: usize,
    errors: usize,
}

impl ScanEngine<TcpConnectProber> {
    /// Create an engine that probes with plain TCP connects
    pub fn new(threads: usize, timeout: Duration) -> crate::Result<Self> {
        Self::with_prober(threads, timeout, TcpConnectProber::new())
    }

    /// Create an engine from the worker and timeout settings of `config`
    pub fn from_config(config: &ScanConfig) -> crate::Result<Self> {
        Self::new(config.threads, config.timeout_duration())
    }
}

impl<P: Prober + 'static> ScanEngine<P> {
    /// Create an engine around a custom prober
    pub fn with_prober(threads: usize, timeout: Duration, prober: P) -> crate::Result<Self> {
        if threads == 0 {
            return Err(ScanError::ConfigError("Thread count must be greater than 0".to_string()));
        }
        if timeout.is_zero() {
            return Err(ScanError::ConfigError("Timeout must be greater than 0".to_string()));
        }

        Ok(Self {
            threads,
            timeout,
            prober: Arc::new(prober),
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe every port of `target` once and collect the open ones
    pub async fn scan(&self, target: &ScanTarget) -> crate::Result<PortScanResult> {
        let total = target.port_count();
        let mut workers = self.threads.min(total);
        if let Some(budget) = limits::worker_budget(limits::descriptor_limit()) {
            if workers > budget {
                log::warn!(
                    "Capping {} workers to {} to stay within the file descriptor limit",
                    workers,
                    budget
                );
                workers = budget;
            }
        }

        log::info!(
            "Starting scan of {} for ports {}-{} ({} workers, {}ms timeout)",
            target.host(),
            target.start_port(),
            target.end_port(),
            workers,
            self.timeout.as_millis()
        );

        let start_time = Instant::now();
        let cursor = Arc::new(AtomicUsize::new(0));
        let collector: ResultCollector = Arc::new(Mutex::new(Vec::new()));

        let mut tasks = JoinSet::new();
        for _ in 0..workers {
            tasks.spawn(run_worker(
                self.prober.clone(),
                target.host(),
                target.start_port(),
                total,
                cursor.clone(),
                collector.clone(),
                self.timeout,
            ));
        }

        // Dropping the set on an early return aborts the remaining workers
        let mut stats = WorkerStats::default();
        while let Some(joined) = tasks.join_next().await {
            let worker_stats = joined
                .map_err(ScanError::from)
                .and_then(|stats| stats)
                .map_err(|e| {
                    log::error!("Scan of {} aborted: {}", target, e);
                    e
                })?;
            stats.probed += worker_stats.probed;
            stats.errors += worker_stats.errors;
        }

        if stats.probed != total {
            return Err(ScanError::Internal(format!(
                "scan incomplete: probed {} of {} ports",
                stats.probed, total
            )));
        }

        let mut open_ports = std::mem::take(&mut *collector.lock().await);
        open_ports.sort_unstable_by_key(|finding| finding.port);

        let result = PortScanResult {
            target: *target,
            open_ports,
            ports_scanned: stats.probed,
            probe_errors: stats.errors,
            duration: start_time.elapsed(),
        };

        log::info!(
            "Scan completed. Found {} open ports on {}",
            result.open_count(),
            target.host()
        );
        log::info!(
            "Scan duration: {:.2} seconds | {:.2} ports/sec | {} probe errors",
            result.duration.as_secs_f64(),
            result.scan_rate(),
            result.probe_errors
        );

        Ok(result)
    }
}

/// Scan `target` with `worker_count` TCP connect workers
pub async fn scan(
    target: &ScanTarget,
    worker_count: usize,
    timeout: Duration,
) -> crate::Result<PortScanResult> {
    ScanEngine::new(worker_count, timeout)?.scan(target).await
}

async fn run_worker<P: Prober>(
    prober: Arc<P>,
    host: IpAddr,
    start_port: u16,
    total: usize,
    cursor: Arc<AtomicUsize>,
    collector: ResultCollector,
    timeout: Duration,
) -> crate::Result<WorkerStats> {
    let mut stats = WorkerStats::default();

    loop {
        let index = cursor.fetch_add(1, Ordering::Relaxed);
        if index >= total {
            break;
        }
        // index < total, so start_port + index <= end_port
        let port = start_port + index as u16;

        let outcome = prober.probe(SocketAddr::new(host, port), timeout).await;
        stats.probed += 1;

        match &outcome {
            ProbeOutcome::Error(reason) => {
                stats.errors += 1;
                log::debug!("Probe of {}:{} failed: {}", host, port, reason);
            }
            ProbeOutcome::Exhausted(reason) => {
                return Err(ScanError::Internal(format!(
                    "local socket resources exhausted while probing {}:{}: {}",
                    host, port, reason
                )));
            }
            ProbeOutcome::Open | ProbeOutcome::Closed => {}
        }

        let result = PortProbeResult::new(port, &outcome);
        if result.open {
            let service = services::identify(result.port);
            log::debug!("Found open port: {} ({})", result.port, service);
            collector
                .lock()
                .await
                .push(OpenPortFinding::new(result.port, service));
        }
    }

    Ok(stats)
}
