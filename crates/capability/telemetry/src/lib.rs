//! 追踪初始化、轮询周期 ID 与进程级计数器。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub cycles: u64,
    pub transport_requests: u64,
    pub transport_failures: u64,
    pub undecoded_blocks: u64,
    pub records_emitted: u64,
    pub sink_write_failures: u64,
    pub cycle_latency_ms_total: u64,
    pub cycle_latency_ms_count: u64,
}

/// 轮询计数器。
pub struct TelemetryMetrics {
    cycles: AtomicU64,
    transport_requests: AtomicU64,
    transport_failures: AtomicU64,
    undecoded_blocks: AtomicU64,
    records_emitted: AtomicU64,
    sink_write_failures: AtomicU64,
    cycle_latency_ms_total: AtomicU64,
    cycle_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            cycles: AtomicU64::new(0),
            transport_requests: AtomicU64::new(0),
            transport_failures: AtomicU64::new(0),
            undecoded_blocks: AtomicU64::new(0),
            records_emitted: AtomicU64::new(0),
            sink_write_failures: AtomicU64::new(0),
            cycle_latency_ms_total: AtomicU64::new(0),
            cycle_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cycles: self.cycles.load(Ordering::Relaxed),
            transport_requests: self.transport_requests.load(Ordering::Relaxed),
            transport_failures: self.transport_failures.load(Ordering::Relaxed),
            undecoded_blocks: self.undecoded_blocks.load(Ordering::Relaxed),
            records_emitted: self.records_emitted.load(Ordering::Relaxed),
            sink_write_failures: self.sink_write_failures.load(Ordering::Relaxed),
            cycle_latency_ms_total: self.cycle_latency_ms_total.load(Ordering::Relaxed),
            cycle_latency_ms_count: self.cycle_latency_ms_count.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局计数器实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成轮询周期 ID。
pub fn new_cycle_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// 记录完成的轮询周期及耗时（毫秒）。
pub fn record_cycle(latency_ms: u64) {
    let metrics = metrics();
    metrics.cycles.fetch_add(1, Ordering::Relaxed);
    metrics
        .cycle_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .cycle_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录一次传输调用（按分块计）。
pub fn record_transport_request() {
    metrics().transport_requests.fetch_add(1, Ordering::Relaxed);
}

/// 记录传输失败（网络、超时、非 2xx）。
pub fn record_transport_failure() {
    metrics().transport_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录无效响应块数量。
pub fn record_undecoded_blocks(count: u64) {
    if count > 0 {
        metrics()
            .undecoded_blocks
            .fetch_add(count, Ordering::Relaxed);
    }
}

/// 记录写出的记录数量。
pub fn record_records_emitted(count: u64) {
    metrics()
        .records_emitted
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录时序写入失败。
pub fn record_sink_write_failure() {
    metrics()
        .sink_write_failures
        .fetch_add(1, Ordering::Relaxed);
}
