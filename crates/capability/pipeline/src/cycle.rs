//! 单个轮询周期
//!
//! ```text
//! DescriptorSource ─▶ ValueFetcher ─▶ Formatter ─▶ MetricsSink
//!        (每个类别)            MachineStateReader ─┘
//! ```

use crate::points::{machine_state_point, record_points};
use domain::{DeviceInfo, MachineState, RegisterClass, ValueRecord};
use mkv_normalize::Formatter;
use mkv_protocol::{DescriptorSource, MachineStateReader, ValueFetcher};
use mkv_sink::MetricsSink;
use mkv_telemetry::{new_cycle_id, record_cycle, record_records_emitted, record_sink_write_failure};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{Instrument, debug, info_span, warn};

/// 一个类别在本周期的取值结果
#[derive(Debug, Clone)]
pub struct ClassSnapshot {
    pub class: RegisterClass,
    pub records: Vec<ValueRecord>,
}

impl ClassSnapshot {
    pub fn decoded(&self) -> impl Iterator<Item = &ValueRecord> {
        self.records.iter().filter(|record| record.decoded)
    }
}

/// 一次采集的完整快照（不含写入）
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub machine_state: MachineState,
    pub classes: Vec<ClassSnapshot>,
}

impl Snapshot {
    pub fn class(&self, class: RegisterClass) -> Option<&ClassSnapshot> {
        self.classes.iter().find(|snapshot| snapshot.class == class)
    }

    pub fn record_count(&self) -> usize {
        self.classes.iter().map(|c| c.records.len()).sum()
    }
}

/// 周期报告
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_id: String,
    pub snapshot: Snapshot,
    pub points_written: usize,
    pub sink_error: Option<String>,
}

/// 轮询周期：所有依赖在启动时注入，运行期只读
pub struct PollCycle {
    source: Arc<dyn DescriptorSource>,
    fetcher: ValueFetcher,
    state_reader: MachineStateReader,
    formatter: Formatter,
    sink: Arc<dyn MetricsSink>,
    device: DeviceInfo,
    classes: Vec<RegisterClass>,
}

impl PollCycle {
    pub fn new(
        source: Arc<dyn DescriptorSource>,
        fetcher: ValueFetcher,
        state_reader: MachineStateReader,
        formatter: Formatter,
        sink: Arc<dyn MetricsSink>,
        device: DeviceInfo,
    ) -> Self {
        Self {
            source,
            fetcher,
            state_reader,
            formatter,
            sink,
            device,
            classes: RegisterClass::ALL.to_vec(),
        }
    }

    /// 限定轮询的类别，保持给定顺序
    pub fn with_classes(mut self, classes: Vec<RegisterClass>) -> Self {
        self.classes = classes;
        self
    }

    pub fn classes(&self) -> &[RegisterClass] {
        &self.classes
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// 读取状态与各类别取值，并完成格式化
    pub async fn collect(&self) -> Snapshot {
        let machine_state = self.state_reader.read().await;

        let mut classes = Vec::with_capacity(self.classes.len());
        for &class in &self.classes {
            let descriptors = self.source.descriptors(class).await;
            let records = self.fetcher.fetch(class, &descriptors).await;
            let records = self.formatter.format_all(records);
            debug!(
                target: "mkv.poller",
                class = %class,
                descriptors = descriptors.len(),
                "class collected"
            );
            classes.push(ClassSnapshot { class, records });
        }

        Snapshot {
            machine_state,
            classes,
        }
    }

    /// 执行一个完整周期：采集、写入、记录指标
    pub async fn run_once(&self) -> CycleReport {
        let cycle_id = new_cycle_id();
        let span = info_span!(target: "mkv.poller", "poll_cycle", cycle_id = %cycle_id);
        self.run_cycle(cycle_id).instrument(span).await
    }

    async fn run_cycle(&self, cycle_id: String) -> CycleReport {
        let started = Instant::now();
        let snapshot = self.collect().await;

        let timestamp_s = now_epoch_s();
        let mut points = vec![machine_state_point(
            &snapshot.machine_state,
            &self.device,
            timestamp_s,
        )];
        for class in &snapshot.classes {
            points.extend(record_points(&class.records, &self.device, timestamp_s));
        }

        let (points_written, sink_error) = match self.sink.write_batch(&points).await {
            Ok(written) => (written, None),
            Err(err) => {
                record_sink_write_failure();
                warn!(
                    target: "mkv.poller",
                    points = points.len(),
                    error = %err,
                    "sink write failed"
                );
                (0, Some(err.to_string()))
            }
        };

        let latency_ms = started.elapsed().as_millis() as u64;
        record_cycle(latency_ms);
        record_records_emitted(points_written as u64);
        debug!(
            target: "mkv.poller",
            state = snapshot.machine_state.code,
            records = snapshot.record_count(),
            points_written,
            latency_ms,
            "poll cycle finished"
        );

        CycleReport {
            cycle_id,
            snapshot,
            points_written,
            sink_error,
        }
    }
}

fn now_epoch_s() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
