//! 空压机控制器轮询服务：周期采集寄存器并写入时序库。

mod report;

use domain::{DeviceInfo, LabelResolver};
use mkv_config::{AppConfig, DiscoveryMode, InfluxSettings};
use mkv_labels::LabelTable;
use mkv_normalize::Formatter;
use mkv_pipeline::{PollCycle, Poller};
use mkv_protocol::{
    DescriptorSource, DynamicDiscovery, HttpTransport, HttpTransportConfig, MachineStateReader,
    Session, StaticDescriptors, Transport, ValueFetcher,
};
use mkv_sink::{InfluxConfig, InfluxSink, MetricsSink, NoopSink};
use mkv_telemetry::{init_tracing, metrics};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // 标签表：内置英文表，可叠加覆盖文件
    let labels: Arc<dyn LabelResolver> = Arc::new(load_labels(&config)?);

    // 控制器 HTTP 传输与分批会话
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(HttpTransportConfig {
        host: config.device_host.clone(),
        path: config.device_path.clone(),
        timeout_ms: config.request_timeout_ms,
    })?);
    let session = Session::new(transport, config.max_queries_per_request);

    let source = descriptor_source(&config, session.clone(), labels.clone())?;
    let sink = metrics_sink(config.influx.as_ref(), config.request_timeout_ms)?;

    let cycle = PollCycle::new(
        source,
        ValueFetcher::new(session.clone()),
        MachineStateReader::new(session, labels.clone()),
        Formatter::new(labels.clone()),
        sink,
        DeviceInfo::new(config.device_model.clone(), config.device_serial.clone()),
    )
    .with_classes(config.classes.clone());

    // 启动前打印一次完整状态报告
    if config.report_on_start {
        let snapshot = cycle.collect().await;
        println!("{}", report::render(cycle.device(), &snapshot, labels.as_ref()));
    }

    let handle = Poller::spawn(
        Arc::new(cycle),
        Duration::from_secs(config.poll_interval_seconds),
    )?;
    info!(
        target: "mkv.poller",
        host = %config.device_host,
        interval_s = config.poll_interval_seconds,
        "monitor running, press ctrl-c to stop"
    );

    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(target: "mkv.poller", error = %err, "ctrl-c listener failed");
    }
    let cycles = handle.stop().await?;
    let counters = metrics().snapshot();
    info!(
        target: "mkv.poller",
        cycles,
        transport_failures = counters.transport_failures,
        undecoded_blocks = counters.undecoded_blocks,
        sink_write_failures = counters.sink_write_failures,
        "monitor stopped"
    );
    Ok(())
}

fn load_labels(config: &AppConfig) -> Result<LabelTable, Box<dyn std::error::Error>> {
    match &config.label_overrides_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(LabelTable::english_with_overrides(&json)?)
        }
        None => Ok(LabelTable::english()),
    }
}

fn descriptor_source(
    config: &AppConfig,
    session: Session,
    labels: Arc<dyn LabelResolver>,
) -> Result<Arc<dyn DescriptorSource>, Box<dyn std::error::Error>> {
    match config.discovery_mode {
        DiscoveryMode::Dynamic => Ok(Arc::new(DynamicDiscovery::new(session, labels))),
        DiscoveryMode::Static => {
            let descriptors = match &config.static_descriptors_path {
                Some(path) => StaticDescriptors::from_json(&std::fs::read_to_string(path)?)?,
                None => StaticDescriptors::builtin(),
            };
            info!(
                target: "mkv.poller",
                descriptors = descriptors.len(),
                "static descriptor table loaded"
            );
            Ok(Arc::new(descriptors))
        }
    }
}

fn metrics_sink(
    settings: Option<&InfluxSettings>,
    timeout_ms: u64,
) -> Result<Arc<dyn MetricsSink>, Box<dyn std::error::Error>> {
    let Some(settings) = settings else {
        info!(target: "mkv.sink", "no influx url configured, points are discarded");
        return Ok(Arc::new(NoopSink));
    };
    let sink = InfluxSink::new(InfluxConfig {
        url: settings.url.clone(),
        version: settings.version,
        org: settings.org.clone(),
        bucket: settings.bucket.clone(),
        token: settings.token.clone(),
        timeout_ms,
    })?;
    Ok(Arc::new(sink))
}
