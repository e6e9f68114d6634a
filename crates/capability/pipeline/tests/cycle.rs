use async_trait::async_trait;
use domain::{DeviceInfo, LabelResolver, RegisterClass, RegisterQuery};
use mkv_labels::LabelTable;
use mkv_normalize::Formatter;
use mkv_pipeline::{PollCycle, Poller, PollerError};
use mkv_protocol::{
    DescriptorSource, DynamicDiscovery, InMemoryController, MachineStateReader, Session,
    StaticDescriptors, Transport, ValueFetcher,
};
use mkv_sink::{FieldValue, InMemorySink, MetricPoint, MetricsSink, SinkError};
use std::sync::Arc;
use std::time::Duration;

struct RejectingSink;

#[async_trait]
impl MetricsSink for RejectingSink {
    async fn write(&self, _point: &MetricPoint) -> Result<(), SinkError> {
        Err(SinkError::Status {
            status: 401,
            body: "unauthorized".to_string(),
        })
    }
}

fn build_cycle(
    controller: &Arc<InMemoryController>,
    source: Arc<dyn DescriptorSource>,
    sink: Arc<dyn MetricsSink>,
) -> PollCycle {
    let labels: Arc<dyn LabelResolver> = Arc::new(LabelTable::english());
    let transport: Arc<dyn Transport> = controller.clone();
    let session = Session::new(transport, 1000);
    PollCycle::new(
        source,
        ValueFetcher::new(session.clone()),
        MachineStateReader::new(session, labels.clone()),
        Formatter::new(labels),
        sink,
        DeviceInfo::new("GA 30 VSD", "API123456"),
    )
}

fn analog_controller() -> Arc<InMemoryController> {
    let controller = Arc::new(InMemoryController::new());
    controller.set(RegisterQuery::new(0x3001, 8), "00000069");
    controller.set(RegisterQuery::new(0x3002, 0x08), "00C8000A");
    controller.set(RegisterQuery::new(0x3002, 0x09), "1F400005");
    controller.set(RegisterQuery::new(0x3002, 0x0A), "00007FFF");
    controller
}

#[tokio::test]
async fn static_cycle_writes_state_and_analogs() {
    let controller = analog_controller();
    let sink = Arc::new(InMemorySink::new());
    let cycle = build_cycle(
        &controller,
        Arc::new(StaticDescriptors::builtin()),
        sink.clone(),
    );

    let report = cycle.run_once().await;

    assert_eq!(report.snapshot.machine_state.label, "Running");
    assert!(report.sink_error.is_none());
    let analogs = report
        .snapshot
        .class(RegisterClass::AnalogInput)
        .expect("analog section");
    assert_eq!(analogs.records.len(), 7);
    assert_eq!(analogs.records[0].scaled_value, Some(1.0));
    assert_eq!(analogs.records[1].display.as_deref(), Some("0.5 bar"));
    assert_eq!(analogs.records[2].display.as_deref(), Some("Sensor Error"));
    assert_eq!(analogs.decoded().count(), 3);

    let state = sink.measurement("machine_state");
    assert_eq!(state.len(), 1);
    assert_eq!(state[0].fields.get("state_code"), Some(&FieldValue::Integer(105)));
    assert_eq!(
        state[0].tags.get("device").map(String::as_str),
        Some("API123456")
    );

    let points = sink.measurement("analog_inputs");
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].fields.get("value"), Some(&FieldValue::Float(1.0)));
    assert!(points[2].fields.get("value").is_none());
    assert_eq!(report.points_written, 4);

    // 静态表只有模拟量：一次状态请求 + 一次取值请求
    assert_eq!(controller.request_count(), 2);
}

#[tokio::test]
async fn dynamic_cycle_discovers_then_fetches() {
    let controller = Arc::new(InMemoryController::new());
    controller.set(RegisterQuery::new(0x3001, 8), "0000001C");
    controller.set(RegisterQuery::new(0x20B2, 1), "08340001");
    controller.set(RegisterQuery::new(0x3003, 1), "00000001");
    let sink = Arc::new(InMemorySink::new());
    let labels: Arc<dyn LabelResolver> = Arc::new(LabelTable::english());
    let transport: Arc<dyn Transport> = controller.clone();
    let discovery = DynamicDiscovery::new(Session::new(transport, 1000), labels);

    let cycle = build_cycle(&controller, Arc::new(discovery), sink.clone())
        .with_classes(vec![RegisterClass::DigitalInput]);
    let report = cycle.run_once().await;

    let inputs = report
        .snapshot
        .class(RegisterClass::DigitalInput)
        .expect("digital section");
    assert_eq!(inputs.records.len(), 1);
    assert_eq!(inputs.records[0].descriptor.display_name, "Emergency Stop");
    assert_eq!(inputs.records[0].display.as_deref(), Some("Closed"));
    assert_eq!(sink.measurement("digital_inputs").len(), 1);
    // 状态、发现、取值
    assert_eq!(controller.request_count(), 3);
}

#[tokio::test]
async fn offline_controller_still_reports_unknown_state() {
    let controller = analog_controller();
    controller.set_offline(true);
    let sink = Arc::new(InMemorySink::new());
    let cycle = build_cycle(
        &controller,
        Arc::new(StaticDescriptors::builtin()),
        sink.clone(),
    );

    let report = cycle.run_once().await;

    assert_eq!(report.snapshot.machine_state.label, "Unknown");
    assert_eq!(report.points_written, 1);
    assert!(sink.measurement("analog_inputs").is_empty());
}

#[tokio::test]
async fn sink_failure_is_reported_not_raised() {
    let controller = analog_controller();
    let cycle = build_cycle(
        &controller,
        Arc::new(StaticDescriptors::builtin()),
        Arc::new(RejectingSink),
    );

    let report = cycle.run_once().await;

    assert_eq!(report.points_written, 0);
    assert!(report.sink_error.expect("sink error").contains("401"));
}

#[tokio::test]
async fn poller_runs_until_stopped() {
    let controller = analog_controller();
    let sink = Arc::new(InMemorySink::new());
    let cycle = Arc::new(build_cycle(
        &controller,
        Arc::new(StaticDescriptors::builtin()),
        sink.clone(),
    ));

    let handle = Poller::spawn(cycle, Duration::from_millis(20)).expect("spawn");
    tokio::time::timeout(Duration::from_secs(5), async {
        while sink.measurement("machine_state").len() < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("two cycles");

    let cycles = handle.stop().await.expect("stop");
    assert!(cycles >= 2);
    let written = sink.len();
    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(sink.len(), written);
}

#[tokio::test]
async fn poller_rejects_zero_interval() {
    let controller = analog_controller();
    let cycle = Arc::new(build_cycle(
        &controller,
        Arc::new(StaticDescriptors::builtin()),
        Arc::new(InMemorySink::new()),
    ));
    assert!(matches!(
        Poller::spawn(cycle, Duration::ZERO),
        Err(PollerError::InvalidInterval)
    ));
}
