//! 取值记录 → 时序数据点

use domain::{DeviceInfo, MachineState, RegisterClass, ValueRecord};
use mkv_sink::{FieldValue, MetricPoint};

pub const MACHINE_STATE_MEASUREMENT: &str = "machine_state";

fn base_point(measurement: &str, device: &DeviceInfo, timestamp_s: i64) -> MetricPoint {
    MetricPoint::new(measurement)
        .tag("device", device.serial.as_str())
        .tag("model", device.model.as_str())
        .at(timestamp_s)
}

pub fn machine_state_point(
    state: &MachineState,
    device: &DeviceInfo,
    timestamp_s: i64,
) -> MetricPoint {
    base_point(MACHINE_STATE_MEASUREMENT, device, timestamp_s)
        .field("state_code", FieldValue::Integer(i64::from(state.code)))
        .field("state_text", FieldValue::Text(state.label.clone()))
}

/// 单条记录转换为数据点；无效记录不写入
pub fn record_point(
    record: &ValueRecord,
    device: &DeviceInfo,
    timestamp_s: i64,
) -> Option<MetricPoint> {
    if !record.decoded {
        return None;
    }
    let descriptor = &record.descriptor;
    let mut point = base_point(descriptor.class.measurement(), device, timestamp_s)
        .tag("name", descriptor.display_name.as_str())
        .tag("mpl", descriptor.mpl_code.to_string())
        .field("raw_value", FieldValue::Integer(record.raw_value));

    if let Some(display) = &record.display {
        point = point.field("display", FieldValue::Text(display.clone()));
    }

    match descriptor.class {
        RegisterClass::AnalogInput => {
            point = point.field("status", FieldValue::Integer(i64::from(record.status_word)));
            if let Some(value) = record.scaled_value {
                point = point.field("value", FieldValue::Float(value));
            }
        }
        RegisterClass::Counter => {
            if let Some(value) = record.scaled_value {
                point = point.field("value", FieldValue::Float(value));
            }
        }
        RegisterClass::DigitalInput | RegisterClass::DigitalOutput => {
            if let Some(value) = record.scaled_value {
                point = point.field("value", FieldValue::Integer(value as i64));
            }
        }
        RegisterClass::Converter => {
            if let Some(rpm) = record.scaled_value {
                point = point.field("rpm", FieldValue::Float(rpm));
            }
            if let Some(amps) = record.companion_value {
                point = point.field("amps", FieldValue::Float(amps));
            }
            if let Some(flow) = record.shared_value {
                point = point.field("flow_percent", FieldValue::Float(flow));
            }
        }
        RegisterClass::SpecialProtection => {
            if let Some(active) = record.scaled_value {
                point = point.field("active", FieldValue::Integer(active as i64));
            }
        }
    }

    Some(point)
}

pub fn record_points(
    records: &[ValueRecord],
    device: &DeviceInfo,
    timestamp_s: i64,
) -> Vec<MetricPoint> {
    records
        .iter()
        .filter_map(|record| record_point(record, device, timestamp_s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{ClassAttribute, HalfWords, LabelResolver, RegisterDescriptor, ValueKind};
    use mkv_labels::LabelTable;
    use mkv_normalize::Formatter;
    use std::sync::Arc;

    fn converter_record() -> ValueRecord {
        let descriptor = RegisterDescriptor {
            class: RegisterClass::Converter,
            address: 0x2681,
            mpl_code: 0,
            attribute: ClassAttribute::Converter {
                converter_type: 1,
                device_type: 3,
            },
            running_index: 1,
            display_name: "Main Motor".to_string(),
            kind: ValueKind::ConverterSpeed,
            precision: 0,
        };
        let mut record = ValueRecord::new(descriptor, 1500, 0);
        record.shared_word = Some(HalfWords { high: 60, low: 0 });
        record.companion_raw = Some(48);
        record
    }

    fn formatter() -> Formatter {
        let labels: Arc<dyn LabelResolver> = Arc::new(LabelTable::english());
        Formatter::new(labels)
    }

    fn digital_record(raw_value: i64) -> ValueRecord {
        let descriptor = RegisterDescriptor {
            class: RegisterClass::DigitalInput,
            address: 0x20B2,
            mpl_code: 2100,
            attribute: ClassAttribute::None,
            running_index: 1,
            display_name: "Emergency Stop".to_string(),
            kind: ValueKind::Digital,
            precision: 0,
        };
        ValueRecord::new(descriptor, raw_value, 0)
    }

    #[test]
    fn converter_point_carries_rpm_and_flow() {
        let device = DeviceInfo::new("GA 30 VSD", "API123");
        let record = formatter().format(converter_record());
        let point = record_point(&record, &device, 10).expect("point");
        assert_eq!(point.measurement, "converters");
        assert_eq!(point.tags.get("device").map(String::as_str), Some("API123"));
        assert_eq!(point.tags.get("name").map(String::as_str), Some("Main Motor"));
        assert_eq!(point.fields.get("rpm"), Some(&FieldValue::Float(1500.0)));
        assert_eq!(point.fields.get("amps"), Some(&FieldValue::Float(48.0)));
        assert_eq!(point.fields.get("flow_percent"), Some(&FieldValue::Float(60.0)));
    }

    #[test]
    fn sensor_error_never_becomes_a_numeric_field() {
        let device = DeviceInfo::default();
        let formatter = formatter();

        let mut converter = converter_record();
        converter.raw_value = 32_767;
        converter.companion_raw = Some(32_767);
        let converter = formatter.format(converter);
        assert_eq!(converter.display.as_deref(), Some("Sensor Error"));
        let point = record_point(&converter, &device, 10).expect("converter point");
        assert!(point.fields.get("rpm").is_none());
        assert!(point.fields.get("amps").is_none());
        assert_eq!(
            point.fields.get("display"),
            Some(&FieldValue::Text("Sensor Error".to_string()))
        );

        let digital = formatter.format(digital_record(32_767));
        let point = record_point(&digital, &device, 10).expect("digital point");
        assert!(point.fields.get("value").is_none());

        let mut protection = digital_record(32_767);
        protection.descriptor.class = RegisterClass::SpecialProtection;
        protection.descriptor.kind = ValueKind::Protection;
        let point =
            record_point(&formatter.format(protection), &device, 10).expect("protection point");
        assert!(point.fields.get("active").is_none());
    }

    #[test]
    fn digital_and_protection_values_come_from_scaling() {
        let device = DeviceInfo::default();
        let formatter = formatter();

        let digital = formatter.format(digital_record(1));
        let point = record_point(&digital, &device, 10).expect("digital point");
        assert_eq!(point.fields.get("value"), Some(&FieldValue::Integer(1)));

        let mut protection = digital_record(4);
        protection.descriptor.class = RegisterClass::SpecialProtection;
        protection.descriptor.kind = ValueKind::Protection;
        let point =
            record_point(&formatter.format(protection), &device, 10).expect("protection point");
        assert_eq!(point.fields.get("active"), Some(&FieldValue::Integer(1)));
    }

    #[test]
    fn undecoded_record_is_skipped() {
        let record = ValueRecord::undecoded(converter_record().descriptor);
        assert!(record_point(&record, &DeviceInfo::default(), 10).is_none());
    }
}
