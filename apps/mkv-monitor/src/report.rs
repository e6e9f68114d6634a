//! 启动时的控制台状态报告。

use domain::{DeviceInfo, LabelCategory, LabelResolver, RegisterClass, ValueRecord};
use mkv_normalize::format_number;
use mkv_pipeline::Snapshot;
use std::fmt::Write;

const RULE_WIDTH: usize = 70;

fn section_title_code(class: RegisterClass) -> u32 {
    match class {
        RegisterClass::AnalogInput => 1,
        RegisterClass::Counter => 3,
        RegisterClass::Converter => 4,
        RegisterClass::DigitalInput => 6,
        RegisterClass::DigitalOutput => 7,
        RegisterClass::SpecialProtection => 8,
    }
}

/// 渲染快照；只列出有效记录
pub fn render(device: &DeviceInfo, snapshot: &Snapshot, labels: &dyn LabelResolver) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "COMPRESSOR CONTROLLER - DETAILED STATUS REPORT");
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "\nDEVICE:");
    let _ = writeln!(out, "  Model: {}", device.model);
    let _ = writeln!(out, "  Serial: {}", device.serial);

    let state = &snapshot.machine_state;
    let _ = writeln!(out, "\n{}:", labels.resolve(LabelCategory::SectionTitle, 5));
    let _ = writeln!(out, "  {}", state.label);
    let _ = writeln!(out, "  (code: {} [0x{:04X}])", state.code, state.code);

    for section in &snapshot.classes {
        let title = labels.resolve(LabelCategory::SectionTitle, section_title_code(section.class));
        let _ = writeln!(out, "\n{title}:");
        let records: Vec<&ValueRecord> = section.decoded().collect();
        if records.is_empty() {
            let _ = writeln!(out, "  No {} data", title.to_lowercase());
            continue;
        }
        for record in records {
            write_record(&mut out, record);
        }
    }

    let _ = write!(out, "\n{rule}");
    out
}

fn write_record(out: &mut String, record: &ValueRecord) {
    let name = &record.descriptor.display_name;
    let display = record.display.as_deref().unwrap_or("-");
    match record.descriptor.class {
        RegisterClass::SpecialProtection => {
            let _ = writeln!(out, "  {display:15} {name}");
        }
        RegisterClass::Converter => {
            let _ = writeln!(out, "  {name:30} {display}");
            if let Some(amps) = record.companion_value {
                let _ = writeln!(out, "    current: {} A", format_number(amps, 1));
            }
            if let Some(flow) = record.shared_value {
                let _ = writeln!(out, "    flow: {} %", format_number(flow, 1));
            }
        }
        _ => {
            let _ = writeln!(out, "  {name:30} {display}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{
        ClassAttribute, HalfWords, MachineState, RegisterDescriptor, ValueKind, ValueRecord,
    };
    use mkv_labels::LabelTable;
    use mkv_pipeline::ClassSnapshot;

    fn record(class: RegisterClass, name: &str, display: &str) -> ValueRecord {
        let descriptor = RegisterDescriptor {
            class,
            address: 0,
            mpl_code: 0,
            attribute: ClassAttribute::None,
            running_index: 1,
            display_name: name.to_string(),
            kind: ValueKind::Raw,
            precision: 1,
        };
        let mut record = ValueRecord::new(descriptor, 0, 0);
        record.display = Some(display.to_string());
        record
    }

    #[test]
    fn report_lists_sections_and_empty_markers() {
        let mut converter = record(RegisterClass::Converter, "Neos", "1500 rpm");
        converter.shared_word = Some(HalfWords { high: 95, low: 0 });
        converter.shared_value = Some(95.0);
        converter.companion_value = Some(48.0);
        let snapshot = Snapshot {
            machine_state: MachineState {
                code: 28,
                label: "Load".to_string(),
            },
            classes: vec![
                ClassSnapshot {
                    class: RegisterClass::AnalogInput,
                    records: vec![record(
                        RegisterClass::AnalogInput,
                        "Compressor Outlet",
                        "7.2 bar",
                    )],
                },
                ClassSnapshot {
                    class: RegisterClass::Converter,
                    records: vec![converter],
                },
                ClassSnapshot {
                    class: RegisterClass::SpecialProtection,
                    records: vec![record(
                        RegisterClass::SpecialProtection,
                        "Motor Overload",
                        "Normal",
                    )],
                },
                ClassSnapshot {
                    class: RegisterClass::DigitalOutput,
                    records: vec![ValueRecord::undecoded(
                        record(RegisterClass::DigitalOutput, "Fan", "On").descriptor,
                    )],
                },
            ],
        };

        let text = render(
            &DeviceInfo::new("GA 30 VSD", "API123456"),
            &snapshot,
            &LabelTable::english(),
        );

        assert!(text.contains("  Serial: API123456"));
        assert!(text.contains("\nInfo:\n  Load\n  (code: 28 [0x001C])"));
        assert!(text.contains(&format!("  {:30} 7.2 bar", "Compressor Outlet")));
        assert!(text.contains("1500 rpm\n    current: 48 A\n    flow: 95 %"));
        assert!(text.contains(&format!("  {:15} Motor Overload", "Normal")));
        assert!(text.contains("Digital Outputs:\n  No digital outputs data"));
    }
}
