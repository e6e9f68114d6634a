use domain::{CounterUnit, HalfWords, LabelCategory, LabelResolver, ValueKind, ValueRecord};
use std::cmp::Ordering;
use std::sync::Arc;

/// 16 位传感器故障哨兵值。
pub const SENSOR_ERROR_RAW: i64 = 32_767;

/// 压力切换到 mbar 解释的阈值。
const PRESSURE_MBAR_THRESHOLD: i64 = 2_000;

/// 数字量中使用压力设定表的 MPL 代码。
const PRESSURE_SETTING_MPL: u16 = 2124;

/// 缩放结果：数值（可缺省）与显示文本。
#[derive(Debug, Clone, PartialEq)]
pub struct Scaled {
    pub value: Option<f64>,
    pub display: String,
}

/// 固定精度格式化后去掉末尾的 0 与小数点。
pub fn format_number(value: f64, precision: u8) -> String {
    let text = format!("{:.*}", usize::from(precision), value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

pub fn scale_temperature(raw: i64) -> f64 {
    raw as f64 / 10.0
}

/// |raw| ≥ 2000 视为 mbar，否则为 0.1 bar。
pub fn scale_pressure(raw: i64) -> f64 {
    if raw.abs() >= PRESSURE_MBAR_THRESHOLD {
        raw as f64 / 1000.0
    } else {
        raw as f64 / 10.0
    }
}

pub fn scale_humidity(raw: i64) -> f64 {
    let magnitude = raw.abs();
    if magnitude > 1000 {
        raw as f64 / 100.0
    } else if magnitude > 100 {
        raw as f64 / 10.0
    } else {
        raw as f64
    }
}

/// 变频器流量：优先高半字，为 0 时取低半字；超过 200 按百分之一解释并保留一位小数。
///
/// 阈值来自现场经验，没有文档依据。
pub fn scale_flow(word: HalfWords) -> f64 {
    let raw = if word.high != 0 { word.high } else { word.low };
    if raw > 200 {
        round_hundredths_to_tenth(raw)
    } else {
        f64::from(raw)
    }
}

/// `raw / 100` 保留一位小数，结果与对浮点商做十进制舍入一致：
/// 末位恰为 5 时按浮点商相对真值的误差方向取舍，商可精确表示时取偶。
fn round_hundredths_to_tenth(raw: u16) -> f64 {
    let tenths = u32::from(raw) / 10;
    let round_up = match (raw % 10).cmp(&5) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => match quotient_error(raw) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => tenths % 2 == 1,
        },
    };
    f64::from(tenths + u32::from(round_up)) / 10.0
}

/// 浮点 `raw / 100.0` 与真值的大小关系；仅用于 raw ≥ 200，此时商乘 2^51 为整数
fn quotient_error(raw: u16) -> Ordering {
    const SHIFT: u32 = 51;
    let quotient = f64::from(raw) / 100.0;
    let scaled = (quotient * (1u64 << SHIFT) as f64) as u128;
    (scaled * 100).cmp(&(u128::from(raw) << SHIFT))
}

fn is_sixteen_bit(kind: ValueKind) -> bool {
    !matches!(kind, ValueKind::Counter(_))
}

/// 格式化器：纯函数，标签通过注入的解析服务获取。
#[derive(Clone)]
pub struct Formatter {
    labels: Arc<dyn LabelResolver>,
}

impl Formatter {
    pub fn new(labels: Arc<dyn LabelResolver>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &dyn LabelResolver {
        self.labels.as_ref()
    }

    /// 按值类型缩放并生成显示文本。
    pub fn scale(&self, raw: i64, kind: ValueKind, precision: u8, mpl_code: u16) -> Scaled {
        if raw == SENSOR_ERROR_RAW && is_sixteen_bit(kind) {
            return Scaled {
                value: None,
                display: self.labels.resolve(LabelCategory::SensorError, 1),
            };
        }

        match kind {
            ValueKind::Temperature => measured(scale_temperature(raw), precision, "°C"),
            ValueKind::Pressure => measured(scale_pressure(raw), precision, "bar"),
            ValueKind::Humidity => measured(scale_humidity(raw), precision, "%"),
            ValueKind::Raw => Scaled {
                value: Some(raw as f64),
                display: raw.to_string(),
            },
            ValueKind::Counter(unit) => self.counter(raw, unit),
            ValueKind::Digital => {
                let category = if mpl_code == PRESSURE_SETTING_MPL {
                    LabelCategory::PressureSetting
                } else {
                    LabelCategory::DigitalState
                };
                Scaled {
                    value: Some(raw as f64),
                    display: self.labels.resolve(category, label_code(raw)),
                }
            }
            ValueKind::ConverterSpeed => Scaled {
                value: Some(raw as f64),
                display: format!("{} rpm", raw),
            },
            ValueKind::Protection => {
                let active = raw != 0;
                Scaled {
                    value: Some(if active { 1.0 } else { 0.0 }),
                    display: if active { "Active" } else { "Normal" }.to_string(),
                }
            }
        }
    }

    fn counter(&self, raw: i64, unit: CounterUnit) -> Scaled {
        match unit {
            CounterUnit::Hours => {
                let hours = raw / 3600;
                let unit_code = if hours == 1 { 2 } else { 1 };
                Scaled {
                    value: Some(hours as f64),
                    display: format!(
                        "{} {}",
                        hours,
                        self.labels.resolve(LabelCategory::HourUnit, unit_code)
                    ),
                }
            }
            CounterUnit::Count => Scaled {
                value: Some(raw as f64),
                display: raw.to_string(),
            },
            CounterUnit::Volume => Scaled {
                value: Some(raw as f64),
                display: format!("{} m3", raw),
            },
            CounterUnit::Percent => Scaled {
                value: Some(raw as f64),
                display: format!("{} %", raw),
            },
        }
    }

    /// 填写取值记录的缩放字段；无效记录原样返回。
    pub fn format(&self, mut record: ValueRecord) -> ValueRecord {
        if !record.decoded {
            return record;
        }
        let descriptor = &record.descriptor;
        let scaled = self.scale(
            record.raw_value,
            descriptor.kind,
            descriptor.precision,
            descriptor.mpl_code,
        );
        record.scaled_value = scaled.value;
        record.display = Some(scaled.display);
        record.shared_value = record.shared_word.map(scale_flow);
        record.companion_value = record
            .companion_raw
            .filter(|raw| *raw != SENSOR_ERROR_RAW)
            .map(|raw| raw as f64);
        record
    }

    pub fn format_all(&self, records: Vec<ValueRecord>) -> Vec<ValueRecord> {
        records.into_iter().map(|record| self.format(record)).collect()
    }
}

fn measured(value: f64, precision: u8, unit: &str) -> Scaled {
    Scaled {
        value: Some(value),
        display: format!("{} {}", format_number(value, precision), unit),
    }
}

fn label_code(raw: i64) -> u32 {
    u32::try_from(raw).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_strips_trailing_zeros() {
        assert_eq!(format_number(1.0, 1), "1");
        assert_eq!(format_number(2.5, 1), "2.5");
        assert_eq!(format_number(15.0, 2), "15");
        assert_eq!(format_number(42.0, 0), "42");
        assert_eq!(format_number(-3.40, 1), "-3.4");
    }

    #[test]
    fn pressure_switches_at_threshold() {
        assert_eq!(scale_pressure(2500), 2.5);
        assert_eq!(scale_pressure(150), 15.0);
        assert_eq!(scale_pressure(2000), 2.0);
        assert_eq!(scale_pressure(1999), 199.9);
        assert_eq!(scale_pressure(-2000), -2.0);
        assert_eq!(scale_pressure(5), 0.5);
    }

    #[test]
    fn humidity_bands() {
        assert_eq!(scale_humidity(1500), 15.0);
        assert_eq!(scale_humidity(500), 50.0);
        assert_eq!(scale_humidity(50), 50.0);
        assert_eq!(scale_humidity(1000), 100.0);
        assert_eq!(scale_humidity(100), 100.0);
    }

    #[test]
    fn flow_heuristic_boundaries() {
        assert_eq!(scale_flow(HalfWords { high: 200, low: 0 }), 200.0);
        assert_eq!(scale_flow(HalfWords { high: 201, low: 0 }), 2.0);
        assert_eq!(scale_flow(HalfWords { high: 12_345, low: 0 }), 123.5);
        assert_eq!(scale_flow(HalfWords { high: 0, low: 75 }), 75.0);
        assert_eq!(scale_flow(HalfWords { high: 0, low: 0 }), 0.0);
    }

    #[test]
    fn flow_half_tenths_follow_float_quotient() {
        // 2.05 与 2.15 的浮点商略小于真值，向下
        assert_eq!(scale_flow(HalfWords { high: 205, low: 0 }), 2.0);
        assert_eq!(scale_flow(HalfWords { high: 215, low: 0 }), 2.1);
        // 2.25 可精确表示，取偶
        assert_eq!(scale_flow(HalfWords { high: 225, low: 0 }), 2.2);
        assert_eq!(scale_flow(HalfWords { high: 275, low: 0 }), 2.8);
        // 2.35 的浮点商略大于真值，向上
        assert_eq!(scale_flow(HalfWords { high: 235, low: 0 }), 2.4);
        assert_eq!(scale_flow(HalfWords { high: 0, low: 209 }), 2.1);
    }
}
