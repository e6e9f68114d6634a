//! 时序数据点与行协议序列化

use std::collections::BTreeMap;

/// 字段值
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(i64),
    Text(String),
}

impl FieldValue {
    /// 转换为行协议中的值
    pub fn to_line_protocol(&self) -> String {
        match self {
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Integer(i) => format!("{}i", i),
            FieldValue::Text(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        }
    }

    fn is_writable(&self) -> bool {
        match self {
            FieldValue::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

/// 键名清洗：空格、逗号、等号替换为 `_`，去掉 `%`
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '%')
        .map(|c| match c {
            ' ' | ',' | '=' => '_',
            other => other,
        })
        .collect()
}

/// 单个数据点；标签与字段按键排序，输出稳定
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetricPoint {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldValue>,
    /// 秒级时间戳；缺省时由服务端赋值
    pub timestamp_s: Option<i64>,
}

impl MetricPoint {
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            ..Self::default()
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn at(mut self, timestamp_s: i64) -> Self {
        self.timestamp_s = Some(timestamp_s);
        self
    }

    /// 转换为行协议；没有可写字段时返回 `None`
    pub fn to_line_protocol(&self) -> Option<String> {
        let fields: Vec<String> = self
            .fields
            .iter()
            .filter(|(_, value)| value.is_writable())
            .map(|(k, v)| format!("{}={}", sanitize_key(k), v.to_line_protocol()))
            .collect();
        if fields.is_empty() {
            return None;
        }

        let mut line = sanitize_key(&self.measurement);
        for (key, value) in &self.tags {
            let value = sanitize_key(value);
            if value.is_empty() {
                continue;
            }
            line.push(',');
            line.push_str(&sanitize_key(key));
            line.push('=');
            line.push_str(&value);
        }
        line.push(' ');
        line.push_str(&fields.join(","));
        if let Some(ts) = self.timestamp_s {
            line.push(' ');
            line.push_str(&ts.to_string());
        }
        Some(line)
    }
}
