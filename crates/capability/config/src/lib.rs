//! 应用运行配置加载。

use domain::RegisterClass;
use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 寄存器描述来源。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// 每个周期重新扫描地址范围
    Dynamic,
    /// 使用固定描述表
    Static,
}

/// InfluxDB 目标。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluxSettings {
    pub url: String,
    pub version: u8,
    pub org: String,
    pub bucket: String,
    pub token: Option<String>,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub device_host: String,
    pub device_path: String,
    pub request_timeout_ms: u64,
    pub max_queries_per_request: usize,
    pub poll_interval_seconds: u64,
    pub discovery_mode: DiscoveryMode,
    /// 静态描述表 JSON 文件；未设置时使用内置模拟量表
    pub static_descriptors_path: Option<String>,
    /// 标签覆盖 JSON 文件
    pub label_overrides_path: Option<String>,
    pub classes: Vec<RegisterClass>,
    pub report_on_start: bool,
    pub device_model: String,
    pub device_serial: String,
    pub influx: Option<InfluxSettings>,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let device_host = read_optional("MKV_DEVICE_HOST")
            .ok_or_else(|| ConfigError::Missing("MKV_DEVICE_HOST".to_string()))?;
        let device_path =
            env::var("MKV_DEVICE_PATH").unwrap_or_else(|_| "/cgi-bin/mkv.cgi".to_string());
        let request_timeout_ms = read_positive_u64("MKV_REQUEST_TIMEOUT_MS", 20_000)?;
        let max_queries_per_request =
            read_positive_u64("MKV_MAX_QUERIES_PER_REQUEST", 1_000)? as usize;
        let poll_interval_seconds = read_positive_u64("MKV_POLL_INTERVAL_SECONDS", 5)?;
        let discovery_mode = match read_optional("MKV_DISCOVERY_MODE") {
            Some(value) => parse_discovery_mode(&value)?,
            None => DiscoveryMode::Dynamic,
        };
        let static_descriptors_path = read_optional("MKV_STATIC_DESCRIPTORS");
        let label_overrides_path = read_optional("MKV_LABEL_OVERRIDES");
        let classes = match read_optional("MKV_CLASSES") {
            Some(value) => parse_classes(&value)?,
            None => RegisterClass::ALL.to_vec(),
        };
        let report_on_start = read_bool_with_default("MKV_REPORT_ON_START", false);
        let device_model =
            read_optional("MKV_DEVICE_MODEL").unwrap_or_else(|| "unknown".to_string());
        let device_serial =
            read_optional("MKV_DEVICE_SERIAL").unwrap_or_else(|| "unknown".to_string());
        let influx = match read_optional("MKV_INFLUX_URL") {
            Some(url) => Some(InfluxSettings {
                url,
                version: read_u8_with_default("MKV_INFLUX_VERSION", 2)?,
                org: env::var("MKV_INFLUX_ORG").unwrap_or_default(),
                bucket: read_optional("MKV_INFLUX_BUCKET")
                    .ok_or_else(|| ConfigError::Missing("MKV_INFLUX_BUCKET".to_string()))?,
                token: read_optional("MKV_INFLUX_TOKEN"),
            }),
            None => None,
        };

        Ok(Self {
            device_host,
            device_path,
            request_timeout_ms,
            max_queries_per_request,
            poll_interval_seconds,
            discovery_mode,
            static_descriptors_path,
            label_overrides_path,
            classes,
            report_on_start,
            device_model,
            device_serial,
            influx,
        })
    }
}

/// 解析 `dynamic` / `static`（忽略大小写）。
pub fn parse_discovery_mode(value: &str) -> Result<DiscoveryMode, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "dynamic" => Ok(DiscoveryMode::Dynamic),
        "static" => Ok(DiscoveryMode::Static),
        _ => Err(ConfigError::Invalid(
            "MKV_DISCOVERY_MODE".to_string(),
            value.to_string(),
        )),
    }
}

/// 解析逗号分隔的类别列表，去重并保持顺序。
pub fn parse_classes(value: &str) -> Result<Vec<RegisterClass>, ConfigError> {
    let mut classes = Vec::new();
    for item in value.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let class = item
            .parse::<RegisterClass>()
            .map_err(|_| ConfigError::Invalid("MKV_CLASSES".to_string(), item.to_string()))?;
        if !classes.contains(&class) {
            classes.push(class);
        }
    }
    if classes.is_empty() {
        return Err(ConfigError::Invalid(
            "MKV_CLASSES".to_string(),
            value.to_string(),
        ));
    }
    Ok(classes)
}

fn read_u8_with_default(key: &str, default: u8) -> Result<u8, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u8>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_positive_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = read_u64_with_default(key, default)?;
    if value == 0 {
        return Err(ConfigError::Invalid(key.to_string(), "0".to_string()));
    }
    Ok(value)
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn read_bool_with_default(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "on"),
        Err(_) => default,
    }
}
