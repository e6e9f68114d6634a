//! InfluxDB 行协议写入
//!
//! ## 配置格式
//!
//! ```json
//! // v2
//! { "url": "http://localhost:8086", "org": "plant", "bucket": "compressors", "token": "..." }
//!
//! // v1
//! { "url": "http://localhost:8086", "version": 1, "bucket": "compressors" }
//! ```

use crate::error::SinkError;
use crate::point::MetricPoint;
use crate::traits::MetricsSink;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// InfluxDB 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluxConfig {
    pub url: String,
    /// 1 或 2
    #[serde(default = "default_version")]
    pub version: u8,
    #[serde(default)]
    pub org: String,
    /// v1 下作为数据库名
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_version() -> u8 {
    2
}

fn default_timeout() -> u64 {
    5_000
}

impl InfluxConfig {
    pub fn from_json(json: &str) -> Result<Self, SinkError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SinkError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SinkError> {
        if self.url.trim().is_empty() {
            return Err(SinkError::Config("url is empty".to_string()));
        }
        if self.bucket.trim().is_empty() {
            return Err(SinkError::Config("bucket is empty".to_string()));
        }
        match self.version {
            1 => Ok(()),
            2 if self.org.trim().is_empty() => {
                Err(SinkError::Config("org is required for version 2".to_string()))
            }
            2 => Ok(()),
            other => Err(SinkError::Config(format!("unsupported version {}", other))),
        }
    }

    /// 写入端点（不含查询参数）
    pub fn write_endpoint(&self) -> String {
        let base = self.url.trim_end_matches('/');
        if self.version == 1 {
            format!("{}/write", base)
        } else {
            format!("{}/api/v2/write", base)
        }
    }

    fn query(&self) -> Vec<(&'static str, &str)> {
        if self.version == 1 {
            vec![("db", self.bucket.as_str()), ("precision", "s")]
        } else {
            vec![
                ("org", self.org.as_str()),
                ("bucket", self.bucket.as_str()),
                ("precision", "s"),
            ]
        }
    }
}

/// InfluxDB 写入客户端
#[derive(Clone)]
pub struct InfluxSink {
    config: InfluxConfig,
    client: reqwest::Client,
}

impl InfluxSink {
    pub fn new(config: InfluxConfig) -> Result<Self, SinkError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SinkError::Config(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &InfluxConfig {
        &self.config
    }

    async fn post(&self, body: String, lines: usize) -> Result<(), SinkError> {
        let mut request = self
            .client
            .post(self.config.write_endpoint())
            .query(&self.config.query())
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body);
        if self.config.version == 2
            && let Some(token) = &self.config.token
        {
            request = request.header("Authorization", format!("Token {}", token));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(target: "mkv.sink", lines, "points written");
        Ok(())
    }
}

#[async_trait]
impl MetricsSink for InfluxSink {
    async fn write(&self, point: &MetricPoint) -> Result<(), SinkError> {
        match point.to_line_protocol() {
            Some(line) => self.post(line, 1).await,
            None => Ok(()),
        }
    }

    /// 整批合并为一次请求
    async fn write_batch(&self, points: &[MetricPoint]) -> Result<usize, SinkError> {
        let lines: Vec<String> = points.iter().filter_map(MetricPoint::to_line_protocol).collect();
        if lines.is_empty() {
            return Ok(0);
        }
        let count = lines.len();
        self.post(lines.join("\n"), count).await?;
        Ok(count)
    }
}
