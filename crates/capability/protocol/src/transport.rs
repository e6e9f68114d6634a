//! HTTP 传输与分块问答会话
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let transport = HttpTransport::new(HttpTransportConfig::new("192.168.0.100"))?;
//! let session = Session::new(Arc::new(transport), 1000);
//! let words = session.exchange(&[RegisterQuery::new(0x3001, 8)]).await;
//! ```

use crate::codec::{align_chunk, clean_response, decode_response, encode_queries};
use crate::error::ProtocolError;
use crate::word::DecodedWord;
use async_trait::async_trait;
use domain::RegisterQuery;
use mkv_telemetry::{record_transport_failure, record_transport_request, record_undecoded_blocks};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// 发送一个问答报文，返回控制器响应文本
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, packet: &str) -> Result<String, ProtocolError>;
}

/// HTTP 传输配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    /// 控制器主机（可带端口或 `http://` 前缀）
    pub host: String,
    /// CGI 路径
    #[serde(default = "default_path")]
    pub path: String,
    /// 单次请求超时（毫秒）
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
}

fn default_path() -> String {
    "/cgi-bin/mkv.cgi".to_string()
}

fn default_timeout() -> u64 {
    20_000
}

impl HttpTransportConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: default_path(),
            timeout_ms: default_timeout(),
        }
    }

    /// 完整请求地址
    pub fn url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}{}", host, path)
        } else {
            format!("http://{}{}", host, path)
        }
    }
}

/// 通过表单字段 `QUESTION` 提交报文的 HTTP 传输
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self, ProtocolError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ProtocolError::ConfigParse(e.to_string()))?;
        Ok(Self {
            client,
            url: config.url(),
        })
    }

    /// 从 JSON 配置字符串解析
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        let config: HttpTransportConfig =
            serde_json::from_str(json).map_err(|e| ProtocolError::ConfigParse(e.to_string()))?;
        Self::new(config)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, packet: &str) -> Result<String, ProtocolError> {
        let response = self
            .client
            .post(&self.url)
            .form(&[("QUESTION", packet)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// 问答会话：分块发送、按序拼接、失败降级
#[derive(Clone)]
pub struct Session {
    transport: Arc<dyn Transport>,
    max_queries_per_request: usize,
}

impl Session {
    pub fn new(transport: Arc<dyn Transport>, max_queries_per_request: usize) -> Self {
        Self {
            transport,
            max_queries_per_request: max_queries_per_request.max(1),
        }
    }

    pub fn max_queries_per_request(&self) -> usize {
        self.max_queries_per_request
    }

    /// 发送查询并返回按分块顺序拼接的响应
    ///
    /// 空查询不发起传输；任一分块失败时整体返回空串。
    pub async fn ask(&self, queries: &[RegisterQuery]) -> String {
        if queries.is_empty() {
            return String::new();
        }

        let mut response = String::with_capacity(queries.len() * crate::word::BLOCK_LEN);
        for (chunk_index, chunk) in queries.chunks(self.max_queries_per_request).enumerate() {
            let packet = encode_queries(chunk);
            record_transport_request();
            match self.transport.send(&packet).await {
                Ok(text) => {
                    let text = clean_response(&text);
                    debug!(
                        target: "mkv.protocol",
                        chunk = chunk_index,
                        queries = chunk.len(),
                        response_len = text.len(),
                        "question answered"
                    );
                    response.push_str(&align_chunk(&text, chunk.len()));
                }
                Err(e) => {
                    record_transport_failure();
                    warn!(
                        target: "mkv.protocol",
                        chunk = chunk_index,
                        queries = chunk.len(),
                        error = %e,
                        "question failed"
                    );
                    return String::new();
                }
            }
        }
        response
    }

    /// 发送查询并按位置解码，结果数量恒等于查询数量
    pub async fn exchange(&self, queries: &[RegisterQuery]) -> Vec<DecodedWord> {
        let response = self.ask(queries).await;
        let words = decode_response(&response, queries.len());
        let undecoded = words.iter().filter(|word| !word.decoded).count();
        record_undecoded_blocks(undecoded as u64);
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{"host": "10.4.5.168"}"#;
        let config: HttpTransportConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.path, "/cgi-bin/mkv.cgi");
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.url(), "http://10.4.5.168/cgi-bin/mkv.cgi");
    }

    #[test]
    fn test_url_keeps_scheme() {
        let mut config = HttpTransportConfig::new("http://127.0.0.1:8080/");
        config.path = "cgi-bin/mkv.cgi".to_string();
        assert_eq!(config.url(), "http://127.0.0.1:8080/cgi-bin/mkv.cgi");
    }

    #[test]
    fn test_from_json_rejects_missing_host() {
        assert!(matches!(
            HttpTransport::from_json(r#"{"path": "/x"}"#),
            Err(ProtocolError::ConfigParse(_))
        ));
    }
}
