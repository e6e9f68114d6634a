//! 协议错误类型定义

/// 协议通信错误
///
/// 仅在传输层与配置加载时产生；轮询路径上会被降级为空响应。
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// 连接错误
    #[error("connection error: {0}")]
    Connection(String),

    /// 超时错误
    #[error("timeout: {0}")]
    Timeout(String),

    /// 非 2xx 响应
    #[error("unexpected http status: {0}")]
    Status(u16),

    /// 配置解析错误
    #[error("config parse error: {0}")]
    ConfigParse(String),
}

impl From<reqwest::Error> for ProtocolError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Connection(err.to_string())
        }
    }
}
