//! 写入错误类型定义

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// 请求未能发出或未收到响应
    #[error("http error: {0}")]
    Http(String),

    /// 服务端拒绝写入
    #[error("write rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    /// 配置错误
    #[error("invalid sink config: {0}")]
    Config(String),

    /// 内存实现加锁失败
    #[error("lock failed")]
    Lock,
}

impl From<reqwest::Error> for SinkError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
