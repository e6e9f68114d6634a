/// 轮询任务错误。
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    #[error("poll interval must be greater than zero")]
    InvalidInterval,
    #[error("poller task failed: {0}")]
    Join(String),
}
