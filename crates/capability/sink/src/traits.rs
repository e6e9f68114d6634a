use crate::error::SinkError;
use crate::point::MetricPoint;
use async_trait::async_trait;

/// 时序写入接口
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// 写入单个数据点
    async fn write(&self, point: &MetricPoint) -> Result<(), SinkError>;

    /// 批量写入，返回写入的数据点数量
    async fn write_batch(&self, points: &[MetricPoint]) -> Result<usize, SinkError> {
        for point in points {
            self.write(point).await?;
        }
        Ok(points.len())
    }
}
