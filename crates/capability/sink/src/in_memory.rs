//! 内存与空写入实现
//!
//! 仅用于本地测试和占位。

use crate::error::SinkError;
use crate::point::MetricPoint;
use crate::traits::MetricsSink;
use async_trait::async_trait;
use std::sync::RwLock;

/// 内存写入：保存全部数据点
#[derive(Default)]
pub struct InMemorySink {
    points: RwLock<Vec<MetricPoint>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前累计的数据点（用于测试）
    pub fn points(&self) -> Vec<MetricPoint> {
        self.points.read().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.points.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按 measurement 过滤
    pub fn measurement(&self, name: &str) -> Vec<MetricPoint> {
        self.points()
            .into_iter()
            .filter(|point| point.measurement == name)
            .collect()
    }
}

#[async_trait]
impl MetricsSink for InMemorySink {
    async fn write(&self, point: &MetricPoint) -> Result<(), SinkError> {
        let mut points = self.points.write().map_err(|_| SinkError::Lock)?;
        points.push(point.clone());
        Ok(())
    }

    async fn write_batch(&self, batch: &[MetricPoint]) -> Result<usize, SinkError> {
        let mut points = self.points.write().map_err(|_| SinkError::Lock)?;
        points.extend(batch.iter().cloned());
        Ok(batch.len())
    }
}

/// 空写入：未配置时序库时使用
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

#[async_trait]
impl MetricsSink for NoopSink {
    async fn write(&self, _point: &MetricPoint) -> Result<(), SinkError> {
        Ok(())
    }

    async fn write_batch(&self, batch: &[MetricPoint]) -> Result<usize, SinkError> {
        Ok(batch.len())
    }
}
