//! # 时序写入能力模块
//!
//! - **InfluxSink**：InfluxDB v1/v2 行协议写入
//! - **InMemorySink**：测试用内存实现
//! - **NoopSink**：未配置时序库时的空实现
//!
//! 键名（measurement、标签、字段）写入前统一清洗，见 [`sanitize_key`]。

mod error;
mod in_memory;
mod influx;
mod point;
mod traits;

pub use error::SinkError;
pub use in_memory::{InMemorySink, NoopSink};
pub use influx::{InfluxConfig, InfluxSink};
pub use point::{FieldValue, MetricPoint, sanitize_key};
pub use traits::MetricsSink;
