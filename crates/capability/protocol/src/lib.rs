//! # MkV 协议引擎
//!
//! 控制器通过 HTTP 表单字段 `QUESTION` 接收十六进制问答报文：
//! - **查询编码**：`IIIISS`（4 位索引 + 2 位子索引）依次拼接
//! - **响应拆分**：每个查询对应 8 个十六进制字符，只靠位置对应
//! - **寄存器发现**：扫描各类别地址范围，按扫描顺序分配连续运行索引
//! - **取值**：按运行索引批量读取，逐块对应回描述
//!
//! ## 架构设计
//!
//! ```text
//! DescriptorSource (DynamicDiscovery | StaticDescriptors)
//!       │ Vec<RegisterDescriptor>
//!       ▼
//! ValueFetcher ──┐
//!                ├── Session (分块 / 对齐 / 失败降级)
//! MachineStateReader ┘       │
//!                            ▼
//!                     Transport (HttpTransport | InMemoryController)
//! ```
//!
//! ## 配置格式
//!
//! ```json
//! { "host": "192.168.1.100", "path": "/cgi-bin/mkv.cgi", "timeout_ms": 20000 }
//! ```

mod codec;
mod discovery;
mod error;
mod fetch;
mod in_memory;
mod state;
mod transport;
mod types;
mod word;

pub use codec::{QUERY_LEN, clean_response, decode_response, encode_queries, split_response};
pub use discovery::{
    DescriptorSource, DynamicDiscovery, MAX_RUNNING_INDEX, StaticDescriptors,
    descriptors_from_words, discovery_queries,
};
pub use error::ProtocolError;
pub use fetch::{ValueFetcher, correlate, value_queries};
pub use in_memory::InMemoryController;
pub use state::{MachineStateReader, machine_state_from};
pub use transport::{HttpTransport, HttpTransportConfig, Session, Transport};
pub use types::*;
pub use word::{BLOCK_LEN, DecodedWord, NO_DATA};
