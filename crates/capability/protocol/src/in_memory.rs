//! 内存控制器
//!
//! 按寄存器表回答问答报文，仅用于本地测试和演示。

use crate::codec::QUERY_LEN;
use crate::error::ProtocolError;
use crate::transport::Transport;
use crate::word::NO_DATA;
use async_trait::async_trait;
use domain::RegisterQuery;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// 内存控制器：未登记的寄存器回答 `XXXXXXXX`
#[derive(Default)]
pub struct InMemoryController {
    registers: RwLock<HashMap<RegisterQuery, String>>,
    packets: RwLock<Vec<String>>,
    offline: AtomicBool,
}

impl InMemoryController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记寄存器的响应块（8 个十六进制字符）
    pub fn set(&self, query: RegisterQuery, block: impl Into<String>) {
        if let Ok(mut registers) = self.registers.write() {
            registers.insert(query, block.into());
        }
    }

    /// 批量登记，便于链式构造
    pub fn with(self, query: RegisterQuery, block: impl Into<String>) -> Self {
        self.set(query, block);
        self
    }

    /// 模拟设备离线：之后的请求全部返回连接错误
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// 已收到的报文（用于测试）
    pub fn packets(&self) -> Vec<String> {
        self.packets.read().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.packets.read().map(|p| p.len()).unwrap_or(0)
    }

    fn answer(&self, packet: &str) -> Result<String, ProtocolError> {
        if packet.len() % QUERY_LEN != 0 {
            return Err(ProtocolError::Connection(format!(
                "malformed packet length {}",
                packet.len()
            )));
        }
        let registers = self
            .registers
            .read()
            .map_err(|_| ProtocolError::Connection("lock failed".to_string()))?;

        let mut response = String::with_capacity(packet.len() / QUERY_LEN * 8);
        for start in (0..packet.len()).step_by(QUERY_LEN) {
            let query = packet
                .get(start..start + QUERY_LEN)
                .and_then(parse_query)
                .ok_or_else(|| ProtocolError::Connection(format!("malformed query at {}", start)))?;
            match registers.get(&query) {
                Some(block) => response.push_str(block),
                None => response.push_str(NO_DATA),
            }
        }
        Ok(response)
    }
}

fn parse_query(text: &str) -> Option<RegisterQuery> {
    let index = u16::from_str_radix(text.get(..4)?, 16).ok()?;
    let sub_index = u8::from_str_radix(text.get(4..)?, 16).ok()?;
    Some(RegisterQuery::new(index, sub_index))
}

#[async_trait]
impl Transport for InMemoryController {
    async fn send(&self, packet: &str) -> Result<String, ProtocolError> {
        if let Ok(mut packets) = self.packets.write() {
            packets.push(packet.to_string());
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(ProtocolError::Connection("controller offline".to_string()));
        }
        self.answer(packet)
    }
}
