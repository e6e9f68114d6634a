//! 响应块解码
//!
//! 每个响应块为 8 个十六进制字符（4 字节，大端）。字节按线上顺序保存：
//!
//! ```text
//! "00C8000A" → bytes = [0x00, 0xC8, 0x00, 0x0A]
//!               word0 = bytes[0..2] = 0x00C8（高半字）
//!               word1 = bytes[2..4] = 0x000A（低半字）
//! ```

use domain::HalfWords;

/// 单个响应块的字符数
pub const BLOCK_LEN: usize = 8;

/// 控制器表示“无数据”的响应块
pub const NO_DATA: &str = "XXXXXXXX";

/// 解码后的 32 位字
///
/// `decoded == false` 时其余字段均为 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodedWord {
    pub decoded: bool,
    pub uint32: u32,
    pub int32: i32,
    pub word0: u16,
    pub word1: u16,
    pub int_word0: i16,
    pub int_word1: i16,
    /// 线上顺序，bytes[3] 为最低有效字节
    pub bytes: [u8; 4],
}

impl DecodedWord {
    /// 无效块
    pub fn invalid() -> Self {
        Self::default()
    }

    /// 解码一个响应块，任何非法输入都返回无效块
    pub fn decode(block: &str) -> Self {
        let block = block.trim();
        if block.is_empty()
            || block.eq_ignore_ascii_case("X")
            || block.eq_ignore_ascii_case(NO_DATA)
            || block.len() < BLOCK_LEN
        {
            return Self::invalid();
        }

        let Some(head) = block.get(..BLOCK_LEN) else {
            return Self::invalid();
        };
        let mut bytes = [0u8; 4];
        if hex::decode_to_slice(head, &mut bytes).is_err() {
            return Self::invalid();
        }

        Self::from_bytes(bytes)
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        let word0 = u16::from_be_bytes([bytes[0], bytes[1]]);
        let word1 = u16::from_be_bytes([bytes[2], bytes[3]]);
        Self {
            decoded: true,
            uint32: u32::from_be_bytes(bytes),
            int32: i32::from_be_bytes(bytes),
            word0,
            word1,
            int_word0: word0 as i16,
            int_word1: word1 as i16,
            bytes,
        }
    }

    /// 最低有效字节（发现阶段的激活标志）
    pub fn low_byte(&self) -> u8 {
        self.bytes[3]
    }

    pub fn half_words(&self) -> HalfWords {
        HalfWords {
            high: self.word0,
            low: self.word1,
        }
    }
}
