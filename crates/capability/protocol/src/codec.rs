//! 查询编码与响应拆分
//!
//! 请求与响应之间没有任何标记，只靠位置对应：第 i 个查询的答案是响应的第 i 个块。

use crate::word::{BLOCK_LEN, DecodedWord, NO_DATA};
use domain::RegisterQuery;
use std::fmt::Write;

/// 单个查询编码后的字符数（4 位索引 + 2 位子索引）
pub const QUERY_LEN: usize = 6;

/// 编码查询序列：`IIIISS` 依次拼接，小写十六进制
pub fn encode_queries(queries: &[RegisterQuery]) -> String {
    let mut packet = String::with_capacity(queries.len() * QUERY_LEN);
    for query in queries {
        let _ = write!(packet, "{:04x}{:02x}", query.index, query.sub_index);
    }
    packet
}

/// 去掉传输文本中的换行与首尾空白
pub fn clean_response(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect::<String>()
        .trim()
        .to_string()
}

/// 把响应拆成 `count` 个块；不足的部分以无效块补齐
pub fn split_response(response: &str, count: usize) -> Vec<&str> {
    (0..count)
        .map(|i| {
            let offset = i * BLOCK_LEN;
            response.get(offset..offset + BLOCK_LEN).unwrap_or(NO_DATA)
        })
        .collect()
}

/// 拆分并解码
pub fn decode_response(response: &str, count: usize) -> Vec<DecodedWord> {
    split_response(response, count)
        .into_iter()
        .map(DecodedWord::decode)
        .collect()
}

/// 把单个分块的响应规整为恰好 `count` 个块，避免错位传导到后续分块
pub(crate) fn align_chunk(text: &str, count: usize) -> String {
    split_response(text, count).concat()
}
