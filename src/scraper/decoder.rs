// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::events::ScrapeEvent;

const DATA_PREFIX: &str = "data: ";

/// 按行切分的字节流解码器
///
/// 收到的字节先进入缓冲区，每遇到 `\n` 输出一行，末尾不完整的部分留在缓冲区
/// 等待下一个数据块。以字节为单位缓冲，跨块的多字节UTF-8字符不会被截断。
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个数据块，返回其中所有完整的行（已去掉行尾 `\r`）
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let Some(last_newline) = self.buffer.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };
        let tail = self.buffer.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.buffer, tail);

        complete[..complete.len() - 1]
            .split(|b| *b == b'\n')
            .map(decode_line)
            .collect()
    }

    /// 流结束时取出剩余的不完整行
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        Some(decode_line(&rest)).filter(|line| !line.is_empty())
    }

    /// 缓冲区中尚未成行的字节数
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// 解析一行事件
///
/// 不以 `data: ` 开头的行返回 `None`；JSON格式错误时返回 `Some(Err)`
pub fn parse_event_line(line: &str) -> Option<Result<ScrapeEvent, serde_json::Error>> {
    line.strip_prefix(DATA_PREFIX)
        .map(|payload| serde_json::from_str(payload))
}

#[cfg(test)]
#[path = "decoder_test.rs"]
mod tests;
