// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 流式抓取模块
///
/// 提交Google Maps搜索，按行解码 `data: {json}` 事件流，
/// 累积结果并在完成时持久化一次。
pub mod decoder;
pub mod events;
pub mod session;
pub mod source;

pub use decoder::LineDecoder;
pub use events::ScrapeEvent;
pub use session::{ScrapeOutcome, ScrapePhase, ScrapeRun, ScrapeSearch, ScrapeSession};
pub use source::{ByteStream, HttpScrapeSource, ScrapeStreamSource};
