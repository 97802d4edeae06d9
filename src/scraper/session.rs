// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::decoder::{parse_event_line, LineDecoder};
use super::events::ScrapeEvent;
use super::source::ScrapeStreamSource;
use crate::domain::models::business::{export_csv, BusinessData};
use crate::domain::models::scrape_progress::ScrapeProgress;
use crate::domain::services::scraped_data_service::ScrapedDataSink;
use crate::utils::errors::ScrapeError;
use futures::future::{AbortHandle, AbortRegistration, Abortable};
use futures::StreamExt;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use validator::{Validate, ValidationErrors};

/// 结果数量上限
pub const MAX_RESULTS_LIMIT: u32 = 10_000;

const EMPTY_TERM_MESSAGE: &str = "Lütfen bir arama terimi girin";

/// 抓取会话的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapePhase {
    Idle,
    Searching,
    Streaming,
    Completed,
    Errored,
    Aborted,
}

impl ScrapePhase {
    pub fn is_running(&self) -> bool {
        matches!(self, ScrapePhase::Searching | ScrapePhase::Streaming)
    }
}

/// 搜索请求，即抓取端点的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeSearch {
    #[validate(length(min = 1, message = "Lütfen bir arama terimi girin"))]
    pub search_term: String,
    #[validate(range(min = 1, max = 10000, message = "Sonuç sayısı 1 ile 10000 arasında olmalıdır"))]
    pub max_results: u32,
    #[serde(default)]
    pub exclude_sector: String,
}

impl ScrapeSearch {
    /// 创建搜索请求，搜索词去除首尾空白
    pub fn new(search_term: &str, max_results: u32, exclude_sector: &str) -> Self {
        Self {
            search_term: search_term.trim().to_string(),
            max_results,
            exclude_sector: exclude_sector.trim().to_string(),
        }
    }

    /// 校验请求，返回第一条用户可见的错误消息
    pub fn check(&self) -> Result<(), ScrapeError> {
        if self.search_term.trim().is_empty() {
            return Err(ScrapeError::Validation(EMPTY_TERM_MESSAGE.to_string()));
        }
        self.validate()
            .map_err(|errors| ScrapeError::Validation(first_message(&errors)))
    }
}

fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    ["search_term", "max_results"]
        .iter()
        .find_map(|field| {
            fields
                .get(*field)
                .and_then(|errs| errs.first())
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
        })
        .unwrap_or_else(|| errors.to_string())
}

/// 一次抓取的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOutcome {
    pub phase: ScrapePhase,
    pub results: Vec<BusinessData>,
    /// `complete` 事件中的 `totalFound`，原样保留
    pub total_found: Option<u64>,
    /// 服务端确认保存的条数，未持久化或持久化失败时为 `None`
    pub saved: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug)]
struct SessionState {
    phase: ScrapePhase,
    results: Vec<BusinessData>,
    error: Option<String>,
    total_found: Option<u64>,
    saved: Option<usize>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: ScrapePhase::Idle,
            results: Vec::new(),
            error: None,
            total_found: None,
            saved: None,
        }
    }
}

enum LineOutcome {
    Continue,
    Complete(u64),
    Error(String),
    Superseded,
}

enum StreamEnd {
    Complete(u64),
    Exhausted,
    Failed(String),
    Superseded,
}

/// 已登记、尚未执行的一次抓取
///
/// 由 [`ScrapeSession::begin`] 返回。登记后 [`ScrapeSession::stop`] 立即生效，
/// 即使 [`ScrapeSession::execute`] 还没有开始。
pub struct ScrapeRun {
    search: ScrapeSearch,
    generation: u64,
    registration: AbortRegistration,
}

impl ScrapeRun {
    pub fn search(&self) -> &ScrapeSearch {
        &self.search
    }
}

/// Google Maps抓取会话
///
/// 同一时刻只有一个活动的流；开始新的搜索会先中止旧的。
/// 读取循环可以通过 [`ScrapeSession::stop`] 随时取消。
pub struct ScrapeSession {
    source: Arc<dyn ScrapeStreamSource>,
    sink: Arc<dyn ScrapedDataSink>,
    completion_delay: Duration,
    state: RwLock<SessionState>,
    progress: watch::Sender<ScrapeProgress>,
    abort: Mutex<Option<AbortHandle>>,
    generation: AtomicU64,
}

impl ScrapeSession {
    /// 创建新的抓取会话
    ///
    /// # 参数
    ///
    /// * `source` - 抓取流来源
    /// * `sink` - 完成后保存结果的目标
    /// * `completion_delay` - 完成后保留进度信息的时长
    pub fn new(
        source: Arc<dyn ScrapeStreamSource>,
        sink: Arc<dyn ScrapedDataSink>,
        completion_delay: Duration,
    ) -> Self {
        let (progress, _) = watch::channel(ScrapeProgress::default());
        Self {
            source,
            sink,
            completion_delay,
            state: RwLock::new(SessionState::default()),
            progress,
            abort: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn phase(&self) -> ScrapePhase {
        self.state.read().phase
    }

    pub fn results(&self) -> Vec<BusinessData> {
        self.state.read().results.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub fn progress(&self) -> ScrapeProgress {
        self.progress.borrow().clone()
    }

    /// 订阅进度变化
    pub fn subscribe_progress(&self) -> watch::Receiver<ScrapeProgress> {
        self.progress.subscribe()
    }

    /// 当前结果导出为CSV
    pub fn export_csv(&self) -> String {
        export_csv(&self.state.read().results)
    }

    /// 中止当前抓取
    ///
    /// 正在进行的读取被丢弃，会话以 `aborted` 结束，不产生错误信息
    pub fn stop(&self) {
        if let Some(handle) = self.abort.lock().take() {
            info!("Stopping scrape stream");
            handle.abort();
        }
    }

    /// 执行一次抓取直到完成、出错或被中止
    ///
    /// 参数校验失败时直接返回错误，会话状态不变
    pub async fn run(&self, search: ScrapeSearch) -> Result<ScrapeOutcome, ScrapeError> {
        let run = self.begin(search)?;
        Ok(self.execute(run).await)
    }

    /// 校验并登记一次抓取
    ///
    /// 中止上一次抓取、清空旧结果并登记新的中止句柄。之后的读取属于新的一代，
    /// 旧读取循环中尚未处理的事件会被丢弃。
    pub fn begin(&self, search: ScrapeSearch) -> Result<ScrapeRun, ScrapeError> {
        search.check()?;

        let (handle, registration) = AbortHandle::new_pair();
        let generation = {
            let mut state = self.state.write();
            if let Some(previous) = self.abort.lock().replace(handle) {
                previous.abort();
            }
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SessionState {
                phase: ScrapePhase::Searching,
                ..SessionState::default()
            };
            self.progress.send_replace(ScrapeProgress::default());
            generation
        };
        debug!("Scrape {} registered", generation);

        Ok(ScrapeRun {
            search,
            generation,
            registration,
        })
    }

    /// 执行已登记的抓取
    #[instrument(skip(self, run), fields(term = %run.search.search_term, max = run.search.max_results))]
    pub async fn execute(&self, run: ScrapeRun) -> ScrapeOutcome {
        let ScrapeRun {
            search,
            generation,
            registration,
        } = run;
        info!("Scrape started");

        let finished = Abortable::new(self.consume(&search, generation), registration).await;

        {
            let mut state = self.state.write();
            if self.is_current(generation) {
                self.abort.lock().take();
                if finished.is_err() {
                    // 已完成的抓取在展示延迟期间被停止时保持 completed
                    if state.phase.is_running() {
                        info!("Scrape aborted");
                        state.phase = ScrapePhase::Aborted;
                    }
                    self.progress.send_replace(ScrapeProgress::default());
                }
            }
        }

        self.outcome()
    }

    fn outcome(&self) -> ScrapeOutcome {
        let state = self.state.read();
        ScrapeOutcome {
            phase: state.phase,
            results: state.results.clone(),
            total_found: state.total_found,
            saved: state.saved,
            error: state.error.clone(),
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// 仅当 `generation` 仍是当前抓取时修改状态
    fn update_current(&self, generation: u64, update: impl FnOnce(&mut SessionState)) -> bool {
        let mut state = self.state.write();
        if !self.is_current(generation) {
            return false;
        }
        update(&mut state);
        true
    }

    async fn consume(&self, search: &ScrapeSearch, generation: u64) {
        match self.read_stream(search, generation).await {
            StreamEnd::Complete(total_found) => self.complete(total_found, generation).await,
            StreamEnd::Exhausted => {
                self.update_current(generation, |state| {
                    info!("Scrape stream ended without a complete event");
                    state.phase = ScrapePhase::Completed;
                    self.progress.send_replace(ScrapeProgress::default());
                });
            }
            StreamEnd::Failed(message) => {
                self.update_current(generation, |state| {
                    warn!("Scrape failed: {}", message);
                    state.phase = ScrapePhase::Errored;
                    state.error = Some(message);
                });
            }
            StreamEnd::Superseded => debug!("Scrape {} superseded", generation),
        }
    }

    async fn read_stream(&self, search: &ScrapeSearch, generation: u64) -> StreamEnd {
        let mut stream = match self.source.open(search).await {
            Ok(stream) => stream,
            Err(e) => return StreamEnd::Failed(e.to_string()),
        };
        if !self.update_current(generation, |state| state.phase = ScrapePhase::Streaming) {
            return StreamEnd::Superseded;
        }

        let mut decoder = LineDecoder::new();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => return StreamEnd::Failed(e.to_string()),
            };
            for line in decoder.push(&chunk) {
                if let Some(end) = self.apply_line(&line, search.max_results, generation) {
                    return end;
                }
            }
        }

        decoder
            .finish()
            .and_then(|line| self.apply_line(&line, search.max_results, generation))
            .unwrap_or(StreamEnd::Exhausted)
    }

    /// 处理一行事件，流应当结束时返回 `Some`
    fn apply_line(&self, line: &str, max_results: u32, generation: u64) -> Option<StreamEnd> {
        match self.apply_event(line, max_results, generation) {
            LineOutcome::Continue => None,
            LineOutcome::Complete(total_found) => Some(StreamEnd::Complete(total_found)),
            LineOutcome::Error(message) => Some(StreamEnd::Failed(message)),
            LineOutcome::Superseded => Some(StreamEnd::Superseded),
        }
    }

    fn apply_event(&self, line: &str, max_results: u32, generation: u64) -> LineOutcome {
        let event = match parse_event_line(line) {
            None => return LineOutcome::Continue,
            Some(Ok(event)) => event,
            Some(Err(e)) => {
                warn!("Skipping malformed scrape event: {}", e);
                return LineOutcome::Continue;
            }
        };

        // 检查和更新在同一把写锁内完成，新的抓取开始后旧事件不会落入新结果
        let mut state = self.state.write();
        if !self.is_current(generation) {
            debug!("Dropping event from superseded scrape {}", generation);
            return LineOutcome::Superseded;
        }

        match event {
            ScrapeEvent::Status {
                current,
                total,
                message,
                total_found,
            } => {
                self.progress.send_replace(ScrapeProgress {
                    current,
                    total,
                    status: message,
                    total_found,
                });
                LineOutcome::Continue
            }
            ScrapeEvent::Result {
                data,
                current,
                total,
            } => {
                if state.results.len() >= max_results as usize {
                    debug!("Ignoring result beyond max_results: {}", data.name);
                    return LineOutcome::Continue;
                }
                state.results.push(data);
                let count = state.results.len() as u64;
                self.progress.send_modify(|p| {
                    p.current = current.unwrap_or(count);
                    p.total = total.unwrap_or(u64::from(max_results));
                });
                LineOutcome::Continue
            }
            ScrapeEvent::Complete {
                total_found,
                message,
            } => {
                self.progress.send_modify(|p| {
                    p.total_found = total_found;
                    if let Some(message) = message {
                        p.status = message;
                    }
                });
                LineOutcome::Complete(total_found)
            }
            ScrapeEvent::Error { message } => LineOutcome::Error(message),
        }
    }

    /// 保存结果并进入 `completed`，进度信息保留 `completion_delay` 后清空
    async fn complete(&self, total_found: u64, generation: u64) {
        let mut results = Vec::new();
        if !self.update_current(generation, |state| {
            state.total_found = Some(total_found);
            results = state.results.clone();
        }) {
            return;
        }
        info!(
            "Scrape complete: {} results, {} found",
            results.len(),
            total_found
        );

        let saved = match self.sink.save(&results).await {
            Ok(saved) => Some(saved),
            Err(e) => {
                warn!("Failed to persist scraped results: {}", e);
                None
            }
        };
        let completed = self.update_current(generation, |state| {
            state.saved = saved;
            state.phase = ScrapePhase::Completed;
            if let Some(saved) = saved {
                self.progress
                    .send_modify(|p| p.status = format!("{} sonuç kaydedildi", saved));
            }
        });
        if !completed {
            return;
        }

        tokio::time::sleep(self.completion_delay).await;
        self.update_current(generation, |_| {
            self.progress.send_replace(ScrapeProgress::default());
        });
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
