//! In-Memory Card Cache Implementation
//!
//! 每个会话一个 FIFO 缓冲区加一个单飞（single-flight）拉取协调器：
//! - 同一会话同一时刻最多只有一次远端拉取
//! - 并发调用方订阅同一次拉取，观察同一个结果
//! - 缓冲区低于低水位时在后台补货，不阻塞取卡

use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    CacheStatus, CardCachePort, FetchHandle, FetchOutcome, FetchState, GameApiPort,
};
use crate::domain::Card;

type OutcomeSender = watch::Sender<Option<FetchOutcome>>;
type OutcomeReceiver = watch::Receiver<Option<FetchOutcome>>;

/// 卡牌缓存配置
#[derive(Debug, Clone)]
pub struct CardCacheConfig {
    /// 取卡后剩余数量严格小于该值时触发后台补货
    pub low_water_mark: usize,
    /// 单次拉取超时，超时后协调器回到 Idle
    pub fetch_timeout: Duration,
}

impl Default for CardCacheConfig {
    fn default() -> Self {
        Self {
            low_water_mark: 5,
            fetch_timeout: Duration::from_secs(60),
        }
    }
}

/// 拉取协调器，持有进行中拉取的唯一订阅源
#[derive(Debug, Default)]
enum Fetch {
    #[default]
    Idle,
    Fetching(OutcomeReceiver),
}

/// 单个会话的缓存状态
#[derive(Debug, Default)]
struct SessionCards {
    buffer: VecDeque<Card>,
    fetch: Fetch,
}

impl SessionCards {
    /// 订阅进行中的拉取；空闲时切换到 Fetching 并返回需要驱动的发送端
    fn subscribe(&mut self, session_id: &str) -> (FetchHandle, Option<OutcomeSender>) {
        if let Fetch::Fetching(rx) = &self.fetch {
            return (FetchHandle::new(session_id, rx.clone()), None);
        }

        let (tx, rx) = watch::channel(None);
        self.fetch = Fetch::Fetching(rx.clone());
        (FetchHandle::new(session_id, rx), Some(tx))
    }
}

/// 取卡结果
enum Draw {
    Served { card: Card, remaining: usize },
    Pending(FetchHandle),
}

/// 拉取任务被中止时把协调器复位为 Idle
struct InFlightGuard {
    sessions: Arc<DashMap<String, SessionCards>>,
    session_id: String,
    armed: bool,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(mut state) = self.sessions.get_mut(&self.session_id) {
            state.fetch = Fetch::Idle;
        }
        tracing::warn!(session_id = %self.session_id, "Card fetch aborted before completion");
    }
}

/// 内存卡牌缓存
///
/// 需要在 Tokio 运行时中使用：拉取与后台补货都以独立任务运行
pub struct InMemoryCardCache {
    api: Arc<dyn GameApiPort>,
    config: CardCacheConfig,
    sessions: Arc<DashMap<String, SessionCards>>,
}

impl InMemoryCardCache {
    pub fn new(api: Arc<dyn GameApiPort>, config: CardCacheConfig) -> Self {
        Self {
            api,
            config,
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn config(&self) -> &CardCacheConfig {
        &self.config
    }

    /// 缓冲区非空时直接取出队首，否则订阅（或发起）一次拉取
    fn take_or_subscribe(&self, session_id: &str) -> Draw {
        let (handle, sender) = {
            let mut state = self.sessions.entry(session_id.to_string()).or_default();
            if let Some(card) = state.buffer.pop_front() {
                return Draw::Served {
                    card,
                    remaining: state.buffer.len(),
                };
            }
            state.subscribe(session_id)
        };

        if let Some(tx) = sender {
            self.spawn_fetch(session_id, tx);
        }
        Draw::Pending(handle)
    }

    /// 启动拉取任务
    ///
    /// 合并卡牌与清除进行中标记在同一临界区内完成，之后才发布结果
    fn spawn_fetch(&self, session_id: &str, tx: OutcomeSender) {
        let mut guard = InFlightGuard {
            sessions: self.sessions.clone(),
            session_id: session_id.to_string(),
            armed: true,
        };
        let api = self.api.clone();
        let fetch_timeout = self.config.fetch_timeout;

        tracing::debug!(session_id = %session_id, "Starting card fetch");

        tokio::spawn(async move {
            let session_id = guard.session_id.clone();
            let result = match tokio::time::timeout(fetch_timeout, api.fetch_cards(&session_id)).await {
                Ok(Ok(cards)) => Ok(cards),
                Ok(Err(e)) => Err(ApplicationError::from(e)),
                Err(_) => Err(ApplicationError::remote(format!(
                    "card fetch timed out after {}ms",
                    fetch_timeout.as_millis()
                ))),
            };

            let outcome = {
                let mut state = guard.sessions.entry(session_id.clone()).or_default();
                state.fetch = Fetch::Idle;
                guard.armed = false;
                match result {
                    Ok(cards) => {
                        let fetched = cards.len();
                        state.buffer.extend(cards);
                        tracing::info!(
                            session_id = %session_id,
                            fetched = fetched,
                            buffered = state.buffer.len(),
                            "Cards fetched"
                        );
                        Ok(fetched)
                    }
                    Err(e) => {
                        tracing::debug!(session_id = %session_id, error = %e, "Card fetch failed");
                        Err(e)
                    }
                }
            };

            // 没有订阅方时发送失败，结果无人关心
            let _ = tx.send(Some(outcome));
        });
    }

    /// 后台补货：失败只记录日志，不影响已经拿到卡牌的调用方
    fn spawn_refill(&self, session_id: &str, remaining: usize) {
        tracing::debug!(
            session_id = %session_id,
            remaining = remaining,
            low_water_mark = self.config.low_water_mark,
            "Card buffer below low-water mark, refilling in background"
        );

        let handle = self.ensure_cards(session_id);
        tokio::spawn(async move {
            let session_id = handle.session_id().to_string();
            match handle.wait().await {
                Ok(fetched) => {
                    tracing::debug!(session_id = %session_id, fetched = fetched, "Background refill completed");
                }
                Err(e) => {
                    tracing::warn!(session_id = %session_id, error = %e, "Background refill failed");
                }
            }
        });
    }
}

#[async_trait]
impl CardCachePort for InMemoryCardCache {
    fn ensure_cards(&self, session_id: &str) -> FetchHandle {
        let (handle, sender) = self
            .sessions
            .entry(session_id.to_string())
            .or_default()
            .subscribe(session_id);

        match sender {
            Some(tx) => self.spawn_fetch(session_id, tx),
            None => tracing::debug!(session_id = %session_id, "Joining in-flight card fetch"),
        }
        handle
    }

    async fn get_card(&self, session_id: &str) -> Result<Card, ApplicationError> {
        loop {
            let handle = match self.take_or_subscribe(session_id) {
                Draw::Served { card, remaining } => {
                    tracing::debug!(session_id = %session_id, remaining = remaining, "Card served from buffer");
                    if remaining < self.config.low_water_mark {
                        self.spawn_refill(session_id, remaining);
                    }
                    return Ok(card);
                }
                Draw::Pending(handle) => handle,
            };

            tracing::debug!(session_id = %session_id, "Card buffer empty, waiting for fetch");
            if handle.wait().await? == 0 {
                return Err(ApplicationError::empty_result(session_id));
            }
            // 批次已合并；若已被并发调用方取空，下一轮会订阅新的拉取
        }
    }

    fn status(&self, session_id: &str) -> CacheStatus {
        let (buffered, fetch_state) = self
            .sessions
            .get(session_id)
            .map(|state| {
                let fetch_state = match state.fetch {
                    Fetch::Idle => FetchState::Idle,
                    Fetch::Fetching(_) => FetchState::Fetching,
                };
                (state.buffer.len(), fetch_state)
            })
            .unwrap_or((0, FetchState::Idle));

        CacheStatus {
            session_id: session_id.to_string(),
            buffered,
            fetch_state,
        }
    }
}
