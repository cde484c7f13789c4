//! Card Cache Port - 卡牌缓冲与补货
//!
//! 定义按会话缓冲卡牌的抽象接口，具体实现在 infrastructure/memory 层

use async_trait::async_trait;
use tokio::sync::watch;

use crate::application::error::ApplicationError;
use crate::domain::Card;

/// 一次拉取的结果：成功时为追加到缓冲区的卡牌数量
pub type FetchOutcome = Result<usize, ApplicationError>;

/// 拉取协调器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// 没有进行中的拉取
    Idle,
    /// 有且仅有一个拉取在进行
    Fetching,
}

impl FetchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Fetching => "fetching",
        }
    }
}

/// 进行中拉取的订阅句柄
///
/// 同一会话的并发调用方拿到的是同一次拉取的句柄，观察到同一个结果
#[derive(Debug, Clone)]
pub struct FetchHandle {
    session_id: String,
    outcome: watch::Receiver<Option<FetchOutcome>>,
}

impl FetchHandle {
    pub fn new(session_id: impl Into<String>, outcome: watch::Receiver<Option<FetchOutcome>>) -> Self {
        Self {
            session_id: session_id.into(),
            outcome,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// 等待拉取完成
    pub async fn wait(mut self) -> FetchOutcome {
        match self.outcome.wait_for(|outcome| outcome.is_some()).await {
            Ok(outcome) => outcome
                .clone()
                .unwrap_or_else(|| Err(ApplicationError::remote("fetch finished without outcome"))),
            // 发送端在发布结果前被丢弃（拉取任务被中止）
            Err(_) => Err(ApplicationError::remote(format!(
                "card fetch for session {} was aborted",
                self.session_id
            ))),
        }
    }

    /// 拉取是否已经结束
    pub fn is_finished(&self) -> bool {
        self.outcome.borrow().is_some()
    }
}

/// 会话缓存状态快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStatus {
    pub session_id: String,
    pub buffered: usize,
    pub fetch_state: FetchState,
}

/// Card Cache Port
///
/// 所有缓冲区和拉取标记只由缓存自身修改
#[async_trait]
pub trait CardCachePort: Send + Sync {
    /// 确保会话有一次拉取在进行（或刚完成），返回该拉取的句柄
    fn ensure_cards(&self, session_id: &str) -> FetchHandle;

    /// 取出会话的下一张卡牌
    async fn get_card(&self, session_id: &str) -> Result<Card, ApplicationError>;

    /// 获取会话缓存状态
    fn status(&self, session_id: &str) -> CacheStatus;
}
