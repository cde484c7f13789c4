//! Game API Port - 远端卡牌/会话服务抽象
//!
//! 定义访问远端游戏服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Card, NewSession, Session};

/// 远端服务错误
///
/// 实现 `Clone`，同一次拉取的结果需要分发给所有等待方
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameApiError {
    #[error("API endpoint is not configured: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Service error: HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Game API Port
///
/// 远端服务只通过请求/响应交互；批量大小由远端决定
#[async_trait]
pub trait GameApiPort: Send + Sync {
    /// 创建游戏会话
    async fn create_session(&self, request: NewSession) -> Result<Session, GameApiError>;

    /// 按 ID 获取会话
    async fn get_session(&self, session_id: &str) -> Result<Session, GameApiError>;

    /// 为会话拉取一批新卡牌
    async fn fetch_cards(&self, session_id: &str) -> Result<Vec<Card>, GameApiError>;

    /// 检查远端服务是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}
