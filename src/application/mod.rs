//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（GameApi、CardCache）
//! - session_gateway: 会话创建与查询
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod session_gateway;

// Re-exports
pub use commands::{
    handlers::{CreateSessionHandler, DealHandHandler, DrawCardHandler},
    CreateSessionCommand, DealHandCommand, DrawCardCommand,
};

pub use error::ApplicationError;

pub use ports::{
    CacheStatus, CardCachePort, FetchHandle, FetchOutcome, FetchState, GameApiError, GameApiPort,
};

pub use queries::{
    handlers::{CacheStatusResponse, GetCacheStatusHandler, GetSessionHandler, SessionResponse},
    GetCacheStatusQuery, GetSessionQuery,
};

pub use session_gateway::SessionGateway;
