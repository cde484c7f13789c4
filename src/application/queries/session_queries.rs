//! Session Queries

/// 获取会话详情
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: String,
}

/// 获取会话卡牌缓存状态
#[derive(Debug, Clone)]
pub struct GetCacheStatusQuery {
    pub session_id: String,
}
