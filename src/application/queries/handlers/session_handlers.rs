//! Session Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CacheStatus, CardCachePort};
use crate::application::queries::{GetCacheStatusQuery, GetSessionQuery};
use crate::application::session_gateway::SessionGateway;

// ============================================================================
// Response DTOs
// ============================================================================

/// 会话详情响应
#[derive(Debug, Clone)]
pub struct SessionResponse {
    pub id: String,
    pub themes: Vec<String>,
    pub birth_years: Vec<i32>,
    pub created_at: String,
}

/// 卡牌缓存状态响应
#[derive(Debug, Clone)]
pub struct CacheStatusResponse {
    pub session_id: String,
    pub buffered: usize,
    pub fetch_state: String,
}

impl From<CacheStatus> for CacheStatusResponse {
    fn from(status: CacheStatus) -> Self {
        Self {
            session_id: status.session_id,
            buffered: status.buffered,
            fetch_state: status.fetch_state.as_str().to_string(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetSession Handler
pub struct GetSessionHandler {
    gateway: SessionGateway,
}

impl GetSessionHandler {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<SessionResponse, ApplicationError> {
        let session = self.gateway.get_session(&query.session_id).await?;

        Ok(SessionResponse {
            id: session.id,
            themes: session.themes,
            birth_years: session.birth_years,
            created_at: session.created_at.to_rfc3339(),
        })
    }
}

/// GetCacheStatus Handler
pub struct GetCacheStatusHandler {
    card_cache: Arc<dyn CardCachePort>,
}

impl GetCacheStatusHandler {
    pub fn new(card_cache: Arc<dyn CardCachePort>) -> Self {
        Self { card_cache }
    }

    pub fn handle(&self, query: GetCacheStatusQuery) -> CacheStatusResponse {
        CacheStatusResponse::from(self.card_cache.status(&query.session_id))
    }
}
