//! Game Client - 组装入口
//!
//! 按配置创建 HTTP 客户端、卡牌缓存和各个处理器，供界面层注入使用

use std::sync::Arc;

use crate::application::{
    ApplicationError, CacheStatusResponse, CardCachePort, CreateSessionCommand,
    CreateSessionHandler, DealHandCommand, DealHandHandler, DrawCardCommand, DrawCardHandler,
    GameApiPort, GetCacheStatusHandler, GetCacheStatusQuery, GetSessionHandler, GetSessionQuery,
    SessionGateway, SessionResponse,
};
use crate::config::{print_config, AppConfig};
use crate::domain::{Card, Session};
use crate::infrastructure::{HttpGameApiClient, InMemoryCardCache};

/// 游戏客户端
///
/// 每个进程通常只创建一个实例，卡牌缓存的生命周期与之相同
pub struct GameClient {
    api: Arc<dyn GameApiPort>,
    create_session_handler: CreateSessionHandler,
    get_session_handler: GetSessionHandler,
    draw_card_handler: DrawCardHandler,
    deal_hand_handler: DealHandHandler,
    cache_status_handler: GetCacheStatusHandler,
}

impl GameClient {
    /// 使用 HTTP 客户端按配置组装
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        print_config(config);
        let api = Arc::new(HttpGameApiClient::new(config.http_client_config())?);
        Ok(Self::with_api(api, config))
    }

    /// 使用给定的远端服务实现组装
    pub fn with_api(api: Arc<dyn GameApiPort>, config: &AppConfig) -> Self {
        let card_cache: Arc<dyn CardCachePort> =
            Arc::new(InMemoryCardCache::new(api.clone(), config.card_cache_config()));
        let gateway = SessionGateway::new(api.clone());

        tracing::debug!(
            low_water_mark = config.cache.low_water_mark,
            prefetch = config.cache.prefetch_on_create,
            "Game client assembled"
        );

        Self {
            api,
            create_session_handler: CreateSessionHandler::new(
                gateway.clone(),
                card_cache.clone(),
                config.cache.prefetch_on_create,
            ),
            get_session_handler: GetSessionHandler::new(gateway),
            draw_card_handler: DrawCardHandler::new(card_cache.clone()),
            deal_hand_handler: DealHandHandler::new(card_cache.clone()),
            cache_status_handler: GetCacheStatusHandler::new(card_cache),
        }
    }

    pub async fn create_session(
        &self,
        ages: Vec<i32>,
        topics: Vec<String>,
    ) -> Result<Session, ApplicationError> {
        self.create_session_handler
            .handle(CreateSessionCommand { ages, topics })
            .await
    }

    pub async fn get_session(&self, session_id: &str) -> Result<SessionResponse, ApplicationError> {
        self.get_session_handler
            .handle(GetSessionQuery {
                session_id: session_id.to_string(),
            })
            .await
    }

    pub async fn draw_card(&self, session_id: &str) -> Result<Card, ApplicationError> {
        self.draw_card_handler
            .handle(DrawCardCommand {
                session_id: session_id.to_string(),
            })
            .await
    }

    pub async fn deal_hand(&self, session_id: &str) -> Result<Vec<Card>, ApplicationError> {
        self.deal_hand_handler.handle(DealHandCommand::new(session_id)).await
    }

    pub fn cache_status(&self, session_id: &str) -> CacheStatusResponse {
        self.cache_status_handler.handle(GetCacheStatusQuery {
            session_id: session_id.to_string(),
        })
    }

    /// 检查远端服务是否可用
    pub async fn health_check(&self) -> bool {
        self.api.health_check().await
    }
}
