//! Session Command Handlers

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::session_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::CardCachePort;
use crate::application::session_gateway::SessionGateway;
use crate::domain::{birth_years_from_ages, Session};

/// CreateSession Handler - 创建会话并（可选）预热卡牌缓存
pub struct CreateSessionHandler {
    gateway: SessionGateway,
    card_cache: Arc<dyn CardCachePort>,
    prefetch: bool,
}

impl CreateSessionHandler {
    pub fn new(gateway: SessionGateway, card_cache: Arc<dyn CardCachePort>, prefetch: bool) -> Self {
        Self {
            gateway,
            card_cache,
            prefetch,
        }
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<Session, ApplicationError> {
        let birth_years = birth_years_from_ages(&cmd.ages, Utc::now())
            .map_err(|age| ApplicationError::validation(format!("Invalid age: {}", age)))?;

        let session = self.gateway.create_session(birth_years, cmd.topics).await?;

        tracing::info!(
            session_id = %session.id,
            players = session.birth_years.len(),
            themes = ?session.themes,
            "Game session created"
        );

        if self.prefetch {
            let handle = self.card_cache.ensure_cards(&session.id);
            tokio::spawn(async move {
                if let Err(e) = handle.wait().await {
                    tracing::warn!(error = %e, "Card prefetch failed");
                }
            });
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::FetchState;
    use crate::infrastructure::adapters::{test_cards, ScriptedGameApi};
    use crate::infrastructure::memory::{CardCacheConfig, InMemoryCardCache};
    use chrono::Datelike;

    fn handler(api: &Arc<ScriptedGameApi>, prefetch: bool) -> (CreateSessionHandler, Arc<InMemoryCardCache>) {
        let cache = InMemoryCardCache::new(api.clone(), CardCacheConfig::default()).arc();
        let handler = CreateSessionHandler::new(SessionGateway::new(api.clone()), cache.clone(), prefetch);
        (handler, cache)
    }

    #[tokio::test]
    async fn test_create_session_converts_ages() {
        let api = ScriptedGameApi::new(vec![]).arc();
        let (handler, _cache) = handler(&api, false);

        let session = handler
            .handle(CreateSessionCommand {
                ages: vec![9, 40],
                topics: vec!["sports".to_string()],
            })
            .await
            .unwrap();

        let year = Utc::now().year();
        assert_eq!(session.birth_years, vec![year - 9, year - 40]);
        assert_eq!(session.themes, vec!["sports"]);
        assert_eq!(api.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_negative_age_is_rejected_before_request() {
        let api = ScriptedGameApi::new(vec![]).arc();
        let (handler, _cache) = handler(&api, false);

        let err = handler
            .handle(CreateSessionCommand {
                ages: vec![-1],
                topics: vec![],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_session_prefetches_cards() {
        let api = ScriptedGameApi::gated(vec![Ok(test_cards("a", 10))]).arc();
        let (handler, cache) = handler(&api, true);

        let session = handler
            .handle(CreateSessionCommand {
                ages: vec![30],
                topics: vec![],
            })
            .await
            .unwrap();
        assert_eq!(cache.status(&session.id).fetch_state, FetchState::Fetching);

        // 首次取卡加入预取，而不是再次拉取
        let joined = cache.ensure_cards(&session.id);
        api.release(1);
        assert_eq!(joined.wait().await, Ok(10));
        assert_eq!(api.fetch_calls(), 1);
    }
}
