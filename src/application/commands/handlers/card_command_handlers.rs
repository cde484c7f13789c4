//! Card Command Handlers

use std::sync::Arc;

use crate::application::commands::card_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::CardCachePort;
use crate::domain::Card;

/// DrawCard Handler - 玩家点击“下一张”
pub struct DrawCardHandler {
    card_cache: Arc<dyn CardCachePort>,
}

impl DrawCardHandler {
    pub fn new(card_cache: Arc<dyn CardCachePort>) -> Self {
        Self { card_cache }
    }

    pub async fn handle(&self, cmd: DrawCardCommand) -> Result<Card, ApplicationError> {
        self.card_cache.get_card(&cmd.session_id).await
    }
}

/// DealHand Handler - 开局为每个牌堆发一张牌
pub struct DealHandHandler {
    card_cache: Arc<dyn CardCachePort>,
}

impl DealHandHandler {
    pub fn new(card_cache: Arc<dyn CardCachePort>) -> Self {
        Self { card_cache }
    }

    /// 顺序取卡，保证各牌堆拿到不同的卡并保持 FIFO 顺序
    pub async fn handle(&self, cmd: DealHandCommand) -> Result<Vec<Card>, ApplicationError> {
        if cmd.decks == 0 {
            return Err(ApplicationError::validation("At least one deck is required"));
        }

        let mut hand = Vec::with_capacity(cmd.decks);
        for _ in 0..cmd.decks {
            hand.push(self.card_cache.get_card(&cmd.session_id).await?);
        }

        tracing::debug!(session_id = %cmd.session_id, decks = cmd.decks, "Opening hand dealt");
        Ok(hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{test_cards, ScriptedGameApi};
    use crate::infrastructure::memory::{CardCacheConfig, InMemoryCardCache};

    fn cache_for(api: Arc<ScriptedGameApi>) -> Arc<dyn CardCachePort> {
        InMemoryCardCache::new(api, CardCacheConfig::default()).arc()
    }

    #[tokio::test]
    async fn test_deal_then_draw() {
        let api = ScriptedGameApi::new(vec![Ok(test_cards("a", 10))]).arc();
        let cache = cache_for(api.clone());
        let deal = DealHandHandler::new(cache.clone());
        let draw = DrawCardHandler::new(cache);

        let hand = deal.handle(DealHandCommand::new("s-1")).await.unwrap();
        let objects: Vec<&str> = hand.iter().map(|c| c.object.as_str()).collect();
        assert_eq!(objects, ["a-0", "a-1"]);

        let next = draw
            .handle(DrawCardCommand {
                session_id: "s-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(next.object, "a-2");
        assert_eq!(api.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_deal_requires_a_deck() {
        let cache = cache_for(ScriptedGameApi::new(vec![]).arc());
        let deal = DealHandHandler::new(cache);

        let err = deal
            .handle(DealHandCommand {
                session_id: "s-1".to_string(),
                decks: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_deal_surfaces_empty_result() {
        let cache = cache_for(ScriptedGameApi::new(vec![Ok(test_cards("a", 1))]).arc());
        let deal = DealHandHandler::new(cache);

        // 第一张来自唯一的批次，第二张时远端已没有卡牌
        let err = deal.handle(DealHandCommand::new("s-1")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::EmptyResult { .. }));
    }
}
