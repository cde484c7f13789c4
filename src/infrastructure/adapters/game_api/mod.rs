//! Game API Adapter - 远端游戏服务客户端实现

mod http_game_api_client;

#[cfg(test)]
mod fake_game_api_client;

pub use http_game_api_client::*;

#[cfg(test)]
pub use fake_game_api_client::{test_card, test_cards, ScriptedGameApi};
