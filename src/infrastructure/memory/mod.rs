//! Memory Layer - In-Memory State Management
//!
//! 实现 CardCache，管理每个会话的卡牌缓冲区与拉取协调器

mod card_cache;

pub use card_cache::{CardCacheConfig, InMemoryCardCache};
