//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod card_cache;
mod game_api;

pub use card_cache::{CacheStatus, CardCachePort, FetchHandle, FetchOutcome, FetchState};
pub use game_api::{GameApiError, GameApiPort};
