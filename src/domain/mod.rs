//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Card Context: 游戏卡牌
//! - Session Context: 游戏会话（由远端服务持有，客户端只保存引用）

pub mod card;
pub mod session;

pub use card::Card;
pub use session::{birth_years_from_ages, NewSession, Session};
