//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：会话创建与取卡

mod card_commands;
mod session_commands;

pub mod handlers;

pub use card_commands::*;
pub use session_commands::*;
