//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod game_api;

pub use game_api::*;
