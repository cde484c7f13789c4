//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod logging;
pub mod memory;

pub use adapters::{HttpGameApiClient, HttpGameApiClientConfig};
pub use logging::init_logging;
pub use memory::{CardCacheConfig, InMemoryCardCache};
