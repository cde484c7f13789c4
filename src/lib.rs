//! GPTiculate - 卡牌游戏客户端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Card Context: 卡牌值对象
//! - Session Context: 会话记录与年龄换算
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GameApi, CardCache）
//! - SessionGateway: 会话创建与查询
//! - Commands: CreateSession, DrawCard, DealHand
//! - Queries: GetSession, GetCacheStatus
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 游戏服务客户端
//! - Memory: 单飞拉取 + 低水位补货的卡牌缓存
//! - Logging: tracing 订阅器初始化

pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use client::GameClient;
pub use config::{load_config, AppConfig};
