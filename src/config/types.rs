//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::time::Duration;

use crate::infrastructure::adapters::HttpGameApiClientConfig;
use crate::infrastructure::memory::CardCacheConfig;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 远端游戏服务配置
    #[serde(default)]
    pub api: ApiConfig,

    /// 卡牌缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 远端游戏服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// 服务基础 URL（必需，缺失时第一次请求报错）
    #[serde(default)]
    pub base_url: Option<String>,

    /// 请求超时时间（秒）
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

fn default_api_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_api_timeout(),
        }
    }
}

/// 卡牌缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 低水位：取卡后剩余数量低于该值时后台补货
    #[serde(default = "default_low_water_mark")]
    pub low_water_mark: usize,

    /// 单次拉取超时（秒）
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// 每批请求的卡牌数量，不设置则由远端决定
    #[serde(default)]
    pub batch_size: Option<u32>,

    /// 创建会话后是否立即预取卡牌
    #[serde(default = "default_prefetch_on_create")]
    pub prefetch_on_create: bool,
}

fn default_low_water_mark() -> usize {
    5
}

fn default_fetch_timeout() -> u64 {
    60
}

fn default_prefetch_on_create() -> bool {
    true
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            low_water_mark: default_low_water_mark(),
            fetch_timeout_secs: default_fetch_timeout(),
            batch_size: None,
            prefetch_on_create: default_prefetch_on_create(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// HTTP 客户端配置
    pub fn http_client_config(&self) -> HttpGameApiClientConfig {
        HttpGameApiClientConfig {
            base_url: self.api.base_url.clone(),
            timeout_secs: self.api.timeout_secs,
            batch_size: self.cache.batch_size,
        }
    }

    /// 卡牌缓存配置
    pub fn card_cache_config(&self) -> CardCacheConfig {
        CardCacheConfig {
            low_water_mark: self.cache.low_water_mark,
            fetch_timeout: Duration::from_secs(self.cache.fetch_timeout_secs),
        }
    }
}
