//! Logging - tracing 订阅器初始化
//!
//! `RUST_LOG` 优先，其次使用配置中的日志级别

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 构造日志过滤规则
fn log_filter(config: &LogConfig) -> String {
    format!("{},gpticulate={}", config.level, config.level)
}

/// 初始化全局日志订阅器
///
/// 已经安装过订阅器时返回 `Err`，由调用方决定是否忽略
pub fn init_logging(config: &LogConfig) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(config)));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| e.to_string())
}
