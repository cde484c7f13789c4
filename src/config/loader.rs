//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（gpticulate.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["gpticulate", "gpticulate.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `GPTICULATE_`，层级分隔符 `__`）
/// 2. 配置文件（gpticulate.toml 或 gpticulate.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `GPTICULATE_API__BASE_URL=http://localhost:8000`
/// - `GPTICULATE_CACHE__LOW_WATER_MARK=8`
/// - `GPTICULATE_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）；api.base_url 没有默认值
    builder = builder
        .set_default("api.timeout_secs", 30)?
        .set_default("cache.low_water_mark", 5)?
        .set_default("cache.fetch_timeout_secs", 60)?
        .set_default("cache.prefetch_on_create", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: GPTICULATE_API__BASE_URL=http://localhost:8000
    builder = builder.add_source(
        Environment::with_prefix("GPTICULATE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
///
/// 缺失的 base_url 不在这里报错：它在第一次请求时作为配置错误出现
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.api.base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "API base URL must start with http:// or https://: {}",
                url
            )));
        }
    }

    if config.cache.low_water_mark == 0 {
        return Err(ConfigError::ValidationError(
            "Cache low-water mark cannot be 0".to_string(),
        ));
    }

    if config.cache.fetch_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Card fetch timeout cannot be 0".to_string(),
        ));
    }

    if config.cache.batch_size == Some(0) {
        return Err(ConfigError::ValidationError(
            "Card batch size cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Client Configuration ===");
    match &config.api.base_url {
        Some(url) => tracing::info!("API Base URL: {}", url),
        None => tracing::warn!("API Base URL: <not set>"),
    }
    tracing::info!("API Timeout: {}s", config.api.timeout_secs);
    tracing::info!("Low-Water Mark: {}", config.cache.low_water_mark);
    tracing::info!("Fetch Timeout: {}s", config.cache.fetch_timeout_secs);
    if let Some(batch_size) = config.cache.batch_size {
        tracing::info!("Batch Size: {}", batch_size);
    }
    tracing::info!("Prefetch On Create: {}", config.cache.prefetch_on_create);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("============================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validation_passes_for_default_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_low_water_mark() {
        let mut config = AppConfig::default();
        config.cache.low_water_mark = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_fetch_timeout() {
        let mut config = AppConfig::default();
        config.cache.fetch_timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_bad_scheme() {
        let mut config = AppConfig::default();
        config.api.base_url = Some("localhost:8000".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
[api]
base_url = "http://cards.example.com"

[cache]
low_water_mark = 8
batch_size = 12
"#,
        );

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://cards.example.com"));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.cache.low_water_mark, 8);
        assert_eq!(config.cache.batch_size, Some(12));
        assert_eq!(config.cache.fetch_timeout_secs, 60);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let file = write_config("[cache]\nlow_water_mark = 0\n");
        let err = load_config_from_path(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
