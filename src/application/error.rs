//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::GameApiError;

/// 应用层错误
///
/// 同一次拉取的失败会分发给所有等待方，因此实现 `Clone`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// 缺少必需的配置（不可重试）
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// 远端服务返回非成功响应或无法访问
    #[error("Remote error: {0}")]
    RemoteError(String),

    /// 远端为同步等待的拉取返回了零张卡牌
    #[error("Remote returned no cards for session {session_id}")]
    EmptyResult { session_id: String },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ApplicationError {
    /// 创建远端错误
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteError(message.into())
    }

    /// 创建空结果错误
    pub fn empty_result(session_id: impl Into<String>) -> Self {
        Self::EmptyResult {
            session_id: session_id.into(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 是否值得由调用方重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RemoteError(_) | Self::EmptyResult { .. })
    }
}

impl From<GameApiError> for ApplicationError {
    fn from(err: GameApiError) -> Self {
        match err {
            GameApiError::Configuration(message) => Self::ConfigurationError(message),
            other => Self::RemoteError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_is_not_retryable() {
        let err = ApplicationError::from(GameApiError::Configuration("api.base_url".to_string()));
        assert!(matches!(err, ApplicationError::ConfigurationError(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_not_found_folds_into_remote_error() {
        let err = ApplicationError::from(GameApiError::NotFound("session abc".to_string()));
        assert_eq!(
            err,
            ApplicationError::RemoteError("Resource not found: session abc".to_string())
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_timeout_folds_into_remote_error() {
        let err = ApplicationError::from(GameApiError::Timeout);
        assert_eq!(err.to_string(), "Remote error: Request timeout");
    }
}
