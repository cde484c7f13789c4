//! Session Gateway - 会话创建与查询
//!
//! 一次性的请求/响应，不做缓存也不重试，是否重试由调用方决定

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::GameApiPort;
use crate::domain::{NewSession, Session};

/// 会话网关
#[derive(Clone)]
pub struct SessionGateway {
    api: Arc<dyn GameApiPort>,
}

impl SessionGateway {
    pub fn new(api: Arc<dyn GameApiPort>) -> Self {
        Self { api }
    }

    /// 创建会话
    pub async fn create_session(
        &self,
        birth_years: Vec<i32>,
        topics: Vec<String>,
    ) -> Result<Session, ApplicationError> {
        let session = self
            .api
            .create_session(NewSession::new(birth_years, topics))
            .await?;
        Ok(session)
    }

    /// 按 ID 获取会话，远端的“未找到”同样作为 RemoteError 返回
    pub async fn get_session(&self, session_id: &str) -> Result<Session, ApplicationError> {
        let session = self.api.get_session(session_id).await?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::ScriptedGameApi;

    #[tokio::test]
    async fn test_create_then_get_session() {
        let gateway = SessionGateway::new(ScriptedGameApi::new(vec![]).arc());

        let created = gateway
            .create_session(vec![1990, 2015], vec!["animals".to_string()])
            .await
            .unwrap();
        assert_eq!(created.themes, vec!["animals"]);

        let fetched = gateway.get_session(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_unknown_session_is_remote_error() {
        let gateway = SessionGateway::new(ScriptedGameApi::new(vec![]).arc());

        let err = gateway.get_session("nope").await.unwrap_err();
        assert!(matches!(err, ApplicationError::RemoteError(_)));
    }
}
