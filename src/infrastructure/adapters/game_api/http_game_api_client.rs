//! HTTP Game API Client - 调用远端游戏服务
//!
//! 实现 GameApiPort trait，通过 HTTP/JSON 调用远端卡牌/会话服务
//!
//! 远端 API:
//! POST {base}/sessions              Request: {"birth_years": [...], "themes": [...]}
//! GET  {base}/sessions/{id}         Response: session record
//! GET  {base}/sessions/{id}/cards   Response: [card, ...]（批量大小由远端决定）

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::application::ports::{GameApiError, GameApiPort};
use crate::domain::{Card, NewSession, Session};

/// HTTP 游戏服务客户端配置
#[derive(Debug, Clone)]
pub struct HttpGameApiClientConfig {
    /// 服务基础 URL，缺失时在第一次请求时报配置错误
    pub base_url: Option<String>,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 每批请求的卡牌数量，None 表示由远端决定
    pub batch_size: Option<u32>,
}

impl Default for HttpGameApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 30,
            batch_size: None,
        }
    }
}

impl HttpGameApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = Some(batch_size);
        self
    }
}

/// HTTP 游戏服务客户端
pub struct HttpGameApiClient {
    client: Client,
    config: HttpGameApiClientConfig,
}

impl HttpGameApiClient {
    /// 创建新的 HTTP 游戏服务客户端
    pub fn new(config: HttpGameApiClientConfig) -> Result<Self, GameApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GameApiError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 拼接接口 URL
    fn api_url(&self, endpoint: &str) -> Result<String, GameApiError> {
        let base = self
            .config
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| GameApiError::Configuration("API base URL is not defined".to_string()))?;

        Ok(format!("{}{}", base, endpoint))
    }

    fn map_send_error(e: reqwest::Error) -> GameApiError {
        if e.is_timeout() {
            GameApiError::Timeout
        } else if e.is_connect() {
            GameApiError::Network(format!("Cannot connect to game service: {}", e))
        } else {
            GameApiError::Network(e.to_string())
        }
    }

    /// 检查状态码并解析 JSON 响应体
    async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T, GameApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GameApiError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GameApiError::Service {
                status: status.as_u16(),
                message: error_text,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GameApiError::InvalidResponse(format!("Failed to decode {}: {}", what, e)))
    }
}

#[async_trait]
impl GameApiPort for HttpGameApiClient {
    async fn create_session(&self, request: NewSession) -> Result<Session, GameApiError> {
        let url = self.api_url("/sessions")?;

        tracing::debug!(
            url = %url,
            birth_years = ?request.birth_years,
            themes = ?request.themes,
            "Sending create session request"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let session: Session = Self::read_json(response, "session").await?;
        tracing::info!(session_id = %session.id, "Session created");
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<Session, GameApiError> {
        let url = self.api_url(&format!("/sessions/{}", session_id))?;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::read_json(response, &format!("session {}", session_id)).await
    }

    async fn fetch_cards(&self, session_id: &str) -> Result<Vec<Card>, GameApiError> {
        let url = self.api_url(&format!("/sessions/{}/cards", session_id))?;

        let mut request = self.client.get(&url);
        if let Some(count) = self.config.batch_size {
            request = request.query(&[("count", count)]);
        }

        tracing::debug!(url = %url, batch_size = ?self.config.batch_size, "Fetching cards");

        let response = request.send().await.map_err(Self::map_send_error)?;
        let cards: Vec<Card> = Self::read_json(response, &format!("cards for session {}", session_id)).await?;

        tracing::debug!(session_id = %session_id, count = cards.len(), "Card batch received");
        Ok(cards)
    }

    async fn health_check(&self) -> bool {
        let url = match self.api_url("/") {
            Ok(url) => url,
            Err(_) => return false,
        };

        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
