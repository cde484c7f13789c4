//! Scripted Game API - 用于测试的远端服务
//!
//! 按顺序返回预设的卡牌批次，可选地用信号量阻塞拉取以控制完成时机

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

use crate::application::ports::{GameApiError, GameApiPort};
use crate::domain::{Card, NewSession, Session};

/// 构造测试卡牌，`object` 字段为 `{prefix}-{index}`
pub fn test_card(prefix: &str, index: usize) -> Card {
    Card {
        object: format!("{}-{}", prefix, index),
        nature: "river".to_string(),
        person: "Ada Lovelace".to_string(),
        action: "whistling".to_string(),
        world: "Mars".to_string(),
        random: "teapot".to_string(),
    }
}

pub fn test_cards(prefix: &str, count: usize) -> Vec<Card> {
    (0..count).map(|i| test_card(prefix, i)).collect()
}

/// 脚本化的远端服务
pub struct ScriptedGameApi {
    batches: Mutex<VecDeque<Result<Vec<Card>, GameApiError>>>,
    sessions: Mutex<HashMap<String, Session>>,
    /// 为 None 时拉取立即完成
    gate: Option<Semaphore>,
    fetch_calls: AtomicUsize,
}

impl ScriptedGameApi {
    /// 拉取立即返回；批次耗尽后返回空批次
    pub fn new(batches: Vec<Result<Vec<Card>, GameApiError>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            sessions: Mutex::new(HashMap::new()),
            gate: None,
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// 每次拉取都要等到 `release` 放行
    pub fn gated(batches: Vec<Result<Vec<Card>, GameApiError>>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(batches)
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 放行 `n` 次拉取
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameApiPort for ScriptedGameApi {
    async fn create_session(&self, request: NewSession) -> Result<Session, GameApiError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = Session {
            id: format!("session-{}", sessions.len() + 1),
            created_at: Utc::now(),
            themes: request.themes,
            birth_years: request.birth_years,
        };
        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> Result<Session, GameApiError> {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| GameApiError::NotFound(format!("session {}", session_id)))
    }

    async fn fetch_cards(&self, _session_id: &str) -> Result<Vec<Card>, GameApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| GameApiError::Network(e.to_string()))?
                .forget();
        }

        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
