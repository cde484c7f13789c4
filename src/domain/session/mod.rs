//! Session Context - 游戏会话
//!
//! 会话由远端服务创建和持有，客户端只保存返回的会话记录

use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 游戏会话记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub themes: Vec<String>,
    pub birth_years: Vec<i32>,
}

/// 远端可能返回不带时区的时间戳，按 UTC 解释
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// 创建会话请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSession {
    pub birth_years: Vec<i32>,
    /// 话题（远端称为 themes）
    pub themes: Vec<String>,
}

impl NewSession {
    pub fn new(birth_years: Vec<i32>, topics: Vec<String>) -> Self {
        Self {
            birth_years,
            themes: topics,
        }
    }
}

/// 根据年龄推算出生年份
///
/// 以 `now` 所在的 UTC 年份为基准，负数年龄返回 `Err` 并携带该年龄
pub fn birth_years_from_ages(ages: &[i32], now: DateTime<Utc>) -> Result<Vec<i32>, i32> {
    let current_year = now.year();
    ages.iter()
        .map(|&age| {
            if age < 0 {
                Err(age)
            } else {
                Ok(current_year - age)
            }
        })
        .collect()
}
