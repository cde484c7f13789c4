//! Card Commands - 取卡相关命令

/// 抽取下一张卡牌
#[derive(Debug, Clone)]
pub struct DrawCardCommand {
    pub session_id: String,
}

/// 开局发牌：每个牌堆一张
#[derive(Debug, Clone)]
pub struct DealHandCommand {
    pub session_id: String,
    pub decks: usize,
}

impl DealHandCommand {
    /// 默认两个牌堆（左右两侧）
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            decks: 2,
        }
    }
}
