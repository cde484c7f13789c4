//! Card Context - 游戏卡牌
//!
//! 卡牌是不可变的值对象：六个分类文本字段，没有身份标识，每张卡只被消费一次。

use serde::{Deserialize, Serialize};

/// 游戏卡牌
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub object: String,
    pub nature: String,
    pub person: String,
    pub action: String,
    pub world: String,
    /// 任意类别（通配）
    pub random: String,
}

impl Card {
    /// 按界面展示顺序返回 (类别, 内容)
    pub fn categories(&self) -> [(&'static str, &str); 6] {
        [
            ("object", self.object.as_str()),
            ("nature", self.nature.as_str()),
            ("person", self.person.as_str()),
            ("action", self.action.as_str()),
            ("world", self.world.as_str()),
            ("random", self.random.as_str()),
        ]
    }
}
